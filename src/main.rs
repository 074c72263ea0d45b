use anyhow::{Context, Result, bail};
use clap::Parser;
use ghql::config::Config;
use ghql::graphql::{GraphqlRequest, GraphqlResponse};
use ghql::runtime::RealRuntime;
use std::path::PathBuf;

/// ghql - GitHub GraphQL client
///
/// Run GraphQL queries and mutations against the GitHub API.
///
/// If the GITHUB_TOKEN environment variable is set, it is sent as a Bearer
/// Authorization header on every request.
///
/// Examples:
///   ghql query '{ viewer { login } }'
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GraphQL endpoint (defaults to https://api.github.com/graphql)
    #[arg(
        long = "endpoint",
        value_name = "URL",
        env = "GHQL_ENDPOINT",
        global = true
    )]
    pub endpoint: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a query against the endpoint
    Query(OperationArgs),

    /// Run a mutation against the endpoint
    Mutate(OperationArgs),
}

#[derive(clap::Args, Debug)]
pub struct OperationArgs {
    /// The GraphQL document text (omit when using --file)
    #[arg(
        value_name = "DOCUMENT",
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    pub document: Option<String>,

    /// Read the GraphQL document from a file
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Operation variables as a JSON object
    #[arg(long = "variables", value_name = "JSON")]
    pub variables: Option<String>,

    /// Operation name within the document
    #[arg(long = "operation-name", value_name = "NAME")]
    pub operation_name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(RealRuntime, cli.endpoint)?;

    let response = match cli.command {
        Commands::Query(args) => {
            let request = build_request(&args)?;
            config.graphql.query(request).await?
        }
        Commands::Mutate(args) => {
            let request = build_request(&args)?;
            config.graphql.mutate(request).await?
        }
    };

    print_response(&response)
}

fn build_request(args: &OperationArgs) -> Result<GraphqlRequest> {
    let document = match (&args.document, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read GraphQL document from {}", path.display()))?,
        (None, None) => bail!("A GraphQL document or --file is required"),
    };

    let mut request = GraphqlRequest::new(document);
    if let Some(json) = &args.variables {
        let variables =
            serde_json::from_str(json).context("Failed to parse --variables as JSON")?;
        request = request.with_variables(variables);
    }
    if let Some(name) = &args.operation_name {
        request = request.with_operation_name(name);
    }
    Ok(request)
}

fn print_response(response: &GraphqlResponse) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(response).context("Failed to render GraphQL response")?;
    println!("{}", rendered);
    Ok(())
}
