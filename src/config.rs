//! Wires the transport, the diagnostic link and the cache into a client.

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::sync::Arc;

use crate::{
    cache::QueryCache,
    client::GraphqlClient,
    link::{Chain, ErrorLink, HttpLink, Link},
    runtime::Runtime,
};

/// GitHub's GraphQL endpoint.
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub graphql: GraphqlClient,
}

impl<R: Runtime> Config<R> {
    /// Builds a client bound to `endpoint` (GitHub's GraphQL API when `None`).
    ///
    /// `GITHUB_TOKEN` is read once here. A missing token is not an error; the
    /// Authorization header is simply left off.
    pub fn new(runtime: R, endpoint: Option<String>) -> Result<Self> {
        let endpoint = endpoint.unwrap_or_else(|| GITHUB_GRAPHQL_URL.to_string());

        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let client = Client::builder()
            .user_agent("ghql-cli")
            .default_headers(headers)
            .build()?;

        let links: Vec<Arc<dyn Link>> = vec![
            Arc::new(ErrorLink::new()),
            Arc::new(HttpLink::new(client, endpoint)),
        ];
        let graphql = GraphqlClient::new(Chain::new(links), QueryCache::new());

        Ok(Self { runtime, graphql })
    }
}
