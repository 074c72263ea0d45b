//! Middleware chain for GraphQL operations.
//!
//! A [`Chain`] is an explicit ordered list of [`Link`]s composed at
//! construction time. A request enters the first link; each link observes the
//! exchange and forwards it through [`Next`] until a terminal link (the HTTP
//! transport) produces the response.

mod error;
mod http;

pub use error::{ConsoleSink, DiagnosticSink, ErrorLink};
pub use http::HttpLink;

use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::graphql::{GraphqlRequest, GraphqlResponse};

/// A middleware unit in the request pipeline.
///
/// Non-terminal links must forward the request via `next`; a terminal link
/// produces the response itself and ignores `next`.
#[async_trait]
pub trait Link: Send + Sync {
    async fn handle(&self, request: GraphqlRequest, next: Next<'_>) -> Result<GraphqlResponse>;
}

/// The remainder of the chain after the current link.
pub struct Next<'a> {
    links: &'a [Arc<dyn Link>],
}

impl Next<'_> {
    /// Forwards the request to the next link in the chain.
    pub async fn run(self, request: GraphqlRequest) -> Result<GraphqlResponse> {
        match self.links.split_first() {
            Some((head, rest)) => head.handle(request, Next { links: rest }).await,
            None => bail!("Link chain ended without a terminal transport link"),
        }
    }
}

/// An ordered list of links composed once at construction time.
#[derive(Clone)]
pub struct Chain {
    links: Arc<[Arc<dyn Link>]>,
}

impl Chain {
    pub fn new(links: Vec<Arc<dyn Link>>) -> Self {
        Self {
            links: links.into(),
        }
    }

    /// Runs a request through every link in order.
    #[tracing::instrument(skip(self, request))]
    pub async fn run(&self, request: GraphqlRequest) -> Result<GraphqlResponse> {
        Next { links: &self.links }.run(request).await
    }
}
