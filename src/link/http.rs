//! Terminal link performing the HTTP exchange with the GraphQL endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::{Link, Next};
use crate::graphql::{GraphqlRequest, GraphqlResponse};

/// Transport link bound to a single GraphQL endpoint.
///
/// Every operation is POSTed to the same URL. Static headers (user agent,
/// authorization) travel on the underlying reqwest client; no per-request
/// customization, no retry, no timeout beyond reqwest defaults.
pub struct HttpLink {
    client: Client,
    endpoint: String,
}

impl HttpLink {
    #[tracing::instrument(skip(client, endpoint))]
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Link for HttpLink {
    #[tracing::instrument(skip(self, request, _next))]
    async fn handle(&self, request: GraphqlRequest, _next: Next<'_>) -> Result<GraphqlResponse> {
        debug!("Sending GraphQL operation to {}...", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to GraphQL endpoint")?;

        let response = response
            .error_for_status()
            .context("GraphQL endpoint returned an error status")?;

        let parsed = response
            .json::<GraphqlResponse>()
            .await
            .context("Failed to parse JSON response from GraphQL endpoint")?;

        Ok(parsed)
    }
}
