//! GraphQL client: a link chain plus an instance-scoped response cache.

use anyhow::Result;
use log::debug;

use crate::cache::QueryCache;
use crate::graphql::{GraphqlRequest, GraphqlResponse};
use crate::link::Chain;

/// Executes GraphQL operations through the link chain and keeps error-free
/// query results in an in-memory cache.
pub struct GraphqlClient {
    chain: Chain,
    cache: QueryCache,
}

impl GraphqlClient {
    pub fn new(chain: Chain, cache: QueryCache) -> Self {
        Self { chain, cache }
    }

    /// Runs a query, answering from the cache when an identical request has
    /// already completed without errors.
    #[tracing::instrument(skip(self, request))]
    pub async fn query(&self, request: GraphqlRequest) -> Result<GraphqlResponse> {
        if let Some(data) = self.cache.get(&request) {
            debug!("Answering query from cache");
            return Ok(GraphqlResponse {
                data: Some(data.as_ref().clone()),
                errors: Vec::new(),
            });
        }

        let response = self.chain.run(request.clone()).await?;
        if response.is_ok() {
            if let Some(data) = &response.data {
                self.cache.insert(&request, data.clone());
            }
        }
        Ok(response)
    }

    /// Runs a mutation. Mutations always reach the endpoint and never touch
    /// the cache.
    #[tracing::instrument(skip(self, request))]
    pub async fn mutate(&self, request: GraphqlRequest) -> Result<GraphqlResponse> {
        self.chain.run(request).await
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{HttpLink, Link};
    use reqwest::Client;
    use serde_json::json;
    use std::sync::Arc;

    fn client_for(endpoint: String) -> GraphqlClient {
        let links: Vec<Arc<dyn Link>> = vec![Arc::new(HttpLink::new(Client::new(), endpoint))];
        GraphqlClient::new(Chain::new(links), QueryCache::new())
    }

    #[tokio::test]
    async fn test_repeated_query_is_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"viewer": {"login": "octocat"}}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(url);
        let request = GraphqlRequest::new("{ viewer { login } }");

        let first = client.query(request.clone()).await.unwrap();
        let second = client.query(request).await.unwrap();

        // One network exchange; the second answer comes from the cache.
        mock.assert_async().await;
        assert_eq!(first.data, second.data);
        assert_eq!(second.data, Some(json!({"viewer": {"login": "octocat"}})));
    }

    #[tokio::test]
    async fn test_mutation_bypasses_cache() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"addStar": {"clientMutationId": null}}}"#)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(url);
        let request = GraphqlRequest::new("mutation { addStar(input: {}) { clientMutationId } }");

        client.mutate(request.clone()).await.unwrap();
        client.mutate(request.clone()).await.unwrap();

        mock.assert_async().await;
        assert!(client.cache().get(&request).is_none());
    }

    #[tokio::test]
    async fn test_responses_with_errors_are_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": null, "errors": [{"message": "Not found"}]}"#)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(url);
        let request = GraphqlRequest::new("{ repository { id } }");

        let first = client.query(request.clone()).await.unwrap();
        let second = client.query(request).await.unwrap();

        mock.assert_async().await;
        assert!(!first.is_ok());
        assert!(!second.is_ok());
    }

    #[tokio::test]
    async fn test_separately_built_clients_do_not_share_cache() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"viewer": {"login": "octocat"}}}"#)
            .expect(2)
            .create_async()
            .await;

        let first = client_for(url.clone());
        let second = client_for(url);
        let request = GraphqlRequest::new("{ viewer { login } }");

        first.query(request.clone()).await.unwrap();
        second.query(request).await.unwrap();

        // Each client hits the network once; nothing is shared between them.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(url);
        let result = client.query(GraphqlRequest::new("{ viewer { login } }")).await;

        mock.assert_async().await;
        assert!(result.is_err());
    }
}
