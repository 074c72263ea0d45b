//! Diagnostic link that observes operation outcomes without altering them.

use anyhow::Result;
use async_trait::async_trait;

use super::{Link, Next};
use crate::graphql::{GraphqlRequest, GraphqlResponse};

/// Receives the diagnostic lines produced by [`ErrorLink`].
pub trait DiagnosticSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Writes diagnostic lines to stderr.
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Pass-through link logging every failed operation.
///
/// Each application-level error in a completed response produces one line;
/// a transport failure produces a single line. The request and the outcome
/// are forwarded untouched in both cases.
pub struct ErrorLink<S> {
    sink: S,
}

impl ErrorLink<ConsoleSink> {
    pub fn new() -> Self {
        Self { sink: ConsoleSink }
    }
}

impl Default for ErrorLink<ConsoleSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> ErrorLink<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl<S: DiagnosticSink> Link for ErrorLink<S> {
    async fn handle(&self, request: GraphqlRequest, next: Next<'_>) -> Result<GraphqlResponse> {
        match next.run(request).await {
            Ok(response) => {
                for error in &response.errors {
                    self.sink.write_line(&format!(
                        "[GraphQL error]: Message: {}, Location: {}, Path: {}",
                        error.message,
                        error.locations_json(),
                        error.path_display()
                    ));
                }
                Ok(response)
            }
            Err(error) => {
                self.sink.write_line(&format!("[Network error]: {}", error));
                Err(error)
            }
        }
    }
}
