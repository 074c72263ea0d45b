use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GraphQL operation (query or mutation) ready to send.
///
/// Serializes to the standard GraphQL-over-HTTP POST body: `query`,
/// `variables` and, when present, `operationName`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub variables: Value,
    #[serde(
        default,
        rename = "operationName",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Value::Null,
            operation_name: None,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// The body returned by a GraphQL endpoint: optional data plus any
/// application-level errors reported alongside it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    /// True when the response carries no application-level errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Deserializes the `data` field into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self
            .data
            .clone()
            .context("GraphQL response contains no data")?;
        serde_json::from_value(data).context("Failed to deserialize GraphQL response data")
    }
}

/// An application-level error returned alongside a GraphQL response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<ErrorLocation>,
    #[serde(default)]
    pub path: Vec<PathSegment>,
}

impl GraphqlError {
    /// Compact JSON rendering of the locations, e.g. `[{"line":2,"column":3}]`.
    pub fn locations_json(&self) -> String {
        serde_json::to_string(&self.locations).unwrap_or_else(|_| "[]".to_string())
    }

    /// Dotted rendering of the response path, e.g. `repository.issues.0`.
    pub fn path_display(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Location of an error within the query document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// One segment of the response path an error applies to: a field name or a
/// list index.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(u64),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}
