//! GraphQL wire types shared by the link chain and the client.

mod types;

pub use types::{ErrorLocation, GraphqlError, GraphqlRequest, GraphqlResponse, PathSegment};
