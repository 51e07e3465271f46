//! Seams to the external identity provider and query engine.

use async_trait::async_trait;
use gritboard_api_types::graphql::GraphQlResponse;
use gritlab_client::GritlabClient;
use serde_json::Value;

use crate::error::{AuthError, DashboardError};

#[async_trait]
pub trait IdentityProvider {
    /// Returns the raw sign-in response body.
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, AuthError>;
}

#[async_trait]
pub trait QueryCollaborator {
    /// Runs `query` with the bearer token, returning the undecoded envelope.
    async fn execute(&self, query: &str, token: &str)
        -> Result<GraphQlResponse<Value>, DashboardError>;
}

#[async_trait]
impl IdentityProvider for GritlabClient {
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, AuthError> {
        Ok(GritlabClient::sign_in(self, username, password).await?)
    }
}

#[async_trait]
impl QueryCollaborator for GritlabClient {
    async fn execute(
        &self,
        query: &str,
        token: &str,
    ) -> Result<GraphQlResponse<Value>, DashboardError> {
        Ok(self.query::<Value>(query, token).await?)
    }
}
