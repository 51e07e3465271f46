use gritboard_api_types::graphql::{GraphQlRequest, GraphQlResponse};
use log::{info, warn};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_SIGNIN_URL: &str = "https://01.gritlab.ax/api/auth/signin";
pub const DEFAULT_GRAPHQL_URL: &str = "https://01.gritlab.ax/api/graphql-engine/v1/graphql";

#[derive(Error, Debug)]
pub enum Error {
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP Error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Signin failed: {status} {body}")]
    SigninRejected { status: u16, body: String },
    #[error("Query failed with HTTP status {0}")]
    QueryStatus(u16),
}

/// Talks to the platform's sign-in endpoint and GraphQL engine.
#[derive(Clone, Debug)]
pub struct GritlabClient {
    client: Client,
    signin_url: Url,
    graphql_url: Url,
}

impl GritlabClient {
    pub fn new(signin_url: &str, graphql_url: &str) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build()?,
            signin_url: Url::parse(signin_url)?,
            graphql_url: Url::parse(graphql_url)?,
        })
    }

    pub fn with_default_endpoints() -> Result<Self, Error> {
        Self::new(DEFAULT_SIGNIN_URL, DEFAULT_GRAPHQL_URL)
    }

    pub fn signin_url(&self) -> &Url {
        &self.signin_url
    }

    pub fn graphql_url(&self) -> &Url {
        &self.graphql_url
    }

    /// Basic-auth sign in. Returns the raw response body, which carries the token.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<String, Error> {
        info!("signing in {username} at {}", self.signin_url);
        let response = self
            .client
            .post(self.signin_url.clone())
            .basic_auth(username, Some(password))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("sign in rejected with {status}");
            return Err(Error::SigninRejected {
                status: status.as_u16(),
                body: rejection_message(&body),
            });
        }
        Ok(body)
    }

    /// Posts `query` with the bearer token and decodes the response envelope.
    pub async fn query<T>(&self, query: &str, token: &str) -> Result<GraphQlResponse<T>, Error>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.graphql_url.clone())
            .bearer_auth(token)
            .json(&GraphQlRequest { query })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

/// Decodes a GraphQL envelope. A body that is not an envelope is reported by status
/// when the request itself failed.
fn decode_envelope<T>(status: StatusCode, body: &str) -> Result<GraphQlResponse<T>, Error>
where
    T: DeserializeOwned,
{
    match serde_json::from_str::<GraphQlResponse<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(Error::QueryStatus(status.as_u16())),
        Err(e) => Err(e.into()),
    }
}

fn rejection_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        "Invalid credentials".to_string()
    } else {
        body.to_string()
    }
}
