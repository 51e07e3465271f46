use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Response envelope: either `data` or a non-empty `errors` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The engine reported errors; holds the first message.
    Reported(String),
    /// Neither `data` nor `errors` were present.
    MissingData,
}

impl<T> GraphQlResponse<T> {
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(EnvelopeError::Reported(first.message));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}
