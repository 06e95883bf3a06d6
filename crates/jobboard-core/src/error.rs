use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The record source (backend, transport) rejected the request.
    #[error("Record source failed: {0}")]
    Source(String),

    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown {kind}: {value:?}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: u64, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode { context: context.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
