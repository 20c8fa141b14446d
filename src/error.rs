use thiserror::Error;

pub type ChainPilotResult<T> = Result<T, ChainPilotError>;

#[derive(Error, Debug)]
pub enum ChainPilotError {
    /// A required command field is missing or malformed. Recovered locally,
    /// never sent to the execution agent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The language-model boundary could not be reached or returned a
    /// transport-level failure. The model declining to produce a command is
    /// NOT this error; that is a normal `Resolution::Reply`.
    #[error("Resolver unavailable: {0}")]
    ResolverUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ChainPilotError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ChainPilotError::Validation(msg.into())
    }

    pub fn resolver_unavailable<T: Into<String>>(msg: T) -> Self {
        ChainPilotError::ResolverUnavailable(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ChainPilotError::Config(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ChainPilotError::InvalidInput(msg.into())
    }
}
