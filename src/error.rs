use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid topic filter pattern: {0}")]
    FilterPattern(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inconsistent gateway response: {0}")]
    PartialState(String),

    #[error("Operation dropped before producing an outcome")]
    Abandoned,
}

impl Error {
    pub(crate) fn missing_description(topic: &str) -> Self {
        Self::PartialState(format!("no description returned for topic \"{topic}\""))
    }

    pub(crate) fn missing_config(topic: &str) -> Self {
        Self::PartialState(format!("no configuration returned for topic \"{topic}\""))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
