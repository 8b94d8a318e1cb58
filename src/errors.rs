use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Failed to read holdings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse holdings: {0}")]
    Parse(String),

    #[error("Price API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Portfolio is empty, nothing to report")]
    EmptyPortfolio,
}

impl WalletError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
