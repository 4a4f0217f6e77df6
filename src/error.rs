use std::fmt;

#[derive(Debug)]
pub enum ProbeError {
    ConfigError(String),
    TransportError(String),
    ServerError { status: u16, body: String },
    ResponseError(String),
    DecodeError(String),
    IoError(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ProbeError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            ProbeError::ServerError { status, body } => {
                write!(f, "Server error: status {}: {}", status, body)
            }
            ProbeError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            ProbeError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            ProbeError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ProbeError {}

pub type Result<T> = std::result::Result<T, ProbeError>;
