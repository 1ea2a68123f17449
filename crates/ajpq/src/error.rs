use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AjpError {
    Connect {
        addr: String,
        details: String,
    },
    Io {
        context: String,
        details: String,
    },
    /// The container sent a frame the client cannot interpret.
    Protocol {
        details: String,
    },
    Serialization {
        context: String,
        details: String,
    },
}

impl fmt::Display for AjpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AjpError::Connect { addr, details } => {
                write!(f, "Failed to connect to {addr}: {details}")
            }
            AjpError::Io { context, details } => {
                write!(f, "I/O error while {context}: {details}")
            }
            AjpError::Protocol { details } => write!(f, "Protocol error: {details}"),
            AjpError::Serialization { context, details } => {
                write!(f, "Serialization error in {context}: {details}")
            }
        }
    }
}

impl std::error::Error for AjpError {}

impl AjpError {
    pub fn from_io_error(e: std::io::Error, context: &str) -> Self {
        AjpError::Io {
            context: context.to_string(),
            details: e.to_string(),
        }
    }

    pub fn protocol(details: impl Into<String>) -> Self {
        AjpError::Protocol {
            details: details.into(),
        }
    }
}
