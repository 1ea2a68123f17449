use ajpq::AjpError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CliError {
    UnsupportedMethod {
        method: String,
    },
    /// A request item had a separator but one side of it was empty.
    MalformedItem {
        token: String,
    },
    ConflictingBodyModes,
    InvalidUrl {
        url: String,
        details: String,
    },
    Output {
        details: String,
    },
    /// Executor failure, propagated unchanged.
    Ajp(AjpError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "Unsupported method '{method}' (expected one of DELETE, GET, HEAD, OPTIONS, POST, PUT, COPY)"
                )
            }
            CliError::MalformedItem { token } => {
                write!(
                    f,
                    "Malformed request item '{token}': separator present but name or value is empty"
                )
            }
            CliError::ConflictingBodyModes => {
                write!(f, "--form and --json are mutually exclusive")
            }
            CliError::InvalidUrl { url, details } => {
                write!(f, "Invalid URL '{url}': {details}")
            }
            CliError::Output { details } => write!(f, "Failed to write output: {details}"),
            CliError::Ajp(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<AjpError> for CliError {
    fn from(err: AjpError) -> Self {
        CliError::Ajp(err)
    }
}
