/// Failures reported by the data service or the money formatter.
///
/// Backend failures travel unchanged from the data service to whoever
/// triggered the fetch; nothing in this crate retries or substitutes values.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    Unavailable(String),
    MalformedData(String),
    Formatting(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ServiceError::MalformedData(msg) => write!(f, "Malformed data: {}", msg),
            ServiceError::Formatting(msg) => write!(f, "Formatting failed: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidParameter { name: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::InvalidParameter { name, reason } => {
                write!(f, "Invalid config parameter `{}`: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

/// Root error type for the crate
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Service(ServiceError),
    Config(ConfigError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Service(e) => write!(f, "{}", e),
            AppError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Service(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        AppError::Service(error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Config(error)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
