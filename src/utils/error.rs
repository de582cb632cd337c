use thiserror::Error;

#[derive(Error, Debug)]
pub enum YtError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}: {body}")]
    StatusError {
        status: u16,
        url: String,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    #[error("Cookie not found: {name}")]
    MissingCookieError { name: String },

    #[error("Could not find embedded {name} in page")]
    MissingEmbeddedJsonError { name: String },

    #[error("ytcfg key missing: {key}")]
    MissingYtcfgKeyError { key: String },

    #[error("Key path {path} is missing segment {segment}")]
    MissingKeyPathError { path: String, segment: String },

    #[error("Unexpected response: {message}")]
    UnexpectedResponseError { message: String },

    #[error("Playlist {playlist_id} might be empty")]
    EmptyPlaylistError { playlist_id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },
}

impl YtError {
    /// 網路層錯誤與暫時性狀態 (5xx、408、429) 可重試，其餘 4xx 與解析、授權錯誤直接回報
    pub fn is_retryable(&self) -> bool {
        match self {
            YtError::HttpError(_) => true,
            YtError::StatusError { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            _ => false,
        }
    }

    pub fn not_logged_in() -> Self {
        YtError::AuthenticationError {
            message: "This method requires a call to login() first".to_string(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        YtError::UnexpectedResponseError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, YtError>;
