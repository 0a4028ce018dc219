use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Server(String),
}

impl ActionError {
    pub fn validation(message: impl Into<String>) -> Self {
        ActionError::Validation(message.into())
    }

    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Network(message) => {
                ActionError::Network(format!("Could not reach the server: {message}"))
            }
            ApiError::Server { message, .. } => {
                let message = message.trim();
                if message.is_empty() {
                    ActionError::Server(fallback.to_string())
                } else {
                    ActionError::Server(message.to_string())
                }
            }
            ApiError::Decode(_) => ActionError::Server(fallback.to_string()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Validation(_) => ErrorKind::Validation,
            ActionError::Network(_) => ErrorKind::Network,
            ActionError::Server(_) => ErrorKind::Server,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ActionError::Validation(message)
            | ActionError::Network(message)
            | ActionError::Server(message) => message,
        }
    }
}

pub fn server_message(body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(serde_json::Value::String(error)) = map.get("error") {
            return error.trim().to_string();
        }
    }
    body.trim().to_string()
}
