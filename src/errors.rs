use std::fmt;

pub const REQUEST_FALLBACK: &str = "Error en la petición";

#[derive(Debug)]
pub enum ApiError {
    NotAuthenticated,
    Request { message: String },
}

impl ApiError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotAuthenticated => "Usuario no autenticado",
            Self::Request { message } => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::request(err.to_string())
    }
}

#[derive(Debug)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}
