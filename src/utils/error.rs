use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    PaymentError(String),
    InvalidId(String),
    InvalidRequest(String),
    Unauthorized(String),
    Forbidden(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::PaymentError(msg) => write!(f, "Payment error: {}", msg),
            AppError::InvalidId(msg) => write!(f, "Invalid id: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
