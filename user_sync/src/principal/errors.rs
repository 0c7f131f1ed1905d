use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Identity session unavailable: {0}")]
    Unavailable(String),
}
