use thiserror::Error;

use crate::guestbook::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ServiceError {
    pub fn required(field: &str) -> Self { Self::InvalidInput(format!("{} is required", field)) }
}
