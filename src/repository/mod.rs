//! Store operations. Every function takes the pool (or an open transaction)
//! explicitly; integrity rests on the schema's constraints.

pub mod employees;
pub mod presence;
pub mod summary;
pub mod teams;

use crate::error::AppError;

pub type RepoResult<T> = Result<T, AppError>;

/// Trims `name` and rejects it when nothing is left.
pub fn required_name(name: &str) -> RepoResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    Ok(name.to_string())
}
