use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({ "error": "Employee not found" }))]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Display)]
pub enum AppError {
    /// Missing or malformed input.
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{}", _0)]
    NotFound(&'static str),

    /// Presence can only be recorded for active employees.
    #[display(fmt = "Employee is inactive")]
    EmployeeInactive,

    /// A uniqueness constraint rejected the write; carries the store's message.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn team_not_found() -> Self {
        AppError::NotFound("Team not found")
    }

    pub fn employee_not_found() -> Self {
        AppError::NotFound("Employee not found")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            if db_err.is_unique_violation() {
                return AppError::Conflict(message);
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Validation(message);
            }
            if db_err.is_check_violation() {
                return AppError::Validation(message);
            }
        }
        AppError::Database(err)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::EmployeeInactive | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Store operation failed");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::Validation("Name is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::employee_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::EmployeeInactive.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn store_failures_do_not_leak_details() {
        let resp = AppError::Database(sqlx::Error::PoolTimedOut).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Internal Server Error" }));
    }

    #[actix_web::test]
    async fn inactive_message_is_user_facing() {
        let resp = AppError::EmployeeInactive.error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Employee is inactive");
    }
}
