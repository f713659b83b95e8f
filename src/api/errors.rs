use actix_web::{
    body::BoxBody,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use diesel::result::{DatabaseErrorKind, Error as DBError};
use serde_json::json;
use std::convert::From;
use uuid::Error as ParseError;

#[derive(Debug, Display)]
pub enum TodoApiError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),

    /// The store could not be reached
    #[display(fmt = "Database Connection Error")]
    DatabaseConnectionError,

    #[display(fmt = "{} Not Found", _0)]
    NotFound(String),
}

impl TodoApiError {
    pub fn to_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
            TodoApiError::BadRequest(_) => http::StatusCode::BAD_REQUEST,
            TodoApiError::DatabaseConnectionError => http::StatusCode::SERVICE_UNAVAILABLE,
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        res.set_body(BoxBody::new(json!({"error": self.to_string()}).to_string()))
    }
}

impl From<ParseError> for TodoApiError {
    fn from(_: ParseError) -> Self {
        TodoApiError::BadRequest("Invalid Todo Id".to_string())
    }
}

impl From<r2d2::Error> for TodoApiError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Connection pool error {}", err);
        TodoApiError::DatabaseConnectionError
    }
}

impl From<DBError> for TodoApiError {
    fn from(error: DBError) -> Self {
        match error {
            DBError::NotFound => TodoApiError::NotFound(String::from("Todo")),
            DBError::DatabaseError(kind, info) => {
                let message: String = info.details().unwrap_or_else(|| info.message()).to_string();

                match kind {
                    DatabaseErrorKind::UniqueViolation => TodoApiError::BadRequest(message),
                    DatabaseErrorKind::UnableToSendCommand => {
                        log::error!("Db unreachable {}", message);
                        TodoApiError::DatabaseConnectionError
                    }
                    _ => {
                        log::error!("Db error {}", message);
                        TodoApiError::InternalServerError
                    }
                }
            }
            other => {
                log::error!("Db error {}", other);
                TodoApiError::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod errors_test {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TodoApiError::BadRequest("x".into()).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TodoApiError::NotFound("Todo".into()).status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            TodoApiError::DatabaseConnectionError.status_code(),
            http::StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            TodoApiError::InternalServerError.status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_is_json() {
        let res = TodoApiError::NotFound("Todo".into()).to_response();

        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = res.into_body().try_into_bytes().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value, json!({"error": "Todo Not Found"}));
    }

    #[test]
    fn test_diesel_not_found_maps_to_404() {
        let err: TodoApiError = DBError::NotFound.into();

        assert!(matches!(err, TodoApiError::NotFound(_)));
    }

    #[test]
    fn test_bad_uuid_maps_to_400() {
        let err: TodoApiError = uuid::Uuid::parse_str("not-a-uuid").unwrap_err().into();

        assert!(matches!(err, TodoApiError::BadRequest(_)));
    }
}
