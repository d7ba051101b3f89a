use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use gateway_clients::GatewayError;
use lms_engine::{CartApiError, CatalogApiError, OrderFlowError, StudentApiError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("The requested resource was not found. {0}")]
    NotFound(String),
    #[error("The request body was not well formed. {0}")]
    InvalidRequestBody(String),
    #[error("The payment provider rejected the request. {0}")]
    PaymentProviderError(String),
    #[error("A backend storage error happened. {0}")]
    BackendError(String),
    #[error("An IO error happened. {0}")]
    IOError(#[from] std::io::Error),
    #[error("An unspecified error happened. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequestBody(_) | Self::PaymentProviderError(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) | Self::BackendError(_) | Self::IOError(_) | Self::Unspecified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = self.to_string();
        let body = json!({ "error": msg });
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::DatabaseError(s) => ServerError::BackendError(s),
        }
    }
}

impl From<CartApiError> for ServerError {
    fn from(e: CartApiError) -> Self {
        match e {
            CartApiError::CourseNotFound(_) | CartApiError::ItemNotFound => ServerError::NotFound(e.to_string()),
            CartApiError::UnknownCountry(_) => ServerError::InvalidRequestBody(e.to_string()),
            CartApiError::DatabaseError(s) => ServerError::BackendError(s),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::OrderNotFound(_) | OrderFlowError::CouponNotFound(_) => {
                ServerError::NotFound(e.to_string())
            },
            OrderFlowError::CartEmpty(_) | OrderFlowError::CouponNotApplicable(_) | OrderFlowError::GuestOrder(_) => {
                ServerError::InvalidRequestBody(e.to_string())
            },
            OrderFlowError::DatabaseError(s) => ServerError::BackendError(s),
        }
    }
}

impl From<StudentApiError> for ServerError {
    fn from(e: StudentApiError) -> Self {
        match e {
            StudentApiError::EnrollmentNotFound(_) |
            StudentApiError::CourseNotFound(_) |
            StudentApiError::LessonNotFound(_) |
            StudentApiError::QuestionNotFound(_) => ServerError::NotFound(e.to_string()),
            StudentApiError::DatabaseError(s) => ServerError::BackendError(s),
        }
    }
}

impl From<GatewayError> for ServerError {
    fn from(e: GatewayError) -> Self {
        ServerError::PaymentProviderError(e.to_string())
    }
}
