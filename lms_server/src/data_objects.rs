use std::fmt::Display;

use lms_engine::db_types::Order;
use serde::{Deserialize, Serialize};

/// The standard status envelope returned by mutating endpoints. `icon` is one of `success`,
/// `warning` or `error` and drives the toast the frontend shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub message: String,
    pub icon: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { message: message.to_string(), icon: "success".to_string() }
    }

    pub fn warning<S: Display>(message: S) -> Self {
        Self { message: message.to_string(), icon: "warning".to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { message: message.to_string(), icon: "error".to_string() }
    }
}

/// A status envelope carrying the order it refers to, used by the coupon and payment
/// confirmation endpoints. Flattening keeps `message` and `icon` at the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub status: JsonResponse,
    pub order: Order,
}

impl OrderResponse {
    pub fn new(status: JsonResponse, order: Order) -> Self {
        Self { status, order }
    }
}

/// Payment confirmation request. Exactly one of `session_id` (card checkout) or
/// `wallet_order_id` (wallet checkout) must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmRequest {
    pub order_oid: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub wallet_order_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedLessonToggle {
    pub user_id: i64,
    pub course_id: i64,
    pub lesson_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistToggle {
    pub user_id: i64,
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteUpsert {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReviewRequest {
    pub user_id: i64,
    pub course_id: i64,
    pub rating: i64,
    pub review: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: i64,
    pub review: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub user_id: i64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaReply {
    pub qa_id: String,
    pub user_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Returned by the card checkout endpoint so the frontend can redirect the shopper to the
/// provider's hosted payment page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCheckoutResponse {
    pub session_id: String,
    pub url: String,
}
