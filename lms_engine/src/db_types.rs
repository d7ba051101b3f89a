//! Data types as they are stored in the relational schema.
//!
//! These are plain records. Behaviour lives in the [`crate::api`] layer; the structs here map
//! one-to-one onto table rows and are shared between the trait seams, the SQLite backend and the
//! server's JSON responses.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use lms_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   PublishStatus   -----------------------------------------------------------
/// Publication state for a course. A course is only visible in the catalog when *both* the
/// platform and the teacher have set it to `Published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PublishStatus {
    Draft,
    InReview,
    Published,
    Disabled,
}

impl Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStatus::Draft => write!(f, "Draft"),
            PublishStatus::InReview => write!(f, "InReview"),
            PublishStatus::Published => write!(f, "Published"),
            PublishStatus::Disabled => write!(f, "Disabled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid status value: {0}")]
pub struct StatusConversionError(pub String);

impl FromStr for PublishStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "InReview" => Ok(Self::InReview),
            "Published" => Ok(Self::Published),
            "Disabled" => Ok(Self::Disabled),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------   PaymentStatus   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The order has been created and is awaiting payment confirmation.
    Processing,
    /// Payment has been confirmed. Confirming again is a no-op.
    Paid,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Processing => write!(f, "Processing"),
            PaymentStatus::Paid => write!(f, "Paid"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Processing" => Ok(Self::Processing),
            "Paid" => Ok(Self::Paid),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------     OrderOid      -----------------------------------------------------------
/// The public order identifier handed to clients, as opposed to the internal row id.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderOid(pub String);

impl Display for OrderOid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderOid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------      Country      -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    /// Tax rate as a percentage, e.g. 7.5 means 7.5%.
    pub tax_rate: f64,
    pub active: bool,
}

//--------------------------------------     Category      -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub active: bool,
}

//--------------------------------------      Course       -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub category_id: Option<i64>,
    pub teacher_id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: Cents,
    pub platform_status: PublishStatus,
    pub teacher_course_status: PublishStatus,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn is_published(&self) -> bool {
        self.platform_status == PublishStatus::Published && self.teacher_course_status == PublishStatus::Published
    }
}

//--------------------------------------      Lesson       -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub duration_secs: i64,
}

//--------------------------------------     CartItem      -----------------------------------------------------------
/// A single cart line. At most one row exists per (cart_id, course_id); mutations recompute
/// `tax_fee` and `total` so that `total == price + tax_fee` always holds.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: String,
    pub course_id: i64,
    pub user_id: Option<i64>,
    pub price: Cents,
    pub tax_fee: Cents,
    pub total: Cents,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub cart_id: String,
    pub course_id: i64,
    pub user_id: Option<i64>,
    pub price: Cents,
    pub tax_fee: Cents,
    pub total: Cents,
    pub country: String,
}

//--------------------------------------       Order       -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub oid: OrderOid,
    pub user_id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub country: String,
    pub sub_total: Cents,
    pub tax_fee: Cents,
    pub total: Cents,
    pub initial_total: Cents,
    pub saved: Cents,
    pub payment_status: PaymentStatus,
    pub card_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------     OrderItem     -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub price: Cents,
    pub tax_fee: Cents,
    pub total: Cents,
    pub initial_total: Cents,
    pub saved: Cents,
    pub applied_coupon: bool,
}

//--------------------------------------      Coupon       -----------------------------------------------------------
/// A percentage discount scoped to a single teacher's courses.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    pub teacher_id: i64,
    pub code: String,
    pub discount_percent: i64,
    pub active: bool,
}

//--------------------------------------    Enrollment     -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub enrollment_id: String,
    pub user_id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub order_item_id: i64,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   Notification    -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Sent to the student when their order's enrollments have been created.
    CourseEnrollmentCompleted,
    /// Sent to a teacher for each of their line items in a newly paid order.
    NewOrder,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::CourseEnrollmentCompleted => write!(f, "CourseEnrollmentCompleted"),
            NotificationKind::NewOrder => write!(f, "NewOrder"),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub order_id: i64,
    pub order_item_id: Option<i64>,
    pub kind: NotificationKind,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------  CompletedLesson  -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompletedLesson {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub lesson_id: i64,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       Note        -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub user_id: i64,
    pub course_id: i64,
    pub title: String,
    pub body: String,
}

//--------------------------------------      Review       -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub rating: i64,
    pub review: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: i64,
    pub course_id: i64,
    pub rating: i64,
    pub review: String,
}

//--------------------------------------  WishlistEntry    -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
}

//--------------------------------------     Question      -----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub qa_id: String,
    pub user_id: i64,
    pub course_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionMessage {
    pub id: i64,
    pub question_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A question together with all its messages, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionThread {
    pub question: Question,
    pub messages: Vec<QuestionMessage>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn statuses_round_trip_through_their_display_form() {
        for status in [PaymentStatus::Processing, PaymentStatus::Paid] {
            assert_eq!(status.to_string().parse::<PaymentStatus>().unwrap(), status);
        }
        for status in [PublishStatus::Draft, PublishStatus::InReview, PublishStatus::Published, PublishStatus::Disabled]
        {
            assert_eq!(status.to_string().parse::<PublishStatus>().unwrap(), status);
        }
        assert!("Cancelled".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn order_oids_display_with_a_hash_prefix() {
        let oid = OrderOid("AbCdEf123456".to_string());
        assert_eq!(oid.to_string(), "#AbCdEf123456");
        assert_eq!(oid.as_str(), "AbCdEf123456");
    }
}
