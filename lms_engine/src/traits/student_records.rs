use thiserror::Error;

use crate::{
    db_types::{Enrollment, NewNote, NewReview, Note, QuestionThread, Review, WishlistEntry},
    traits::{StudentSummary, ToggleOutcome},
};

/// Student learning records. Everything here is scoped by ownership: lookups always match on the
/// user id *and* the record id, so one student can never read or mutate another's records.
#[allow(async_fn_in_trait)]
pub trait StudentRecords: Clone {
    async fn fetch_summary(&self, user_id: i64) -> Result<StudentSummary, StudentApiError>;

    async fn fetch_enrollments_for_user(&self, user_id: i64) -> Result<Vec<Enrollment>, StudentApiError>;

    async fn fetch_enrollment(&self, user_id: i64, enrollment_id: &str)
        -> Result<Option<Enrollment>, StudentApiError>;

    /// Toggle semantics: an existing (user, course, lesson) completion record is deleted, a
    /// missing one is created.
    async fn toggle_completed_lesson(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<ToggleOutcome, StudentApiError>;

    /// Toggle semantics on (user, course) wishlist membership.
    async fn toggle_wishlist(&self, user_id: i64, course_id: i64) -> Result<ToggleOutcome, StudentApiError>;

    async fn fetch_wishlist(&self, user_id: i64) -> Result<Vec<WishlistEntry>, StudentApiError>;

    async fn fetch_notes(&self, user_id: i64, course_id: i64) -> Result<Vec<Note>, StudentApiError>;

    async fn create_note(&self, note: NewNote) -> Result<Note, StudentApiError>;

    async fn fetch_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<Option<Note>, StudentApiError>;

    async fn update_note(
        &self,
        user_id: i64,
        course_id: i64,
        note_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Option<Note>, StudentApiError>;

    async fn delete_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<bool, StudentApiError>;

    async fn create_review(&self, review: NewReview) -> Result<Review, StudentApiError>;

    async fn fetch_review(&self, user_id: i64, review_id: i64) -> Result<Option<Review>, StudentApiError>;

    async fn update_review(
        &self,
        user_id: i64,
        review_id: i64,
        rating: i64,
        review: &str,
    ) -> Result<Option<Review>, StudentApiError>;

    /// All Q&A threads for the course, each with its messages oldest-first.
    async fn fetch_questions_for_course(&self, course_id: i64) -> Result<Vec<QuestionThread>, StudentApiError>;

    /// Creates a question and its first message in the same transaction.
    async fn create_question(
        &self,
        user_id: i64,
        course_id: i64,
        title: &str,
        message: &str,
    ) -> Result<QuestionThread, StudentApiError>;

    /// Appends a message to the thread and returns the updated thread.
    async fn reply_to_question(
        &self,
        qa_id: &str,
        user_id: i64,
        message: &str,
    ) -> Result<Option<QuestionThread>, StudentApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum StudentApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Enrollment '{0}' does not exist for this student")]
    EnrollmentNotFound(String),
    #[error("Course {0} does not exist")]
    CourseNotFound(i64),
    #[error("Lesson {0} does not exist")]
    LessonNotFound(i64),
    #[error("Question thread '{0}' does not exist")]
    QuestionNotFound(String),
}

impl From<sqlx::Error> for StudentApiError {
    fn from(e: sqlx::Error) -> Self {
        StudentApiError::DatabaseError(e.to_string())
    }
}

impl From<crate::traits::CatalogApiError> for StudentApiError {
    fn from(e: crate::traits::CatalogApiError) -> Self {
        match e {
            crate::traits::CatalogApiError::DatabaseError(s) => StudentApiError::DatabaseError(s),
        }
    }
}
