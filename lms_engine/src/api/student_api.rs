use log::*;

use crate::{
    db_types::{Enrollment, NewNote, NewReview, Note, QuestionThread, Review, WishlistEntry},
    traits::{CatalogManagement, StudentApiError, StudentRecords, StudentSummary, ToggleOutcome},
};

/// `StudentApi` covers everything a signed-in student does after purchase: course progress,
/// notes, reviews, wishlist and course Q&A.
#[derive(Debug, Clone)]
pub struct StudentApi<B> {
    db: B,
}

impl<B> StudentApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> StudentApi<B>
where B: StudentRecords + CatalogManagement
{
    pub async fn summary(&self, user_id: i64) -> Result<StudentSummary, StudentApiError> {
        self.db.fetch_summary(user_id).await
    }

    pub async fn enrollments(&self, user_id: i64) -> Result<Vec<Enrollment>, StudentApiError> {
        self.db.fetch_enrollments_for_user(user_id).await
    }

    /// Fetches one of the student's enrollments by its public id. Another student's
    /// enrollment id yields `EnrollmentNotFound`, not someone else's record.
    pub async fn enrollment(&self, user_id: i64, enrollment_id: &str) -> Result<Enrollment, StudentApiError> {
        self.db
            .fetch_enrollment(user_id, enrollment_id)
            .await?
            .ok_or_else(|| StudentApiError::EnrollmentNotFound(enrollment_id.to_string()))
    }

    /// Flips the completion marker for a lesson. A second call with the same arguments
    /// undoes the first.
    pub async fn toggle_completed_lesson(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<ToggleOutcome, StudentApiError> {
        let lesson = self.db.fetch_lesson(lesson_id).await?.ok_or(StudentApiError::LessonNotFound(lesson_id))?;
        if lesson.course_id != course_id {
            return Err(StudentApiError::LessonNotFound(lesson_id));
        }
        let outcome = self.db.toggle_completed_lesson(user_id, course_id, lesson_id).await?;
        let state = if outcome.was_added() { "complete" } else { "incomplete" };
        debug!("🎓️ Lesson #{lesson_id} marked {state} for user #{user_id}");
        Ok(outcome)
    }

    pub async fn toggle_wishlist(&self, user_id: i64, course_id: i64) -> Result<ToggleOutcome, StudentApiError> {
        if self.db.fetch_course_by_id(course_id).await?.is_none() {
            return Err(StudentApiError::CourseNotFound(course_id));
        }
        self.db.toggle_wishlist(user_id, course_id).await
    }

    pub async fn wishlist(&self, user_id: i64) -> Result<Vec<WishlistEntry>, StudentApiError> {
        self.db.fetch_wishlist(user_id).await
    }

    pub async fn notes(&self, user_id: i64, course_id: i64) -> Result<Vec<Note>, StudentApiError> {
        self.db.fetch_notes(user_id, course_id).await
    }

    pub async fn create_note(&self, note: NewNote) -> Result<Note, StudentApiError> {
        if self.db.fetch_course_by_id(note.course_id).await?.is_none() {
            return Err(StudentApiError::CourseNotFound(note.course_id));
        }
        self.db.create_note(note).await
    }

    pub async fn note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<Option<Note>, StudentApiError> {
        self.db.fetch_note(user_id, course_id, note_id).await
    }

    /// Updates one of the student's notes. Returns `None` when the note does not exist or
    /// belongs to somebody else.
    pub async fn update_note(
        &self,
        user_id: i64,
        course_id: i64,
        note_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Option<Note>, StudentApiError> {
        self.db.update_note(user_id, course_id, note_id, title, body).await
    }

    pub async fn delete_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<bool, StudentApiError> {
        self.db.delete_note(user_id, course_id, note_id).await
    }

    pub async fn create_review(&self, review: NewReview) -> Result<Review, StudentApiError> {
        if self.db.fetch_course_by_id(review.course_id).await?.is_none() {
            return Err(StudentApiError::CourseNotFound(review.course_id));
        }
        self.db.create_review(review).await
    }

    pub async fn review(&self, user_id: i64, review_id: i64) -> Result<Option<Review>, StudentApiError> {
        self.db.fetch_review(user_id, review_id).await
    }

    pub async fn update_review(
        &self,
        user_id: i64,
        review_id: i64,
        rating: i64,
        review: &str,
    ) -> Result<Option<Review>, StudentApiError> {
        self.db.update_review(user_id, review_id, rating, review).await
    }

    pub async fn questions_for_course(&self, course_id: i64) -> Result<Vec<QuestionThread>, StudentApiError> {
        self.db.fetch_questions_for_course(course_id).await
    }

    /// Opens a new question thread on a course. The question and its first message are
    /// stored atomically.
    pub async fn ask_question(
        &self,
        user_id: i64,
        course_id: i64,
        title: &str,
        message: &str,
    ) -> Result<QuestionThread, StudentApiError> {
        if self.db.fetch_course_by_id(course_id).await?.is_none() {
            return Err(StudentApiError::CourseNotFound(course_id));
        }
        let thread = self.db.create_question(user_id, course_id, title, message).await?;
        debug!("🎓️💬️ New question [{}] opened on course #{course_id}", thread.question.qa_id);
        Ok(thread)
    }

    /// Appends a reply to an existing question thread and returns the refreshed thread.
    pub async fn reply_to_question(
        &self,
        qa_id: &str,
        user_id: i64,
        message: &str,
    ) -> Result<QuestionThread, StudentApiError> {
        self.db
            .reply_to_question(qa_id, user_id, message)
            .await?
            .ok_or_else(|| StudentApiError::QuestionNotFound(qa_id.to_string()))
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
