use sqlx::SqliteConnection;

use crate::{
    db_types::{Enrollment, NewNote, NewReview, Note, Review, WishlistEntry},
    traits::StudentSummary,
};

pub async fn fetch_summary(user_id: i64, conn: &mut SqliteConnection) -> Result<StudentSummary, sqlx::Error> {
    let total_courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;
    let completed_lessons: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM completed_lessons WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(conn)
        .await?;
    Ok(StudentSummary { total_courses, completed_lessons })
}

pub async fn fetch_enrollments_for_user(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    let enrollments = sqlx::query_as("SELECT * FROM enrollments WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(enrollments)
}

pub async fn fetch_enrollment(
    user_id: i64,
    enrollment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Enrollment>, sqlx::Error> {
    let enrollment = sqlx::query_as("SELECT * FROM enrollments WHERE user_id = $1 AND enrollment_id = $2")
        .bind(user_id)
        .bind(enrollment_id)
        .fetch_optional(conn)
        .await?;
    Ok(enrollment)
}

pub async fn completed_lesson_exists(
    user_id: i64,
    course_id: i64,
    lesson_id: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM completed_lessons WHERE user_id = $1 AND course_id = $2 AND lesson_id = $3",
    )
    .bind(user_id)
    .bind(course_id)
    .bind(lesson_id)
    .fetch_one(conn)
    .await?;
    Ok(count > 0)
}

pub async fn insert_completed_lesson(
    user_id: i64,
    course_id: i64,
    lesson_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO completed_lessons (user_id, course_id, lesson_id) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(course_id)
        .bind(lesson_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_completed_lesson(
    user_id: i64,
    course_id: i64,
    lesson_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM completed_lessons WHERE user_id = $1 AND course_id = $2 AND lesson_id = $3")
        .bind(user_id)
        .bind(course_id)
        .bind(lesson_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_wishlist_entry(
    user_id: i64,
    course_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<WishlistEntry>, sqlx::Error> {
    let entry = sqlx::query_as("SELECT * FROM wishlist WHERE user_id = $1 AND course_id = $2")
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(conn)
        .await?;
    Ok(entry)
}

pub async fn insert_wishlist_entry(
    user_id: i64,
    course_id: i64,
    conn: &mut SqliteConnection,
) -> Result<WishlistEntry, sqlx::Error> {
    let entry = sqlx::query_as("INSERT INTO wishlist (user_id, course_id) VALUES ($1, $2) RETURNING *")
        .bind(user_id)
        .bind(course_id)
        .fetch_one(conn)
        .await?;
    Ok(entry)
}

pub async fn delete_wishlist_entry(
    user_id: i64,
    course_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM wishlist WHERE user_id = $1 AND course_id = $2")
        .bind(user_id)
        .bind(course_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_wishlist(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<WishlistEntry>, sqlx::Error> {
    let entries = sqlx::query_as("SELECT * FROM wishlist WHERE user_id = $1 ORDER BY id ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(entries)
}

pub async fn fetch_notes(user_id: i64, course_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Note>, sqlx::Error> {
    let notes = sqlx::query_as("SELECT * FROM notes WHERE user_id = $1 AND course_id = $2 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .bind(course_id)
        .fetch_all(conn)
        .await?;
    Ok(notes)
}

pub async fn insert_note(note: NewNote, conn: &mut SqliteConnection) -> Result<Note, sqlx::Error> {
    let note = sqlx::query_as("INSERT INTO notes (user_id, course_id, title, body) VALUES ($1, $2, $3, $4) RETURNING *")
        .bind(note.user_id)
        .bind(note.course_id)
        .bind(note.title)
        .bind(note.body)
        .fetch_one(conn)
        .await?;
    Ok(note)
}

pub async fn fetch_note(
    user_id: i64,
    course_id: i64,
    note_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Note>, sqlx::Error> {
    let note = sqlx::query_as("SELECT * FROM notes WHERE user_id = $1 AND course_id = $2 AND id = $3")
        .bind(user_id)
        .bind(course_id)
        .bind(note_id)
        .fetch_optional(conn)
        .await?;
    Ok(note)
}

/// Ownership-scoped update. Returns `None` when the note does not exist for this student.
pub async fn update_note(
    user_id: i64,
    course_id: i64,
    note_id: i64,
    title: &str,
    body: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Note>, sqlx::Error> {
    let note = sqlx::query_as(
        r#"
        UPDATE notes SET title = $1, body = $2, updated_at = CURRENT_TIMESTAMP
        WHERE user_id = $3 AND course_id = $4 AND id = $5
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(user_id)
    .bind(course_id)
    .bind(note_id)
    .fetch_optional(conn)
    .await?;
    Ok(note)
}

pub async fn delete_note(
    user_id: i64,
    course_id: i64,
    note_id: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notes WHERE user_id = $1 AND course_id = $2 AND id = $3")
        .bind(user_id)
        .bind(course_id)
        .bind(note_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn insert_review(review: NewReview, conn: &mut SqliteConnection) -> Result<Review, sqlx::Error> {
    let review = sqlx::query_as(
        "INSERT INTO reviews (user_id, course_id, rating, review, active) VALUES ($1, $2, $3, $4, 1) RETURNING *",
    )
    .bind(review.user_id)
    .bind(review.course_id)
    .bind(review.rating)
    .bind(review.review)
    .fetch_one(conn)
    .await?;
    Ok(review)
}

pub async fn fetch_review(
    user_id: i64,
    review_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Review>, sqlx::Error> {
    let review = sqlx::query_as("SELECT * FROM reviews WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(review_id)
        .fetch_optional(conn)
        .await?;
    Ok(review)
}

/// Ownership-scoped update. Returns `None` when the review does not exist for this student.
pub async fn update_review(
    user_id: i64,
    review_id: i64,
    rating: i64,
    review: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Review>, sqlx::Error> {
    let review = sqlx::query_as(
        "UPDATE reviews SET rating = $1, review = $2 WHERE user_id = $3 AND id = $4 RETURNING *",
    )
    .bind(rating)
    .bind(review)
    .bind(user_id)
    .bind(review_id)
    .fetch_optional(conn)
    .await?;
    Ok(review)
}
