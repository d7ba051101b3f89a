use sqlx::SqliteConnection;

use crate::db_types::{Category, Country, Course, Lesson};

pub async fn fetch_categories(conn: &mut SqliteConnection) -> Result<Vec<Category>, sqlx::Error> {
    let categories = sqlx::query_as("SELECT * FROM categories WHERE active = 1 ORDER BY title ASC")
        .fetch_all(conn)
        .await?;
    Ok(categories)
}

pub async fn fetch_published_courses(conn: &mut SqliteConnection) -> Result<Vec<Course>, sqlx::Error> {
    let courses = sqlx::query_as(
        r#"
        SELECT * FROM courses
        WHERE platform_status = 'Published' AND teacher_course_status = 'Published'
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

pub async fn fetch_course_by_slug(slug: &str, conn: &mut SqliteConnection) -> Result<Option<Course>, sqlx::Error> {
    let course = sqlx::query_as(
        r#"
        SELECT * FROM courses
        WHERE slug = $1 AND platform_status = 'Published' AND teacher_course_status = 'Published'
        "#,
    )
    .bind(slug)
    .fetch_optional(conn)
    .await?;
    Ok(course)
}

pub async fn fetch_course_by_id(course_id: i64, conn: &mut SqliteConnection) -> Result<Option<Course>, sqlx::Error> {
    let course = sqlx::query_as("SELECT * FROM courses WHERE id = $1").bind(course_id).fetch_optional(conn).await?;
    Ok(course)
}

/// Case-insensitive substring match on published course titles.
pub async fn search_courses(query: &str, conn: &mut SqliteConnection) -> Result<Vec<Course>, sqlx::Error> {
    let courses = sqlx::query_as(
        r#"
        SELECT * FROM courses
        WHERE title LIKE $1 COLLATE NOCASE
          AND platform_status = 'Published' AND teacher_course_status = 'Published'
        ORDER BY created_at DESC
        "#,
    )
    .bind(format!("%{query}%"))
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

pub async fn fetch_country_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Country>, sqlx::Error> {
    let country = sqlx::query_as("SELECT * FROM countries WHERE name = $1 COLLATE NOCASE AND active = 1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(country)
}

pub async fn fetch_lesson(lesson_id: i64, conn: &mut SqliteConnection) -> Result<Option<Lesson>, sqlx::Error> {
    let lesson = sqlx::query_as("SELECT * FROM lessons WHERE id = $1").bind(lesson_id).fetch_optional(conn).await?;
    Ok(lesson)
}
