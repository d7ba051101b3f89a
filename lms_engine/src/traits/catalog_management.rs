use thiserror::Error;

use crate::db_types::{Category, Country, Course, Lesson};

/// Read-only access to the course catalog. Only published courses (both platform and teacher
/// status) are ever returned by the listing and lookup methods; drafts simply do not exist as
/// far as this trait is concerned.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement: Clone {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError>;

    async fn fetch_published_courses(&self) -> Result<Vec<Course>, CatalogApiError>;

    /// Fetches a published course by its slug. Unpublished courses return `None`.
    async fn fetch_course_by_slug(&self, slug: &str) -> Result<Option<Course>, CatalogApiError>;

    /// Fetches a course by its internal id, regardless of publish state. Used by the cart and
    /// learning-record flows, which must keep working for courses that get unpublished later.
    async fn fetch_course_by_id(&self, course_id: i64) -> Result<Option<Course>, CatalogApiError>;

    /// Case-insensitive substring search over published course titles.
    async fn search_courses(&self, query: &str) -> Result<Vec<Course>, CatalogApiError>;

    async fn fetch_country_by_name(&self, name: &str) -> Result<Option<Country>, CatalogApiError>;

    async fn fetch_lesson(&self, lesson_id: i64) -> Result<Option<Lesson>, CatalogApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}
