use log::*;

use crate::{
    db_types::{Category, Course},
    traits::{CatalogApiError, CatalogManagement},
};

/// `CatalogApi` exposes the public, read-only view over the course catalog: categories,
/// published courses, single-course lookup and free-text search.
#[derive(Debug, Clone)]
pub struct CatalogApi<B> {
    db: B,
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogApiError> {
        self.db.fetch_categories().await
    }

    /// Returns published courses only. Drafts, courses in review and disabled courses are
    /// never visible through this method.
    pub async fn published_courses(&self) -> Result<Vec<Course>, CatalogApiError> {
        self.db.fetch_published_courses().await
    }

    /// Looks up a single course by its URL slug. Only published courses are returned.
    pub async fn course_by_slug(&self, slug: &str) -> Result<Option<Course>, CatalogApiError> {
        let course = self.db.fetch_course_by_slug(slug).await?;
        if course.is_none() {
            debug!("🎓️ No published course matches slug '{slug}'");
        }
        Ok(course)
    }

    /// Case-insensitive substring search over published course titles. An empty query
    /// returns an empty result set rather than the whole catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Course>, CatalogApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.db.search_courses(query).await
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
