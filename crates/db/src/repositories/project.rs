//! Project repository for the member dashboard.

use std::sync::Arc;

use civinet_common::{AppError, AppResult, Page};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{Project, project};
use crate::listing::{ContentFilter, list_page};
use crate::store::with_timeout;

/// Repository for project operations.
#[derive(Clone)]
pub struct ProjectRepository {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepository {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<project::Model>> {
        with_timeout("find project", Project::find_by_id(id).one(self.db.as_ref())).await
    }

    /// Get a project by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<project::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project not found: {id}")))
    }

    /// List an organisation's projects.
    pub async fn list_by_organisation(
        &self,
        organisation_id: &str,
        filter: &ContentFilter,
    ) -> AppResult<Page<project::Model>> {
        let base = Project::find().filter(project::Column::OrganisationId.eq(organisation_id));
        list_page(self.db.as_ref(), base, filter).await
    }

    /// Create a new project.
    pub async fn create(&self, model: project::ActiveModel) -> AppResult<project::Model> {
        with_timeout("insert project", model.insert(self.db.as_ref())).await
    }

    /// Update a project.
    pub async fn update(&self, model: project::ActiveModel) -> AppResult<project::Model> {
        with_timeout("update project", model.update(self.db.as_ref())).await
    }

    /// Delete a project. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = with_timeout(
            "delete project",
            Project::delete_by_id(id).exec(self.db.as_ref()),
        )
        .await?;

        Ok(result.rows_affected)
    }
}
