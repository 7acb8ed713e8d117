// Offset project database operations
// All queries use SeaORM — no raw SQL.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::db::error::DbError;
use crate::entity::{offset_projects, prelude::OffsetProjects};
use crate::models::PaginationParams;

/// Repository for offset project database operations
pub struct ProjectRepository {
    conn: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        ProjectRepository { conn }
    }

    /// Resolves an external project code to an active project
    pub async fn find_active_by_code(
        &self,
        project_code: &str,
    ) -> Result<Option<offset_projects::Model>, DbError> {
        OffsetProjects::find()
            .filter(offset_projects::Column::ProjectId.eq(project_code))
            .filter(offset_projects::Column::IsActive.eq(true))
            .one(&self.conn)
            .await
            .map_err(Into::into)
    }

    /// Retrieves active projects ordered by name, optionally filtered by
    /// project type, with an exact total count for pagination
    pub async fn find_marketplace(
        &self,
        project_type: Option<&str>,
        pagination: &PaginationParams,
    ) -> Result<(Vec<offset_projects::Model>, u64), DbError> {
        let mut query = OffsetProjects::find().filter(offset_projects::Column::IsActive.eq(true));

        if let Some(project_type) = project_type {
            query = query.filter(offset_projects::Column::ProjectType.eq(project_type));
        }

        let total = query.clone().count(&self.conn).await?;

        let offset = (pagination.page.max(1) - 1) * pagination.limit;
        let projects = query
            .order_by_asc(offset_projects::Column::Name)
            .limit(pagination.limit)
            .offset(offset)
            .all(&self.conn)
            .await?;

        Ok((projects, total))
    }
}
