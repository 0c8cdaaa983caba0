use async_trait::async_trait;
use campus_core::errors::CampusResult;
use campus_core::models::academic::Faculty;
use uuid::Uuid;

use crate::models::DbFaculty;
use crate::{PgStore, map_sqlx};

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn create_faculty(&self, faculty: Faculty) -> CampusResult<Faculty>;

    async fn get_faculty(&self, id: Uuid) -> CampusResult<Option<Faculty>>;
}

#[async_trait]
impl FacultyRepository for PgStore {
    async fn create_faculty(&self, faculty: Faculty) -> CampusResult<Faculty> {
        sqlx::query_as::<_, DbFaculty>(
            r#"
            INSERT INTO faculty (id, name, email, employee_id, designation, department, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, employee_id, designation, department, created_at
            "#,
        )
        .bind(faculty.id)
        .bind(&faculty.name)
        .bind(&faculty.email)
        .bind(&faculty.employee_id)
        .bind(faculty.designation.as_str())
        .bind(&faculty.department)
        .bind(faculty.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_domain()
    }

    async fn get_faculty(&self, id: Uuid) -> CampusResult<Option<Faculty>> {
        sqlx::query_as::<_, DbFaculty>(
            r#"
            SELECT id, name, email, employee_id, designation, department, created_at
            FROM faculty
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbFaculty::into_domain)
        .transpose()
    }
}
