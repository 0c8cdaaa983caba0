use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::allotment::PolicyStudent;
use campus_core::models::willingness::{Willingness, WillingnessStatus};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::DbWillingness;
use crate::{PgStore, map_sqlx};

pub(crate) const WILLINGNESS_COLUMNS: &str = "id, student_id, year, status, remarks, created_at, updated_at";

#[async_trait]
pub trait WillingnessRepository: Send + Sync {
    /// Fails with `Conflict` when the student already submitted for that year.
    async fn create_willingness(&self, willingness: Willingness) -> CampusResult<Willingness>;

    async fn get_willingness(&self, id: Uuid) -> CampusResult<Option<Willingness>>;

    /// Records the approve/reject decision on a submitted request.
    async fn review_willingness(
        &self,
        id: Uuid,
        decision: WillingnessStatus,
        remarks: Option<String>,
    ) -> CampusResult<Willingness>;

    /// Approved requests for `year` whose student holds no active allotment that year.
    async fn approved_without_allotment(&self, year: i32) -> CampusResult<Vec<PolicyStudent>>;
}

#[derive(FromRow)]
struct PendingStudentRow {
    student_id: Uuid,
    willingness_id: Uuid,
    gender: String,
}

#[async_trait]
impl WillingnessRepository for PgStore {
    async fn create_willingness(&self, willingness: Willingness) -> CampusResult<Willingness> {
        sqlx::query_as::<_, DbWillingness>(&format!(
            r#"
            INSERT INTO willingness ({WILLINGNESS_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {WILLINGNESS_COLUMNS}
            "#
        ))
        .bind(willingness.id)
        .bind(willingness.student_id)
        .bind(willingness.year)
        .bind(willingness.status.as_str())
        .bind(&willingness.remarks)
        .bind(willingness.created_at)
        .bind(willingness.updated_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_domain()
    }

    async fn get_willingness(&self, id: Uuid) -> CampusResult<Option<Willingness>> {
        sqlx::query_as::<_, DbWillingness>(&format!(
            "SELECT {WILLINGNESS_COLUMNS} FROM willingness WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbWillingness::into_domain)
        .transpose()
    }

    async fn review_willingness(
        &self,
        id: Uuid,
        decision: WillingnessStatus,
        remarks: Option<String>,
    ) -> CampusResult<Willingness> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM willingness WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Willingness", id))?;

        let next = current.parse::<WillingnessStatus>()?.review(decision)?;

        let row = sqlx::query_as::<_, DbWillingness>(&format!(
            r#"
            UPDATE willingness
            SET status = $2, remarks = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {WILLINGNESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(next.as_str())
        .bind(&remarks)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        row.into_domain()
    }

    async fn approved_without_allotment(&self, year: i32) -> CampusResult<Vec<PolicyStudent>> {
        let rows = sqlx::query_as::<_, PendingStudentRow>(
            r#"
            SELECT w.student_id, w.id AS willingness_id, s.gender
            FROM willingness w
            JOIN students s ON s.id = w.student_id
            WHERE w.year = $1
              AND w.status = 'Approved'
              AND NOT EXISTS (
                  SELECT 1 FROM room_allotments a
                  WHERE a.student_id = w.student_id AND a.year = w.year AND a.status = 'Allotted'
              )
            ORDER BY w.created_at ASC
            "#,
        )
        .bind(year)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| -> CampusResult<PolicyStudent> {
                Ok(PolicyStudent {
                    student_id: row.student_id,
                    willingness_id: row.willingness_id,
                    gender: row.gender.parse()?,
                })
            })
            .collect()
    }
}
