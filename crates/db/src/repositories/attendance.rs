use async_trait::async_trait;
use campus_core::errors::CampusResult;
use campus_core::models::attendance::Attendance;
use uuid::Uuid;

use crate::models::DbAttendance;
use crate::{PgStore, map_sqlx};

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Upserts one record per (enrollment, date); a later mark replaces an earlier one.
    async fn record_attendance(&self, records: Vec<Attendance>) -> CampusResult<Vec<Attendance>>;

    async fn attendance_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Vec<Attendance>>;
}

#[async_trait]
impl AttendanceRepository for PgStore {
    async fn record_attendance(&self, records: Vec<Attendance>) -> CampusResult<Vec<Attendance>> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;
        let mut stored = Vec::with_capacity(records.len());

        for record in &records {
            let row = sqlx::query_as::<_, DbAttendance>(
                r#"
                INSERT INTO attendance (id, enrollment_id, date, status)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (enrollment_id, date)
                DO UPDATE SET status = EXCLUDED.status
                RETURNING id, enrollment_id, date, status
                "#,
            )
            .bind(record.id)
            .bind(record.enrollment_id)
            .bind(record.date)
            .bind(record.status.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;
            stored.push(row.into_domain()?);
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(stored)
    }

    async fn attendance_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Vec<Attendance>> {
        sqlx::query_as::<_, DbAttendance>(
            r#"
            SELECT id, enrollment_id, date, status
            FROM attendance
            WHERE enrollment_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(enrollment_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(DbAttendance::into_domain)
        .collect()
    }
}
