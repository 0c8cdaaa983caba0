use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::complaint::{Complaint, ComplaintStatus};
use uuid::Uuid;

use crate::models::DbComplaint;
use crate::{PgStore, map_sqlx};

const COMPLAINT_COLUMNS: &str = "id, student_id, hostel_id, room_id, category, description, \
     status, remarks, created_at, resolved_at";

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create_complaint(&self, complaint: Complaint) -> CampusResult<Complaint>;

    async fn get_complaint(&self, id: Uuid) -> CampusResult<Option<Complaint>>;

    /// Closes a pending complaint. Resolving twice is a `Conflict`.
    async fn resolve_complaint(&self, id: Uuid, remarks: Option<String>) -> CampusResult<Complaint>;
}

#[async_trait]
impl ComplaintRepository for PgStore {
    async fn create_complaint(&self, complaint: Complaint) -> CampusResult<Complaint> {
        sqlx::query_as::<_, DbComplaint>(&format!(
            r#"
            INSERT INTO complaints ({COMPLAINT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(complaint.id)
        .bind(complaint.student_id)
        .bind(complaint.hostel_id)
        .bind(complaint.room_id)
        .bind(complaint.category.as_str())
        .bind(&complaint.description)
        .bind(complaint.status.as_str())
        .bind(&complaint.remarks)
        .bind(complaint.created_at)
        .bind(complaint.resolved_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_domain()
    }

    async fn get_complaint(&self, id: Uuid) -> CampusResult<Option<Complaint>> {
        sqlx::query_as::<_, DbComplaint>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbComplaint::into_domain)
        .transpose()
    }

    async fn resolve_complaint(&self, id: Uuid, remarks: Option<String>) -> CampusResult<Complaint> {
        let row = sqlx::query_as::<_, DbComplaint>(&format!(
            r#"
            UPDATE complaints
            SET status = $2, remarks = $3, resolved_at = NOW()
            WHERE id = $1 AND status = $4
            RETURNING {COMPLAINT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(ComplaintStatus::Resolved.as_str())
        .bind(&remarks)
        .bind(ComplaintStatus::Pending.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        match row {
            Some(row) => row.into_domain(),
            None => match self.get_complaint(id).await? {
                Some(_) => Err(CampusError::Conflict("Complaint is already resolved".to_string())),
                None => Err(CampusError::not_found("Complaint", id)),
            },
        }
    }
}
