use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::enrollment::{AssignFacultyRequest, Enrollment, EnrollmentStatus};
use sqlx::types::Json;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::models::DbEnrollment;
use crate::{PgStore, map_sqlx};

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, offering_id, faculty_id, schedule, status, created_at, updated_at";

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Inserts all enrollments or none. A repeated (student, offering) pair is a `Conflict`.
    async fn create_enrollments(&self, enrollments: Vec<Enrollment>) -> CampusResult<Vec<Enrollment>>;

    async fn get_enrollment(&self, id: Uuid) -> CampusResult<Option<Enrollment>>;

    async fn enrollments_for_offering(&self, offering_id: Uuid) -> CampusResult<Vec<Enrollment>>;

    async fn enrollments_for_student(&self, student_id: Uuid) -> CampusResult<Vec<Enrollment>>;

    /// Moves every listed enrollment to `to`, or none if any move is illegal.
    async fn transition_enrollments(
        &self,
        ids: Vec<Uuid>,
        to: EnrollmentStatus,
    ) -> CampusResult<Vec<Enrollment>>;

    /// Sets faculty and schedule on the listed enrollments of one offering and
    /// approves them, all or none.
    async fn assign_enrollments(&self, assignment: AssignFacultyRequest) -> CampusResult<Vec<Enrollment>>;
}

pub(crate) fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

async fn lock_enrollments(
    tx: &mut Transaction<'_, Postgres>,
    ids: &[Uuid],
) -> CampusResult<Vec<Enrollment>> {
    let rows = sqlx::query_as::<_, DbEnrollment>(&format!(
        "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = ANY($1) FOR UPDATE"
    ))
    .bind(ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(map_sqlx)?;

    if let Some(missing) = ids.iter().find(|id| !rows.iter().any(|row| row.id == **id)) {
        return Err(CampusError::not_found("Enrollment", missing));
    }

    rows.into_iter().map(DbEnrollment::into_domain).collect()
}

#[async_trait]
impl EnrollmentRepository for PgStore {
    async fn create_enrollments(&self, enrollments: Vec<Enrollment>) -> CampusResult<Vec<Enrollment>> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;
        let mut created = Vec::with_capacity(enrollments.len());

        for enrollment in &enrollments {
            let row = sqlx::query_as::<_, DbEnrollment>(&format!(
                r#"
                INSERT INTO enrollments ({ENROLLMENT_COLUMNS})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {ENROLLMENT_COLUMNS}
                "#
            ))
            .bind(enrollment.id)
            .bind(enrollment.student_id)
            .bind(enrollment.offering_id)
            .bind(enrollment.faculty_id)
            .bind(Json(&enrollment.schedule))
            .bind(enrollment.status.as_str())
            .bind(enrollment.created_at)
            .bind(enrollment.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;
            created.push(row.into_domain()?);
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn get_enrollment(&self, id: Uuid) -> CampusResult<Option<Enrollment>> {
        sqlx::query_as::<_, DbEnrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbEnrollment::into_domain)
        .transpose()
    }

    async fn enrollments_for_offering(&self, offering_id: Uuid) -> CampusResult<Vec<Enrollment>> {
        sqlx::query_as::<_, DbEnrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE offering_id = $1 ORDER BY created_at ASC"
        ))
        .bind(offering_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(DbEnrollment::into_domain)
        .collect()
    }

    async fn enrollments_for_student(&self, student_id: Uuid) -> CampusResult<Vec<Enrollment>> {
        sqlx::query_as::<_, DbEnrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE student_id = $1 ORDER BY created_at ASC"
        ))
        .bind(student_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_iter()
        .map(DbEnrollment::into_domain)
        .collect()
    }

    async fn transition_enrollments(
        &self,
        ids: Vec<Uuid>,
        to: EnrollmentStatus,
    ) -> CampusResult<Vec<Enrollment>> {
        let ids = dedup(ids);
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        for enrollment in lock_enrollments(&mut tx, &ids).await? {
            enrollment.status.transition(to)?;
        }

        let updated = sqlx::query_as::<_, DbEnrollment>(&format!(
            r#"
            UPDATE enrollments
            SET status = $2, updated_at = NOW()
            WHERE id = ANY($1)
            RETURNING {ENROLLMENT_COLUMNS}
            "#
        ))
        .bind(&ids)
        .bind(to.as_str())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        tracing::info!("Moved {} enrollment(s) to {}", updated.len(), to);

        updated.into_iter().map(DbEnrollment::into_domain).collect()
    }

    async fn assign_enrollments(&self, assignment: AssignFacultyRequest) -> CampusResult<Vec<Enrollment>> {
        let ids = dedup(assignment.enrollment_ids);
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        for enrollment in lock_enrollments(&mut tx, &ids).await? {
            if enrollment.offering_id != assignment.offering_id {
                return Err(CampusError::Validation(format!(
                    "Enrollment {} does not belong to this offering",
                    enrollment.id
                )));
            }
            enrollment.status.transition(EnrollmentStatus::Approved)?;
        }

        let updated = sqlx::query_as::<_, DbEnrollment>(&format!(
            r#"
            UPDATE enrollments
            SET faculty_id = $2, schedule = $3, status = $4, updated_at = NOW()
            WHERE id = ANY($1)
            RETURNING {ENROLLMENT_COLUMNS}
            "#
        ))
        .bind(&ids)
        .bind(assignment.faculty_id)
        .bind(Json(&assignment.schedule))
        .bind(EnrollmentStatus::Approved.as_str())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        tracing::info!(
            "Assigned faculty {} to {} enrollment(s) of offering {}",
            assignment.faculty_id,
            updated.len(),
            assignment.offering_id
        );

        updated.into_iter().map(DbEnrollment::into_domain).collect()
    }
}
