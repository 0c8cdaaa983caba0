use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::enrollment::EnrollmentStatus;
use campus_core::models::grade::Grade;
use uuid::Uuid;

use crate::models::DbGrade;
use crate::{PgStore, map_sqlx};

const GRADE_COLUMNS: &str = "id, enrollment_id, assignments, midsem, endsem, quiz, project, \
     total, letter_grade, grade_points, created_at, updated_at";

#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Stores the grade and moves its enrollment to `status` together.
    /// A regrade keeps the original grade id.
    async fn save_grade(&self, grade: Grade, status: EnrollmentStatus) -> CampusResult<Grade>;

    async fn grade_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Option<Grade>>;
}

#[async_trait]
impl GradeRepository for PgStore {
    async fn save_grade(&self, grade: Grade, status: EnrollmentStatus) -> CampusResult<Grade> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM enrollments WHERE id = $1 FOR UPDATE",
        )
        .bind(grade.enrollment_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Enrollment", grade.enrollment_id))?;

        current.parse::<EnrollmentStatus>()?.transition(status)?;

        sqlx::query("UPDATE enrollments SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(grade.enrollment_id)
            .bind(status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, DbGrade>(&format!(
            r#"
            INSERT INTO grades ({GRADE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (enrollment_id) DO UPDATE SET
                assignments = EXCLUDED.assignments,
                midsem = EXCLUDED.midsem,
                endsem = EXCLUDED.endsem,
                quiz = EXCLUDED.quiz,
                project = EXCLUDED.project,
                total = EXCLUDED.total,
                letter_grade = EXCLUDED.letter_grade,
                grade_points = EXCLUDED.grade_points,
                updated_at = EXCLUDED.updated_at
            RETURNING {GRADE_COLUMNS}
            "#
        ))
        .bind(grade.id)
        .bind(grade.enrollment_id)
        .bind(grade.marks.assignments)
        .bind(grade.marks.midsem)
        .bind(grade.marks.endsem)
        .bind(grade.marks.quiz)
        .bind(grade.marks.project)
        .bind(grade.total)
        .bind(grade.letter_grade.as_str())
        .bind(grade.grade_points)
        .bind(grade.created_at)
        .bind(grade.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        row.into_domain()
    }

    async fn grade_for_enrollment(&self, enrollment_id: Uuid) -> CampusResult<Option<Grade>> {
        sqlx::query_as::<_, DbGrade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE enrollment_id = $1"
        ))
        .bind(enrollment_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbGrade::into_domain)
        .transpose()
    }
}
