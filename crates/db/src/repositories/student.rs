use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::student::{GradeSheet, Student};
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{DbGradeSheet, DbStudent};
use crate::{PgStore, map_sqlx};

pub(crate) const STUDENT_COLUMNS: &str = "id, name, college_id, email, password_hash, gender, department, \
     programme, batch, current_sem, cgpa, created_at";

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Fails with `Conflict` when the collegeId or email is taken.
    async fn create_student(&self, student: Student) -> CampusResult<Student>;

    async fn get_student(&self, id: Uuid) -> CampusResult<Option<Student>>;

    async fn grade_sheets(&self, student_id: Uuid) -> CampusResult<Vec<GradeSheet>>;

    /// Appends `sheet`, advances `currentSem` and records the new CGPA in one step.
    /// The sheet must be for the student's current semester.
    async fn promote_student(&self, student_id: Uuid, sheet: GradeSheet) -> CampusResult<Student>;
}

#[async_trait]
impl StudentRepository for PgStore {
    async fn create_student(&self, student: Student) -> CampusResult<Student> {
        let row = sqlx::query_as::<_, DbStudent>(&format!(
            r#"
            INSERT INTO students ({STUDENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.college_id)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(student.gender.as_str())
        .bind(&student.department)
        .bind(&student.programme)
        .bind(student.batch)
        .bind(student.current_sem)
        .bind(student.cgpa)
        .bind(student.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        tracing::debug!("Student created: id={}, college_id={}", row.id, row.college_id);
        row.into_domain()
    }

    async fn get_student(&self, id: Uuid) -> CampusResult<Option<Student>> {
        sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbStudent::into_domain)
        .transpose()
    }

    async fn grade_sheets(&self, student_id: Uuid) -> CampusResult<Vec<GradeSheet>> {
        let rows = sqlx::query_as::<_, DbGradeSheet>(
            r#"
            SELECT student_id, semester, sgpa, cgpa, credits_offered, credits_earned, courses, backlogs
            FROM grade_sheets
            WHERE student_id = $1
            ORDER BY semester ASC
            "#,
        )
        .bind(student_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(GradeSheet::from).collect())
    }

    async fn promote_student(&self, student_id: Uuid, sheet: GradeSheet) -> CampusResult<Student> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        let current_sem = sqlx::query_scalar::<_, i32>(
            "SELECT current_sem FROM students WHERE id = $1 FOR UPDATE",
        )
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Student", student_id))?;

        if current_sem != sheet.semester {
            return Err(CampusError::Conflict(format!(
                "Student is in semester {}, not {}",
                current_sem, sheet.semester
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO grade_sheets
                (student_id, semester, sgpa, cgpa, credits_offered, credits_earned, courses, backlogs)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(student_id)
        .bind(sheet.semester)
        .bind(sheet.sgpa)
        .bind(sheet.cgpa)
        .bind(sheet.credits_offered)
        .bind(sheet.credits_earned)
        .bind(Json(&sheet.courses))
        .bind(&sheet.backlogs)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, DbStudent>(&format!(
            r#"
            UPDATE students
            SET current_sem = current_sem + 1, cgpa = $2
            WHERE id = $1
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(student_id)
        .bind(sheet.cgpa)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        row.into_domain()
    }
}
