use async_trait::async_trait;
use campus_core::errors::CampusResult;
use campus_core::models::academic::{Course, CourseOffering};
use uuid::Uuid;

use crate::models::{DbCourse, DbCourseOffering};
use crate::{PgStore, map_sqlx};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fails with `Conflict` when the course code is taken.
    async fn create_course(&self, course: Course) -> CampusResult<Course>;

    async fn get_course(&self, id: Uuid) -> CampusResult<Option<Course>>;

    async fn create_offering(&self, offering: CourseOffering) -> CampusResult<CourseOffering>;

    async fn get_offering(&self, id: Uuid) -> CampusResult<Option<CourseOffering>>;
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn create_course(&self, course: Course) -> CampusResult<Course> {
        sqlx::query_as::<_, DbCourse>(
            r#"
            INSERT INTO courses (id, code, name, credits, course_type, syllabus, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, code, name, credits, course_type, syllabus, created_at
            "#,
        )
        .bind(course.id)
        .bind(&course.code)
        .bind(&course.name)
        .bind(course.credits)
        .bind(course.course_type.as_str())
        .bind(&course.syllabus)
        .bind(course.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_domain()
    }

    async fn get_course(&self, id: Uuid) -> CampusResult<Option<Course>> {
        sqlx::query_as::<_, DbCourse>(
            r#"
            SELECT id, code, name, credits, course_type, syllabus, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbCourse::into_domain)
        .transpose()
    }

    async fn create_offering(&self, offering: CourseOffering) -> CampusResult<CourseOffering> {
        let row = sqlx::query_as::<_, DbCourseOffering>(
            r#"
            INSERT INTO course_offerings
                (id, course_id, semester, year, branches, coordinator_id, instructor_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, course_id, semester, year, branches, coordinator_id, instructor_ids, created_at
            "#,
        )
        .bind(offering.id)
        .bind(offering.course_id)
        .bind(offering.semester)
        .bind(offering.year)
        .bind(&offering.branches)
        .bind(offering.coordinator_id)
        .bind(&offering.instructor_ids)
        .bind(offering.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn get_offering(&self, id: Uuid) -> CampusResult<Option<CourseOffering>> {
        let row = sqlx::query_as::<_, DbCourseOffering>(
            r#"
            SELECT id, course_id, semester, year, branches, coordinator_id, instructor_ids, created_at
            FROM course_offerings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(CourseOffering::from))
    }
}
