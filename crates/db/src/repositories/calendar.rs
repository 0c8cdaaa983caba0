use async_trait::async_trait;
use campus_core::errors::CampusResult;
use campus_core::models::calendar::AcademicCalendar;
use sqlx::types::Json;

use crate::models::DbAcademicCalendar;
use crate::{PgStore, map_sqlx};

const CALENDAR_COLUMNS: &str = "id, year, semester, registration_start, registration_end, \
     classes_start, classes_end, exams_start, exams_end, holidays";

#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// One calendar per (year, semester); writing again replaces the dates but keeps the id.
    async fn upsert_calendar(&self, calendar: AcademicCalendar) -> CampusResult<AcademicCalendar>;

    async fn get_calendar(&self, year: i32, semester: i32) -> CampusResult<Option<AcademicCalendar>>;
}

#[async_trait]
impl CalendarRepository for PgStore {
    async fn upsert_calendar(&self, calendar: AcademicCalendar) -> CampusResult<AcademicCalendar> {
        let row = sqlx::query_as::<_, DbAcademicCalendar>(&format!(
            r#"
            INSERT INTO academic_calendars ({CALENDAR_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT ON CONSTRAINT uq_calendars_year_semester DO UPDATE SET
                registration_start = EXCLUDED.registration_start,
                registration_end = EXCLUDED.registration_end,
                classes_start = EXCLUDED.classes_start,
                classes_end = EXCLUDED.classes_end,
                exams_start = EXCLUDED.exams_start,
                exams_end = EXCLUDED.exams_end,
                holidays = EXCLUDED.holidays
            RETURNING {CALENDAR_COLUMNS}
            "#
        ))
        .bind(calendar.id)
        .bind(calendar.year)
        .bind(calendar.semester)
        .bind(calendar.registration.start)
        .bind(calendar.registration.end)
        .bind(calendar.classes.start)
        .bind(calendar.classes.end)
        .bind(calendar.exams.start)
        .bind(calendar.exams.end)
        .bind(Json(&calendar.holidays))
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn get_calendar(&self, year: i32, semester: i32) -> CampusResult<Option<AcademicCalendar>> {
        let row = sqlx::query_as::<_, DbAcademicCalendar>(&format!(
            "SELECT {CALENDAR_COLUMNS} FROM academic_calendars WHERE year = $1 AND semester = $2"
        ))
        .bind(year)
        .bind(semester)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(AcademicCalendar::from))
    }
}
