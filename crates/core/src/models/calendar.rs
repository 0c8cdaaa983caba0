use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CampusError, CampusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicCalendar {
    pub id: Uuid,
    pub year: i32,
    pub semester: i32,
    pub registration: DateRange,
    pub classes: DateRange,
    pub exams: DateRange,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl AcademicCalendar {
    pub fn is_registration_open_on(&self, date: NaiveDate) -> bool {
        self.registration.contains(date)
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCalendarRequest {
    pub year: i32,
    pub semester: i32,
    pub registration: DateRange,
    pub classes: DateRange,
    pub exams: DateRange,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl UpsertCalendarRequest {
    pub fn validate(&self) -> CampusResult<()> {
        if self.semester < 1 {
            return Err(CampusError::Validation("semester must be at least 1".to_string()));
        }
        for (name, range) in [
            ("registration", &self.registration),
            ("classes", &self.classes),
            ("exams", &self.exams),
        ] {
            if range.start > range.end {
                return Err(CampusError::Validation(format!(
                    "{} window ends before it starts",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn into_calendar(self) -> AcademicCalendar {
        AcademicCalendar {
            id: Uuid::new_v4(),
            year: self.year,
            semester: self.semester,
            registration: self.registration,
            classes: self.classes,
            exams: self.exams,
            holidays: self.holidays,
        }
    }
}
