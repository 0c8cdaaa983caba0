use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::allotment::{
    AllotRoomRequest, AllotmentCandidate, AllotmentStatus, RoomAllotment,
};
use campus_core::models::hostel::{OccupancyCorrection, Room};
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::{DbHostel, DbRoom, DbRoomAllotment, DbStudent, DbWillingness};
use crate::repositories::hostel::ROOM_COLUMNS;
use crate::repositories::student::STUDENT_COLUMNS;
use crate::repositories::willingness::WILLINGNESS_COLUMNS;
use crate::{PgStore, map_sqlx};

const ALLOTMENT_COLUMNS: &str =
    "id, student_id, hostel_id, room_id, year, willingness_id, status, allotted_at, vacated_at";

#[async_trait]
pub trait AllotmentRepository: Send + Sync {
    /// Checks eligibility and books the bed in one transaction. The room's
    /// `occupied` counter moves with the allotment row.
    async fn allot_room(&self, request: AllotRoomRequest) -> CampusResult<RoomAllotment>;

    async fn get_allotment(&self, id: Uuid) -> CampusResult<Option<RoomAllotment>>;

    /// Frees the bed. Only an active allotment can be vacated.
    async fn vacate_allotment(&self, id: Uuid) -> CampusResult<RoomAllotment>;

    /// Rewrites every room's `occupied` from its active allotments and returns
    /// the rooms that were wrong.
    async fn reconcile_occupancy(&self) -> CampusResult<Vec<OccupancyCorrection>>;
}

#[derive(FromRow)]
struct DriftRow {
    room_id: Uuid,
    recorded: i32,
    actual: i32,
}

#[async_trait]
impl AllotmentRepository for PgStore {
    async fn allot_room(&self, request: AllotRoomRequest) -> CampusResult<RoomAllotment> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        let room = sqlx::query_as::<_, DbRoom>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1 FOR UPDATE"
        ))
        .bind(request.room_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .map(Room::from)
        .ok_or_else(|| CampusError::not_found("Room", request.room_id))?;

        let hostel = sqlx::query_as::<_, DbHostel>(
            "SELECT id, name, hostel_type, status, created_at FROM hostels WHERE id = $1 FOR SHARE",
        )
        .bind(room.hostel_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Hostel", room.hostel_id))?
        .into_domain()?;

        let student = sqlx::query_as::<_, DbStudent>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(request.student_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Student", request.student_id))?
        .into_domain()?;

        let willingness = sqlx::query_as::<_, DbWillingness>(&format!(
            "SELECT {WILLINGNESS_COLUMNS} FROM willingness WHERE student_id = $1 AND year = $2"
        ))
        .bind(request.student_id)
        .bind(request.year)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .map(DbWillingness::into_domain)
        .transpose()?;

        let has_active_allotment = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM room_allotments
                WHERE student_id = $1 AND year = $2 AND status = 'Allotted'
            )
            "#,
        )
        .bind(request.student_id)
        .bind(request.year)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        AllotmentCandidate {
            student: &student,
            hostel: &hostel,
            room: &room,
            willingness: willingness.as_ref(),
            has_active_allotment,
        }
        .check()?;

        let willingness_id = willingness
            .map(|w| w.id)
            .ok_or_else(|| CampusError::Validation("No willingness submitted for this year".to_string()))?;

        let row = sqlx::query_as::<_, DbRoomAllotment>(&format!(
            r#"
            INSERT INTO room_allotments ({ALLOTMENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NULL)
            RETURNING {ALLOTMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(student.id)
        .bind(hostel.id)
        .bind(room.id)
        .bind(request.year)
        .bind(willingness_id)
        .bind(AllotmentStatus::Allotted.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query("UPDATE rooms SET occupied = occupied + 1 WHERE id = $1")
            .bind(room.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        tracing::info!(
            "Allotted room {} in {} to student {} for {}",
            room.formatted_room,
            hostel.name,
            student.college_id,
            request.year
        );

        row.into_domain()
    }

    async fn get_allotment(&self, id: Uuid) -> CampusResult<Option<RoomAllotment>> {
        sqlx::query_as::<_, DbRoomAllotment>(&format!(
            "SELECT {ALLOTMENT_COLUMNS} FROM room_allotments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbRoomAllotment::into_domain)
        .transpose()
    }

    async fn vacate_allotment(&self, id: Uuid) -> CampusResult<RoomAllotment> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        let current = sqlx::query_as::<_, DbRoomAllotment>(&format!(
            "SELECT {ALLOTMENT_COLUMNS} FROM room_allotments WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Allotment", id))?
        .into_domain()?;

        if !current.is_active() {
            return Err(CampusError::Conflict("Allotment is already vacated".to_string()));
        }

        let row = sqlx::query_as::<_, DbRoomAllotment>(&format!(
            r#"
            UPDATE room_allotments
            SET status = $2, vacated_at = NOW()
            WHERE id = $1
            RETURNING {ALLOTMENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(AllotmentStatus::Vacated.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query("UPDATE rooms SET occupied = GREATEST(occupied - 1, 0) WHERE id = $1")
            .bind(current.room_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        tracing::info!("Vacated allotment {} in room {}", id, current.room_id);

        row.into_domain()
    }

    async fn reconcile_occupancy(&self) -> CampusResult<Vec<OccupancyCorrection>> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx)?;

        sqlx::query("LOCK TABLE rooms, room_allotments IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let drift = sqlx::query_as::<_, DriftRow>(
            r#"
            SELECT r.id AS room_id, r.occupied AS recorded, COUNT(a.id)::INT AS actual
            FROM rooms r
            LEFT JOIN room_allotments a ON a.room_id = r.id AND a.status = 'Allotted'
            GROUP BY r.id, r.occupied
            HAVING r.occupied <> COUNT(a.id)
            ORDER BY r.id
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for row in &drift {
            sqlx::query("UPDATE rooms SET occupied = $2 WHERE id = $1")
                .bind(row.room_id)
                .bind(row.actual)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        if !drift.is_empty() {
            tracing::warn!("Corrected occupancy on {} room(s)", drift.len());
        }

        Ok(drift
            .into_iter()
            .map(|row| OccupancyCorrection {
                room_id: row.room_id,
                recorded: row.recorded,
                actual: row.actual,
            })
            .collect())
    }
}
