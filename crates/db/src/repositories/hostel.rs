use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::allotment::PolicyRoom;
use campus_core::models::hostel::{
    Hostel, HostelLedger, HostelStatus, Room, RoomAsset, Warden,
};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{DbHostel, DbRoom, DbWarden};
use crate::{PgStore, map_sqlx};

pub(crate) const ROOM_COLUMNS: &str = "id, hostel_id, formatted_room, capacity, occupied, assets, created_at";

#[async_trait]
pub trait HostelRepository: Send + Sync {
    async fn create_hostel(&self, hostel: Hostel) -> CampusResult<Hostel>;

    async fn get_hostel(&self, id: Uuid) -> CampusResult<Option<Hostel>>;

    /// Room count, capacity and occupancy summed over the hostel's rooms.
    async fn hostel_ledger(&self, hostel_id: Uuid) -> CampusResult<HostelLedger>;

    async fn update_hostel_status(&self, id: Uuid, status: HostelStatus) -> CampusResult<Hostel>;

    /// Fails with `Conflict` when the hostel already has a room with that name.
    async fn create_room(&self, room: Room) -> CampusResult<Room>;

    async fn get_room(&self, id: Uuid) -> CampusResult<Option<Room>>;

    /// Students holding an active allotment in the room.
    async fn room_occupants(&self, room_id: Uuid) -> CampusResult<Vec<Uuid>>;

    async fn update_room_assets(&self, id: Uuid, assets: Vec<RoomAsset>) -> CampusResult<Room>;

    /// Rooms with free beds in active hostels, optionally limited to one hostel.
    async fn vacant_rooms(&self, hostel_id: Option<Uuid>) -> CampusResult<Vec<PolicyRoom>>;

    /// Fails with `Conflict` when the hostel already has a warden.
    async fn assign_warden(&self, warden: Warden) -> CampusResult<Warden>;

    async fn warden_for_hostel(&self, hostel_id: Uuid) -> CampusResult<Option<Warden>>;
}

#[derive(FromRow)]
struct LedgerRow {
    total_rooms: i64,
    total_capacity: i64,
    total_occupied: i64,
}

#[derive(FromRow)]
struct VacantRoomRow {
    room_id: Uuid,
    hostel_id: Uuid,
    hostel_type: String,
    vacancies: i32,
}

#[async_trait]
impl HostelRepository for PgStore {
    async fn create_hostel(&self, hostel: Hostel) -> CampusResult<Hostel> {
        sqlx::query_as::<_, DbHostel>(
            r#"
            INSERT INTO hostels (id, name, hostel_type, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, hostel_type, status, created_at
            "#,
        )
        .bind(hostel.id)
        .bind(&hostel.name)
        .bind(hostel.hostel_type.as_str())
        .bind(hostel.status.as_str())
        .bind(hostel.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?
        .into_domain()
    }

    async fn get_hostel(&self, id: Uuid) -> CampusResult<Option<Hostel>> {
        sqlx::query_as::<_, DbHostel>(
            "SELECT id, name, hostel_type, status, created_at FROM hostels WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .map(DbHostel::into_domain)
        .transpose()
    }

    async fn hostel_ledger(&self, hostel_id: Uuid) -> CampusResult<HostelLedger> {
        let row = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT COUNT(*)::BIGINT AS total_rooms,
                   COALESCE(SUM(capacity), 0)::BIGINT AS total_capacity,
                   COALESCE(SUM(occupied), 0)::BIGINT AS total_occupied
            FROM rooms
            WHERE hostel_id = $1
            "#,
        )
        .bind(hostel_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(HostelLedger {
            total_rooms: row.total_rooms,
            total_capacity: row.total_capacity,
            total_occupied: row.total_occupied,
        })
    }

    async fn update_hostel_status(&self, id: Uuid, status: HostelStatus) -> CampusResult<Hostel> {
        sqlx::query_as::<_, DbHostel>(
            r#"
            UPDATE hostels SET status = $2
            WHERE id = $1
            RETURNING id, name, hostel_type, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Hostel", id))?
        .into_domain()
    }

    async fn create_room(&self, room: Room) -> CampusResult<Room> {
        let row = sqlx::query_as::<_, DbRoom>(&format!(
            r#"
            INSERT INTO rooms ({ROOM_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ROOM_COLUMNS}
            "#
        ))
        .bind(room.id)
        .bind(room.hostel_id)
        .bind(&room.formatted_room)
        .bind(room.capacity)
        .bind(room.occupied)
        .bind(Json(&room.assets))
        .bind(room.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn get_room(&self, id: Uuid) -> CampusResult<Option<Room>> {
        let row = sqlx::query_as::<_, DbRoom>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Room::from))
    }

    async fn room_occupants(&self, room_id: Uuid) -> CampusResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT student_id FROM room_allotments
            WHERE room_id = $1 AND status = 'Allotted'
            ORDER BY allotted_at ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)
    }

    async fn update_room_assets(&self, id: Uuid, assets: Vec<RoomAsset>) -> CampusResult<Room> {
        let row = sqlx::query_as::<_, DbRoom>(&format!(
            "UPDATE rooms SET assets = $2 WHERE id = $1 RETURNING {ROOM_COLUMNS}"
        ))
        .bind(id)
        .bind(Json(&assets))
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| CampusError::not_found("Room", id))?;

        Ok(row.into())
    }

    async fn vacant_rooms(&self, hostel_id: Option<Uuid>) -> CampusResult<Vec<PolicyRoom>> {
        let rows = sqlx::query_as::<_, VacantRoomRow>(
            r#"
            SELECT r.id AS room_id, r.hostel_id, h.hostel_type, r.capacity - r.occupied AS vacancies
            FROM rooms r
            JOIN hostels h ON h.id = r.hostel_id
            WHERE h.status = 'active'
              AND r.occupied < r.capacity
              AND ($1::UUID IS NULL OR r.hostel_id = $1)
            ORDER BY h.name ASC, r.formatted_room ASC
            "#,
        )
        .bind(hostel_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| -> CampusResult<PolicyRoom> {
                Ok(PolicyRoom {
                    room_id: row.room_id,
                    hostel_id: row.hostel_id,
                    hostel_type: row.hostel_type.parse()?,
                    vacancies: row.vacancies,
                })
            })
            .collect()
    }

    async fn assign_warden(&self, warden: Warden) -> CampusResult<Warden> {
        let row = sqlx::query_as::<_, DbWarden>(
            r#"
            INSERT INTO wardens (id, faculty_id, hostel_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, faculty_id, hostel_id, created_at
            "#,
        )
        .bind(warden.id)
        .bind(warden.faculty_id)
        .bind(warden.hostel_id)
        .bind(warden.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.into())
    }

    async fn warden_for_hostel(&self, hostel_id: Uuid) -> CampusResult<Option<Warden>> {
        let row = sqlx::query_as::<_, DbWarden>(
            "SELECT id, faculty_id, hostel_id, created_at FROM wardens WHERE hostel_id = $1",
        )
        .bind(hostel_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Warden::from))
    }
}
