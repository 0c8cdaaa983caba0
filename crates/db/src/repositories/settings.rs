use async_trait::async_trait;
use campus_core::errors::CampusResult;
use campus_core::models::settings::{GLOBAL_SETTINGS_ID, Settings, UpdateSettingsRequest};

use crate::models::DbSettings;
use crate::{PgStore, map_sqlx};

const SETTINGS_COLUMNS: &str =
    "id, is_registration_open, are_grade_sheets_visible, maintenance_mode, announcement, updated_at";

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The global settings document, or defaults when it was never written.
    async fn load_settings(&self) -> CampusResult<Settings>;

    /// Applies the fields present in `patch` to the stored document in a
    /// single write. Absent fields keep their stored value.
    async fn update_settings(&self, patch: UpdateSettingsRequest) -> CampusResult<Settings>;
}

#[async_trait]
impl SettingsRepository for PgStore {
    async fn load_settings(&self) -> CampusResult<Settings> {
        let row = sqlx::query_as::<_, DbSettings>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM settings WHERE id = $1"
        ))
        .bind(GLOBAL_SETTINGS_ID)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx)?;

        Ok(row.map(Settings::from).unwrap_or_default())
    }

    async fn update_settings(&self, patch: UpdateSettingsRequest) -> CampusResult<Settings> {
        // The first write seeds the row from defaults; later ones merge
        // column by column under the row lock taken by ON CONFLICT.
        let defaults = Settings::default();
        let row = sqlx::query_as::<_, DbSettings>(&format!(
            r#"
            INSERT INTO settings ({SETTINGS_COLUMNS})
            VALUES (
                $1,
                COALESCE($2, $6),
                COALESCE($3, $7),
                COALESCE($4, $8),
                COALESCE($5, $9),
                NOW()
            )
            ON CONFLICT (id) DO UPDATE SET
                is_registration_open = COALESCE($2, settings.is_registration_open),
                are_grade_sheets_visible = COALESCE($3, settings.are_grade_sheets_visible),
                maintenance_mode = COALESCE($4, settings.maintenance_mode),
                announcement = COALESCE($5, settings.announcement),
                updated_at = NOW()
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(GLOBAL_SETTINGS_ID)
        .bind(patch.is_registration_open)
        .bind(patch.are_grade_sheets_visible)
        .bind(patch.maintenance_mode)
        .bind(patch.announcement)
        .bind(defaults.is_registration_open)
        .bind(defaults.are_grade_sheets_visible)
        .bind(defaults.maintenance_mode)
        .bind(defaults.announcement)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx)?;

        tracing::info!(
            "Settings saved: registration_open={}, grade_sheets_visible={}, maintenance={}",
            row.is_registration_open,
            row.are_grade_sheets_visible,
            row.maintenance_mode
        );
        Ok(row.into())
    }
}
