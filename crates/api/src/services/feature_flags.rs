//! Feature flags backed by the global settings document.
//!
//! Flags are read from storage on every call, so a change made through
//! `PUT /settings` is seen by the very next request on any instance.

use std::sync::Arc;

use async_trait::async_trait;
use campus_core::errors::{CampusError, CampusResult};
use campus_core::models::settings::{Settings, UpdateSettingsRequest};
use campus_db::Database;

#[async_trait]
pub trait FeatureFlags: Send + Sync {
    async fn current(&self) -> CampusResult<Settings>;

    /// Applies a partial update and returns the stored result.
    async fn update(&self, patch: UpdateSettingsRequest) -> CampusResult<Settings>;

    async fn require_registration_open(&self) -> CampusResult<()> {
        if self.current().await?.is_registration_open {
            Ok(())
        } else {
            Err(CampusError::FeatureDisabled("Course registration is closed".to_string()))
        }
    }

    async fn require_grade_sheets_visible(&self) -> CampusResult<()> {
        if self.current().await?.are_grade_sheets_visible {
            Ok(())
        } else {
            Err(CampusError::FeatureDisabled(
                "Grade sheets have not been published yet".to_string(),
            ))
        }
    }
}

pub struct StoredFeatureFlags {
    db: Arc<dyn Database>,
}

impl StoredFeatureFlags {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeatureFlags for StoredFeatureFlags {
    async fn current(&self) -> CampusResult<Settings> {
        self.db.load_settings().await
    }

    async fn update(&self, patch: UpdateSettingsRequest) -> CampusResult<Settings> {
        self.db.update_settings(patch).await
    }
}
