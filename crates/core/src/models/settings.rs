use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const GLOBAL_SETTINGS_ID: &str = "global-settings";

/// Feature flags consulted on every gated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub is_registration_open: bool,
    pub are_grade_sheets_visible: bool,
    pub maintenance_mode: bool,
    pub announcement: String,
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            is_registration_open: false,
            are_grade_sheets_visible: false,
            maintenance_mode: false,
            announcement: String::new(),
            updated_at: Utc::now(),
        }
    }
}

impl Settings {
    pub fn apply(mut self, patch: UpdateSettingsRequest) -> Self {
        if let Some(open) = patch.is_registration_open {
            self.is_registration_open = open;
        }
        if let Some(visible) = patch.are_grade_sheets_visible {
            self.are_grade_sheets_visible = visible;
        }
        if let Some(maintenance) = patch.maintenance_mode {
            self.maintenance_mode = maintenance;
        }
        if let Some(announcement) = patch.announcement {
            self.announcement = announcement;
        }
        self.updated_at = Utc::now();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub is_registration_open: Option<bool>,
    pub are_grade_sheets_visible: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub announcement: Option<String>,
}
