//! Calendar widget options and request-listing mode

use serde::{Deserialize, Serialize};

/// Toolbar layout handed to the calendar widget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderToolbar {
    pub left: String,
    pub center: String,
    pub right: String,
}

impl Default for HeaderToolbar {
    fn default() -> Self {
        Self {
            left: "prev,next today".to_string(),
            center: "title".to_string(),
            right: "dayGridMonth,timeGridWeek,timeGridDay".to_string(),
        }
    }
}

/// Options used when the calendar widget is constructed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarOptions {
    pub initial_view: String,
    pub locale: String,
    /// 0 = Sunday, 1 = Monday
    pub first_day: u8,
    pub header_toolbar: HeaderToolbar,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            initial_view: "dayGridMonth".to_string(),
            locale: "de".to_string(),
            first_day: 1,
            header_toolbar: HeaderToolbar::default(),
        }
    }
}

/// Where open requests are separated from accepted ones
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilterMode {
    /// One listing call, partitioned locally
    #[default]
    Client,
    /// The open list is requested with `status=open`
    Server,
}
