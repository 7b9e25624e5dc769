//! Shared types for the Shift Board dashboard
//!
//! This crate contains the data model shared between the config-system,
//! data-manager, and wasm-bridge crates. Every type here is plain data:
//! the behavior that produces or consumes it lives in the data-manager.

use serde::{Deserialize, Serialize};

pub mod calendar_config;
pub mod errors;
pub mod requests;

pub use calendar_config::{CalendarOptions, HeaderToolbar, StatusFilterMode};
pub use errors::{ErrorContext, ErrorResponse, ShiftBoardError, ShiftBoardResult};
pub use requests::{RequestId, RequestStatus, ShiftRequest};

/// One parsed roster row.
///
/// Rows without a date never become a `RosterRecord`; the loader drops them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterRecord {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub name: String,
    pub code: String,
}

impl RosterRecord {
    pub fn new(
        date: impl Into<String>,
        start: Option<&str>,
        end: Option<&str>,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            name: name.into(),
            code: code.into(),
        }
    }

    /// True when the record has no start time and renders as an all-day entry
    pub fn is_all_day(&self) -> bool {
        self.start.as_deref().map_or(true, str::is_empty)
    }
}

/// Canonical display label of a shift code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShiftLabel {
    Fruehschicht,
    Spaetschicht,
    Nachtschicht,
    Urlaub,
    Frei,
    /// Unrecognized code, trimmed and upper-cased. Empty for empty input.
    Raw(String),
}

impl ShiftLabel {
    /// Labels offered by the shift-type selector
    pub const SELECTABLE: [ShiftLabel; 5] = [
        ShiftLabel::Fruehschicht,
        ShiftLabel::Spaetschicht,
        ShiftLabel::Nachtschicht,
        ShiftLabel::Urlaub,
        ShiftLabel::Frei,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ShiftLabel::Fruehschicht => "Frühschicht",
            ShiftLabel::Spaetschicht => "Spätschicht",
            ShiftLabel::Nachtschicht => "Nachtschicht",
            ShiftLabel::Urlaub => "Urlaub",
            ShiftLabel::Frei => "Frei",
            ShiftLabel::Raw(code) => code,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl std::fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShiftLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Styling tag attached to calendar events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShiftClass {
    Frueh,
    Spaet,
    Nacht,
    Urlaub,
    Frei,
    #[serde(rename = "")]
    Unstyled,
}

impl ShiftClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            ShiftClass::Frueh => "frueh",
            ShiftClass::Spaet => "spaet",
            ShiftClass::Nacht => "nacht",
            ShiftClass::Urlaub => "urlaub",
            ShiftClass::Frei => "frei",
            ShiftClass::Unstyled => "",
        }
    }
}

/// Extra data the calendar widget keeps with an event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EventProps {
    pub schicht: ShiftLabel,
}

/// Calendar-displayable event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    /// Bare date for all-day events, combined date and time otherwise
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub all_day: bool,
    pub class_names: Vec<String>,
    pub extended_props: EventProps,
}

/// Name and shift-type filter driving the calendar and the table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub name_substring: String,
    pub shift_label_exact: String,
}

impl FilterState {
    pub fn new(name_substring: &str, shift_label_exact: &str) -> Self {
        Self {
            name_substring: name_substring.trim().to_string(),
            shift_label_exact: shift_label_exact.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_substring.is_empty() && self.shift_label_exact.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of a network-triggered update guarded by a generation token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    /// The response was the latest on its channel and has been applied
    Applied(T),
    /// A newer request on the same channel started meanwhile; the response was dropped
    Superseded,
}

impl<T> SyncOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied(_))
    }
}
