//! Display models for the roster table and the calendar widget

use serde::Serialize;
use shift_board_shared::{CalendarEvent, CalendarOptions, RosterRecord};

use crate::shift_code::normalize_code;

pub const TABLE_HEADERS: [&str; 5] = ["Datum", "Beginn", "Ende", "Name", "Dienst"];

/// Roster table: fixed headers, five display columns per row
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TableView {
    pub headers: [&'static str; 5],
    pub rows: Vec<[String; 5]>,
}

impl TableView {
    pub fn build(records: &[RosterRecord]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                [
                    record.date.clone(),
                    record.start.clone().unwrap_or_default(),
                    record.end.clone().unwrap_or_default(),
                    record.name.clone(),
                    normalize_code(Some(&record.code)).to_string(),
                ]
            })
            .collect();

        Self {
            headers: TABLE_HEADERS,
            rows,
        }
    }
}

/// Instruction for the calendar widget
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CalendarUpdate {
    /// First render: build the widget with these options and events
    Create {
        options: CalendarOptions,
        events: Vec<CalendarEvent>,
    },
    /// Later renders: drop every event and install this source
    ReplaceEvents { events: Vec<CalendarEvent> },
}

impl CalendarUpdate {
    pub fn events(&self) -> &[CalendarEvent] {
        match self {
            CalendarUpdate::Create { events, .. } | CalendarUpdate::ReplaceEvents { events } => {
                events
            }
        }
    }
}

/// Tracks whether the calendar widget has been constructed
#[derive(Debug, Clone, Default)]
pub struct CalendarRenderer {
    options: CalendarOptions,
    mounted: bool,
}

impl CalendarRenderer {
    pub fn new(options: CalendarOptions) -> Self {
        Self {
            options,
            mounted: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn render(&mut self, events: Vec<CalendarEvent>) -> CalendarUpdate {
        if self.mounted {
            CalendarUpdate::ReplaceEvents { events }
        } else {
            self.mounted = true;
            CalendarUpdate::Create {
                options: self.options.clone(),
                events,
            }
        }
    }
}
