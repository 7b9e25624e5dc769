//! Roster records to calendar events

use shift_board_shared::{CalendarEvent, EventProps, RosterRecord};

use crate::shift_code::{classify, normalize_code};
use crate::time_format::combine_timestamp;

/// Project records into calendar events, skipping any record without a date
pub fn project(records: &[RosterRecord]) -> Vec<CalendarEvent> {
    records.iter().filter_map(project_record).collect()
}

pub fn project_record(record: &RosterRecord) -> Option<CalendarEvent> {
    if record.date.is_empty() {
        return None;
    }

    let label = normalize_code(Some(&record.code));
    let title = format!("{} ({})", record.name, label);
    let class_names = vec![classify(&label).css_class().to_string()];

    let event = if record.is_all_day() {
        CalendarEvent {
            title,
            start: record.date.clone(),
            end: None,
            all_day: true,
            class_names,
            extended_props: EventProps { schicht: label },
        }
    } else {
        let end = record
            .end
            .as_deref()
            .filter(|end| !end.is_empty())
            .map(|end| combine_timestamp(&record.date, Some(end)));

        CalendarEvent {
            title,
            start: combine_timestamp(&record.date, record.start.as_deref()),
            end,
            all_day: false,
            class_names,
            extended_props: EventProps { schicht: label },
        }
    };

    Some(event)
}
