//! Name and shift-type filtering over the loaded roster

use shift_board_shared::{FilterState, RosterRecord};

use crate::shift_code::normalize_code;

/// Records passing both predicates, in their original order.
///
/// Empty filter fields match everything. The shift predicate compares the
/// derived label, not the raw code.
pub fn apply_filters(records: &[RosterRecord], filter: &FilterState) -> Vec<RosterRecord> {
    let name_needle = filter.name_substring.to_lowercase();
    let label_needle = filter.shift_label_exact.to_lowercase();

    records
        .iter()
        .filter(|record| matches_name(record, &name_needle))
        .filter(|record| matches_label(record, &label_needle))
        .cloned()
        .collect()
}

fn matches_name(record: &RosterRecord, needle: &str) -> bool {
    needle.is_empty() || record.name.to_lowercase().contains(needle)
}

fn matches_label(record: &RosterRecord, needle: &str) -> bool {
    needle.is_empty() || normalize_code(Some(&record.code)).as_str().to_lowercase() == needle
}
