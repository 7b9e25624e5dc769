//! Shift code normalization
//!
//! Roster codes are short, inconsistently cased strings. Every consumer works
//! with the derived [`ShiftLabel`], never with the raw code.

use shift_board_shared::{ShiftClass, ShiftLabel};

/// Code sets checked in priority order
const CODE_SETS: [(&[&str], ShiftLabel); 4] = [
    (&["EF", "FN"], ShiftLabel::Fruehschicht),
    (&["ES", "SN"], ShiftLabel::Spaetschicht),
    (&["K2N", "AK2", "AKN", "N", "NA"], ShiftLabel::Nachtschicht),
    (&["U", "O"], ShiftLabel::Urlaub),
];

const OFF_CODE: &str = "AV";

/// Map a raw roster code to its display label. Total: never fails.
pub fn normalize_code(raw: Option<&str>) -> ShiftLabel {
    let code = raw.unwrap_or_default().trim().to_uppercase();

    for (codes, label) in CODE_SETS.iter() {
        if codes.contains(&code.as_str()) {
            return label.clone();
        }
    }

    if code == OFF_CODE {
        return ShiftLabel::Frei;
    }

    ShiftLabel::Raw(code)
}

/// Styling tag for a label, matched on the lowercased label text
pub fn classify(label: &ShiftLabel) -> ShiftClass {
    let text = label.as_str().to_lowercase();

    if text.contains("früh") {
        ShiftClass::Frueh
    } else if text.contains("spät") {
        ShiftClass::Spaet
    } else if text.contains("nacht") {
        ShiftClass::Nacht
    } else if text.contains("urlaub") {
        ShiftClass::Urlaub
    } else if text.contains("frei") {
        ShiftClass::Frei
    } else {
        ShiftClass::Unstyled
    }
}
