//! Ordering and display models for the open and accepted request lists

use serde::Serialize;
use shift_board_shared::{RequestId, ShiftLabel, ShiftRequest};

use crate::shift_code::normalize_code;

pub const NO_OPEN_REQUESTS: &str = "Noch keine offenen Anfragen.";
pub const NO_ACCEPTED_REQUESTS: &str = "Keine angenommenen Anfragen.";
pub const REQUESTS_LOAD_FAILED: &str = "Fehler beim Laden.";
pub const ACCEPTED_UNAVAILABLE: &str = "–";

/// Ascending by date, then by name
pub fn sort_open(items: &mut [ShiftRequest]) {
    items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
}

/// Descending by acceptance timestamp; missing timestamps sort last
pub fn sort_accepted(items: &mut [ShiftRequest]) {
    items.sort_by(|a, b| {
        let a_at = a.accepted_at.as_deref().unwrap_or_default();
        let b_at = b.accepted_at.as_deref().unwrap_or_default();
        b_at.cmp(a_at)
    });
}

/// One rendered request entry
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequestItemView {
    pub id: RequestId,
    pub date: String,
    pub name: String,
    pub label: ShiftLabel,
    /// Muted text after the name
    pub detail: String,
    /// Status line, accepted entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_line: Option<String>,
    /// Whether the entry offers an accept action
    pub acceptable: bool,
}

/// A list ready for display: entries or a fixed placeholder
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RequestListView {
    Items { items: Vec<RequestItemView> },
    Placeholder { message: String },
}

impl RequestListView {
    pub fn placeholder(message: &str) -> Self {
        RequestListView::Placeholder {
            message: message.to_string(),
        }
    }

    pub fn items(&self) -> &[RequestItemView] {
        match self {
            RequestListView::Items { items } => items,
            RequestListView::Placeholder { .. } => &[],
        }
    }
}

pub fn render_open(items: &[ShiftRequest]) -> RequestListView {
    if items.is_empty() {
        return RequestListView::placeholder(NO_OPEN_REQUESTS);
    }

    let mut sorted = items.to_vec();
    sort_open(&mut sorted);

    let items = sorted
        .into_iter()
        .map(|request| {
            let label = normalize_code(Some(&request.code));
            let detail = if request.note.is_empty() {
                format!("({label})")
            } else {
                format!("({label} · {})", request.note)
            };

            RequestItemView {
                id: request.id,
                date: request.date,
                name: request.name,
                label,
                detail,
                status_line: None,
                acceptable: true,
            }
        })
        .collect();

    RequestListView::Items { items }
}

pub fn render_accepted(items: &[ShiftRequest]) -> RequestListView {
    if items.is_empty() {
        return RequestListView::placeholder(NO_ACCEPTED_REQUESTS);
    }

    let mut sorted = items.to_vec();
    sort_accepted(&mut sorted);

    let items = sorted
        .into_iter()
        .map(|request| {
            let label = normalize_code(Some(&request.code));

            let mut status_line = "Status: accepted".to_string();
            if let Some(who) = request.accepter_name.as_deref().filter(|w| !w.is_empty()) {
                status_line.push_str(&format!(" — angenommen von {who}"));
            }
            if let Some(when) = request.accepted_at.as_deref().filter(|w| !w.is_empty()) {
                let minute: String = when.chars().take(16).collect();
                status_line.push_str(&format!(" ({minute})"));
            }

            RequestItemView {
                id: request.id,
                date: request.date,
                name: request.name,
                detail: format!("({label})"),
                label,
                status_line: Some(status_line),
                acceptable: false,
            }
        })
        .collect();

    RequestListView::Items { items }
}
