//! User-facing notifications for the outcome of each user action

use serde::Serialize;
use shift_board_shared::{RequestId, ShiftBoardError};

pub const ROSTER_LOAD_FAILED: &str = "CSV konnte nicht geladen werden.";
pub const MISSING_REQUEST_FIELDS: &str = "Bitte Name, Datum und Dienst wählen.";
pub const REQUEST_ACCEPTED: &str = "Übernommen.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Blocking notification shown to the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn roster_failed(err: &ShiftBoardError) -> Self {
        log::error!("CSV Fehler: {err}");
        Self::error(ROSTER_LOAD_FAILED)
    }

    pub fn request_sent(id: &RequestId) -> Self {
        Self::info(format!("Anfrage gesendet (ID: {id})."))
    }

    pub fn send_failed(err: &ShiftBoardError) -> Self {
        log::error!("Senden fehlgeschlagen: {err}");
        match err {
            ShiftBoardError::Validation { .. } => Self::error(MISSING_REQUEST_FIELDS),
            other => Self::error(format!("Fehler beim Senden: {other}")),
        }
    }

    pub fn accepted() -> Self {
        Self::info(REQUEST_ACCEPTED)
    }

    pub fn accept_failed(err: &ShiftBoardError) -> Self {
        log::error!("Akzeptieren fehlgeschlagen: {err}");
        Self::error(format!("Fehler beim Akzeptieren: {err}"))
    }
}
