//! Client for the remote shift request store
//!
//! Every call is one GET against the configured endpoint carrying an `action`
//! parameter and a `t=<millis>` cache buster. Responses share the envelope
//! `{ok, error?, items?, id?}`. Nothing is retried.

use serde::Deserialize;
use shift_board_shared::{
    RequestId, ShiftBoardError, ShiftBoardResult, ShiftRequest, StatusFilterMode,
};
use url::Url;

use crate::request_list::{sort_accepted, sort_open};
use crate::transport::{HttpGet, HttpTransport};

/// Shown when a listing call fails without a message
pub const DEFAULT_API_ERROR: &str = "API Fehler";
/// Shown when an add or accept call fails without a message
pub const DEFAULT_ACTION_ERROR: &str = "Fehler";

/// Response envelope shared by every action
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ShiftRequest>>,
    #[serde(default)]
    pub id: Option<RequestId>,
}

impl ApiEnvelope {
    /// Turn `ok: false` into a `Remote` error carrying the server's message,
    /// or `fallback` when there is none
    fn into_result(self, fallback: &str) -> ShiftBoardResult<Self> {
        if self.ok {
            return Ok(self);
        }

        let message = self
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Err(ShiftBoardError::remote(message))
    }
}

/// A request as entered in the submission form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    pub name: String,
    pub date: String,
    pub code: String,
    pub note: String,
}

impl RequestDraft {
    pub fn new(name: &str, date: &str, code: &str, note: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            date: date.trim().to_string(),
            code: code.trim().to_string(),
            note: note.trim().to_string(),
        }
    }

    /// Name, date and code are required
    pub fn validate(&self) -> ShiftBoardResult<()> {
        for (field, value) in [("name", &self.name), ("date", &self.date), ("code", &self.code)] {
            if value.is_empty() {
                return Err(ShiftBoardError::validation(field));
            }
        }
        Ok(())
    }
}

/// Result of an accept call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted,
    /// Missing id or accepter name; nothing was sent
    Skipped,
}

/// Open and accepted requests from one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSnapshot {
    pub open: Vec<ShiftRequest>,
    pub accepted: Vec<ShiftRequest>,
}

pub struct RequestClient<T> {
    transport: T,
    endpoint: Url,
    status_filter: StatusFilterMode,
}

impl<T: HttpTransport> RequestClient<T> {
    pub fn new(transport: T, endpoint: Url, status_filter: StatusFilterMode) -> Self {
        Self {
            transport,
            endpoint,
            status_filter,
        }
    }

    pub fn status_filter(&self) -> StatusFilterMode {
        self.status_filter
    }

    fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("t", &chrono::Utc::now().timestamp_millis().to_string());
        }
        url
    }

    async fn call(&self, url: Url, fallback: &str) -> ShiftBoardResult<ApiEnvelope> {
        log::debug!("Request store call: {url}");

        let response = self
            .transport
            .get(HttpGet::new(url).no_store())
            .await
            .map_err(ShiftBoardError::into_remote)?;

        if !response.is_success() {
            return Err(ShiftBoardError::remote(format!(
                "HTTP error! status: {}",
                response.status
            )));
        }

        let envelope: ApiEnvelope = serde_json::from_str(&response.body)
            .map_err(|e| ShiftBoardError::from(e).into_remote())?;

        envelope.into_result(fallback)
    }

    /// Every request the store holds, in store order
    pub async fn list_all(&self) -> ShiftBoardResult<Vec<ShiftRequest>> {
        let url = self.action_url("requests", &[]);
        Ok(self.call(url, DEFAULT_API_ERROR).await?.items.unwrap_or_default())
    }

    /// Open requests, ascending by date then name.
    ///
    /// With [`StatusFilterMode::Server`] the store is asked for `status=open`;
    /// the result is filtered locally either way.
    pub async fn list_open(&self) -> ShiftBoardResult<Vec<ShiftRequest>> {
        let url = match self.status_filter {
            StatusFilterMode::Client => self.action_url("requests", &[]),
            StatusFilterMode::Server => self.action_url("requests", &[("status", "open")]),
        };

        let items = self.call(url, DEFAULT_API_ERROR).await?.items.unwrap_or_default();
        let mut open: Vec<_> = items.into_iter().filter(ShiftRequest::is_open).collect();
        sort_open(&mut open);
        Ok(open)
    }

    /// Accepted requests, most recently accepted first
    pub async fn list_accepted(&self) -> ShiftBoardResult<Vec<ShiftRequest>> {
        let items = self.list_all().await?;
        Ok(partition(items).accepted)
    }

    /// Both lists for one refresh: a single listing call in client mode, two in
    /// server mode.
    pub async fn snapshot(&self) -> ShiftBoardResult<RequestSnapshot> {
        match self.status_filter {
            StatusFilterMode::Client => Ok(partition(self.list_all().await?)),
            StatusFilterMode::Server => {
                let open = self.list_open().await?;
                let accepted = self.list_accepted().await?;
                Ok(RequestSnapshot { open, accepted })
            }
        }
    }

    /// Submit a new request. Validation runs before any network call.
    pub async fn add(&self, draft: &RequestDraft) -> ShiftBoardResult<RequestId> {
        draft.validate()?;

        let url = self.action_url(
            "add",
            &[
                ("name", draft.name.as_str()),
                ("date", draft.date.as_str()),
                ("code", draft.code.as_str()),
                ("note", draft.note.as_str()),
            ],
        );

        let envelope = self.call(url, DEFAULT_ACTION_ERROR).await?;
        let id = envelope.id.unwrap_or_default();
        log::info!("Request {id} submitted for {} on {}", draft.name, draft.date);
        Ok(id)
    }

    /// Accept an open request. Empty id or accepter is a no-op.
    pub async fn accept(&self, id: &RequestId, accepter: &str) -> ShiftBoardResult<AcceptOutcome> {
        let accepter = accepter.trim();
        if id.is_empty() || accepter.is_empty() {
            log::debug!("Accept skipped: missing id or accepter");
            return Ok(AcceptOutcome::Skipped);
        }

        let url = self.action_url("accept", &[("id", id.as_str()), ("accepter", accepter)]);
        self.call(url, DEFAULT_ACTION_ERROR).await?;

        log::info!("Request {id} accepted by {accepter}");
        Ok(AcceptOutcome::Accepted)
    }
}

fn partition(items: Vec<ShiftRequest>) -> RequestSnapshot {
    let (mut open, rest): (Vec<_>, Vec<_>) = items.into_iter().partition(ShiftRequest::is_open);
    let mut accepted: Vec<_> = rest.into_iter().filter(ShiftRequest::is_accepted).collect();

    sort_open(&mut open);
    sort_accepted(&mut accepted);

    RequestSnapshot { open, accepted }
}
