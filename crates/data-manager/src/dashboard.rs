//! Dashboard: session context wired to the roster loader and request client
//!
//! The session lives in a `RefCell` that is never borrowed across an await, so
//! overlapping user actions on the single browser thread interleave safely and
//! the generation tokens decide which response wins.

use std::cell::RefCell;
use std::rc::Rc;

use shift_board_config::ShiftBoardConfig;
use shift_board_shared::{RequestId, ShiftBoardError, ShiftBoardResult, SyncOutcome};
use url::Url;

use crate::request_client::{AcceptOutcome, RequestClient, RequestDraft};
use crate::roster_loader::RosterLoader;
use crate::session::DashboardSession;
use crate::transport::HttpTransport;

pub struct Dashboard<T> {
    loader: RosterLoader<Rc<T>>,
    client: RequestClient<Rc<T>>,
    session: RefCell<DashboardSession>,
}

fn parse_endpoint(field: &str, value: &str) -> ShiftBoardResult<Url> {
    Url::parse(value.trim()).map_err(|e| ShiftBoardError::InvalidConfig {
        message: format!("{field}: {e}"),
        field: Some(field.to_string()),
    })
}

impl<T: HttpTransport> Dashboard<T> {
    pub fn new(transport: T, config: &ShiftBoardConfig) -> ShiftBoardResult<Self> {
        let csv_url = parse_endpoint("csv_url", &config.csv_url)?;
        let webapp_url = parse_endpoint("webapp_url", &config.webapp_url)?;
        let transport = Rc::new(transport);

        Ok(Self {
            loader: RosterLoader::new(Rc::clone(&transport), csv_url),
            client: RequestClient::new(transport, webapp_url, config.status_filter),
            session: RefCell::new(DashboardSession::new(config.calendar.clone())),
        })
    }

    /// Run `f` against the session state
    pub fn with_session<R>(&self, f: impl FnOnce(&mut DashboardSession) -> R) -> R {
        f(&mut *self.session.borrow_mut())
    }

    pub fn client(&self) -> &RequestClient<Rc<T>> {
        &self.client
    }

    /// Fetch the roster and replace the working set. On failure the previous
    /// set stays in place.
    pub async fn load_roster(&self) -> ShiftBoardResult<SyncOutcome<usize>> {
        let token = self.session.borrow_mut().begin_roster_load();

        let records = self.loader.load().await?;

        Ok(self.session.borrow_mut().apply_roster(token, records))
    }

    /// Re-fetch both request lists. A failure marks the board as failed
    /// (unless a newer refresh already started) and is returned.
    pub async fn refresh_requests(&self) -> ShiftBoardResult<SyncOutcome<()>> {
        let token = self.session.borrow_mut().begin_request_refresh();

        match self.client.snapshot().await {
            Ok(snapshot) => Ok(self.session.borrow_mut().apply_requests(token, Some(snapshot))),
            Err(err) => {
                log::error!("Requests Fehler: {err}");
                self.session.borrow_mut().apply_requests(token, None);
                Err(err)
            }
        }
    }

    /// Submit a request, then refresh the lists
    pub async fn submit_request(&self, draft: &RequestDraft) -> ShiftBoardResult<RequestId> {
        let id = self.client.add(draft).await?;
        self.refresh_after_change().await;
        Ok(id)
    }

    /// Accept a request, then refresh the lists. Nothing is refreshed when the
    /// call is skipped or fails.
    pub async fn accept_request(
        &self,
        id: &RequestId,
        accepter: &str,
    ) -> ShiftBoardResult<AcceptOutcome> {
        let outcome = self.client.accept(id, accepter).await?;
        if outcome == AcceptOutcome::Accepted {
            self.refresh_after_change().await;
        }
        Ok(outcome)
    }

    async fn refresh_after_change(&self) {
        if let Err(err) = self.refresh_requests().await {
            log::warn!("Request lists not refreshed: {err}");
        }
    }
}
