//! Session context: the single owner of roster, filter and request state
//!
//! Network responses are applied through generation tokens. Each channel
//! (roster, requests) hands out a monotonically increasing token when a fetch
//! starts; a response is applied only if its token is still the newest one.

use shift_board_shared::{CalendarOptions, FilterState, RosterRecord, ShiftRequest, SyncOutcome};

use crate::filter::apply_filters;
use crate::projector::project;
use crate::request_client::RequestSnapshot;
use crate::request_list::{
    render_accepted, render_open, RequestListView, ACCEPTED_UNAVAILABLE, REQUESTS_LOAD_FAILED,
};
use crate::views::{CalendarRenderer, CalendarUpdate, TableView};

/// Token identifying one fetch on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Per-channel generation counter
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: u64,
}

impl GenerationCounter {
    /// Start a new fetch; every earlier token becomes stale
    pub fn advance(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, token: Generation) -> bool {
        token.0 == self.latest
    }
}

/// Request lists as last fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBoard {
    NotLoaded,
    Loaded {
        open: Vec<ShiftRequest>,
        accepted: Vec<ShiftRequest>,
    },
    Failed,
}

/// Both request lists ready for display
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct RequestBoardView {
    pub open: RequestListView,
    pub accepted: RequestListView,
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    roster: Vec<RosterRecord>,
    filter: FilterState,
    requests: RequestBoard,
    calendar: CalendarRenderer,
    roster_generation: GenerationCounter,
    request_generation: GenerationCounter,
}

impl DashboardSession {
    pub fn new(calendar_options: CalendarOptions) -> Self {
        Self {
            roster: Vec::new(),
            filter: FilterState::default(),
            requests: RequestBoard::NotLoaded,
            calendar: CalendarRenderer::new(calendar_options),
            roster_generation: GenerationCounter::default(),
            request_generation: GenerationCounter::default(),
        }
    }

    // Roster channel

    pub fn begin_roster_load(&mut self) -> Generation {
        self.roster_generation.advance()
    }

    /// Replace the roster if `token` is still current. Returns the record count.
    pub fn apply_roster(
        &mut self,
        token: Generation,
        records: Vec<RosterRecord>,
    ) -> SyncOutcome<usize> {
        if !self.roster_generation.is_current(token) {
            log::debug!("Dropping superseded roster response {token:?}");
            return SyncOutcome::Superseded;
        }

        let count = records.len();
        self.roster = records;
        SyncOutcome::Applied(count)
    }

    pub fn roster(&self) -> &[RosterRecord] {
        &self.roster
    }

    // Request channel

    pub fn begin_request_refresh(&mut self) -> Generation {
        self.request_generation.advance()
    }

    pub fn apply_requests(
        &mut self,
        token: Generation,
        snapshot: Option<RequestSnapshot>,
    ) -> SyncOutcome<()> {
        if !self.request_generation.is_current(token) {
            log::debug!("Dropping superseded request list response {token:?}");
            return SyncOutcome::Superseded;
        }

        self.requests = match snapshot {
            Some(RequestSnapshot { open, accepted }) => RequestBoard::Loaded { open, accepted },
            None => RequestBoard::Failed,
        };
        SyncOutcome::Applied(())
    }

    pub fn requests(&self) -> &RequestBoard {
        &self.requests
    }

    pub fn request_view(&self) -> RequestBoardView {
        match &self.requests {
            RequestBoard::Loaded { open, accepted } => RequestBoardView {
                open: render_open(open),
                accepted: render_accepted(accepted),
            },
            RequestBoard::NotLoaded => RequestBoardView {
                open: render_open(&[]),
                accepted: render_accepted(&[]),
            },
            RequestBoard::Failed => RequestBoardView {
                open: RequestListView::placeholder(REQUESTS_LOAD_FAILED),
                accepted: RequestListView::placeholder(ACCEPTED_UNAVAILABLE),
            },
        }
    }

    // Filters

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_name_filter(&mut self, name: &str) {
        self.filter.name_substring = name.trim().to_string();
    }

    pub fn set_shift_filter(&mut self, label: &str) {
        self.filter.shift_label_exact = label.trim().to_string();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    pub fn visible_records(&self) -> Vec<RosterRecord> {
        apply_filters(&self.roster, &self.filter)
    }

    // Rendering

    pub fn render_calendar(&mut self) -> CalendarUpdate {
        let events = project(&self.visible_records());
        self.calendar.render(events)
    }

    pub fn table(&self) -> TableView {
        TableView::build(&self.visible_records())
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(CalendarOptions::default())
    }
}
