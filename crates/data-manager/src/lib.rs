//! Data Manager crate for the Shift Board dashboard
//! Roster loading, filtering, calendar projection and request store synchronization

pub mod dashboard;
pub mod filter;
pub mod notices;
pub mod projector;
pub mod request_client;
pub mod request_list;
pub mod roster_loader;
pub mod session;
pub mod shift_code;
pub mod time_format;
pub mod transport;
pub mod views;

#[cfg(feature = "native")]
pub mod native_client;
#[cfg(feature = "wasm")]
pub mod wasm_fetch;

pub use dashboard::Dashboard;
pub use filter::apply_filters;
pub use notices::{Notice, NoticeLevel};
pub use projector::project;
pub use request_client::{AcceptOutcome, ApiEnvelope, RequestClient, RequestDraft, RequestSnapshot};
pub use request_list::{RequestItemView, RequestListView};
pub use roster_loader::{load_roster, RosterLoader};
pub use session::{DashboardSession, Generation, RequestBoard, RequestBoardView};
pub use shift_code::{classify, normalize_code};
pub use time_format::combine_timestamp;
pub use transport::{CacheMode, HttpGet, HttpResponse, HttpTransport};
pub use views::{CalendarRenderer, CalendarUpdate, TableView};

#[cfg(feature = "native")]
pub use native_client::ReqwestTransport;
#[cfg(feature = "wasm")]
pub use wasm_fetch::FetchTransport;
