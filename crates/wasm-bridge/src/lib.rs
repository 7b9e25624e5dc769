//! WASM Bridge crate for the Shift Board dashboard
//! Exposes the dashboard session to the page script. Every method returns
//! plain JS objects; DOM work and the calendar widget stay on the JS side.

use js_sys::Promise;
use serde::Serialize;
use shift_board_config::ShiftBoardConfig;
use shift_board_data::{AcceptOutcome, Dashboard, FetchTransport, Notice, RequestDraft};
use shift_board_shared::{ErrorResponse, RequestId, ShiftBoardError, ShiftLabel, SyncOutcome};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub mod instance_manager;

use instance_manager::{BrowserDashboard, InstanceManager};

/// Outcome of a user action as reported to the page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionReport {
    /// False when a newer call of the same kind already replaced the result,
    /// when the call was skipped for missing input, or on an error notice
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl ActionReport {
    fn applied() -> Self {
        Self {
            applied: true,
            notice: None,
        }
    }

    fn superseded() -> Self {
        Self {
            applied: false,
            notice: None,
        }
    }

    /// Nothing was sent: required input was missing
    fn skipped() -> Self {
        Self {
            applied: false,
            notice: None,
        }
    }

    fn notice(notice: Notice) -> Self {
        Self {
            applied: !notice.is_error(),
            notice: Some(notice),
        }
    }
}

fn js_error(err: ShiftBoardError, operation: &str) -> JsValue {
    JsValue::from_str(
        &ErrorResponse::new(err)
            .with_context("wasm-bridge", operation)
            .to_json(),
    )
}

fn to_js<T: Serialize>(value: &T, operation: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        js_error(
            ShiftBoardError::JsInterop {
                message: e.to_string(),
            },
            operation,
        )
    })
}

fn roster_report(result: Result<SyncOutcome<usize>, ShiftBoardError>) -> ActionReport {
    match result {
        Ok(SyncOutcome::Applied(count)) => {
            log::info!("Roster refreshed: {count} records");
            ActionReport::applied()
        }
        Ok(SyncOutcome::Superseded) => ActionReport::superseded(),
        Err(err) => ActionReport::notice(Notice::roster_failed(&err)),
    }
}

fn accept_report(result: Result<AcceptOutcome, ShiftBoardError>) -> ActionReport {
    match result {
        Ok(AcceptOutcome::Accepted) => ActionReport::notice(Notice::accepted()),
        Ok(AcceptOutcome::Skipped) => ActionReport::skipped(),
        Err(err) => ActionReport::notice(Notice::accept_failed(&err)),
    }
}

#[wasm_bindgen]
pub struct ShiftBoard {
    instance_id: Uuid,
}

impl ShiftBoard {
    fn dashboard(&self, operation: &str) -> Result<std::rc::Rc<BrowserDashboard>, JsValue> {
        InstanceManager::get(&self.instance_id).ok_or_else(|| {
            js_error(
                ShiftBoardError::JsInterop {
                    message: "Shift board instance not found".to_string(),
                },
                operation,
            )
        })
    }
}

#[wasm_bindgen]
impl ShiftBoard {
    /// Build a dashboard from a JSON config: `{csv_url, webapp_url, status_filter?, calendar?}`
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<ShiftBoard, JsValue> {
        let config = ShiftBoardConfig::from_json(config_json)
            .map_err(|e| js_error(e.into(), "new"))?;
        let dashboard =
            Dashboard::new(FetchTransport::new(), &config).map_err(|e| js_error(e, "new"))?;

        let instance_id = InstanceManager::create_instance(dashboard);
        log::info!("Shift board {instance_id} created");

        Ok(ShiftBoard { instance_id })
    }

    /// Fetch the roster. Resolves to an `ActionReport`; a failed load carries
    /// an error notice and leaves the previous roster displayed.
    #[wasm_bindgen]
    pub fn load_roster(&self) -> Result<Promise, JsValue> {
        let dashboard = self.dashboard("load_roster")?;
        Ok(future_to_promise(async move {
            let report = roster_report(dashboard.load_roster().await);
            to_js(&report, "load_roster")
        }))
    }

    #[wasm_bindgen]
    pub fn set_name_filter(&self, name: &str) -> Result<(), JsValue> {
        self.dashboard("set_name_filter")?
            .with_session(|session| session.set_name_filter(name));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_shift_filter(&self, label: &str) -> Result<(), JsValue> {
        self.dashboard("set_shift_filter")?
            .with_session(|session| session.set_shift_filter(label));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn reset_filters(&self) -> Result<(), JsValue> {
        self.dashboard("reset_filters")?
            .with_session(|session| session.reset_filters());
        Ok(())
    }

    /// Calendar instruction for the current filtered roster: `create` on the
    /// first call, `replaceEvents` afterwards
    #[wasm_bindgen]
    pub fn render_calendar(&self) -> Result<JsValue, JsValue> {
        let update = self
            .dashboard("render_calendar")?
            .with_session(|session| session.render_calendar());
        to_js(&update, "render_calendar")
    }

    #[wasm_bindgen]
    pub fn render_table(&self) -> Result<JsValue, JsValue> {
        let table = self
            .dashboard("render_table")?
            .with_session(|session| session.table());
        to_js(&table, "render_table")
    }

    /// Labels offered by the shift-type selector
    #[wasm_bindgen]
    pub fn shift_options(&self) -> js_sys::Array {
        ShiftLabel::SELECTABLE
            .iter()
            .map(|label| JsValue::from_str(label.as_str()))
            .collect()
    }

    /// Re-fetch both request lists and resolve to the rendered lists. A failed
    /// fetch shows the error placeholders rather than rejecting.
    #[wasm_bindgen]
    pub fn refresh_requests(&self) -> Result<Promise, JsValue> {
        let dashboard = self.dashboard("refresh_requests")?;
        Ok(future_to_promise(async move {
            if let Err(err) = dashboard.refresh_requests().await {
                log::warn!("Request lists unavailable: {err}");
            }
            let view = dashboard.with_session(|session| session.request_view());
            to_js(&view, "refresh_requests")
        }))
    }

    #[wasm_bindgen]
    pub fn render_requests(&self) -> Result<JsValue, JsValue> {
        let view = self
            .dashboard("render_requests")?
            .with_session(|session| session.request_view());
        to_js(&view, "render_requests")
    }

    /// Submit a request from the form fields. Resolves to an `ActionReport`
    /// whose notice is shown to the user either way.
    #[wasm_bindgen]
    pub fn send_request(
        &self,
        name: &str,
        date: &str,
        code: &str,
        note: &str,
    ) -> Result<Promise, JsValue> {
        let dashboard = self.dashboard("send_request")?;
        let draft = RequestDraft::new(name, date, code, note);

        Ok(future_to_promise(async move {
            let notice = match dashboard.submit_request(&draft).await {
                Ok(id) => Notice::request_sent(&id),
                Err(err) => Notice::send_failed(&err),
            };
            to_js(&ActionReport::notice(notice), "send_request")
        }))
    }

    /// Accept an open request. An empty id or name resolves to a report
    /// without notice and nothing is sent.
    #[wasm_bindgen]
    pub fn accept_request(&self, id: &str, accepter: &str) -> Result<Promise, JsValue> {
        let dashboard = self.dashboard("accept_request")?;
        let id = RequestId::new(id);
        let accepter = accepter.to_string();

        Ok(future_to_promise(async move {
            let report = accept_report(dashboard.accept_request(&id, &accepter).await);
            to_js(&report, "accept_request")
        }))
    }

    /// Release the dashboard held for this handle
    #[wasm_bindgen]
    pub fn destroy(&self) {
        if InstanceManager::remove_instance(&self.instance_id).is_some() {
            log::info!("Shift board {} destroyed", self.instance_id);
        }
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Export version info
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
