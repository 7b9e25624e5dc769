//! Integration tests for the data manager

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use shift_board_config::ShiftBoardConfig;
use shift_board_data::request_list::{ACCEPTED_UNAVAILABLE, REQUESTS_LOAD_FAILED};
use shift_board_data::{
    AcceptOutcome, CacheMode, Dashboard, HttpGet, HttpResponse, HttpTransport, Notice,
    RequestBoard, RequestDraft, RequestListView,
};
use shift_board_shared::{
    RequestId, ShiftBoardError, ShiftBoardResult, StatusFilterMode, SyncOutcome,
};

const CSV_URL: &str = "https://sheets.example.org/roster.csv";
const WEBAPP_URL: &str = "https://script.example.org/exec";

enum Scripted {
    Ready(HttpResponse),
    Gated(oneshot::Receiver<HttpResponse>),
    Unreachable,
}

#[derive(Default)]
struct MockState {
    script: RefCell<VecDeque<Scripted>>,
    calls: RefCell<Vec<HttpGet>>,
}

/// Answers requests from a script and records every call
#[derive(Clone, Default)]
struct MockTransport {
    state: Rc<MockState>,
}

impl MockTransport {
    fn respond(&self, response: HttpResponse) -> &Self {
        self.state.script.borrow_mut().push_back(Scripted::Ready(response));
        self
    }

    fn respond_json(&self, body: &str) -> &Self {
        self.respond(HttpResponse::ok(body))
    }

    fn gate(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.state.script.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    fn fail(&self) -> &Self {
        self.state.script.borrow_mut().push_back(Scripted::Unreachable);
        self
    }

    fn calls(&self) -> Vec<HttpGet> {
        self.state.calls.borrow().clone()
    }

    fn call_count(&self) -> usize {
        self.state.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpGet) -> ShiftBoardResult<HttpResponse> {
        self.state.calls.borrow_mut().push(request);
        let next = self.state.script.borrow_mut().pop_front();

        match next {
            Some(Scripted::Ready(response)) => Ok(response),
            Some(Scripted::Gated(rx)) => rx.await.map_err(|_| ShiftBoardError::Network {
                message: "gate dropped".to_string(),
                status: None,
            }),
            Some(Scripted::Unreachable) | None => Err(ShiftBoardError::Network {
                message: "Failed to fetch".to_string(),
                status: None,
            }),
        }
    }
}

fn dashboard(transport: &MockTransport) -> Dashboard<MockTransport> {
    Dashboard::new(transport.clone(), &ShiftBoardConfig::new(CSV_URL, WEBAPP_URL)).unwrap()
}

fn query_value(request: &HttpGet, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

const LISTING: &str = r#"{"ok":true,"items":[
    {"id":1,"date":"2024-05-03","name":"Ben","code":"SP","note":"","status":"open"},
    {"id":"2","date":"2024-05-01","name":"Anna","code":"EF","note":"Arzt","status":"open"},
    {"id":3,"date":"2024-05-02","name":"Cleo","code":"N","status":"accepted","accepted_at":"2024-04-20T09:15:00","accepter_name":"Dora"}
]}"#;

#[tokio::test]
async fn test_roster_load_projects_events() {
    let transport = MockTransport::default();
    transport.respond_json("Date,Start,End,Name,Code\n2024-05-01,08:00,16:00,Anna,EF\n");
    let dashboard = dashboard(&transport);

    let outcome = dashboard.load_roster().await.unwrap();
    assert_eq!(outcome, SyncOutcome::Applied(1));

    let calls = transport.calls();
    assert_eq!(calls[0].url.as_str(), CSV_URL);
    assert_eq!(calls[0].cache, CacheMode::NoStore);

    let update = dashboard.with_session(|s| s.render_calendar());
    let event = &update.events()[0];
    assert_eq!(event.title, "Anna (Frühschicht)");
    assert_eq!(event.start, "2024-05-01T08:00");
    assert_eq!(event.end.as_deref(), Some("2024-05-01T16:00"));
    assert_eq!(event.class_names, vec!["frueh".to_string()]);
}

#[tokio::test]
async fn test_failed_roster_load_keeps_previous_records() {
    let transport = MockTransport::default();
    transport
        .respond_json("Datum,Beginn,Ende,Name,Dienst\n2024-05-01,,,Anna,U\n")
        .respond(HttpResponse::new(404, "not found"))
        .fail();
    let dashboard = dashboard(&transport);

    dashboard.load_roster().await.unwrap();

    let err = dashboard.load_roster().await.unwrap_err();
    assert_eq!(err, ShiftBoardError::load_failure("CSV HTTP 404"));
    assert!(Notice::roster_failed(&err).is_error());

    let err = dashboard.load_roster().await.unwrap_err();
    assert!(matches!(err, ShiftBoardError::LoadFailure { .. }));

    dashboard.with_session(|s| {
        assert_eq!(s.roster().len(), 1);
        assert_eq!(s.table().rows[0][4], "Urlaub");
    });
}

#[tokio::test]
async fn test_refresh_splits_open_and_accepted() {
    let transport = MockTransport::default();
    transport.respond_json(LISTING);
    let dashboard = dashboard(&transport);

    assert_eq!(dashboard.refresh_requests().await.unwrap(), SyncOutcome::Applied(()));
    assert_eq!(transport.call_count(), 1);

    let view = dashboard.with_session(|s| s.request_view());
    let open = view.open.items();
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].name, "Anna");
    assert_eq!(open[0].detail, "(Frühschicht · Arzt)");
    assert_eq!(open[1].name, "Ben");

    let accepted = view.accepted.items();
    assert_eq!(accepted.len(), 1);
    assert_eq!(
        accepted[0].status_line.as_deref(),
        Some("Status: accepted — angenommen von Dora (2024-04-20T09:15)")
    );
}

#[tokio::test]
async fn test_null_text_fields_do_not_fail_the_board() {
    let transport = MockTransport::default();
    transport.respond_json(
        r#"{"ok":true,"items":[
            {"id":1,"date":"2024-05-02","name":"Ben","code":"EF","note":null,"status":"open"},
            {"id":2,"date":"2024-05-01","name":"Anna","code":"N","note":"x","status":"open"}
        ]}"#,
    );
    let dashboard = dashboard(&transport);

    assert_eq!(dashboard.refresh_requests().await.unwrap(), SyncOutcome::Applied(()));

    let view = dashboard.with_session(|s| s.request_view());
    let open = view.open.items();
    assert_eq!(open.len(), 2);
    assert_eq!(open[1].name, "Ben");
    assert_eq!(open[1].detail, "(Frühschicht)");
}

#[tokio::test]
async fn test_failures_without_message_use_per_call_fallback() {
    let transport = MockTransport::default();
    transport
        .respond_json(r#"{"ok":false}"#)
        .respond_json(r#"{"ok":false}"#)
        .respond_json(r#"{"ok":false}"#);
    let dashboard = dashboard(&transport);

    let err = dashboard
        .submit_request(&RequestDraft::new("Anna", "2024-05-01", "EF", ""))
        .await
        .unwrap_err();
    assert_eq!(Notice::send_failed(&err).message, "Fehler beim Senden: Fehler");

    let err = dashboard
        .accept_request(&RequestId::new("2"), "Dora")
        .await
        .unwrap_err();
    assert_eq!(Notice::accept_failed(&err).message, "Fehler beim Akzeptieren: Fehler");

    let err = dashboard.refresh_requests().await.unwrap_err();
    assert_eq!(err, ShiftBoardError::remote("API Fehler"));
}

#[tokio::test]
async fn test_every_store_call_is_uncached() {
    let transport = MockTransport::default();
    transport
        .respond_json(LISTING)
        .respond_json(r#"{"ok":true,"id":7}"#)
        .respond_json(LISTING);
    let dashboard = dashboard(&transport);

    dashboard.refresh_requests().await.unwrap();
    let id = dashboard
        .submit_request(&RequestDraft::new(" Anna ", "2024-05-01", "EF", ""))
        .await
        .unwrap();
    assert_eq!(id, RequestId::new("7"));

    for call in transport.calls() {
        assert_eq!(call.cache, CacheMode::NoStore);
        let t = query_value(&call, "t").expect("cache buster");
        assert!(t.parse::<i64>().is_ok());
    }

    let add = &transport.calls()[1];
    assert_eq!(query_value(add, "action").as_deref(), Some("add"));
    assert_eq!(query_value(add, "name").as_deref(), Some("Anna"));
    assert_eq!(query_value(add, "code").as_deref(), Some("EF"));
    assert_eq!(query_value(add, "note").as_deref(), Some(""));
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_network() {
    let transport = MockTransport::default();
    let dashboard = dashboard(&transport);

    let err = dashboard
        .submit_request(&RequestDraft::new("", "2024-05-01", "EF", ""))
        .await
        .unwrap_err();

    assert_eq!(err, ShiftBoardError::validation("name"));
    assert_eq!(Notice::send_failed(&err).message, "Bitte Name, Datum und Dienst wählen.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_rejected_accept_does_not_refresh() {
    let transport = MockTransport::default();
    transport.respond_json(r#"{"ok":false,"error":"duplicate"}"#);
    let dashboard = dashboard(&transport);

    let err = dashboard
        .accept_request(&RequestId::new("2"), "Dora")
        .await
        .unwrap_err();

    assert_eq!(err, ShiftBoardError::remote("duplicate"));
    assert!(Notice::accept_failed(&err).message.contains("duplicate"));
    assert_eq!(transport.call_count(), 1);
    dashboard.with_session(|s| assert_eq!(s.requests(), &RequestBoard::NotLoaded));
}

#[tokio::test]
async fn test_accept_sends_trimmed_accepter_then_refreshes() {
    let transport = MockTransport::default();
    transport.respond_json(r#"{"ok":true}"#).respond_json(LISTING);
    let dashboard = dashboard(&transport);

    let outcome = dashboard
        .accept_request(&RequestId::new("2"), "  Dora ")
        .await
        .unwrap();

    assert_eq!(outcome, AcceptOutcome::Accepted);
    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(query_value(&calls[0], "action").as_deref(), Some("accept"));
    assert_eq!(query_value(&calls[0], "id").as_deref(), Some("2"));
    assert_eq!(query_value(&calls[0], "accepter").as_deref(), Some("Dora"));
    assert_eq!(query_value(&calls[1], "action").as_deref(), Some("requests"));
}

#[tokio::test]
async fn test_accept_without_name_is_skipped() {
    let transport = MockTransport::default();
    let dashboard = dashboard(&transport);

    assert_eq!(
        dashboard.accept_request(&RequestId::new("2"), "   ").await.unwrap(),
        AcceptOutcome::Skipped
    );
    assert_eq!(
        dashboard.accept_request(&RequestId::default(), "Dora").await.unwrap(),
        AcceptOutcome::Skipped
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_server_status_filter_asks_for_open() {
    let transport = MockTransport::default();
    transport.respond_json(LISTING).respond_json(LISTING);
    let config =
        ShiftBoardConfig::new(CSV_URL, WEBAPP_URL).with_status_filter(StatusFilterMode::Server);
    let dashboard = Dashboard::new(transport.clone(), &config).unwrap();

    dashboard.refresh_requests().await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(query_value(&calls[0], "status").as_deref(), Some("open"));
    assert_eq!(query_value(&calls[1], "status"), None);

    // The server ignored the filter; local filtering still applies
    let view = dashboard.with_session(|s| s.request_view());
    assert_eq!(view.open.items().len(), 2);
    assert_eq!(view.accepted.items().len(), 1);
}

#[tokio::test]
async fn test_unreachable_store_shows_error_placeholders() {
    let transport = MockTransport::default();
    transport.fail();
    let dashboard = dashboard(&transport);

    let err = dashboard.refresh_requests().await.unwrap_err();
    assert!(matches!(err, ShiftBoardError::Remote { .. }));

    let view = dashboard.with_session(|s| s.request_view());
    assert_eq!(view.open, RequestListView::placeholder(REQUESTS_LOAD_FAILED));
    assert_eq!(view.accepted, RequestListView::placeholder(ACCEPTED_UNAVAILABLE));
}

#[tokio::test]
async fn test_late_response_does_not_overwrite_newer_lists() {
    let transport = MockTransport::default();
    let first = transport.gate();
    let second = transport.gate();
    let dashboard = dashboard(&transport);

    let release = async {
        second
            .send(HttpResponse::ok(
                r#"{"ok":true,"items":[{"id":9,"date":"2024-06-01","name":"Neu","code":"EF","status":"open"}]}"#,
            ))
            .unwrap();
        tokio::task::yield_now().await;
        first.send(HttpResponse::ok(LISTING)).unwrap();
    };

    let (older, newer, ()) = futures::join!(
        dashboard.refresh_requests(),
        dashboard.refresh_requests(),
        release
    );

    assert_eq!(older.unwrap(), SyncOutcome::Superseded);
    assert_eq!(newer.unwrap(), SyncOutcome::Applied(()));

    let view = dashboard.with_session(|s| s.request_view());
    let open = view.open.items();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].name, "Neu");
}

#[tokio::test]
async fn test_late_roster_does_not_overwrite_newer_roster() {
    let transport = MockTransport::default();
    let first = transport.gate();
    let second = transport.gate();
    let dashboard = dashboard(&transport);

    let release = async {
        second
            .send(HttpResponse::ok("Date,Name,Code\n2024-06-01,Neu,N\n"))
            .unwrap();
        tokio::task::yield_now().await;
        first
            .send(HttpResponse::ok("Date,Name,Code\n2024-05-01,Alt,EF\n2024-05-02,Alt,EF\n"))
            .unwrap();
    };

    let (older, newer, ()) =
        futures::join!(dashboard.load_roster(), dashboard.load_roster(), release);

    assert_eq!(older.unwrap(), SyncOutcome::Superseded);
    assert_eq!(newer.unwrap(), SyncOutcome::Applied(1));
    dashboard.with_session(|s| assert_eq!(s.roster()[0].name, "Neu"));
}
