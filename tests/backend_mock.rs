use nurse_roster_view::components::nurse_api::MyScheduleOutcome;
use nurse_roster_view::components::NurseApiHandle;
use nurse_roster_view::config::Config;
use nurse_roster_view::error::Error;
use nurse_roster_view::schedule::{DayOrder, ViewOptions, WeekFilter};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::thread;
use tiny_http::{Header, Response, Server};

/// Canned reply for one method and path
struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: String,
}

impl Route {
    fn new(method: &'static str, path: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method,
            path,
            status,
            body: body.to_string(),
        }
    }
}

/// Stand-in for the roster backend, served from a background thread
struct MockBackend {
    base_url: String,
    cookies: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockBackend {
    fn start(routes: Vec<Route>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let cookies = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&cookies);

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let cookie = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Cookie"))
                    .map(|header| header.value.as_str().to_string());
                seen.lock().unwrap().push(cookie);

                let method = request.method().to_string();
                let url = request.url().to_string();
                let (status, body) = routes
                    .iter()
                    .find(|route| route.method == method && route.path == url)
                    .map(|route| (route.status, route.body.clone()))
                    .unwrap_or((404, json!({"error": "Not found"}).to_string()));

                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{}/api", addr),
            cookies,
        }
    }

    fn config(&self) -> Config {
        Config {
            api_base_url: self.base_url.clone(),
            request_timeout_secs: 5,
            ..Config::default()
        }
    }
}

fn options() -> ViewOptions {
    ViewOptions::new(
        WeekFilter::All,
        DayOrder::Weekday,
        NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
    )
}

#[tokio::test]
async fn test_my_schedule_is_parsed() {
    let text = "Schedule for Alice Tan (ID: N001):\n\
                ==================================================\n\
                Tuesday 2024-01-16 Night: Off\n\
                Monday 2024-01-15 Morning: On Duty - GW\n\
                Monday 2024-01-15 Evening: On Duty - ED";
    let backend = MockBackend::start(vec![Route::new(
        "POST",
        "/api/chat",
        200,
        json!({"success": true, "response": text}),
    )]);

    let api = NurseApiHandle::new(&backend.config()).unwrap();
    let outcome = api.my_schedule().await.unwrap();

    let record = match outcome {
        MyScheduleOutcome::Ready(record) => record,
        other => panic!("expected a parsed schedule, got {:?}", other),
    };
    let view = record.render(&options());

    let header = view.header.as_ref().unwrap();
    assert_eq!(header.nurse_name, "Alice Tan");
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].label, "Monday 2024-01-15");
    assert_eq!(view.rows[0].value, "Morning: GW, Evening: ED");
    assert_eq!(view.rows[1].label, "Tuesday 2024-01-16");
    assert_eq!(view.rows[1].value, "Off");

    api.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_my_schedule_pending() {
    let backend = MockBackend::start(vec![Route::new(
        "POST",
        "/api/chat",
        200,
        json!({
            "success": true,
            "response": "No schedule found for 'N001'. Please generate a schedule first."
        }),
    )]);

    let api = NurseApiHandle::new(&backend.config()).unwrap();
    let outcome = api.my_schedule().await.unwrap();

    assert!(matches!(outcome, MyScheduleOutcome::Pending(message) if message.contains("N001")));
}

#[tokio::test]
async fn test_full_schedule_rows() {
    let backend = MockBackend::start(vec![Route::new(
        "GET",
        "/api/schedule/full",
        200,
        json!({
            "success": true,
            "total_nurses": 2,
            "schedule": [
                {
                    "Nurse_ID": "N001",
                    "Name": "Alice Tan",
                    "Wednesday 2024-01-17 Night": "On Duty - ICU",
                    "Monday 2024-01-15 Morning": "On Duty - GW",
                    "Monday 2024-01-15 Evening": "Off"
                },
                {
                    "Nurse_ID": "N002",
                    "Name": "Bob Lim"
                }
            ]
        }),
    )]);

    let api = NurseApiHandle::new(&backend.config()).unwrap();
    let records = api.full_schedule().await.unwrap();
    assert_eq!(records.len(), 2);

    let alice = records[0].render(&options());
    assert_eq!(alice.rows[0].label, "Monday 2024-01-15");
    assert_eq!(alice.rows[0].value, "M: GW");
    assert_eq!(alice.rows[1].value, "N: ICU");

    let bob = records[1].render(&options());
    assert!(bob.is_placeholder());
    assert_eq!(bob.header.unwrap().nurse_id, "N002");
}

#[tokio::test]
async fn test_status_fills_and_clears_current_user() {
    let backend = MockBackend::start(vec![Route::new(
        "GET",
        "/api/status",
        200,
        json!({
            "nurse_id": "N001",
            "nurse_name": "Alice Tan",
            "is_admin": false,
            "today": {},
            "status": "not_checked_in"
        }),
    )]);

    let api = NurseApiHandle::new(&backend.config()).unwrap();
    assert_eq!(api.current_user().await.unwrap(), None);

    let status = api.fetch_status().await.unwrap();
    assert_eq!(status.nurse_name, "Alice Tan");
    assert_eq!(status.status, "not_checked_in");

    let user = api.current_user().await.unwrap().unwrap();
    assert_eq!(user.nurse_id, "N001");

    api.clear_session().await.unwrap();
    assert_eq!(api.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_backend_error_body_is_surfaced() {
    let backend = MockBackend::start(vec![Route::new(
        "GET",
        "/api/schedule/full",
        403,
        json!({"error": "Admin access required"}),
    )]);

    let api = NurseApiHandle::new(&backend.config()).unwrap();
    let err = api.full_schedule().await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Admin access required");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // A failed status fetch leaves no current user behind
    assert!(api.fetch_status().await.is_err());
    assert_eq!(api.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_session_cookie_is_forwarded() {
    let backend = MockBackend::start(vec![Route::new(
        "GET",
        "/api/status",
        200,
        json!({"nurse_id": "A1", "nurse_name": "Admin", "is_admin": true}),
    )]);

    let config = Config {
        session_cookie: Some("session=abc123".to_string()),
        ..backend.config()
    };
    let api = NurseApiHandle::new(&config).unwrap();
    let status = api.fetch_status().await.unwrap();
    assert!(status.is_admin);

    let cookies = backend.cookies.lock().unwrap().clone();
    assert_eq!(cookies, vec![Some("session=abc123".to_string())]);
}
