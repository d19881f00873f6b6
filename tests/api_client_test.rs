use axum::{
    http::{HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use library_logger_ui::api::ApiClient;
use library_logger_ui::dashboard::DashboardLoader;
use library_logger_ui::page::Page;
use library_logger_ui::toast::{Notifier, ToastKind, ToastTiming};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(String, String, ToastKind)>>,
}

impl RecordingNotifier {
    fn calls(&self) -> Vec<(String, String, ToastKind)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, kind: ToastKind) {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string(), kind));
    }
}

/// Echoes the request back as JSON so the test can see what was sent
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "content_type": content_type,
        "body": body,
    }))
}

async fn spawn_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn echo_client() -> (ApiClient, Arc<RecordingNotifier>) {
    let base = spawn_server(Router::new().fallback(echo)).await;
    let notifier = Arc::new(RecordingNotifier::default());
    (ApiClient::new(&base, notifier.clone()), notifier)
}

/// Address nothing listens on
async fn closed_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn test_get_hits_api_prefix() {
    let (client, notifier) = echo_client().await;

    let body = client.get("/students").await.expect("GET should succeed");

    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/api/students");
    assert_eq!(body["body"], Value::Null);
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (client, notifier) = echo_client().await;
    let student = json!({"name": "Asha Rao", "rfid_uid": "a1b2c3d4", "roll_number": "CS-042"});

    let body = client.post("/students", &student).await.unwrap();

    assert_eq!(body["method"], "POST");
    assert_eq!(body["path"], "/api/students");
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["body"], student);
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let (client, _notifier) = echo_client().await;

    let body = client
        .put("/students/4", &json!({"department": "Physics"}))
        .await
        .unwrap();

    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/students/4");
    assert_eq!(body["content_type"], "application/json");
    assert_eq!(body["body"]["department"], "Physics");
}

#[tokio::test]
async fn test_delete_has_no_body() {
    let (client, _notifier) = echo_client().await;

    let body = client.delete("/students/4").await.unwrap();

    assert_eq!(body["method"], "DELETE");
    assert_eq!(body["path"], "/api/students/4");
    assert_eq!(body["content_type"], Value::Null);
}

#[tokio::test]
async fn test_error_status_with_json_body_is_returned() {
    let app = Router::new().route(
        "/api/students",
        get(|| async {
            (
                axum::http::StatusCode::CONFLICT,
                Json(json!({"success": false, "error": "RFID UID already registered"})),
            )
        }),
    );
    let base = spawn_server(app).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new(&base, notifier.clone());

    let body = client.get("/students").await.unwrap();

    assert_eq!(body["success"], false);
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn test_network_failure_returns_none_and_one_toast() {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new(&closed_base_url().await, notifier.clone());

    assert!(client.get("/students").await.is_none());

    assert_eq!(
        notifier.calls(),
        vec![(
            "Error".to_string(),
            "Failed to fetch data".to_string(),
            ToastKind::Error
        )]
    );
}

#[tokio::test]
async fn test_failure_messages_per_verb() {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new(&closed_base_url().await, notifier.clone());

    assert!(client.post("/scan", &json!({"rfid_uid": "X"})).await.is_none());
    assert!(client.put("/students/1", &json!({})).await.is_none());
    assert!(client.delete("/students/1").await.is_none());

    let messages: Vec<String> = notifier.calls().into_iter().map(|(_, m, _)| m).collect();
    assert_eq!(
        messages,
        vec!["Failed to send data", "Failed to update data", "Failed to delete"]
    );
}

#[tokio::test]
async fn test_non_json_body_is_a_failure() {
    let app = Router::new().route("/api/students", get(|| async { "<html>login</html>" }));
    let base = spawn_server(app).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::new(&base, notifier.clone());

    assert!(client.get("/students").await.is_none());
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn test_failure_toast_lands_on_page() {
    let page = Arc::new(Page::new("/students").with_toast_container(ToastTiming::default()));
    let client = ApiClient::new(&closed_base_url().await, page.clone());

    assert!(client.get("/students").await.is_none());

    let toasts = page.toasts().unwrap().snapshot();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Error");
    assert_eq!(toasts[0].kind, ToastKind::Error);
}

#[tokio::test]
async fn test_dashboard_loader_keeps_last_good_snapshot() {
    let hits = Arc::new(Mutex::new(0_u32));
    let app = Router::new().route(
        "/api/dashboard/stats",
        get({
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                async move {
                    let mut hits = hits.lock().unwrap();
                    *hits += 1;
                    if *hits == 1 {
                        Json(json!({
                            "success": true,
                            "stats": {"inside_count": 2, "total_students": 10, "today_entries": 5, "today_exits": 3},
                            "recent_activity": [],
                            "hourly_data": []
                        }))
                    } else {
                        Json(json!({"success": false, "error": "database locked"}))
                    }
                }
            }
        }),
    );
    let base = spawn_server(app).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let loader = DashboardLoader::new(ApiClient::new(&base, notifier.clone()));

    assert!(loader.load().await);
    assert_eq!(loader.latest().unwrap().stats.inside_count, 2);

    assert!(!loader.load().await);
    assert_eq!(loader.latest().unwrap().stats.inside_count, 2);
    assert!(notifier.calls().is_empty());
}
