//! End-to-end handler tests over the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hr_api::{routes, AppState};
use hr_auth::{jwt, Principal};
use hr_models::Role;
use hr_services::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

impl TestApp {
    async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = routes::router(AppState::new(store.clone(), SECRET));
        Self { router, store }
    }

    fn token(&self, user_id: i64, email: &str, role: Role) -> String {
        let principal = Principal::new(user_id, email, role);
        jwt::issue_token(&principal, SECRET, 3600).unwrap()
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/api/whoami", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthenticated");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, _) = app
        .request("GET", "/api/whoami", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_whoami_roundtrip() {
    let app = TestApp::new().await;
    let user_id = app.store.add_user("grh@example.com", Role::Grh).await;
    let token = app.token(user_id, "grh@example.com", Role::Grh);

    let (status, body) = app.request("GET", "/api/whoami", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "grh@example.com");
    assert_eq!(body["role"], "GRH");
}

#[tokio::test]
async fn test_check_in_then_duplicate() {
    let app = TestApp::new().await;
    let dept = app.store.add_department("Engineering").await;
    let user_id = app.store.add_user("emp@example.com", Role::Employee).await;
    app.store
        .add_employee("Amel", "Riahi", "emp@example.com", dept, Some("1234"))
        .await;
    let token = app.token(user_id, "emp@example.com", Role::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            Some(json!({ "pin": "1234" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["check_in_time"].is_string());

    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            Some(json!({ "pin": "1234" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "conflict");
    assert_eq!(body["detail"], "already checked in");
}

#[tokio::test]
async fn test_wrong_pin_is_forbidden() {
    let app = TestApp::new().await;
    let dept = app.store.add_department("Engineering").await;
    let user_id = app.store.add_user("emp@example.com", Role::Employee).await;
    app.store
        .add_employee("Amel", "Riahi", "emp@example.com", dept, Some("1234"))
        .await;
    let token = app.token(user_id, "emp@example.com", Role::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/attendance/check-in",
            Some(&token),
            Some(json!({ "pin": "9999" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Invalid PIN");
}

#[tokio::test]
async fn test_leave_submission_and_decision_flow() {
    let app = TestApp::new().await;
    let dept = app.store.add_department("Engineering").await;
    let emp_user = app.store.add_user("emp@example.com", Role::Employee).await;
    let chef_user = app.store.add_user("chef@example.com", Role::Chef).await;
    app.store
        .add_employee("Amel", "Riahi", "emp@example.com", dept, None)
        .await;
    app.store
        .add_employee("Karim", "Sassi", "chef@example.com", dept, None)
        .await;
    let emp_token = app.token(emp_user, "emp@example.com", Role::Employee);
    let chef_token = app.token(chef_user, "chef@example.com", Role::Chef);

    let (status, leave) = app
        .request(
            "POST",
            "/api/leaves",
            Some(&emp_token),
            Some(json!({
                "start_date": "2099-03-01",
                "end_date": "2099-03-05",
                "leave_type": "ANNUAL",
                "reason": "vacation"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(leave["status"], "PENDING");

    // the chef was notified
    let (_, inbox) = app
        .request("GET", "/api/notifications", Some(&chef_token), None)
        .await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);

    let leave_id = leave["id"].as_i64().unwrap();
    let (status, decided) = app
        .request(
            "POST",
            &format!("/api/leaves/{leave_id}/approve"),
            Some(&chef_token),
            Some(json!({ "comment": "enjoy" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decided["status"], "ACCEPTED");

    // second decision conflicts
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/leaves/{leave_id}/reject"),
            Some(&chef_token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn test_sick_leave_without_attachment_rejected() {
    let app = TestApp::new().await;
    let dept = app.store.add_department("Engineering").await;
    let emp_user = app.store.add_user("emp@example.com", Role::Employee).await;
    app.store
        .add_employee("Amel", "Riahi", "emp@example.com", dept, None)
        .await;
    let token = app.token(emp_user, "emp@example.com", Role::Employee);

    let (status, body) = app
        .request(
            "POST",
            "/api/leaves",
            Some(&token),
            Some(json!({
                "start_date": "2099-03-01",
                "end_date": "2099-03-02",
                "leave_type": "SICK"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("attachment"));
}

#[tokio::test]
async fn test_orphan_chef_department_listing() {
    let app = TestApp::new().await;
    let chef_user = app.store.add_user("ghost@example.com", Role::Chef).await;
    let token = app.token(chef_user, "ghost@example.com", Role::Chef);

    let (status, body) = app
        .request("GET", "/api/leaves/department", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Chef has no Employee record"));
}

#[tokio::test]
async fn test_warning_escalation_over_http() {
    let app = TestApp::new().await;
    let dept = app.store.add_department("Engineering").await;
    let rh_user = app.store.add_user("rh@example.com", Role::RhSimple).await;
    let senior_user = app.store.add_user("senior@example.com", Role::RhSenior).await;
    let emp_id = app
        .store
        .add_employee("Amel", "Riahi", "emp@example.com", dept, None)
        .await;
    let rh_token = app.token(rh_user, "rh@example.com", Role::RhSimple);
    let senior_token = app.token(senior_user, "senior@example.com", Role::RhSenior);

    let month = chrono::Utc::now().date_naive().format("%Y-%m").to_string();
    for day in ["01", "02", "03"] {
        let (status, _) = app
            .request(
                "POST",
                "/api/warnings",
                Some(&rh_token),
                Some(json!({ "employee_id": emp_id, "date": format!("{month}-{day}") })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, flags) = app
        .request("GET", "/api/discipline/flags", Some(&senior_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let flags = flags.as_array().unwrap();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0]["warning_count"], 3);

    let (_, inbox) = app
        .request("GET", "/api/notifications", Some(&senior_token), None)
        .await;
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["title"], "Discipline Flag");
}

#[tokio::test]
async fn test_document_upload_send_validate() {
    let app = TestApp::new().await;
    let eng = app.store.add_department("Engineering").await;
    let fin = app.store.add_department("Finance").await;
    let doc_type = app
        .store
        .add_doc_type("Payslip", hr_models::DocumentCategory::Rh)
        .await;
    let emp_user = app.store.add_user("emp@example.com", Role::Employee).await;
    let senior_user = app.store.add_user("senior@example.com", Role::RhSenior).await;
    app.store
        .add_employee("Amel", "Riahi", "emp@example.com", eng, None)
        .await;
    let emp_token = app.token(emp_user, "emp@example.com", Role::Employee);
    let senior_token = app.token(senior_user, "senior@example.com", Role::RhSenior);

    let (status, doc) = app
        .request(
            "POST",
            "/api/documents",
            Some(&emp_token),
            Some(json!({
                "title": "Q1 payslips",
                "doc_type_id": doc_type,
                "file": "documents/q1.pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(doc["status"], "DRAFT");
    let doc_id = doc["id"].as_i64().unwrap();

    let (status, sent) = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/send"),
            Some(&emp_token),
            Some(json!({ "target_department_id": fin })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent["status"], "SENT");

    let (status, validated) = app
        .request(
            "POST",
            &format!("/api/documents/{doc_id}/validate"),
            Some(&senior_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(validated["status"], "VALIDATED");

    let (status, history) = app
        .request(
            "GET",
            &format!("/api/documents/{doc_id}/history"),
            Some(&senior_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["CREATED", "SENT", "VALIDATED"]);
}

#[tokio::test]
async fn test_report_summary_shape() {
    let app = TestApp::new().await;
    let user_id = app.store.add_user("grh@example.com", Role::Grh).await;
    let token = app.token(user_id, "grh@example.com", Role::Grh);

    let (status, body) = app
        .request(
            "GET",
            "/api/reports/summary?from=2099-01-01&to=2099-01-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], "2099-01-01");
    assert_eq!(body["employees"], 0);
    assert_eq!(body["leaves_pending"], 0);
}
