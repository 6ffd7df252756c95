//! Integration tests for the MomCare HTTP client

use std::sync::Arc;

use momcare_core::{MemoryStore, Role, UserProfile};
use momcare_http::client::MomCareClientBuilder;
use momcare_http::types::LoginRequest;
use momcare_http::{ClientError, SessionManager};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn patient_json() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "amina",
        "email": "amina@example.com",
        "first_name": "Amina",
        "last_name": "Diallo",
        "role": "patient"
    })
}

fn patient() -> UserProfile {
    serde_json::from_value(patient_json()).unwrap()
}

async fn logged_in_manager() -> Arc<SessionManager> {
    let manager = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
    manager.initialize().await;
    manager.login("A1", "R1", patient()).await.unwrap();
    manager
}

#[tokio::test]
async fn test_client_builder() {
    let client = MomCareClientBuilder::new()
        .base_url("http://localhost:8080/")
        .build_public();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = MomCareClientBuilder::new().build_public();
    assert!(matches!(result, Err(ClientError::Configuration(_))));

    let manager = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
    let result = MomCareClientBuilder::new().build_authenticated(manager);
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login/"))
        .and(body_json(json!({
            "email": "amina@example.com",
            "password": "password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "A1",
            "refresh": "R1",
            "user": patient_json()
        })))
        .mount(&mock_server)
        .await;

    let client = MomCareClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let response = client
        .login(LoginRequest {
            email: "amina@example.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.access, "A1");
    assert_eq!(response.refresh, "R1");
    assert_eq!(response.user.role, Role::Patient);
}

#[tokio::test]
async fn test_validation_errors_map_to_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/login/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"email": ["already taken"]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = MomCareClientBuilder::new()
        .base_url(mock_server.uri())
        .build_public()
        .unwrap();

    let result = client
        .login(LoginRequest {
            email: "amina@example.com".to_string(),
            password: "password".to_string(),
        })
        .await;

    match result {
        Err(ClientError::BadRequest(message)) => assert!(message.contains("already taken")),
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bearer_credential_is_read_at_send_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Dr. Sarah Johnson",
            "specialization": "Obstetrician",
            "location": "Downtown Medical Center"
        }])))
        .mount(&mock_server)
        .await;

    let manager = logged_in_manager().await;
    let client = MomCareClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated(manager.clone())
        .unwrap();

    let doctors = client.list_doctors().await.unwrap();
    assert!(doctors.is_empty());

    // A session installed elsewhere is picked up by the same client handle.
    manager.login("A2", "R2", patient()).await.unwrap();
    let doctors = client.list_doctors().await.unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].name, "Dr. Sarah Johnson");
}

#[tokio::test]
async fn test_error_status_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments/1/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not yours"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments/2/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments/3/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let manager = logged_in_manager().await;
    let client = MomCareClientBuilder::new()
        .base_url(mock_server.uri())
        .build_authenticated(manager)
        .unwrap();

    assert!(matches!(
        client.get_appointment(1).await,
        Err(ClientError::Forbidden(_))
    ));
    assert!(matches!(
        client.get_appointment(2).await,
        Err(ClientError::NotFound(_))
    ));
    assert!(matches!(
        client.get_appointment(3).await,
        Err(ClientError::ServerError { status: 500, .. })
    ));
}
