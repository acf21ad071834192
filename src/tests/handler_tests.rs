//! tests/handler_tests.rs
//! Pruebas de los endpoints: rutas, gate del cron y códigos de estado.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use serde_json::json;

use super::mock_transport::{client_for, MockTransport};
use crate::app::init_app;
use crate::handlers::janitor_handler::{CRON_HEADER, NON_CRON_BODY};
use crate::services::janitor_service::{channel_names, JanitorService, JanitorSettings};

fn janitor(mock: &Arc<MockTransport>) -> web::Data<JanitorService> {
    web::Data::new(JanitorService::new(
        client_for(mock),
        chrono_tz::America::Los_Angeles,
        JanitorSettings {
            vc_url: "http://zoom".to_string(),
            vc_call_id: "123456".to_string(),
        },
    ))
}

#[actix_web::test]
async fn index_says_hello() {
    let mock = MockTransport::new();
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Hello, World!\n");
}

#[actix_web::test]
async fn unknown_path_is_404() {
    let mock = MockTransport::new();
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/404").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_channel_without_cron_header_never_calls_slack() {
    let mock = MockTransport::new();
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/create_channel").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, NON_CRON_BODY);
    assert!(mock.requests().is_empty());
}

#[actix_web::test]
async fn post_call_with_wrong_header_value_is_rejected() {
    let mock = MockTransport::new();
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let req = test::TestRequest::post()
        .uri("/post_call")
        .insert_header((CRON_HEADER, "yes"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(mock.requests().is_empty());
}

#[actix_web::test]
async fn fatal_workflow_error_returns_500_with_progress() {
    let mock = MockTransport::new();
    mock.reply_json(json!({"ok": false, "error": "invalid_auth"}));
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let req = test::TestRequest::post()
        .uri("/create_channel")
        .insert_header((CRON_HEADER, "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("Error: conversations.create"), "body: {}", text);
    assert_eq!(mock.requests().len(), 1);
}

#[actix_web::test]
async fn post_call_from_cron_returns_200() {
    let mock = MockTransport::new();
    // El handler toma su propio "ahora": se listan hoy y mañana por si cruza la medianoche
    let now = Utc::now();
    let today = channel_names(now, chrono_tz::America::Los_Angeles).new_name;
    let tomorrow =
        channel_names(now + Duration::days(1), chrono_tz::America::Los_Angeles).new_name;
    mock.reply_json(json!({"ok": true, "call": {"id": "R1", "external_unique_id": today, "join_url": "http://zoom"}}))
        .reply_json(json!({"ok": true, "channels": [
            {"id": "C1", "name": today},
            {"id": "C2", "name": tomorrow}
        ]}))
        .reply_json(json!({"ok": true}));
    let app =
        test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let req = test::TestRequest::get()
        .uri("/post_call")
        .insert_header((CRON_HEADER, "true"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Posted call to #"));
    assert_eq!(mock.requests().len(), 3);
}

#[actix_web::test]
async fn index_answers_any_method() {
    let mock = MockTransport::new();
    let app = test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    let resp = test::call_service(&app, test::TestRequest::post().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Hello, World!\n");
}

#[actix_web::test]
async fn cron_header_is_always_required() {
    let mock = MockTransport::new();
    mock.reply_json(json!({"ok": false, "error": "invalid_auth"}));
    let app = test::init_service(App::new().app_data(janitor(&mock)).configure(init_app)).await;

    for uri in ["/create_channel", "/post_call"] {
        let resp = test::call_service(&app, test::TestRequest::post().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let body = test::read_body(resp).await;
        assert_eq!(body, NON_CRON_BODY);
    }
    assert!(mock.requests().is_empty());
    assert_eq!(mock.pending_replies(), 1);
}
