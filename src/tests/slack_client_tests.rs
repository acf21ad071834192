//! tests/slack_client_tests.rs
//! Pruebas del cliente: headers, URL/body y clasificación de errores.

use actix_rt::test;
use serde_json::json;

use super::mock_transport::{body_json, client_for, header_of, MockTransport};
use crate::errors::SlackError;
use crate::models::{
    channel_model::{Channel, CreateChannelRequest},
    operation_model::{Operation, Verb},
    response_model::{ChannelResult, PaginatedResult},
    user_model::{User, UsersListRequest},
};

fn create_channel_op() -> Operation {
    Operation::CreateChannel(CreateChannelRequest {
        name: "new-channel-name".to_string(),
    })
}

#[test]
async fn create_channel_sends_token_and_json_body() {
    let mock = MockTransport::new();
    mock.reply_json(json!({
        "ok": true,
        "channel": {
            "id": "C0EAQDV4Z",
            "name": "new-channel-name",
            "is_channel": true,
            "created": 1504554479,
            "topic": {"value": "", "creator": "", "last_set": 0}
        }
    }));
    let client = client_for(&mock);

    let reply = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .expect("la llamada debería funcionar");

    assert!(reply.body.ok);
    assert_eq!(
        reply.body.channel,
        Some(Channel {
            id: "C0EAQDV4Z".to_string(),
            name: "new-channel-name".to_string(),
        })
    );
    assert!(reply.raw.contains("C0EAQDV4Z"));

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].verb, Verb::Post);
    assert_eq!(reqs[0].url, "https://slack.com/api/conversations.create");
    assert_eq!(header_of(&reqs[0], "authorization"), Some("Bearer my-auth-token"));
    assert_eq!(
        header_of(&reqs[0], "content-type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(body_json(&reqs[0]), json!({"name": "new-channel-name"}));
}

#[test]
async fn logical_failure_is_not_a_client_error() {
    let mock = MockTransport::new();
    mock.reply_json(json!({"ok": false, "error": "name_taken"}));
    let client = client_for(&mock);

    let reply = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .expect("ok=false no es error del cliente");
    assert!(!reply.body.ok);
    assert_eq!(reply.body.error.as_deref(), Some("name_taken"));
    assert!(reply.body.channel.is_none());
}

#[test]
async fn non_2xx_is_http_status_error() {
    let mock = MockTransport::new();
    mock.reply_status(404, "error\r\n");
    let client = client_for(&mock);

    let err = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .unwrap_err();
    match err {
        SlackError::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "error\r\n");
        }
        other => panic!("se esperaba HttpStatus, llegó {:?}", other),
    }
}

#[test]
async fn transport_failure_is_transport_error() {
    let mock = MockTransport::new();
    mock.reply_transport_error("Some network error happened");
    let client = client_for(&mock);

    let err = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .unwrap_err();
    assert!(matches!(err, SlackError::Transport(ref m) if m == "Some network error happened"));
}

#[test]
async fn read_failure_is_read_error() {
    let mock = MockTransport::new();
    mock.reply_read_error("connection reset");
    let client = client_for(&mock);

    let err = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .unwrap_err();
    assert!(matches!(err, SlackError::Read(_)));
}

#[test]
async fn decode_failure_keeps_raw_body() {
    let mock = MockTransport::new();
    mock.reply_status(200, "<html>not json</html>");
    let client = client_for(&mock);

    let err = client
        .execute::<ChannelResult>(create_channel_op())
        .await
        .unwrap_err();
    match err {
        SlackError::Decode { raw, .. } => assert_eq!(raw, "<html>not json</html>"),
        other => panic!("se esperaba Decode, llegó {:?}", other),
    }
}

#[test]
async fn users_list_is_a_get_without_body() {
    let mock = MockTransport::new();
    mock.reply_json(json!({
        "ok": true,
        "members": [
            {"id": "123", "name": "foo"},
            {"id": "456", "name": "bar"}
        ],
        "response_metadata": {"next_cursor": "XXXcontinuationXXX"}
    }))
    .reply_json(json!({
        "ok": true,
        "members": [{"id": "789", "name": "baz"}]
    }));
    let client = client_for(&mock);

    let first = client
        .execute::<PaginatedResult<User>>(Operation::ListUsers(UsersListRequest::default()))
        .await
        .unwrap();
    assert_eq!(first.body.items.len(), 2);
    assert_eq!(first.body.next_cursor(), Some("XXXcontinuationXXX"));

    // Cada llamada decodifica en un valor nuevo: nada de la página anterior se filtra.
    let second = client
        .execute::<PaginatedResult<User>>(Operation::ListUsers(UsersListRequest {
            cursor: Some("XXXcontinuationXXX".to_string()),
            limit: None,
        }))
        .await
        .unwrap();
    assert_eq!(second.body.items.len(), 1);
    assert_eq!(second.body.items[0].id, "789");
    assert_eq!(second.body.next_cursor(), None);

    let reqs = mock.requests();
    assert_eq!(reqs[0].verb, Verb::Get);
    assert!(reqs[0].body.is_none());
    assert_eq!(reqs[0].url, "https://slack.com/api/users.list");
    assert_eq!(
        reqs[1].url,
        "https://slack.com/api/users.list?cursor=XXXcontinuationXXX"
    );
    assert_eq!(header_of(&reqs[1], "authorization"), Some("Bearer my-auth-token"));
}
