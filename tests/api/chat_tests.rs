//! Chat API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::{TestApp, DEMOLITION_CHAT, NOSTROMO_CHAT, SKYNET_CHAT, TERMINATORS_CHAT};

fn not_found(entity: &str, id: &str) -> Value {
    json!({
        "detail": {
            "type": "entity_not_found",
            "entity_name": entity,
            "entity_id": id,
        }
    })
}

#[tokio::test]
async fn test_list_chats_is_scoped_to_caller() {
    let app = TestApp::new().await;

    let (status, body) = app.get_as("/chats", "sarah").await;

    assert_eq!(status, StatusCode::OK);
    let chats = body["chats"].as_array().unwrap();
    assert_eq!(body["meta"]["count"], chats.len());
    let names: Vec<&str> = chats.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["skynet", "terminators"]);
}

#[tokio::test]
async fn test_list_chats_requires_authentication() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/chats").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "not_authenticated");
}

#[tokio::test]
async fn test_get_chat() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get_as(&format!("/chats/{TERMINATORS_CHAT}"), "reese")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "chat": {
                "id": TERMINATORS_CHAT,
                "name": "terminators",
                "user_ids": ["reese", "sarah"],
                "owner_id": "reese",
                "created_at": "2023-04-12T20:11:21Z",
            }
        })
    );
}

#[tokio::test]
async fn test_get_invalid_chat() {
    let app = TestApp::new().await;

    let (status, body) = app.get_as("/chats/12123235446654", "reese").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("Chat", "12123235446654"));
}

#[test_case("GET", "", None ; "chat detail")]
#[test_case("GET", "/users", None ; "chat members")]
#[test_case("GET", "/messages", None ; "chat messages")]
#[test_case("PUT", "", Some(json!({"name": "skynet"})) ; "rename chat")]
#[test_case("POST", "/users", Some(json!({"user_id": "terminator"})) ; "add member")]
#[tokio::test]
async fn test_non_member_is_forbidden(method: &str, suffix: &str, body: Option<Value>) {
    let app = TestApp::new().await;
    let uri = format!("/chats/{TERMINATORS_CHAT}");

    let (status, response) = app
        .request(method, &format!("{uri}{suffix}"), Some("terminator"), body)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(response["error"], "no_permission");
    assert!(response.get("chat").is_none());
    assert!(response.get("messages").is_none());

    let (_, chat) = app.get_as(&uri, "reese").await;
    assert_eq!(chat["chat"]["name"], "terminators");
    assert_eq!(chat["chat"]["user_ids"], json!(["reese", "sarah"]));
    assert_eq!(app.store.membership_count(TERMINATORS_CHAT), 2);
}

#[tokio::test]
async fn test_update_chat() {
    let app = TestApp::new().await;
    let expected = json!({
        "chat": {
            "id": SKYNET_CHAT,
            "name": "yessir",
            "user_ids": ["sarah", "terminator"],
            "owner_id": "sarah",
            "created_at": "2023-07-08T18:46:47Z",
        }
    });

    let (status, body) = app
        .put_as(&format!("/chats/{SKYNET_CHAT}"), "sarah", json!({"name": "yessir"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (status, body) = app.get_as(&format!("/chats/{SKYNET_CHAT}"), "sarah").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_update_chat_with_empty_body_changes_nothing() {
    let app = TestApp::new().await;
    let uri = format!("/chats/{SKYNET_CHAT}");
    let (_, before) = app.get_as(&uri, "terminator").await;

    let (status, after) = app.put_as(&uri, "terminator", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_rename_trims_like_create() {
    let app = TestApp::new().await;
    let uri = format!("/chats/{SKYNET_CHAT}");

    let (status, body) = app.put_as(&uri, "sarah", json!({"name": "  padded  "})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chat"]["name"], "padded");
}

#[tokio::test]
async fn test_blank_rename_is_rejected() {
    let app = TestApp::new().await;
    let uri = format!("/chats/{SKYNET_CHAT}");

    let (status, body) = app.put_as(&uri, "sarah", json!({"name": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10007);

    let (_, chat) = app.get_as(&uri, "sarah").await;
    assert_eq!(chat["chat"]["name"], "skynet");
}

#[tokio::test]
async fn test_update_invalid_chat() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put_as("/chats/1", "sarah", json!({"name": "yessir"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("Chat", "1"));
}

#[tokio::test]
async fn test_delete_chat_cascades() {
    let app = TestApp::new().await;
    let uri = format!("/chats/{DEMOLITION_CHAT}");

    let (status, body) = app.delete_as(&uri, "bomb20").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = app.get_as(&uri, "bomb20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("Chat", DEMOLITION_CHAT));
    assert_eq!(app.store.membership_count(DEMOLITION_CHAT), 0);
    assert_eq!(app.store.message_count(DEMOLITION_CHAT), 0);
}

#[tokio::test]
async fn test_delete_chat_requires_owner() {
    let app = TestApp::new().await;

    let (status, body) = app
        .delete_as(&format!("/chats/{DEMOLITION_CHAT}"), "terminator")
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "no_permission");
    assert_eq!(app.store.membership_count(DEMOLITION_CHAT), 2);
}

#[tokio::test]
async fn test_delete_invalid_chat() {
    let app = TestApp::new().await;

    let (status, body) = app.delete_as("/chats/w2", "bomb20").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("Chat", "w2"));
}

#[tokio::test]
async fn test_get_users_in_chat() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get_as(&format!("/chats/{NOSTROMO_CHAT}/users"), "talby")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "meta": {"count": 2},
            "users": [
                {"id": "doolittle", "created_at": "2003-05-21T06:14:11Z"},
                {"id": "talby", "created_at": "2001-01-09T01:27:14Z"},
            ]
        })
    );
}

#[tokio::test]
async fn test_get_users_in_invalid_chat() {
    let app = TestApp::new().await;

    let (status, body) = app.get_as("/chats/55/users", "talby").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("Chat", "55"));
}

#[tokio::test]
async fn test_create_chat_adds_owner_as_member() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_as(
            "/chats",
            "ripley",
            json!({"name": "sulaco", "user_ids": ["talby", "talby"]}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let chat = &body["chat"];
    assert_eq!(chat["name"], "sulaco");
    assert_eq!(chat["owner_id"], "ripley");
    assert_eq!(chat["user_ids"], json!(["ripley", "talby"]));
    assert_eq!(chat["id"].as_str().unwrap().len(), 32);

    let (status, listed) = app.get_as("/chats", "ripley").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["meta"]["count"], 1);
}

#[tokio::test]
async fn test_create_chat_with_unknown_member() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_as("/chats", "ripley", json!({"name": "sulaco", "user_ids": ["hicks"]}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found("User", "hicks"));
}

#[tokio::test]
async fn test_add_member_then_duplicate() {
    let app = TestApp::new().await;
    let uri = format!("/chats/{SKYNET_CHAT}/users");

    let (status, body) = app.post_as(&uri, "terminator", json!({"user_id": "bomb20"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["count"], 3);

    let (status, body) = app.post_as(&uri, "terminator", json!({"user_id": "bomb20"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"]["type"], "duplicate_entity");
    assert_eq!(body["detail"]["entity_name"], "ChatMembership");
}

#[tokio::test]
async fn test_remove_member_by_owner() {
    let app = TestApp::new().await;

    let (status, _) = app
        .delete_as(&format!("/chats/{SKYNET_CHAT}/users/terminator"), "sarah")
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get_as(&format!("/chats/{SKYNET_CHAT}"), "terminator").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test_case("sarah", "sarah" ; "owner cannot leave")]
#[test_case("terminator", "sarah" ; "member cannot remove owner")]
#[test_case("terminator", "terminator" ; "member cannot remove members")]
#[tokio::test]
async fn test_remove_member_is_forbidden(caller: &str, target: &str) {
    let app = TestApp::new().await;

    let (status, body) = app
        .delete_as(&format!("/chats/{SKYNET_CHAT}/users/{target}"), caller)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "no_permission");
    assert_eq!(app.store.membership_count(SKYNET_CHAT), 2);
}
