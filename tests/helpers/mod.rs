use comment_board::infrastructure::RestCommentStore;
use mockito::ServerGuard;
use serde_json::{json, Value};

/// Collection path the store talks to below the mock server root
#[allow(dead_code)]
pub const COMMENTS_PATH: &str = "/api/comments/";

/// A comment as the backend serializes it
#[allow(dead_code)]
pub fn comment_json(id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "author": "Admin",
        "text": text,
        "date": format!("2024-05-01T10:{:02}:00Z", id % 60),
        "likes": 0,
        "image": ""
    })
}

/// Path of a single comment below the mock server root
#[allow(dead_code)]
pub fn item_path(id: i64) -> String {
    format!("{COMMENTS_PATH}{id}/")
}

/// Fake backend plus a store pointed at its `/api` root
pub async fn backend() -> (ServerGuard, RestCommentStore) {
    let server = mockito::Server::new_async().await;
    let store = RestCommentStore::new(format!("{}/api", server.url()))
        .expect("Failed to build REST store");
    (server, store)
}
