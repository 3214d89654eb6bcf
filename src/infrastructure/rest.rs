// src/infrastructure/rest.rs
use crate::application::CommentStore;
use crate::constants::COMMENTS_RESOURCE;
use crate::domain::{Comment, CommentId, CommentPatch, NewComment, StoreError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, instrument};

/// List response: either the bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Comment>),
    Paginated {
        results: Vec<Comment>,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl ListBody {
    fn into_comments(self) -> Vec<Comment> {
        match self {
            ListBody::Paginated { results, count } => {
                debug!(?count, returned = results.len(), "Unwrapped paginated list");
                results
            }
            ListBody::Bare(comments) => comments,
        }
    }
}

/// Comment store reached over the backend's JSON API.
///
/// Collection URL: `{base_url}/comments/`, item URL: `{base_url}/comments/{id}/`.
#[derive(Debug, Clone)]
pub struct RestCommentStore {
    http: reqwest::Client,
    base_url: String,
}

impl RestCommentStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        debug!(%base_url, "Created REST comment store");
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}/", self.base_url, COMMENTS_RESOURCE)
    }

    fn item_url(&self, id: CommentId) -> String {
        format!("{}{}/", self.collection_url(), id)
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let resp = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, StoreError> {
        resp.json::<R>()
            .await
            .map_err(|e| StoreError::Decode(format!("response body: {}", e)))
    }

    async fn fetch_list(&self) -> Result<Vec<Comment>, StoreError> {
        let resp = Self::send(self.http.get(self.collection_url())).await?;
        let body: ListBody = Self::parse(resp).await?;
        Ok(body.into_comments())
    }

    async fn post_comment(&self, text: &str) -> Result<Comment, StoreError> {
        let body = NewComment::from_admin(text);
        let resp = Self::send(self.http.post(self.collection_url()).json(&body)).await?;
        Self::parse(resp).await
    }

    async fn patch_comment(&self, id: CommentId, text: &str) -> Result<Comment, StoreError> {
        let body = CommentPatch {
            text: text.to_string(),
        };
        let resp = Self::send(self.http.patch(self.item_url(id)).json(&body)).await?;
        Self::parse(resp).await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<(), StoreError> {
        // 200 carries a message body, 204 none; neither is read
        Self::send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[async_trait]
impl CommentStore for RestCommentStore {
    #[instrument(level = "debug", skip(self))]
    async fn list(&self) -> Result<Vec<Comment>, StoreError> {
        self.fetch_list().await.inspect_err(|e| {
            error!(error = %e, "Error fetching comments");
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn create(&self, text: &str) -> Result<Comment, StoreError> {
        self.post_comment(text).await.inspect_err(|e| {
            error!(error = %e, "Error creating comment");
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, StoreError> {
        self.patch_comment(id, text).await.inspect_err(|e| {
            error!(%id, error = %e, "Error updating comment");
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        self.delete_comment(id).await.inspect_err(|e| {
            error!(%id, error = %e, "Error deleting comment");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment_json(id: i64, text: &str) -> serde_json::Value {
        json!({
            "id": id,
            "author": "Admin",
            "text": text,
            "date": "2024-05-01T10:00:00Z",
            "likes": 0,
            "image": ""
        })
    }

    #[test]
    fn given_bare_array_when_decoding_list_then_returns_items() {
        let body: ListBody =
            serde_json::from_value(json!([comment_json(1, "a"), comment_json(2, "b")])).unwrap();

        let comments = body.into_comments();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].text, "b");
    }

    #[test]
    fn given_envelope_when_decoding_list_then_unwraps_results() {
        let envelope = json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [comment_json(1, "a"), comment_json(2, "b")]
        });
        let bare = json!([comment_json(1, "a"), comment_json(2, "b")]);

        let from_envelope = serde_json::from_value::<ListBody>(envelope).unwrap().into_comments();
        let from_bare = serde_json::from_value::<ListBody>(bare).unwrap().into_comments();

        assert_eq!(from_envelope, from_bare);
    }

    #[test]
    fn given_object_without_results_when_decoding_list_then_fails() {
        let result = serde_json::from_value::<ListBody>(json!({"error": "boom"}));
        assert!(result.is_err());
    }

    #[test]
    fn given_base_url_with_trailing_slash_when_building_urls_then_uses_django_paths() {
        let store = RestCommentStore::new("http://localhost:8000/api/").unwrap();

        assert_eq!(store.base_url(), "http://localhost:8000/api");
        assert_eq!(store.collection_url(), "http://localhost:8000/api/comments/");
        assert_eq!(store.item_url(CommentId(42)), "http://localhost:8000/api/comments/42/");
    }
}
