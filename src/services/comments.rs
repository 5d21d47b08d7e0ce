//! Comment operations
//!
//! Comments live under an article (nested route). Root comments come back
//! with their reply trees already nested; the tree shape is preserved as
//! received.

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Comment, CommentCreate, Page};

/// Typed operations on `/articles/{slug}/comments/`
pub struct CommentsService<'a> {
    client: &'a ApiClient,
}

impl<'a> CommentsService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Root-level comments of an article, reply trees included
    pub async fn list(&self, article_slug: &str) -> Result<Vec<Comment>> {
        let page: Page<Comment> = self
            .client
            .get(&format!("/articles/{article_slug}/comments/"))
            .skip_auth()
            .send()
            .await?;
        Ok(page.results)
    }

    /// Create a comment; set `parent` in the payload to form a reply
    pub async fn create(&self, article_slug: &str, payload: &CommentCreate) -> Result<Comment> {
        self.client
            .post(&format!("/articles/{article_slug}/comments/"))
            .json(payload)?
            .send()
            .await
    }

    /// Replace a comment's content
    pub async fn update(&self, article_slug: &str, comment_id: i64, content: &str) -> Result<Comment> {
        self.client
            .patch(&format!("/articles/{article_slug}/comments/{comment_id}/"))
            .json(&serde_json::json!({ "content": content }))?
            .send()
            .await
    }

    /// Delete a comment
    pub async fn delete(&self, article_slug: &str, comment_id: i64) -> Result<()> {
        self.client
            .delete(&format!("/articles/{article_slug}/comments/{comment_id}/"))
            .send_unit()
            .await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use crate::client::ApiClient;
    use crate::config::ClientConfig;
    use crate::token_store::MemoryTokenStore;
    use crate::types::CommentCreate;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            ClientConfig {
                base_url: server.uri(),
            },
            Arc::new(MemoryTokenStore::new()),
        )
    }

    fn comment(id: i64, content: &str, parent: Option<i64>, replies: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "author": {"id": 7, "username": "alice", "first_name": "", "last_name": "", "avatar_url": null},
            "content": content,
            "parent": parent,
            "replies": replies,
            "created_at": "2024-03-01T09:00:00Z",
            "updated_at": "2024-03-01T09:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_preserves_reply_trees() {
        let server = MockServer::start().await;
        let body = json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [comment(42, "root", None, json!([
                comment(43, "reply", Some(42), json!([]))
            ]))]
        });
        Mock::given(method("GET"))
            .and(path("/articles/first-ascent/comments/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let comments = client.comments().list("first-ascent").await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, 42);
        assert_eq!(comments[0].replies.len(), 1);
        assert_eq!(comments[0].replies[0].parent, Some(42));
    }

    #[tokio::test]
    async fn test_list_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/first-ascent/comments/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"count": 0, "next": null, "previous": null, "results": []}),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .tokens()
            .write(&crate::token_store::TokenPair {
                access: "access-abc".to_string(),
                refresh: "refresh-xyz".to_string(),
            })
            .await;
        client.comments().list("first-ascent").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_create_reply_sends_parent_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles/first-ascent/comments/"))
            .and(body_json(json!({"content": "Thanks!", "parent": 42})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(comment(44, "Thanks!", Some(42), json!([]))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client
            .comments()
            .create(
                "first-ascent",
                &CommentCreate {
                    content: "Thanks!".to_string(),
                    parent: Some(42),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.parent, Some(42));
    }

    #[tokio::test]
    async fn test_create_root_comment_omits_parent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles/first-ascent/comments/"))
            .and(body_json(json!({"content": "Great article!"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(comment(45, "Great article!", None, json!([]))),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client
            .comments()
            .create(
                "first-ascent",
                &CommentCreate {
                    content: "Great article!".to_string(),
                    parent: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.parent, None);
    }
}
