//! Tag operations (read-only on the client)

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Page, Tag};

/// Typed operations on `/tags/`
pub struct TagsService<'a> {
    client: &'a ApiClient,
}

impl<'a> TagsService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All tags, unwrapped from the paginated envelope
    pub async fn list(&self) -> Result<Vec<Tag>> {
        let page: Page<Tag> = self.client.get("/tags/").skip_auth().send().await?;
        Ok(page.results)
    }

    /// One tag by slug
    pub async fn get(&self, slug: &str) -> Result<Tag> {
        self.client
            .get(&format!("/tags/{slug}/"))
            .skip_auth()
            .send()
            .await
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use crate::client::ApiClient;
    use crate::config::ClientConfig;
    use crate::token_store::MemoryTokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_unwraps_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tags/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2, "next": null, "previous": null,
                "results": [
                    {"id": 1, "name": "Crimps", "slug": "crimps"},
                    {"id": 2, "name": "Slopers", "slug": "slopers"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(
            ClientConfig {
                base_url: server.uri(),
            },
            Arc::new(MemoryTokenStore::new()),
        );
        let tags = client.tags().list().await.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].slug, "slopers");
    }
}
