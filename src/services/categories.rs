//! Category operations (read-only on the client)

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Category, Page};

/// Typed operations on `/categories/`
pub struct CategoriesService<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All categories, unwrapped from the paginated envelope
    pub async fn list(&self) -> Result<Vec<Category>> {
        let page: Page<Category> = self
            .client
            .get("/categories/")
            .skip_auth()
            .send()
            .await?;
        Ok(page.results)
    }

    /// One category by slug
    pub async fn get(&self, slug: &str) -> Result<Category> {
        self.client
            .get(&format!("/categories/{slug}/"))
            .skip_auth()
            .send()
            .await
    }
}
