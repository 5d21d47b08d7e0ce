//! Article operations

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Article, ArticleCreate, ArticleFilters, ArticleSummary, ArticleUpdate, Page};

/// Typed operations on `/articles/`
pub struct ArticlesService<'a> {
    client: &'a ApiClient,
}

impl<'a> ArticlesService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List articles with optional filters and pagination
    ///
    /// Unset filter fields are never sent as query parameters. The category
    /// and author filters address related records, hence the `__slug` /
    /// `__username` lookups on the wire.
    pub async fn list(&self, filters: &ArticleFilters) -> Result<Page<ArticleSummary>> {
        self.client
            .get("/articles/")
            .query("category__slug", filters.category.as_deref())
            .query("status", filters.status.map(|s| s.as_str()))
            .query("author__username", filters.author.as_deref())
            .query("search", filters.search.as_deref())
            .query("ordering", filters.ordering.as_deref())
            .query("page", filters.page)
            .send()
            .await
    }

    /// Fetch one article by slug; fails with a 404 API error if absent
    pub async fn get(&self, slug: &str) -> Result<Article> {
        self.client.get(&format!("/articles/{slug}/")).send().await
    }

    /// Create an article
    ///
    /// Fails with a 400 validation error on a bad payload and a 401 when
    /// the caller holds no valid credential.
    pub async fn create(&self, payload: &ArticleCreate) -> Result<Article> {
        self.client.post("/articles/").json(payload)?.send().await
    }

    /// Partially update an article; omitted fields are left untouched
    pub async fn update(&self, slug: &str, payload: &ArticleUpdate) -> Result<Article> {
        self.client
            .patch(&format!("/articles/{slug}/"))
            .json(payload)?
            .send()
            .await
    }

    /// Delete an article; fails with 404/403 API errors as appropriate
    pub async fn delete(&self, slug: &str) -> Result<()> {
        self.client
            .delete(&format!("/articles/{slug}/"))
            .send_unit()
            .await
    }
}
