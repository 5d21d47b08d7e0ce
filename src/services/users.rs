//! User administration operations

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Page, User, UserFilters};

/// Typed operations on `/users/` (staff only; the server enforces access)
pub struct UsersService<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List users with optional pagination and search
    pub async fn list(&self, filters: &UserFilters) -> Result<Page<User>> {
        self.client
            .get("/users/")
            .query("page", filters.page)
            .query("search", filters.search.as_deref())
            .send()
            .await
    }
}
