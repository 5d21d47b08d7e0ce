//! Domain service facades
//!
//! One facade per API resource, each a thin, stateless set of typed
//! operations over the request executor. Facades never catch errors;
//! structured API errors and local precondition failures propagate to the
//! caller untouched.

mod articles;
mod auth;
mod categories;
mod comments;
mod tags;
mod users;

pub use articles::ArticlesService;
pub use auth::AuthService;
pub use categories::CategoriesService;
pub use comments::CommentsService;
pub use tags::TagsService;
pub use users::UsersService;

use crate::client::ApiClient;

impl ApiClient {
    /// Article operations
    pub fn articles(&self) -> ArticlesService<'_> {
        ArticlesService::new(self)
    }

    /// Comment operations, nested under an article
    pub fn comments(&self) -> CommentsService<'_> {
        CommentsService::new(self)
    }

    /// Category operations (read-only)
    pub fn categories(&self) -> CategoriesService<'_> {
        CategoriesService::new(self)
    }

    /// Tag operations (read-only)
    pub fn tags(&self) -> TagsService<'_> {
        TagsService::new(self)
    }

    /// User administration operations
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Authentication operations
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }
}
