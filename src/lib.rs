//! # summit-client
//!
//! Typed async client library for the Summit blogging platform REST API.
//!
//! ## Design Philosophy
//!
//! summit-client is designed to be:
//! - **Typed end to end** - every endpoint has request and response DTOs;
//!   the backend contract is the trust boundary, not runtime validation
//! - **Explicit about credentials** - tokens are persisted through a storage
//!   abstraction that fails soft, and nothing refreshes or retries behind
//!   the caller's back
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Honest about errors** - failed responses become structured errors
//!   classified by status; facades propagate, only the session controller
//!   catches
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use summit_client::{
//!     ApiClient, ArticleFilters, FileSessionCache, FileTokenStore, SessionController,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = Arc::new(FileTokenStore::new("state/tokens.json"));
//!     let client = Arc::new(ApiClient::from_env(tokens));
//!
//!     // Restore the session from disk, then verify it against the backend
//!     let session = SessionController::new(
//!         Arc::clone(&client),
//!         Arc::new(FileSessionCache::new("state/session.json")),
//!     );
//!     session.rehydrate().await;
//!     session.fetch_user().await;
//!
//!     let page = client.articles().list(&ArticleFilters::default()).await?;
//!     for article in page.results {
//!         println!("{} ({})", article.title, article.slug);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Typed request executor
pub mod client;
/// Client configuration
pub mod config;
/// Error types
pub mod error;
/// Domain service facades (articles, comments, categories, tags, users, auth)
pub mod services;
/// Session state controller
pub mod session;
/// Credential pair persistence
pub mod token_store;
/// Wire types (entities, requests, envelopes, filters)
pub mod types;

// Re-export commonly used types
pub use client::{ApiClient, RequestBuilder};
pub use config::{BASE_URL_ENV, ClientConfig};
pub use error::{ApiError, Error, Result};
pub use services::{
    ArticlesService, AuthService, CategoriesService, CommentsService, TagsService, UsersService,
};
pub use session::{
    FileSessionCache, MemorySessionCache, SessionCache, SessionController, SessionSnapshot,
    SessionState,
};
pub use token_store::{
    FileTokenStore, MemoryTokenStore, TokenLookup, TokenPair, TokenStore, UnavailableTokenStore,
};
pub use types::{
    Article, ArticleCreate, ArticleFilters, ArticleStatus, ArticleSummary, ArticleUpdate,
    Category, Comment, CommentCreate, LoginRequest, Page, Profile, ProfileFields, ProfileUpdate,
    Tag, User, UserFilters, UserSummary,
};
