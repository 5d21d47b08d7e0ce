//! Wire types for the Summit REST API
//!
//! These types mirror the backend contract field for field. They fall into
//! three groups: entities (what the API returns), request payloads (what the
//! client sends), and response envelopes/filters. There is no runtime schema
//! validation beyond a successful JSON parse — the backend contract is the
//! trust boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Entities

/// Extended profile fields attached to a [`User`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Free-form biography, if set
    pub bio: Option<String>,
    /// Avatar image URL, if set
    pub avatar_url: Option<String>,
    /// Personal website URL, if set
    pub website: Option<String>,
}

/// Full user record, returned by `/me/` and the admin user list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: i64,
    /// Login name, unique across the platform
    pub username: String,
    /// Contact email
    pub email: String,
    /// Given name (may be empty)
    pub first_name: String,
    /// Family name (may be empty)
    pub last_name: String,
    /// Extended profile fields
    pub profile: Profile,
    /// Account creation timestamp
    pub date_joined: DateTime<Utc>,
    /// Whether the user has staff/admin privileges
    pub is_staff: bool,
}

/// Compact user form embedded in articles and comments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique user id
    pub id: i64,
    /// Login name
    pub username: String,
    /// Given name (may be empty)
    pub first_name: String,
    /// Family name (may be empty)
    pub last_name: String,
    /// Avatar image URL, if set
    pub avatar_url: Option<String>,
}

/// Article category, read-only on the client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category id
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
    /// Category description
    pub description: String,
    /// Number of articles filed under this category
    pub articles_count: i64,
}

/// Article tag, read-only on the client
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag id
    pub id: i64,
    /// Display name
    pub name: String,
    /// URL-safe identifier
    pub slug: String,
}

/// Publication status of an article
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Visible to the author only
    Draft,
    /// Publicly visible
    Published,
}

impl ArticleStatus {
    /// Lowercase wire form, as used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }
}

/// Article in list form (compact, no body or comments)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    /// Unique article id
    pub id: i64,
    /// Title
    pub title: String,
    /// URL-safe identifier, the canonical handle for article operations
    pub slug: String,
    /// Short teaser text
    pub excerpt: String,
    /// Cover image URL, if set
    pub image_url: Option<String>,
    /// Author, compact form
    pub author: UserSummary,
    /// Category, if filed under one
    pub category: Option<Category>,
    /// Attached tags
    pub tags: Vec<Tag>,
    /// Publication status
    pub status: ArticleStatus,
    /// When the article went public; absent for drafts
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Article in detail form (full body and embedded comment trees)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Unique article id
    pub id: i64,
    /// Title
    pub title: String,
    /// URL-safe identifier
    pub slug: String,
    /// Short teaser text
    pub excerpt: String,
    /// Cover image URL, if set
    pub image_url: Option<String>,
    /// Author, compact form
    pub author: UserSummary,
    /// Category, if filed under one
    pub category: Option<Category>,
    /// Attached tags
    pub tags: Vec<Tag>,
    /// Publication status
    pub status: ArticleStatus,
    /// When the article went public; absent for drafts
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Full article body
    pub content: String,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Root-level comments with their reply trees
    pub comments: Vec<Comment>,
}

/// Comment on an article
///
/// Root comments carry their replies nested; the tree shape is preserved
/// exactly as received, no flattening.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment id
    pub id: i64,
    /// Author, compact form
    pub author: UserSummary,
    /// Comment body
    pub content: String,
    /// Parent comment id when this is a reply; absent for root comments
    pub parent: Option<i64>,
    /// Nested replies, as received
    pub replies: Vec<Comment>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

// Request payloads

/// Credentials for `/auth/login/`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Password, sent over the wire only
    pub password: String,
}

/// Payload for creating an article
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArticleCreate {
    /// Title
    pub title: String,
    /// Short teaser text
    pub excerpt: String,
    /// Full article body
    pub content: String,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    /// Tag ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    /// Publication status; the backend defaults to draft when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
}

/// Partial payload for updating an article
///
/// Every field is optional; omitted fields are not serialized, so the
/// backend leaves them untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New teaser text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// New article body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// New category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    /// New tag ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    /// New publication status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
}

/// Payload for creating a comment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentCreate {
    /// Comment body
    pub content: String,
    /// Parent comment id; set to form a reply, omit for a root comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
}

/// Nested profile fields in a [`ProfileUpdate`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    /// New biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// New website URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Partial payload for updating the current user via `/me/`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Extended profile fields to change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileFields>,
}

// Response envelopes and filters

/// Paginated list envelope returned by every list endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: i64,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

/// Filters for the article list endpoint
///
/// All fields are optional; unset fields are never sent as query
/// parameters.
#[derive(Clone, Debug, Default)]
pub struct ArticleFilters {
    /// Category slug (sent as `category__slug`)
    pub category: Option<String>,
    /// Publication status
    pub status: Option<ArticleStatus>,
    /// Author username (sent as `author__username`)
    pub author: Option<String>,
    /// Full-text search query
    pub search: Option<String>,
    /// Sort key, e.g. `-published_at`
    pub ordering: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

/// Filters for the admin user list endpoint
#[derive(Clone, Debug, Default)]
pub struct UserFilters {
    /// 1-based page number
    pub page: Option<u32>,
    /// Username/email search query
    pub search: Option<String>,
}
