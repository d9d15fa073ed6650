//! Wire envelopes and view types for API responses.
//!
//! Every response wraps its payload under a resource key (`user`,
//! `profile`, `article`, ...) and the envelope field names are part of the
//! public contract -- clients match on them exactly. Use these structs
//! instead of ad-hoc `serde_json::json!` so the shape is checked at
//! compile time.

use conduit_core::messages::DEFAULT_PROFILE_IMAGE;
use conduit_core::types::Timestamp;
use conduit_db::models::profile::ProfileRecord;
use conduit_db::models::user::User;
use serde::Serialize;

/// `{ "user": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub user: UserView,
}

/// The user's own representation: identity fields plus a freshly issued
/// token. Never contains the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub email: String,
    pub username: String,
    pub token: String,
    pub bio: String,
    /// Stored value, raw -- the placeholder substitution applies only to
    /// profile views.
    pub image: String,
}

impl UserView {
    pub fn new(user: &User, bio: String, image: String, token: String) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            token,
            bio,
            image,
        }
    }
}

/// `{ "profile": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub profile: ProfileView,
}

/// A profile as seen by a viewer; `following` is viewer-dependent and
/// always `false` for anonymous requests.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub bio: String,
    pub image: String,
    pub following: bool,
}

impl ProfileView {
    /// Build a view from a stored record, substituting the stock avatar
    /// when no image is set.
    pub fn from_record(record: &ProfileRecord, following: bool) -> Self {
        let image = if record.image.is_empty() {
            DEFAULT_PROFILE_IMAGE.to_string()
        } else {
            record.image.clone()
        };
        Self {
            username: record.username.clone(),
            bio: record.bio.clone(),
            image,
            following,
        }
    }
}

/// `{ "article": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct ArticleBody {
    pub article: ArticleView,
}

/// `{ "articles": [...], "articlesCount": n }` envelope.
///
/// `articlesCount` is the total matching rows ignoring pagination.
#[derive(Debug, Serialize)]
pub struct ArticlesBody {
    pub articles: Vec<ArticleView>,
    #[serde(rename = "articlesCount")]
    pub articles_count: i64,
}

/// An article as seen by a viewer.
#[derive(Debug, Serialize)]
pub struct ArticleView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    /// Alphabetical.
    #[serde(rename = "tagList")]
    pub tag_list: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
    /// Whether the viewer has favorited this article; `false` for
    /// anonymous viewers.
    pub favorited: bool,
    #[serde(rename = "favoritesCount")]
    pub favorites_count: i64,
    pub author: ProfileView,
}

/// `{ "comment": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub comment: CommentView,
}

/// `{ "comments": [...] }` envelope, newest first.
#[derive(Debug, Serialize)]
pub struct CommentsBody {
    pub comments: Vec<CommentView>,
}

/// A comment as seen by a viewer.
#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: conduit_core::types::DbId,
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
    pub author: ProfileView,
}

/// `{ "tags": [...] }` envelope, alphabetical, unpaginated.
#[derive(Debug, Serialize)]
pub struct TagsBody {
    pub tags: Vec<String>,
}
