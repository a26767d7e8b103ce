//! Raw profile data returned by the scrape collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// Identity, reputation and account flags.
///
/// Snapshots and personas each carry their own copy; the persona service echoes
/// the block back rather than referencing the snapshot it was derived from.
/// Null or missing scores and boolean flags default at the boundary so nothing
/// untyped travels further in.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileIdentity {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub snoovatar: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub comment_karma: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub post_karma: i64,
    /// Reported total. Not guaranteed to equal `comment_karma + post_karma`.
    #[serde(default)]
    pub total_karma: Option<i64>,
    /// Account creation time, seconds since the Unix epoch.
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub is_mod: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub is_gold: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub verified: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub has_verified_email: bool,
    #[serde(default)]
    pub accept_chats: Option<bool>,
    #[serde(default)]
    pub accept_pms: Option<bool>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub accept_followers: bool,
}

impl ProfileIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: None,
            profile_picture: None,
            snoovatar: None,
            occupation: None,
            status: None,
            location: None,
            comment_karma: 0,
            post_karma: 0,
            total_karma: None,
            created_utc: None,
            is_mod: false,
            is_gold: false,
            verified: false,
            has_verified_email: false,
            accept_chats: None,
            accept_pms: None,
            accept_followers: false,
        }
    }

    /// Total karma as reported; the component sum only when no total was sent.
    pub fn total_karma(&self) -> i64 {
        self.total_karma
            .unwrap_or(self.comment_karma.saturating_add(self.post_karma))
    }

    pub fn joined_at(&self) -> Option<DateTime<Utc>> {
        self.created_utc
            .filter(|secs| secs.is_finite())
            .and_then(|secs| DateTime::from_timestamp(secs.floor() as i64, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Post,
    Comment,
}

/// A single post or comment. The `type` tag is required; everything else defaults.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "subreddit")]
    pub community: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,
}

impl ActivityItem {
    pub fn post(title: impl Into<String>, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ActivityKind::Post,
            title: Some(title.into()),
            body: body.into(),
            community: None,
            created_utc: None,
            url: url.into(),
        }
    }

    pub fn comment(body: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ActivityKind::Comment,
            title: None,
            body: body.into(),
            community: None,
            created_utc: None,
            url: url.into(),
        }
    }

    pub fn in_community(mut self, community: impl Into<String>) -> Self {
        self.community = Some(community.into());
        self
    }
}

/// Raw scrape result: profile block plus recent activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(flatten)]
    pub profile: ProfileIdentity,
    #[serde(default)]
    pub posts: Vec<ActivityItem>,
    #[serde(default)]
    pub comments: Vec<ActivityItem>,
}

impl ProfileSnapshot {
    pub fn new(profile: ProfileIdentity) -> Self {
        Self {
            profile,
            posts: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn handle(&self) -> &str {
        &self.profile.username
    }

    /// A persona may only be derived when both activity sequences have content.
    pub fn has_activity(&self) -> bool {
        !self.posts.is_empty() && !self.comments.is_empty()
    }
}
