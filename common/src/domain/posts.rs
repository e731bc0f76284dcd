use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use nutype::nutype;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::{
    DESCRIPTION_FIELD_NAME, ID_FIELD_NAME, PUBLISHED_FIELD_NAME, SLUG_FIELD_NAME, TAGS_FIELD_NAME,
    TITLE_FIELD_NAME, VISIBILITY_FIELD_NAME,
};

/// An untyped front-matter record, exactly as handed over by a content
/// source. No shape is guaranteed; `validate` turns it into a `BlogPost`.
pub type RawRecord = serde_json::Map<String, Value>;

// The 8-4-4-4-12 hex grouping of a canonical UUID. Only the shape is
// checked here; generating ids is the authoring side's business.
pub const UUID_SHAPE_REGEX: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

static UUID_SHAPE_REGEX_COMPILED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(UUID_SHAPE_REGEX).expect("UUID_SHAPE_REGEX must be a valid regex")
});

/// Identity of a published post. Permanent once assigned: a post that
/// shows up with a different id is a different post, not an edit.
#[nutype(
    validate(regex = UUID_SHAPE_REGEX_COMPILED),
    derive(
        Clone, Debug, Display, FromStr, AsRef, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize
    )
)]
pub struct PostId(String);

/// Stable public identifier of a published post, used as its URL path.
/// Unique across non-draft posts; uniqueness is the content source's
/// job, not the validator's.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone, Debug, Display, FromStr, AsRef, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize
    )
)]
pub struct Slug(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Clone, Debug, Display, FromStr, AsRef, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize
    )
)]
pub struct PostTitle(String);

/// The `visibility` discriminant as written in front-matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Draft,
    Public,
    Private,
    Unlisted,
    Withdrawn,
}

impl Visibility {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Visibility::Draft),
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "unlisted" => Some(Visibility::Unlisted),
            "withdrawn" => Some(Visibility::Withdrawn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Draft => "draft",
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
            Visibility::Withdrawn => "withdrawn",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four published sub-states. A draft has no exposure at all, which
/// is what keeps `id`/`slug`/`publishedAt` out of the draft shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Exposure {
    Public,
    Private,
    Unlisted,
    Withdrawn,
}

impl Exposure {
    pub fn from_visibility(visibility: Visibility) -> Option<Self> {
        match visibility {
            Visibility::Draft => None,
            Visibility::Public => Some(Exposure::Public),
            Visibility::Private => Some(Exposure::Private),
            Visibility::Unlisted => Some(Exposure::Unlisted),
            Visibility::Withdrawn => Some(Exposure::Withdrawn),
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Exposure::Public => Visibility::Public,
            Exposure::Private => Visibility::Private,
            Exposure::Unlisted => Visibility::Unlisted,
            Exposure::Withdrawn => Visibility::Withdrawn,
        }
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.visibility().as_str())
    }
}

/// Fields every post carries regardless of lifecycle state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInfo {
    pub title: PostTitle,
    pub description: Option<String>,
    /// Order and duplicates preserved as given; absent means empty.
    pub tags: Vec<String>,
}

/// A post still being written. Has no identity yet and may be discarded
/// without ever being published.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPost {
    pub info: PostInfo,
}

/// A post past its first publication. `id`, `slug` and `published_at`
/// are fixed at the transition out of draft; only the exposure may
/// change afterwards (e.g. public -> withdrawn).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPost {
    pub id: PostId,
    pub slug: Slug,
    pub exposure: Exposure,
    pub published_at: DateTime<Utc>,
    pub info: PostInfo,
}

/// A validated front-matter record, tagged with its lifecycle shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlogPost {
    Draft(DraftPost),
    Published(PublishedPost),
}

impl BlogPost {
    pub fn visibility(&self) -> Visibility {
        match self {
            BlogPost::Draft(_) => Visibility::Draft,
            BlogPost::Published(post) => post.exposure.visibility(),
        }
    }

    pub fn info(&self) -> &PostInfo {
        match self {
            BlogPost::Draft(post) => &post.info,
            BlogPost::Published(post) => &post.info,
        }
    }

    /// Re-serialize to the untyped front-matter shape. Validating the
    /// result yields this exact post back.
    pub fn to_record(&self) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert(
            VISIBILITY_FIELD_NAME.to_owned(),
            Value::String(self.visibility().as_str().to_owned()),
        );
        let info = self.info();
        record.insert(
            TITLE_FIELD_NAME.to_owned(),
            Value::String(info.title.to_string()),
        );
        if let Some(description) = &info.description {
            record.insert(
                DESCRIPTION_FIELD_NAME.to_owned(),
                Value::String(description.clone()),
            );
        }
        record.insert(
            TAGS_FIELD_NAME.to_owned(),
            Value::Array(info.tags.iter().cloned().map(Value::String).collect()),
        );
        if let BlogPost::Published(post) = self {
            record.insert(ID_FIELD_NAME.to_owned(), Value::String(post.id.to_string()));
            record.insert(
                SLUG_FIELD_NAME.to_owned(),
                Value::String(post.slug.to_string()),
            );
            record.insert(
                PUBLISHED_FIELD_NAME.to_owned(),
                Value::String(
                    post.published_at
                        .to_rfc3339_opts(SecondsFormat::AutoSi, true),
                ),
            );
        }
        record
    }
}
