use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::posts::{
    BlogPost, DraftPost, Exposure, PostId, PostInfo, PostTitle, PublishedPost, RawRecord, Slug,
    Visibility,
};
use crate::{
    DATE_ALIAS_FIELD_NAME, DESCRIPTION_FIELD_NAME, ID_FIELD_NAME, PUBLISHED_FIELD_NAME,
    SLUG_FIELD_NAME, TAGS_FIELD_NAME, TITLE_FIELD_NAME, VISIBILITY_FIELD_NAME,
};

/// One thing wrong with a front-matter record. Violations are data, not
/// exceptions: the full list goes back to the authoring tooling so a
/// record can be fixed in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FieldViolation {
    /// `visibility` is missing or not one of the recognized literals.
    UnknownVisibility { found: Option<String> },
    /// A field required for the record's visibility is absent.
    MissingField { field: &'static str },
    /// A field is present but fails shape validation.
    InvalidField { field: &'static str, reason: String },
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldViolation::UnknownVisibility { found: None } => {
                write!(f, "'{VISIBILITY_FIELD_NAME}' is missing")
            }
            FieldViolation::UnknownVisibility { found: Some(found) } => {
                write!(
                    f,
                    "'{VISIBILITY_FIELD_NAME}' is '{found}', expected one of draft, public, private, unlisted, withdrawn"
                )
            }
            FieldViolation::MissingField { field } => {
                write!(f, "required field '{field}' is missing")
            }
            FieldViolation::InvalidField { field, reason } => {
                write!(f, "field '{field}' is invalid: {reason}")
            }
        }
    }
}

/// Validate an untyped front-matter record against the lifecycle model.
///
/// The `visibility` discriminant picks the required-field set: a draft
/// needs only a title, anything published additionally needs an id, a
/// slug and a publication timestamp. On failure the complete violation
/// list is returned, never just the first hit. Pure; same input, same
/// result.
pub fn validate(raw: &RawRecord) -> Result<BlogPost, Vec<FieldViolation>> {
    let visibility = discriminant(raw).map_err(|violation| vec![violation])?;
    match Exposure::from_visibility(visibility) {
        None => validate_draft(raw),
        Some(exposure) => validate_published(raw, exposure),
    }
}

fn discriminant(raw: &RawRecord) -> Result<Visibility, FieldViolation> {
    let Some(value) = raw.get(VISIBILITY_FIELD_NAME) else {
        return Err(FieldViolation::UnknownVisibility { found: None });
    };
    value
        .as_str()
        .and_then(Visibility::parse)
        .ok_or_else(|| FieldViolation::UnknownVisibility {
            found: Some(render(value)),
        })
}

// Extra id/slug/publishedAt on a draft are ignored, not rejected: the
// draft shape structurally excludes them.
fn validate_draft(raw: &RawRecord) -> Result<BlogPost, Vec<FieldViolation>> {
    let mut violations = Vec::new();
    let info = validate_info(raw, &mut violations);
    match info {
        Some(info) if violations.is_empty() => Ok(BlogPost::Draft(DraftPost { info })),
        _ => Err(violations),
    }
}

fn validate_published(
    raw: &RawRecord,
    exposure: Exposure,
) -> Result<BlogPost, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let id = required_str(raw, ID_FIELD_NAME, &mut violations).and_then(|text| {
        match PostId::try_new(text) {
            Ok(id) => Some(id),
            Err(_) => {
                violations.push(invalid(ID_FIELD_NAME, "not UUID-shaped"));
                None
            }
        }
    });

    let slug = required_str(raw, SLUG_FIELD_NAME, &mut violations).and_then(|text| {
        match Slug::try_new(text) {
            Ok(slug) => Some(slug),
            Err(err) => {
                violations.push(invalid(SLUG_FIELD_NAME, err.to_string()));
                None
            }
        }
    });

    let published_at = match raw
        .get(PUBLISHED_FIELD_NAME)
        .or_else(|| raw.get(DATE_ALIAS_FIELD_NAME))
    {
        None => {
            violations.push(FieldViolation::MissingField {
                field: PUBLISHED_FIELD_NAME,
            });
            None
        }
        Some(value) => match coerce_date(value) {
            Ok(date_time) => Some(date_time),
            Err(reason) => {
                violations.push(invalid(PUBLISHED_FIELD_NAME, reason));
                None
            }
        },
    };

    let info = validate_info(raw, &mut violations);

    match (id, slug, published_at, info) {
        (Some(id), Some(slug), Some(published_at), Some(info)) if violations.is_empty() => {
            Ok(BlogPost::Published(PublishedPost {
                id,
                slug,
                exposure,
                published_at,
                info,
            }))
        }
        _ => Err(violations),
    }
}

fn validate_info(raw: &RawRecord, violations: &mut Vec<FieldViolation>) -> Option<PostInfo> {
    let title = required_str(raw, TITLE_FIELD_NAME, violations).and_then(|text| {
        match PostTitle::try_new(text) {
            Ok(title) => Some(title),
            Err(err) => {
                violations.push(invalid(TITLE_FIELD_NAME, err.to_string()));
                None
            }
        }
    });

    let mut shape_ok = true;

    let description = match raw.get(DESCRIPTION_FIELD_NAME) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(invalid(DESCRIPTION_FIELD_NAME, "expected a string"));
            shape_ok = false;
            None
        }
    };

    // Absent tags default to the empty sequence. This is an explicit
    // validator rule; present tags keep their order and duplicates.
    let tags = match raw.get(TAGS_FIELD_NAME) {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            let mut all_strings = true;
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(tag) => tags.push(tag.to_owned()),
                    None => {
                        violations.push(invalid(
                            TAGS_FIELD_NAME,
                            format!("tag at index {index} is not a string"),
                        ));
                        all_strings = false;
                    }
                }
            }
            all_strings.then_some(tags)
        }
        Some(_) => {
            violations.push(invalid(TAGS_FIELD_NAME, "expected an array of strings"));
            None
        }
    };

    match (title, tags) {
        (Some(title), Some(tags)) if shape_ok => Some(PostInfo {
            title,
            description,
            tags,
        }),
        _ => None,
    }
}

fn required_str<'a>(
    raw: &'a RawRecord,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<&'a str> {
    match raw.get(field) {
        None => {
            violations.push(FieldViolation::MissingField { field });
            None
        }
        Some(value) => match value.as_str() {
            Some(text) => Some(text),
            None => {
                violations.push(invalid(field, "expected a string"));
                None
            }
        },
    }
}

// Coercion policy: RFC 3339 strings, plain YYYY-MM-DD strings and Unix
// timestamp numbers all canonicalize to a UTC instant. Anything else is
// an InvalidField, never a panic.
fn coerce_date(value: &Value) -> Result<DateTime<Utc>, String> {
    match value {
        Value::String(text) => {
            if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
                return Ok(date_time.with_timezone(&Utc));
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(date.and_time(NaiveTime::MIN).and_utc());
            }
            Err(format!("'{text}' is not a date"))
        }
        Value::Number(number) => number
            .as_i64()
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
            .ok_or_else(|| format!("{number} is not a Unix timestamp")),
        other => Err(format!("expected a date, got {}", render(other))),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> FieldViolation {
    FieldViolation::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
