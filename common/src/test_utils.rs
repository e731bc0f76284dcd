use serde_json::{Value, json};

use crate::domain::posts::RawRecord;
use crate::domain::queries::ContentSource;

/// In-memory content source over a fixed list of raw records.
///
/// Public so that other crates can reuse it for their own tests.
#[derive(Debug, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl ContentSource for StaticSource {
    fn entries(&self) -> Box<dyn Iterator<Item = &RawRecord> + '_> {
        Box::new(self.records.iter())
    }
}

pub fn draft_record(title: &str) -> RawRecord {
    record(json!({ "visibility": "draft", "title": title }))
}

pub fn published_record(visibility: &str, id: &str, slug: &str, title: &str) -> RawRecord {
    record(json!({
        "visibility": visibility,
        "id": id,
        "slug": slug,
        "title": title,
        "publishedAt": "2025-01-01T00:00:00+09:00",
    }))
}

pub fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("record fixtures must be JSON objects"),
    }
}
