use plume_common::{ContentSource, FieldViolation, RawRecord, TITLE_FIELD_NAME, validate};

/// One content entry that failed validation, with everything wrong
/// about it. Authors get the full list so one round of feedback is
/// enough to fix a record.
#[derive(Debug)]
pub struct EntryReport {
    pub label: String,
    pub violations: Vec<FieldViolation>,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub valid: usize,
    pub invalid: Vec<EntryReport>,
}

/// Validates every entry of a content source.
pub struct Check<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> Check<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn run(&self) -> CheckReport {
        let mut report = CheckReport::default();
        for (index, record) in self.source.entries().enumerate() {
            match validate(record) {
                Ok(post) => {
                    tracing::debug!(visibility = %post.visibility(), "entry ok");
                    report.valid += 1;
                }
                Err(violations) => report.invalid.push(EntryReport {
                    label: label(index, record),
                    violations,
                }),
            }
        }
        report
    }
}

fn label(index: usize, record: &RawRecord) -> String {
    match record.get(TITLE_FIELD_NAME).and_then(|value| value.as_str()) {
        Some(title) => format!("entry #{index} ('{title}')"),
        None => format!("entry #{index}"),
    }
}

#[cfg(test)]
mod tests {
    use plume_common::SLUG_FIELD_NAME;
    use plume_common::test_utils::{StaticSource, draft_record, published_record, record};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn reports_every_invalid_entry_with_its_violations() {
        let mut missing_slug =
            published_record("public", &Uuid::new_v4().to_string(), "s", "half done");
        missing_slug.remove(SLUG_FIELD_NAME);

        let check = Check::new(StaticSource::new(vec![
            draft_record("fine draft"),
            published_record("public", &Uuid::new_v4().to_string(), "ok", "fine post"),
            missing_slug,
            record(json!({ "title": "no visibility at all" })),
        ]));

        let report = check.run();

        assert_eq!(report.valid, 2);
        assert_eq!(report.invalid.len(), 2);
        assert_eq!(report.invalid[0].label, "entry #2 ('half done')");
        assert_eq!(report.invalid[0].violations.len(), 1);
        assert_eq!(report.invalid[1].label, "entry #3 ('no visibility at all')");
    }

    #[test]
    fn clean_source_yields_no_invalid_entries() {
        let check = Check::new(StaticSource::new(vec![draft_record("only draft")]));

        let report = check.run();

        assert_eq!(report.valid, 1);
        assert!(report.invalid.is_empty());
    }
}
