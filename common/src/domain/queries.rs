use std::collections::HashSet;
use std::fmt::Debug;

use crate::domain::posts::{BlogPost, Exposure, PublishedPost, RawRecord, Slug};
use crate::domain::validate::validate;

/// Boundary to whatever holds the raw content: a file-based loader, a
/// database row set, an in-memory fixture. The query layer only needs
/// the records, in source order.
pub trait ContentSource: Send + Sync + Debug + 'static {
    /// iterate raw front-matter records in source order
    fn entries(&self) -> Box<dyn Iterator<Item = &RawRecord> + '_>;
}

/// Read-only queries over a content source. Every call re-validates the
/// full collection; nothing is cached and the source is never mutated.
#[derive(Debug)]
pub struct PostQueries<S: ContentSource> {
    source: S,
}

impl<S: ContentSource> PostQueries<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Every entry that validates as a public post, in source order.
    /// Entries that fail validation or carry any other visibility are
    /// skipped; one malformed post must not take down the listing, so
    /// failures only show up in the logs.
    pub fn list_public(&self) -> Vec<PublishedPost> {
        let mut posts = Vec::new();
        for record in self.source.entries() {
            match validate(record) {
                Ok(BlogPost::Published(post)) if post.exposure == Exposure::Public => {
                    posts.push(post)
                }
                Ok(_) => {}
                Err(violations) => {
                    tracing::debug!(?violations, "skipping entry with invalid front-matter");
                }
            }
        }

        // Slug uniqueness belongs to the content source, but two posts
        // sharing one must not slip through unnoticed.
        let mut seen: HashSet<&Slug> = HashSet::new();
        for post in &posts {
            if !seen.insert(&post.slug) {
                tracing::warn!(slug = %post.slug, "two public posts share a slug");
            }
        }

        posts
    }

    /// First public post whose id matches exactly. `None` is NotFound;
    /// ids of non-public posts never match.
    pub fn get_public_by_id(&self, id: &str) -> Option<PublishedPost> {
        self.list_public()
            .into_iter()
            .find(|post| post.id.as_ref() == id)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::test_utils::{StaticSource, draft_record, published_record};

    fn uuid() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn list_public_keeps_exactly_the_valid_public_entries() {
        let id = uuid();
        let mut malformed = published_record("public", &uuid(), "broken", "broken post");
        malformed.remove(crate::SLUG_FIELD_NAME);

        let queries = PostQueries::new(StaticSource::new(vec![
            draft_record("draft post"),
            published_record("public", &id, "some-slug", "public post"),
            published_record("private", &uuid(), "hidden", "private post"),
            malformed,
        ]));

        let posts = queries.list_public();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id.to_string(), id);
    }

    #[test]
    fn list_public_preserves_source_order() {
        let (first, second) = (uuid(), uuid());
        let queries = PostQueries::new(StaticSource::new(vec![
            published_record("public", &first, "first", "first post"),
            published_record("withdrawn", &uuid(), "gone", "withdrawn post"),
            published_record("public", &second, "second", "second post"),
        ]));

        let ids: Vec<String> = queries
            .list_public()
            .iter()
            .map(|post| post.id.to_string())
            .collect();

        assert_eq!(ids, [first, second]);
    }

    #[test]
    fn duplicate_slugs_are_returned_not_merged() {
        let queries = PostQueries::new(StaticSource::new(vec![
            published_record("public", &uuid(), "same-slug", "one"),
            published_record("public", &uuid(), "same-slug", "two"),
        ]));

        assert_eq!(queries.list_public().len(), 2);
    }

    #[test]
    fn get_public_by_id_finds_a_public_post() {
        let id = uuid();
        let queries = PostQueries::new(StaticSource::new(vec![published_record(
            "public",
            &id,
            "some-slug",
            "public post",
        )]));

        let post = queries.get_public_by_id(&id).unwrap();

        assert_eq!(post.slug.to_string(), "some-slug");
    }

    #[test]
    fn get_public_by_id_does_not_leak_private_posts() {
        let id = uuid();
        let queries = PostQueries::new(StaticSource::new(vec![published_record(
            "private",
            &id,
            "hidden",
            "private post",
        )]));

        assert!(queries.get_public_by_id(&id).is_none());
    }
}
