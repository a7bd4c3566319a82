//! Filter pipeline applied by the store during search.
//!
//! Each present criterion of a [`SearchRequest`](crate::SearchRequest) is
//! one stage; stages run in a fixed order and compose by logical AND. The
//! values inside one multi-valued criterion compose by OR: a document
//! survives the stage if it matches at least one of them, which also means
//! a present-but-empty collection matches nothing. An absent criterion
//! skips its stage entirely.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::{Document, SearchRequest};

/// Threads `documents` through every present stage of `request`,
/// preserving the relative order of the input snapshot.
pub fn apply(request: &SearchRequest, documents: Vec<Document>) -> Vec<Document> {
    let mut remaining = documents;

    if let Some(prefixes) = &request.title_prefixes {
        remaining.retain(|doc| title_starts_with_any(doc, prefixes));
        trace!(count = remaining.len(), "Documents after title prefix stage");
    }
    if let Some(substrings) = &request.contains_contents {
        remaining.retain(|doc| content_contains_any(doc, substrings));
        trace!(
            count = remaining.len(),
            "Documents after content substring stage"
        );
    }
    if let Some(author_ids) = &request.author_ids {
        remaining.retain(|doc| author_id_is_any(doc, author_ids));
        trace!(count = remaining.len(), "Documents after author id stage");
    }
    if let Some(from) = &request.created_from {
        remaining.retain(|doc| created_at_or_after(doc, from));
        trace!(count = remaining.len(), "Documents after created-from stage");
    }
    if let Some(to) = &request.created_to {
        remaining.retain(|doc| created_at_or_before(doc, to));
        trace!(count = remaining.len(), "Documents after created-to stage");
    }

    remaining
}

fn title_starts_with_any(doc: &Document, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| doc.title.starts_with(prefix.as_str()))
}

fn content_contains_any(doc: &Document, substrings: &[String]) -> bool {
    substrings
        .iter()
        .any(|needle| doc.content.contains(needle.as_str()))
}

fn author_id_is_any(doc: &Document, author_ids: &[String]) -> bool {
    author_ids.iter().any(|id| doc.author.id == *id)
}

fn created_at_or_after(doc: &Document, bound: &DateTime<Utc>) -> bool {
    // A document without a timestamp cannot satisfy a date bound.
    doc.created.map_or(false, |created| created >= *bound)
}

fn created_at_or_before(doc: &Document, bound: &DateTime<Utc>) -> bool {
    doc.created.map_or(false, |created| created <= *bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;

    fn doc(title: &str, content: &str, author_id: &str) -> Document {
        Document::new(
            title.to_string(),
            content.to_string(),
            Author::new(author_id.to_string(), format!("Name of {author_id}")),
        )
    }

    fn doc_created_at(title: &str, created: &str) -> Document {
        let mut doc = doc(title, "", "author1");
        doc.created = Some(created.parse().expect("valid RFC 3339 timestamp"));
        doc
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_request_passes_everything_through() {
        let docs = vec![doc("A", "a", "author1"), doc("B", "b", "author2")];
        let result = apply(&SearchRequest::default(), docs.clone());
        assert_eq!(result, docs);
    }

    #[test]
    fn title_stage_matches_any_prefix() {
        let docs = vec![
            doc("Test Title 1", "", "author1"),
            doc("Sample Title 2", "", "author1"),
            doc("Draft notes", "", "author1"),
        ];
        let request = SearchRequest {
            title_prefixes: Some(strings(&["Test", "Sample"])),
            ..Default::default()
        };

        let titles: Vec<_> = apply(&request, docs)
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["Test Title 1", "Sample Title 2"]);
    }

    #[test]
    fn content_stage_matches_any_substring() {
        let docs = vec![
            doc("1", "the quick brown fox", "author1"),
            doc("2", "lazy dog", "author1"),
            doc("3", "nothing relevant", "author1"),
        ];
        let request = SearchRequest {
            contains_contents: Some(strings(&["quick", "dog"])),
            ..Default::default()
        };

        let titles: Vec<_> = apply(&request, docs)
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["1", "2"]);
    }

    #[test]
    fn author_stage_matches_exact_id_only() {
        let docs = vec![
            doc("1", "", "author1"),
            doc("2", "", "author10"),
            doc("3", "", "author2"),
        ];
        let request = SearchRequest {
            author_ids: Some(strings(&["author1", "author2"])),
            ..Default::default()
        };

        let titles: Vec<_> = apply(&request, docs)
            .into_iter()
            .map(|d| d.title)
            .collect();
        // "author10" must not match the "author1" criterion.
        assert_eq!(titles, vec!["1", "3"]);
    }

    #[test]
    fn present_but_empty_criterion_matches_nothing() {
        let docs = vec![doc("Test Title", "", "author1")];
        let request = SearchRequest {
            title_prefixes: Some(Vec::new()),
            ..Default::default()
        };
        assert!(apply(&request, docs).is_empty());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let docs = vec![doc_created_at("exact", "2024-03-01T12:00:00Z")];
        let bound: DateTime<Utc> = "2024-03-01T12:00:00Z".parse().unwrap();

        let request = SearchRequest {
            created_from: Some(bound),
            created_to: Some(bound),
            ..Default::default()
        };
        assert_eq!(apply(&request, docs).len(), 1);
    }

    #[test]
    fn date_stages_exclude_out_of_range_documents() {
        let docs = vec![
            doc_created_at("early", "2024-01-01T00:00:00Z"),
            doc_created_at("mid", "2024-06-01T00:00:00Z"),
            doc_created_at("late", "2024-12-01T00:00:00Z"),
        ];
        let request = SearchRequest {
            created_from: Some("2024-02-01T00:00:00Z".parse().unwrap()),
            created_to: Some("2024-07-01T00:00:00Z".parse().unwrap()),
            ..Default::default()
        };

        let titles: Vec<_> = apply(&request, docs)
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["mid"]);
    }

    #[test]
    fn document_without_timestamp_fails_date_stages() {
        let docs = vec![doc("no timestamp", "", "author1")];
        let request = SearchRequest {
            created_from: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        assert!(apply(&request, docs.clone()).is_empty());

        let request = SearchRequest {
            created_to: Some("2024-01-01T00:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        assert!(apply(&request, docs).is_empty());
    }

    #[test]
    fn stages_compose_by_logical_and() {
        let docs = vec![
            doc("Test Title 1", "Content 1", "author1"),
            doc("Sample Title 2", "New Content 2", "author2"),
        ];
        let request = SearchRequest {
            title_prefixes: Some(strings(&["Test"])),
            contains_contents: Some(strings(&["Content"])),
            author_ids: Some(strings(&["author1"])),
            ..Default::default()
        };

        let result = apply(&request, docs);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Test Title 1");
        assert_eq!(result[0].content, "Content 1");
        assert_eq!(result[0].author.id, "author1");
    }

    #[test]
    fn matching_documents_keep_their_relative_order() {
        let docs = vec![
            doc("Test A", "x", "author1"),
            doc("Other", "x", "author1"),
            doc("Test B", "x", "author1"),
            doc("Test C", "x", "author1"),
        ];
        let request = SearchRequest {
            title_prefixes: Some(strings(&["Test"])),
            ..Default::default()
        };

        let titles: Vec<_> = apply(&request, docs)
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["Test A", "Test B", "Test C"]);
    }
}
