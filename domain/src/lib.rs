use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod filter;

// --- Document ID ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Mints a fresh identifier. A 128-bit random UUID makes collisions
    /// with previously minted or caller-assigned ids negligible.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Author ---

/// Author data carried by value inside a document. Authors are not stored
/// or deduplicated separately, and the id is not checked against any
/// authoritative registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}

// --- Document ---

/// A stored document. `id` and `created` start out as `None` and are
/// assigned by the store on first save; both survive later saves under the
/// same identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocumentId>,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    /// A document that has not been saved yet: no identifier, no creation
    /// timestamp.
    pub fn new(title: String, content: String, author: Author) -> Self {
        Self {
            id: None,
            title,
            content,
            author,
            created: None,
        }
    }

    /// The identifier usable as a storage key, if one has been assigned.
    /// An empty id counts as unassigned.
    pub fn key(&self) -> Option<&DocumentId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }
}

// --- Search Request ---

/// Multi-criteria search request. Every field is independently optional:
/// `None` skips the corresponding filter stage, while a present-but-empty
/// collection matches nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub title_prefixes: Option<Vec<String>>,
    pub contains_contents: Option<Vec<String>>,
    pub author_ids: Option<Vec<String>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}
