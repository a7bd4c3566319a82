// ./infrastructure/src/persistence/in_memory_store.rs
use application::{ApplicationError, DocumentStore};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use domain::{Document, DocumentId, SearchRequest, filter};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// In-memory document store backed by a concurrent map.
///
/// Documents live only as long as the store; there is no delete operation
/// and no persistence. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    // Document ID -> Document
    documents: Arc<DashMap<DocumentId, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    #[instrument(skip(self, document))]
    async fn save(&self, mut document: Document) -> Result<Document, ApplicationError> {
        let id = match document.key() {
            Some(id) => id.clone(),
            None => {
                // First save without an identifier: mint one and stamp the
                // creation time.
                let id = DocumentId::random();
                document.id = Some(id.clone());
                document.created = Some(Utc::now());
                debug!(doc_id = %id, "Minted identifier for new document");
                id
            }
        };

        // The entry API keeps the creation-timestamp lookup and the write
        // atomic for this key.
        match self.documents.entry(id.clone()) {
            Entry::Occupied(mut existing) => {
                // Updates never change the stored creation timestamp; the
                // caller-supplied value is discarded.
                document.created = existing.get().created;
                existing.insert(document.clone());
                debug!(doc_id = %id, "Updated existing document in in-memory store");
            }
            Entry::Vacant(slot) => {
                // Caller-assigned id with no prior entry: the document is
                // accepted as-is, whatever its creation timestamp.
                slot.insert(document.clone());
                debug!(doc_id = %id, "Inserted document into in-memory store");
            }
        }

        Ok(document)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        Ok(self.documents.get(id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, request))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let snapshot: Vec<Document> = self
            .documents
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        trace!(count = snapshot.len(), "Snapshot taken for search");

        let matches = filter::apply(request, snapshot);
        debug!(hits = matches.len(), "In-memory search finished");
        Ok(matches)
    }

    async fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.documents.len())
    }
}
