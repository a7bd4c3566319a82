use async_trait::async_trait;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

// --- Application Errors ---

/// The in-memory backend never fails, but the port contract leaves room
/// for implementations with real failure modes. Absence is reported with
/// `Option`, never through this type.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing, retrieving and searching documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upserts a document. A document without an identifier receives a
    /// fresh one together with a creation timestamp; a re-save under an
    /// existing identifier keeps the originally stored creation timestamp.
    /// Returns the document as stored.
    async fn save(&self, document: Document) -> Result<Document, ApplicationError>;

    /// Retrieves a document by its identifier.
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;

    /// Returns the documents matching every present criterion of the
    /// request. A request without criteria matches everything.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError>;

    /// Number of stored documents.
    async fn count(&self) -> Result<usize, ApplicationError>;

    /// Saves multiple documents, returning them in input order.
    async fn save_all(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, ApplicationError> {
        debug!(count = documents.len(), "Saving batch via default iteration");
        // Simple default: call save sequentially for each document
        let mut saved = Vec::with_capacity(documents.len());
        for document in documents {
            saved.push(self.save(document).await?);
        }
        Ok(saved)
    }
}

// --- Application Service (Use Case) ---

/// Use-case front over a document store. Adds structured logging around
/// the port operations; the storage semantics live behind the trait.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, document), fields(title = %document.title))]
    pub async fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        let saved = self.store.save(document).await?;
        info!(doc_id = ?saved.id, "Document saved");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(
        &self,
        id: &DocumentId,
    ) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Looking up document");
        self.store.find_by_id(id).await
    }

    #[instrument(skip(self, request))]
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Document>, ApplicationError> {
        let matches = self.store.search(request).await?;
        info!(hits = matches.len(), "Search finished");
        Ok(matches)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<usize, ApplicationError> {
        self.store.count().await
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn save_all(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, ApplicationError> {
        let saved = self.store.save_all(documents).await?;
        info!(count = saved.len(), "Batch saved");
        Ok(saved)
    }
}
