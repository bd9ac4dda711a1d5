use crate::models::UploadedDocument;
use dashmap::DashMap;
use tracing::debug;

/// Uploaded documents kept in memory so analysis can be re-run without
/// uploading again. Bounded; the oldest upload is forgotten first.
pub struct DocumentStore {
    documents: DashMap<String, UploadedDocument>,
    capacity: usize,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            documents: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Stores the document and returns its id. Uploading identical content
    /// again replaces the earlier entry under the same id.
    pub fn insert(&self, document: UploadedDocument) -> String {
        let id = document.id.clone();
        self.documents.insert(id.clone(), document);

        while self.documents.len() > self.capacity {
            let oldest = self
                .documents
                .iter()
                .filter(|entry| entry.key() != &id)
                .min_by_key(|entry| entry.value().uploaded_at)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(key) => {
                    debug!("Evicting document {}", key);
                    self.documents.remove(&key);
                }
                None => break,
            }
        }

        id
    }

    pub fn get(&self, id: &str) -> Option<UploadedDocument> {
        self.documents.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> Option<UploadedDocument> {
        self.documents.remove(id).map(|(_, doc)| doc)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{Duration, Utc};

    fn doc(content: &'static str, age_secs: i64) -> UploadedDocument {
        let mut doc = UploadedDocument::new("calls.txt".to_string(), Bytes::from_static(content.as_bytes()));
        doc.uploaded_at = Utc::now() - Duration::seconds(age_secs);
        doc
    }

    #[test]
    fn test_insert_get_remove() {
        let store = DocumentStore::new(4);
        let id = store.insert(doc("hello", 0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().bytes, Bytes::from_static(b"hello"));
        assert!(store.get("missing").is_none());

        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
        assert!(store.remove(&id).is_none());
    }

    #[test]
    fn test_same_content_same_id() {
        let store = DocumentStore::new(4);
        let a = store.insert(doc("same", 10));
        let b = store.insert(doc("same", 0));
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let store = DocumentStore::new(2);
        let oldest = store.insert(doc("one", 30));
        let middle = store.insert(doc("two", 20));
        let newest = store.insert(doc("three", 10));

        assert_eq!(store.len(), 2);
        assert!(store.get(&oldest).is_none());
        assert!(store.get(&middle).is_some());
        assert!(store.get(&newest).is_some());
    }
}
