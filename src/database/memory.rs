use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use mongodb::bson::{self, Document};
use serde::{de::DeserializeOwned, Serialize};

use super::{Error, Result};

/// A document store that lives in process memory.
/// Cheaply cloneable, every clone points to the same collections.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<Mutex<Collections>>);

#[derive(Debug, Default)]
struct Collections {
    documents: HashMap<String, Vec<Document>>,
    unique_keys: HashMap<String, Vec<String>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.0.lock().map_err(|_| Error::StorePoisoned)
    }

    pub fn add_unique_key(&self, collection: &str, field: &str) -> Result<()> {
        let mut collections = self.lock()?;
        let keys = collections
            .unique_keys
            .entry(collection.to_string())
            .or_default();
        if !keys.iter().any(|key| key == field) {
            keys.push(field.to_string());
        }

        Ok(())
    }

    /// The uniqueness check and the insert happen under the same lock.
    pub fn insert<T: Serialize>(&self, collection: &str, record: &T) -> Result<()> {
        let document = bson::to_document(record)?;
        let mut collections = self.lock()?;
        let Collections {
            documents,
            unique_keys,
        } = &mut *collections;

        let stored = documents.entry(collection.to_string()).or_default();
        let violates_unique = unique_keys
            .get(collection)
            .into_iter()
            .flatten()
            .filter_map(|key| document.get(key).map(|value| (key, value)))
            .any(|(key, value)| stored.iter().any(|doc| doc.get(key) == Some(value)));

        if violates_unique {
            return Err(Error::DuplicateKey {
                collection: collection.to_string(),
            });
        }

        stored.push(document);
        Ok(())
    }

    pub fn find_all<T: DeserializeOwned>(&self, collection: &str, limit: i64) -> Result<Vec<T>> {
        let collections = self.lock()?;
        let limit = usize::try_from(limit).unwrap_or(0);

        collections
            .documents
            .get(collection)
            .into_iter()
            .flatten()
            .take(limit)
            .map(|doc| bson::from_document(doc.clone()).map_err(Error::from))
            .collect()
    }

    /// Returns the first document whose fields equal every field of `filter`.
    pub fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Document,
    ) -> Result<Option<T>> {
        let collections = self.lock()?;

        let found = collections
            .documents
            .get(collection)
            .into_iter()
            .flatten()
            .find(|doc| filter.iter().all(|(key, value)| doc.get(key) == Some(value)));

        match found {
            Some(doc) => Ok(Some(bson::from_document(doc.clone())?)),
            None => Ok(None),
        }
    }
}
