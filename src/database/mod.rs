//! Persistence gateway. A thin async wrapper around the document store that only knows
//! how to insert one record, find many records and find the first matching record.

mod memory;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::config::{DbBackend, DbConfig};

pub use memory::MemoryStore;

/// Server error code MongoDB reports when a unique index rejects a write.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone, Debug)]
pub struct DbManager {
    store: Store,
}

#[derive(Clone, Debug)]
enum Store {
    Mongo { client: Client, db: Database },
    Memory(MemoryStore),
}

impl DbManager {
    /// Connects to the configured backend.
    /// For MongoDB the server is pinged so a wrong URL fails at startup instead of on the first request.
    pub async fn init(config: &DbConfig) -> Result<Self> {
        info!("{:<20} - Initializing the document store", "init_db");

        let store = match config.backend {
            DbBackend::Mongo => {
                let mut options = ClientOptions::parse(config.url.expose_secret()).await?;
                options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
                options.server_selection_timeout = Some(config.server_selection_timeout());

                let client = Client::with_options(options)?;
                let db = client.database(&config.db_name);
                db.run_command(doc! { "ping": 1 })
                    .await
                    .map_err(|er| Error::FailToConnect(er.to_string()))?;

                Store::Mongo { client, db }
            }
            DbBackend::Memory => Store::Memory(MemoryStore::default()),
        };

        Ok(Self { store })
    }

    /// A manager backed by a fresh, empty in-memory store.
    pub fn memory() -> Self {
        Self {
            store: Store::Memory(MemoryStore::default()),
        }
    }

    /// Makes `field` unique within `collection`.
    /// Inserts that would violate it fail with `Error::DuplicateKey`.
    pub async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<()> {
        match &self.store {
            Store::Mongo { db, .. } => {
                let mut keys = Document::new();
                keys.insert(field, 1);
                let index = IndexModel::builder()
                    .keys(keys)
                    .options(IndexOptions::builder().unique(true).build())
                    .build();

                db.collection::<Document>(collection)
                    .create_index(index)
                    .await?;
            }
            Store::Memory(mem) => mem.add_unique_key(collection, field)?,
        }

        Ok(())
    }

    pub async fn insert<T>(&self, collection: &str, record: &T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        match &self.store {
            Store::Mongo { db, .. } => {
                db.collection::<T>(collection)
                    .insert_one(record)
                    .await
                    .map_err(|er| {
                        if is_duplicate_key(&er) {
                            Error::DuplicateKey {
                                collection: collection.to_string(),
                            }
                        } else {
                            Error::Mongo(er)
                        }
                    })?;
            }
            Store::Memory(mem) => mem.insert(collection, record)?,
        }

        Ok(())
    }

    /// Returns up to `limit` records of `collection`.
    /// The order is whatever the store returns and is not guaranteed to be insertion order.
    pub async fn find_all<T>(&self, collection: &str, limit: i64) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let records = match &self.store {
            Store::Mongo { db, .. } => {
                db.collection::<T>(collection)
                    .find(doc! {})
                    .limit(limit)
                    .await?
                    .try_collect()
                    .await?
            }
            Store::Memory(mem) => mem.find_all(collection, limit)?,
        };

        Ok(records)
    }

    pub async fn find_one<T>(&self, collection: &str, filter: Document) -> Result<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let record = match &self.store {
            Store::Mongo { db, .. } => db.collection::<T>(collection).find_one(filter).await?,
            Store::Memory(mem) => mem.find_one(collection, &filter)?,
        };

        Ok(record)
    }

    /// Releases the connection to the store. Called once the server has shut down.
    pub async fn close(self) {
        info!("{:<20} - Closing the document store", "close_db");
        if let Store::Mongo { client, .. } = self.store {
            client.shutdown().await;
        }
    }
}

fn is_duplicate_key(er: &mongodb::error::Error) -> bool {
    matches!(
        er.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_er)) if write_er.code == DUPLICATE_KEY_CODE
    )
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to the document store: {0}")]
    FailToConnect(String),
    #[error("duplicate key in collection '{collection}'")]
    DuplicateKey { collection: String },
    #[error("in-memory store lock was poisoned")]
    StorePoisoned,

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("bson serialization error: {0}")]
    BsonSer(#[from] mongodb::bson::ser::Error),
    #[error("bson deserialization error: {0}")]
    BsonDeser(#[from] mongodb::bson::de::Error),
}
