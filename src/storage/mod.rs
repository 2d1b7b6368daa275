//! Storage
//!
//! The cart is persisted as a JSON array under a single, versionless key of a
//! string key/value backend, mirroring browser local storage. Reading is
//! forgiving: a missing, unreadable or malformed entry yields an empty cart
//! instead of an error.

use rusty_money::iso::Currency;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::items::{LineItem, merge_by_key};

mod file;
mod memory;
pub mod records;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use records::{LineItemRecord, RecordError};

/// Key under which the cart is stored unless configured otherwise.
pub const CART_STORAGE_KEY: &str = "furniture_cart";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error from a file-backed store.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key/value storage backend.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Reads and writes the cart's line items through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    currency: &'static Currency,
}

impl<S: Storage> CartStore<S> {
    /// Create a store over `storage`, using `key` and pricing loaded items in
    /// `currency`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>, currency: &'static Currency) -> Self {
        Self {
            storage,
            key: key.into(),
            currency,
        }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored items.
    ///
    /// Never fails: a missing entry gives an empty list and unreadable data
    /// is logged and treated as empty. Individual records that cannot be
    /// read are dropped, and records sharing an identity are merged.
    pub fn load(&self) -> Vec<LineItem> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                warn!(key = %self.key, %error, "failed to read stored cart; starting empty");

                return Vec::new();
            }
        };

        let items = decode_items(&raw, self.currency);

        debug!(key = %self.key, lines = items.len(), "loaded cart");

        items
    }

    /// Write `items` to storage, replacing the previous cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if serialization or the backend write fails.
    pub fn try_save(&self, items: &[LineItem]) -> Result<(), StorageError> {
        let raw = encode_items(items)?;

        self.storage.set_item(&self.key, &raw)?;

        debug!(key = %self.key, lines = items.len(), "saved cart");

        Ok(())
    }

    /// Write `items` to storage, logging and swallowing any failure.
    ///
    /// Returns whether the write succeeded.
    pub fn save(&self, items: &[LineItem]) -> bool {
        match self.try_save(items) {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to save cart; keeping in-memory state");

                false
            }
        }
    }
}

/// Serialize line items to the stored JSON layout.
///
/// # Errors
///
/// Returns a [`StorageError::Serialize`] if a record cannot be serialized.
pub fn encode_items(items: &[LineItem]) -> Result<String, StorageError> {
    let records: Vec<LineItemRecord> = items.iter().map(LineItemRecord::from).collect();

    Ok(serde_json::to_string(&records)?)
}

/// Parse the stored JSON layout back into line items, dropping whatever
/// cannot be read.
pub fn decode_items(raw: &str, currency: &'static Currency) -> Vec<LineItem> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "stored cart is not valid JSON; starting empty");

            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        warn!("stored cart is not a JSON array; starting empty");

        return Vec::new();
    };

    let items = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            match serde_json::from_value::<LineItemRecord>(entry)
                .map_err(RecordError::from)
                .and_then(|record| record.into_line_item(currency))
            {
                Ok(item) => Some(item),
                Err(error) => {
                    warn!(index, %error, "dropping unreadable cart record");

                    None
                }
            }
        });

    merge_by_key(items)
}
