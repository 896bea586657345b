//! Contact storage.
//!
//! Handlers only see the [`ContactStore`] trait. Two backends implement it:
//!
//! - [`PgContactStore`] - `PostgreSQL` through an `sqlx` pool
//! - [`MemoryContactStore`] - in-process, used by tests and `CONTACTS_STORE=memory`
//!
//! Both return rows in ascending `id` order, which is also insertion order.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Contact, NewContact};
use crate::pagination::PageRequest;

pub use memory::MemoryContactStore;
pub use postgres::PgContactStore;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Predicate for a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    /// Every contact.
    All,
    /// Contacts whose `external_id` and `phone_number` both match exactly.
    ExternalIdAndPhone {
        external_id: i32,
        phone_number: String,
    },
}

impl ContactFilter {
    /// Pick the predicate for the given optional parameters.
    ///
    /// Only the combination of both parameters narrows the result. A single
    /// parameter on its own is ignored and the unfiltered listing is used.
    #[must_use]
    pub fn from_params(external_id: Option<i32>, phone_number: Option<String>) -> Self {
        match (external_id, phone_number) {
            (Some(external_id), Some(phone_number)) => Self::ExternalIdAndPhone {
                external_id,
                phone_number,
            },
            _ => Self::All,
        }
    }

    /// Whether `contact` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::ExternalIdAndPhone {
                external_id,
                phone_number,
            } => {
                contact.external_id == Some(*external_id)
                    && contact.phone_number.as_deref() == Some(phone_number.as_str())
            }
        }
    }
}

/// Storage backend for contacts.
#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// Persist a contact and return it with its assigned id.
    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Return one page of the contacts matching `filter`, ordered by id.
    async fn query(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
