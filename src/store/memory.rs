use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ContactFilter, ContactStore, StoreError};
use crate::model::{Contact, NewContact};
use crate::pagination::PageRequest;

/// In-process contact store.
///
/// Rows are kept in insertion order, which matches id order because ids are
/// handed out under the same write lock that appends the row.
#[derive(Default)]
pub struct MemoryContactStore {
    rows: RwLock<Rows>,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct Rows {
    last_id: i64,
    contacts: Vec<Contact>,
}

impl MemoryContactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `StoreError::Unavailable` until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.contacts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let stored = Contact {
            id: rows.last_id,
            external_id: contact.external_id,
            phone_number: contact.phone_number,
            date_created: contact.date_created,
            date_updated: contact.date_updated,
        };
        rows.contacts.push(stored.clone());
        Ok(stored)
    }

    async fn query(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Vec<Contact>, StoreError> {
        self.check_available()?;

        let skip = usize::try_from(page.row_offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.page_size()).unwrap_or(0);

        let rows = self.rows.read().await;
        Ok(rows
            .contacts
            .iter()
            .filter(|contact| filter.matches(contact))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
