use std::sync::{Arc, Mutex};

use crate::model::{Message, NewMessage};

use super::{MessageStore, StoreError};

/// Keeps rows in a vector; ids start at 1 and only ever grow.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<Message>>>,
}

impl MemoryStore {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl MessageStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let message = Message {
            id: rows.last().map_or(1, |last| last.id + 1),
            content: message.into_content(),
        };
        rows.push(message.clone());
        Ok(message)
    }

    async fn find(&self, id: u64) -> Result<Option<Message>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }
}
