//! Record-store collaborator seam.
//!
//! The engine does not own persistence. The hosting application supplies and
//! persists records through this interface; single-record atomicity is the
//! only guarantee assumed. The in-memory implementation below backs tests.

use crate::error::AppError;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Anything the record store can hold.
pub trait Record: Clone + Send + Sync {
    fn record_id(&self) -> Uuid;
}

pub trait RecordStore<T: Record>: Send + Sync {
    fn get(&self, id: Uuid) -> Option<T>;

    fn list(&self, filter: &dyn Fn(&T) -> bool) -> Vec<T>;

    fn create(&self, entity: T) -> Result<T, AppError>;

    fn update(&self, id: Uuid, patch: &dyn Fn(&mut T)) -> Result<T, AppError>;

    fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// In-memory record store used by tests and examples.
#[derive(Debug, Default)]
pub struct InMemoryStore<T: Record> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: Record> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    fn get(&self, id: Uuid) -> Option<T> {
        self.records.read().unwrap().get(&id).cloned()
    }

    fn list(&self, filter: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.records
            .read()
            .unwrap()
            .values()
            .filter(|r| filter(r))
            .cloned()
            .collect()
    }

    fn create(&self, entity: T) -> Result<T, AppError> {
        let mut records = self.records.write().unwrap();
        let id = entity.record_id();
        if records.contains_key(&id) {
            return Err(AppError::Conflict(format!("record {} already exists", id)));
        }
        records.insert(id, entity.clone());
        Ok(entity)
    }

    fn update(&self, id: Uuid, patch: &dyn Fn(&mut T)) -> Result<T, AppError> {
        let mut records = self.records.write().unwrap();
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("record {} not found", id)))?;
        patch(record);
        Ok(record.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut records = self.records.write().unwrap();
        records
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("record {} not found", id)))?;
        Ok(())
    }
}
