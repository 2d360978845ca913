use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

/// Keyed gives an entity its unique identifier within a repository.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Key-value persistence contract shared by the client and account stores.
/// Mutations report success through their return value rather than an error;
/// the Result wrapper is for backends whose calls can themselves fail.
pub trait Repository<T> {
    /// Returns false when the key is already present.
    fn insert(&self, entity: T) -> Result<bool>;
    fn find(&self, id: &str) -> Result<Option<T>>;
    /// Returns false when there is no entity under the key.
    fn update(&self, entity: T) -> Result<bool>;
    fn remove(&self, id: &str) -> Result<bool>;
    fn exists(&self, id: &str) -> Result<bool>;
    /// Snapshot of all stored entities.
    fn get_all(&self) -> Result<Vec<T>>;
}

pub struct MemoryRepo<T> {
    data: RefCell<HashMap<String, T>>,
}

impl<T> MemoryRepo<T> {
    pub fn new() -> MemoryRepo<T> {
        MemoryRepo {
            data: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Keyed + Clone> Repository<T> for MemoryRepo<T> {
    fn insert(&self, entity: T) -> Result<bool> {
        let mut data = self.data.borrow_mut();
        if data.contains_key(entity.key()) {
            return Ok(false);
        }
        data.insert(entity.key().to_owned(), entity);
        Ok(true)
    }
    fn find(&self, id: &str) -> Result<Option<T>> {
        Ok(self.data.borrow().get(id).cloned())
    }
    fn update(&self, entity: T) -> Result<bool> {
        let mut data = self.data.borrow_mut();
        if !data.contains_key(entity.key()) {
            return Ok(false);
        }
        data.insert(entity.key().to_owned(), entity);
        Ok(true)
    }
    fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.data.borrow_mut().remove(id).is_some())
    }
    fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.data.borrow().contains_key(id))
    }
    fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.data.borrow().values().cloned().collect())
    }
}
