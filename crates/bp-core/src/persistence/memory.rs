use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bp_domain::{Blueprint, Point};
use indexmap::IndexMap;
use log::debug;

use super::BlueprintPersistence;
use crate::errors::BlueprintError;

type Key = (String, String);

/// Implementación en memoria del puerto. Conserva el orden de creación
/// (IndexMap) para que los listados sean deterministas, igual que el adaptador
/// Postgres que ordena por id.
#[derive(Default)]
pub struct InMemoryBlueprintPersistence {
    inner: RwLock<IndexMap<Key, Blueprint>>,
}

impl InMemoryBlueprintPersistence {
    pub fn new() -> Self { Self::default() }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Key, Blueprint>>, BlueprintError> {
        self.inner.read().map_err(|e| BlueprintError::Store(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Key, Blueprint>>, BlueprintError> {
        self.inner.write().map_err(|e| BlueprintError::Store(format!("lock poisoned: {e}")))
    }
}

fn key(author: &str, name: &str) -> Key { (author.to_string(), name.to_string()) }

impl BlueprintPersistence for InMemoryBlueprintPersistence {
    fn save_blueprint(&self, bp: &Blueprint) -> Result<(), BlueprintError> {
        let mut guard = self.write()?;
        let k = key(bp.author(), bp.name());
        if guard.contains_key(&k) {
            return Err(BlueprintError::duplicate(bp.author(), bp.name()));
        }
        guard.insert(k, bp.clone());
        debug!("save_blueprint:done bp={bp} points={}", bp.len());
        Ok(())
    }

    fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint, BlueprintError> {
        self.read()?
            .get(&key(author, name))
            .cloned()
            .ok_or_else(|| BlueprintError::not_found(author, name))
    }

    fn get_blueprints_by_author(&self, author: &str) -> Result<Vec<Blueprint>, BlueprintError> {
        let found: Vec<Blueprint> = self.read()?.values().filter(|bp| bp.author() == author).cloned().collect();
        if found.is_empty() {
            return Err(BlueprintError::author_not_found(author));
        }
        Ok(found)
    }

    fn get_all_blueprints(&self) -> Result<Vec<Blueprint>, BlueprintError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn add_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<(), BlueprintError> {
        let mut guard = self.write()?;
        let bp = guard.get_mut(&key(author, name)).ok_or_else(|| BlueprintError::not_found(author, name))?;
        bp.add_point(Point::new(x, y));
        Ok(())
    }

    fn delete_blueprint(&self, author: &str, name: &str) -> Result<(), BlueprintError> {
        self.write()?
            .shift_remove(&key(author, name))
            .map(|_| ())
            .ok_or_else(|| BlueprintError::not_found(author, name))
    }
}
