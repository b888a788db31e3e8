use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::human_being::{HumanBeing, HumanBeingDraft};
use crate::errors::{HbcError, Result};

/// Keyed collection of human beings
///
/// Keys are chosen by clients on `insert`; ids are allocated here and are
/// unique across the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionOfHumanBeings {
    created_at: DateTime<Utc>,
    humans: BTreeMap<i64, HumanBeing>,
}

impl Default for CollectionOfHumanBeings {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionOfHumanBeings {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            humans: BTreeMap::new(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.humans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.humans.is_empty()
    }

    /// Elements in key order
    pub fn iter(&self) -> impl Iterator<Item = (&i64, &HumanBeing)> {
        self.humans.iter()
    }

    pub fn get(&self, key: i64) -> Option<&HumanBeing> {
        self.humans.get(&key)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.humans.contains_key(&key)
    }

    fn next_id(&self) -> Result<i64> {
        self.humans
            .values()
            .map(|h| h.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| HbcError::validation("Id space exhausted"))
    }

    /// Check the id invariants of a collection that did not come from
    /// `insert`: every id positive, no id shared by two keys
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the first offending id.
    pub fn verify(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.humans.len());
        for (key, human) in &self.humans {
            if human.id <= 0 {
                return Err(HbcError::validation(format!(
                    "Element under key {key} has non-positive id {}",
                    human.id
                )));
            }
            if !seen.insert(human.id) {
                return Err(HbcError::validation(format!("Duplicate id {}", human.id)));
            }
        }
        Ok(())
    }

    /// Insert a draft under `key`, returning the allocated id
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the key is taken, the draft is invalid or no
    /// id above the current maximum is left.
    pub fn insert(&mut self, key: i64, draft: HumanBeingDraft) -> Result<i64> {
        draft.validate()?;
        if self.humans.contains_key(&key) {
            return Err(HbcError::validation(format!(
                "Key {key} is already taken"
            )));
        }
        let id = self.next_id()?;
        self.humans.insert(key, HumanBeing::from_draft(id, draft));
        Ok(id)
    }

    /// Replace the element with `id`
    ///
    /// # Errors
    ///
    /// Returns `Validation` if no element has this id or the draft is invalid.
    pub fn update_by_id(&mut self, id: i64, draft: HumanBeingDraft) -> Result<()> {
        draft.validate()?;
        let human = self
            .humans
            .values_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| HbcError::validation(format!("No element with id {id}")))?;
        human.apply_draft(draft);
        Ok(())
    }

    pub fn remove_key(&mut self, key: i64) -> Option<HumanBeing> {
        self.humans.remove(&key)
    }

    /// Remove every element whose key is strictly lower than `key`
    pub fn remove_lower_keys(&mut self, key: i64) -> usize {
        let kept = self.humans.split_off(&key);
        let removed = self.humans.len();
        self.humans = kept;
        removed
    }

    /// Remove every element greater than `draft` in the natural ordering
    pub fn remove_greater(&mut self, draft: &HumanBeingDraft) -> usize {
        let before = self.humans.len();
        self.humans
            .retain(|_, human| human.cmp_draft(draft) != std::cmp::Ordering::Greater);
        before - self.humans.len()
    }

    pub fn clear(&mut self) {
        self.humans.clear();
    }
}

/// Collection handle shared by the console and network lines
///
/// Every command takes the lock once for its whole read-modify-write.
#[derive(Debug, Clone, Default)]
pub struct SharedCollection {
    inner: Arc<Mutex<CollectionOfHumanBeings>>,
}

impl SharedCollection {
    pub fn new(collection: CollectionOfHumanBeings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(collection)),
        }
    }

    /// Lock the collection
    ///
    /// A poisoned lock is recovered: commands never leave the map half-updated.
    pub fn lock(&self) -> MutexGuard<'_, CollectionOfHumanBeings> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state, used by `save`
    pub fn snapshot(&self) -> CollectionOfHumanBeings {
        self.lock().clone()
    }
}
