use std::collections::BTreeMap;
use std::ops::Bound;

use cosmwasm_std::{Order, Record, Storage};

use crate::error::ContractError;

/// A write buffer on top of read-only storage. Reads see the buffered writes, nothing
/// reaches the underlying storage until the buffered operations are committed.
pub struct StorageTransaction<'a> {
    base: &'a dyn Storage,
    /// `None` marks a removed key
    cache: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

/// Operations collected by a [`StorageTransaction`].
pub struct RepLog {
    ops: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl RepLog {
    pub fn commit(self, storage: &mut dyn Storage) {
        for (key, value) in self.ops {
            match value {
                Some(value) => storage.set(&key, &value),
                None => storage.remove(&key),
            }
        }
    }
}

impl<'a> StorageTransaction<'a> {
    pub fn new(base: &'a dyn Storage) -> Self {
        StorageTransaction {
            base,
            cache: BTreeMap::new(),
        }
    }

    pub fn prepare(self) -> RepLog {
        RepLog { ops: self.cache }
    }
}

impl Storage for StorageTransaction<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.cache.get(key) {
            Some(value) => value.clone(),
            None => self.base.get(key),
        }
    }

    fn range<'b>(
        &'b self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'b> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Box::new(std::iter::empty());
            }
        }

        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.range(start, end, Order::Ascending).collect();

        let lower = start.map_or(Bound::Unbounded, |s| Bound::Included(s.to_vec()));
        let upper = end.map_or(Bound::Unbounded, |e| Bound::Excluded(e.to_vec()));
        for (key, value) in self.cache.range((lower, upper)) {
            match value {
                Some(value) => merged.insert(key.clone(), value.clone()),
                None => merged.remove(key),
            };
        }

        let records: Vec<Record> = merged.into_iter().collect();
        match order {
            Order::Ascending => Box::new(records.into_iter()),
            Order::Descending => Box::new(records.into_iter().rev()),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.cache.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.cache.insert(key.to_vec(), None);
    }
}

/// Runs `action` against buffered storage and writes its effects to `storage` only if it
/// succeeds. On error `storage` is left untouched.
pub fn transactional<T, F>(storage: &mut dyn Storage, action: F) -> Result<T, ContractError>
where
    F: FnOnce(&mut dyn Storage) -> Result<T, ContractError>,
{
    let (result, rep_log) = {
        let mut cache = StorageTransaction::new(&*storage);
        let result = action(&mut cache)?;
        (result, cache.prepare())
    };
    rep_log.commit(storage);

    Ok(result)
}
