//! Generic in-memory table keyed by record id.

use super::models::{Patch, Record};
use std::collections::HashMap;

/// Records are kept with their insertion sequence number, which breaks
/// timestamp ties when listing.
pub struct Table<R: Record> {
    records: HashMap<String, (u64, R)>,
    next_seq: u64,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            next_seq: 0,
        }
    }
}

/// Listing order of `Table::list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    NewestFirst,
    OldestFirst,
}

impl<R: Record> Table<R> {
    pub fn insert(&mut self, record: R) -> R {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records
            .insert(record.id().to_owned(), (seq, record.clone()));
        record
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.get(id).map(|(_, record)| record)
    }

    /// Returns the first record satisfying `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<&R>
    where
        P: Fn(&R) -> bool,
    {
        self.records
            .values()
            .map(|(_, record)| record)
            .find(|record| predicate(*record))
    }

    /// Returns every record satisfying `predicate`, in the given order.
    pub fn filter<P>(&self, predicate: P, order: Order) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        let mut matching: Vec<&(u64, R)> = self
            .records
            .values()
            .filter(|(_, record)| predicate(record))
            .collect();
        sort_records(&mut matching, order);
        matching
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub fn list(&self, order: Order) -> Vec<R> {
        self.filter(|_| true, order)
    }

    pub fn update<P: Patch<R>>(&mut self, id: &str, patch: P) -> Option<R> {
        let (_, record) = self.records.get_mut(id)?;
        patch.apply_to(record);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<R> {
        self.records.remove(id).map(|(_, record)| record)
    }

    /// Removes every record satisfying `predicate`, returning how many went.
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&R) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|_, (_, record)| !predicate(record));
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn sort_records<R: Record>(records: &mut [&(u64, R)], order: Order) {
    records.sort_by_key(|(seq, record)| (record.timestamp(), *seq));
    if order == Order::NewestFirst {
        records.reverse();
    }
}
