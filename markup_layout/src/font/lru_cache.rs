// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small least-recently-used cache keyed by cheap copyable ids.

/// An entry in the cache.
#[derive(Debug)]
struct Entry<K, T> {
    epoch: u64,
    key: K,
    data: T,
}

/// A least-recently-used cache. This cache uses a linear scan of its entries
/// to find a given entry, so it is optimised for a low number of entries.
/// Keep `max_entries` in the order of tens.
#[derive(Debug)]
pub(crate) struct LruCache<K, T> {
    entries: Vec<Entry<K, T>>,
    epoch: u64,
    max_entries: usize,
}

impl<K: Copy + PartialEq, T> LruCache<K, T> {
    pub(crate) fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            epoch: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Returns the entry for `key`, creating it with `make_data` if it is not
    /// present. Creating an entry in a full cache evicts the least recently
    /// used one.
    pub(crate) fn entry(&mut self, key: K, make_data: impl FnOnce() -> T) -> &mut T {
        self.epoch += 1;
        let index = match self.entries.iter().position(|entry| entry.key == key) {
            Some(hit) => hit,
            None if self.entries.len() < self.max_entries => {
                self.entries.push(Entry {
                    epoch: self.epoch,
                    key,
                    data: make_data(),
                });
                self.entries.len() - 1
            }
            None => {
                let oldest = self
                    .entries
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, entry)| entry.epoch)
                    .map_or(0, |(index, _)| index);
                self.entries[oldest] = Entry {
                    epoch: self.epoch,
                    key,
                    data: make_data(),
                };
                oldest
            }
        };
        let entry = &mut self.entries[index];
        entry.epoch = self.epoch;
        &mut entry.data
    }

    /// Number of live entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop every entry.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.epoch = 0;
    }
}
