use std::{path::Path, slice::Iter, sync::Arc};

use crate::{
    entry::Entry,
    search::{insertion_point, lower_bound},
};

// NOTE: by_path compares whole paths byte wise, not by component, so `/a-b`
// sorts before `/a/b`. Removal matches entries by identity.
#[derive(Debug, Default)]
pub struct EntryIndex {
    by_date: Vec<Arc<Entry>>,
    by_path: Vec<Arc<Entry>>,
}

impl EntryIndex {
    pub fn add(&mut self, entry: Arc<Entry>) {
        let date_index = insertion_point(&self.by_date, &entry, compare_date);
        let path_index = insertion_point(&self.by_path, &entry, compare_path);

        self.by_date.insert(date_index, entry.clone());
        self.by_path.insert(path_index, entry);

        debug_assert_eq!(self.by_date.len(), self.by_path.len());
    }

    pub fn remove(&mut self, entry: &Arc<Entry>) -> bool {
        let date_index = self.by_date.iter().position(|e| Arc::ptr_eq(e, entry));
        if let Some(index) = date_index {
            self.by_date.remove(index);
        }

        let start = self.path_lower_bound(&entry.path);
        let path_index = self.by_path[start..]
            .iter()
            .take_while(|e| e.path.as_os_str() == entry.path.as_os_str())
            .position(|e| Arc::ptr_eq(e, entry))
            .map(|offset| start + offset);

        if let Some(index) = path_index {
            self.by_path.remove(index);
        }

        if date_index.is_none() && path_index.is_none() {
            tracing::trace!("entry not indexed: {:?}", entry.path);
        }

        debug_assert_eq!(self.by_date.len(), self.by_path.len());

        date_index.is_some() || path_index.is_some()
    }

    pub fn remove_bin(&mut self, bin: usize) -> usize {
        let count = self.by_date.len();

        self.by_date.retain(|entry| entry.bin != bin);
        self.by_path.retain(|entry| entry.bin != bin);

        count - self.by_date.len()
    }

    pub fn find(&self, path: &Path) -> Option<Arc<Entry>> {
        self.find_all(path).first().cloned()
    }

    pub fn find_all(&self, path: &Path) -> &[Arc<Entry>] {
        let start = self.path_lower_bound(path);
        let count = self.by_path[start..]
            .iter()
            .take_while(|entry| entry.path.as_os_str() == path.as_os_str())
            .count();

        &self.by_path[start..start + count]
    }

    pub fn by_date(&self) -> Iter<'_, Arc<Entry>> {
        self.by_date.iter()
    }

    pub fn by_path(&self) -> Iter<'_, Arc<Entry>> {
        self.by_path.iter()
    }

    pub fn bin_entries(&self, bin: usize) -> impl Iterator<Item = &Arc<Entry>> {
        self.by_path.iter().filter(move |entry| entry.bin == bin)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    fn path_lower_bound(&self, path: &Path) -> usize {
        lower_bound(&self.by_path, path, |entry, path| {
            entry.path.as_os_str().cmp(path.as_os_str())
        })
    }
}

fn compare_date(new: &Arc<Entry>, other: &Arc<Entry>) -> std::cmp::Ordering {
    other.deleted_at.cmp(&new.deleted_at)
}

fn compare_path(new: &Arc<Entry>, other: &Arc<Entry>) -> std::cmp::Ordering {
    new.path.as_os_str().cmp(other.path.as_os_str())
}
