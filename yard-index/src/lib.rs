pub use entry::Entry;
pub use index::EntryIndex;

mod entry;
mod index;
mod search;
