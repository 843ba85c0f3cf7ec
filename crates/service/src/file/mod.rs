//! File-backed stores.

pub mod json_entry_store;
