//! Database-backed stores.

pub mod seaorm_entry_store;
