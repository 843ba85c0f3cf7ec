//! Guestbook domain: the entry record, the store abstraction and the
//! validation layer sitting between HTTP handlers and the store.

pub mod domain;
pub mod store;
pub mod service;
