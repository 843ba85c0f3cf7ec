//! Service layer for the guestbook.
//! - `guestbook`: entry record, `EntryStore` abstraction and the validating service.
//! - `file` / `db`: the two interchangeable store backends.
//! - `runtime`: startup wiring that picks a backend from configuration.

pub mod errors;
pub mod guestbook;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod db;
pub mod file;
