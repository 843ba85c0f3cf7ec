//! Storage abstractions for service layer
//!
//! Reusable file-backed helpers; domain stores build on these instead of
//! touching the filesystem directly.

pub mod json_list_file;
