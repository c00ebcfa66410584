//! SiltDB common types, errors, and utilities.
//!
//! This crate provides shared definitions used across all SiltDB components.

pub mod addr;
pub mod config;
pub mod error;

pub use addr::{Address, PageId, SlotId, DEFAULT_PAGE_SIZE};
pub use config::HeapConfig;
pub use error::{Result, SiltError};
