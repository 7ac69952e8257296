//! Fishmarket Core - Shared types library.
//!
//! This crate provides common types used across all Fishmarket components:
//! - `ordering` - The order engine behind the storefront order form
//! - `cli` - Command-line front end for browsing the catalog and placing orders
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no dispatch.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and submission status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
