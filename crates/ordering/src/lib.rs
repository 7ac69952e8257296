//! Fishmarket Ordering - the engine behind the storefront order form.
//!
//! The engine owns a fixed product [`Catalog`], tracks the visitor's quantity
//! [`Selection`], validates the contact and delivery details they type in,
//! and turns all of that into an [`Order`] that is handed to an
//! [`OrderDispatcher`] on submission.
//!
//! # Architecture
//!
//! Everything except dispatch is synchronous and side-effect free. The
//! presentation layer (web form, CLI) calls [`OrderEngine`] methods and renders
//! whatever state they return; it never mutates selection or form state
//! directly.
//!
//! # Modules
//!
//! - [`catalog`] - Products and the fixed catalog
//! - [`selection`] - Product quantity selection and totals
//! - [`validation`] - Customer form rules and the validator
//! - [`order`] - Line items, assembled orders, and order summaries
//! - [`dispatch`] - The collaborator that receives finalized orders
//! - [`engine`] - The submission workflow tying it all together
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Submission errors and user-facing notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod order;
pub mod selection;
pub mod validation;

pub use catalog::{Catalog, CatalogError, Product};
pub use config::{ConfigError, OrderConfig};
pub use dispatch::{DispatchError, LogDispatcher, OrderDispatcher};
pub use engine::OrderEngine;
pub use error::{Notice, SubmitError};
pub use order::{Order, OrderLineItem};
pub use selection::Selection;
pub use validation::{CustomerForm, CustomerInfo, Field, ValidationErrors, validate};
