//! Integration tests for Fishmarket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fishmarket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_workflow` - Selection through dispatch, success and failure paths
//! - `catalog_files` - Loading custom catalogs and ordering from them
//!
//! This library holds the shared fixtures: a known-good customer form and
//! scripted dispatchers.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fishmarket_ordering::{CustomerForm, DispatchError, Order, OrderDispatcher};

/// The reference customer record used across tests.
#[must_use]
pub fn valid_form() -> CustomerForm {
    CustomerForm {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "1234567890".into(),
        address: "123 Main Street".into(),
        city: "Accra".into(),
        state: "Greater Accra".into(),
        zip: "00233".into(),
    }
}

/// Dispatcher that keeps every order it accepts.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    orders: Mutex<Vec<Order>>,
}

impl RecordingDispatcher {
    /// Orders received so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

impl OrderDispatcher for RecordingDispatcher {
    async fn dispatch(&self, order: &Order) -> Result<(), DispatchError> {
        if let Ok(mut orders) = self.orders.lock() {
            orders.push(order.clone());
        }
        Ok(())
    }
}

/// Dispatcher that fails the first `failures` calls and then accepts.
#[derive(Debug)]
pub struct FlakyDispatcher {
    failures: usize,
    calls: AtomicUsize,
    accepted: RecordingDispatcher,
}

impl FlakyDispatcher {
    #[must_use]
    pub fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            accepted: RecordingDispatcher::default(),
        }
    }

    /// Total dispatch attempts, failed or not.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Orders that went through.
    #[must_use]
    pub fn accepted(&self) -> Vec<Order> {
        self.accepted.orders()
    }
}

impl OrderDispatcher for FlakyDispatcher {
    async fn dispatch(&self, order: &Order) -> Result<(), DispatchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(DispatchError::Unavailable(format!("attempt {}", call + 1)));
        }
        self.accepted.dispatch(order).await
    }
}

/// Dispatcher that takes `delay` before accepting.
#[derive(Debug)]
pub struct SlowDispatcher {
    pub delay: Duration,
}

impl OrderDispatcher for SlowDispatcher {
    async fn dispatch(&self, _order: &Order) -> Result<(), DispatchError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
