//! Order dispatch.
//!
//! A dispatcher is whatever receives a finalized [`Order`]: a database
//! writer, a notification sender, a message relay. The engine only needs to
//! know whether the hand-off worked.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::order::Order;

/// Why a dispatcher could not take an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The receiving side refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The receiving side could not be reached.
    #[error("dispatcher unavailable: {0}")]
    Unavailable(String),

    /// No answer within the configured dispatch timeout.
    #[error("dispatch timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Receives finalized orders.
pub trait OrderDispatcher: Send + Sync {
    /// Hand off an order.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the order was not accepted.
    fn dispatch(&self, order: &Order) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Dispatcher that records the order summary in the log and accepts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

impl OrderDispatcher for LogDispatcher {
    async fn dispatch(&self, order: &Order) -> Result<(), DispatchError> {
        info!(
            reference = %order.reference,
            customer = %order.customer.name,
            items = order.item_count(),
            total = %order.total_amount,
            summary = %order.summary(),
            "Order dispatched"
        );
        Ok(())
    }
}
