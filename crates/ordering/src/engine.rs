//! The order engine and its submission workflow.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──ok──▶ Idle (selection and form cleared)
//!   ▲                  │
//!   └──── Failed ◀─err─┘            (selection and form kept for retry)
//! ```
//!
//! Empty selections and invalid forms are rejected before the status changes.
//! While `Submitting`, any further attempt is refused with
//! [`SubmitError::InFlight`] so one user action never yields two orders.
//! A `submit` call dropped mid-dispatch leaves the engine `Failed`, not stuck.

use fishmarket_core::{Price, SubmissionStatus};
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::OrderConfig;
use crate::dispatch::{DispatchError, OrderDispatcher};
use crate::error::SubmitError;
use crate::order::{Order, OrderLineItem};
use crate::selection::Selection;
use crate::validation::{self, CustomerForm, CustomerInfo, ValidationErrors};

/// Owns the catalog, the visitor's selection and form input, and the
/// submission status.
#[derive(Debug, Clone)]
pub struct OrderEngine {
    catalog: Catalog,
    selection: Selection,
    form: CustomerForm,
    status: SubmissionStatus,
    config: OrderConfig,
}

impl OrderEngine {
    /// Create an engine with an empty selection and a blank form.
    #[must_use]
    pub fn new(catalog: Catalog, config: OrderConfig) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            form: CustomerForm::default(),
            status: SubmissionStatus::Idle,
            config,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn form(&self) -> &CustomerForm {
        &self.form
    }

    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    #[must_use]
    pub const fn config(&self) -> &OrderConfig {
        &self.config
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Add `delta` to a product's quantity (clamped at zero).
    ///
    /// Unknown product IDs leave the selection unchanged.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> &Selection {
        let next = self.selection.adjusted(&self.catalog, product_id, delta);
        if next == self.selection {
            debug!(product_id, delta, "Quantity unchanged");
        } else {
            debug!(
                product_id,
                delta,
                quantity = next.quantity(product_id),
                "Quantity adjusted"
            );
            self.selection = next;
        }
        &self.selection
    }

    /// Current quantity for a product.
    #[must_use]
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.selection.quantity(product_id)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    /// Exact order total, rounded to two decimal places.
    #[must_use]
    pub fn compute_total(&self) -> Price {
        self.selection.total(&self.catalog)
    }

    /// Selected products in catalog order.
    #[must_use]
    pub fn line_items(&self) -> Vec<OrderLineItem> {
        self.selection.line_items(&self.catalog)
    }

    // =========================================================================
    // Customer form
    // =========================================================================

    /// Replace the form input.
    pub fn set_form(&mut self, form: CustomerForm) {
        self.form = form;
    }

    /// Edit the form input in place.
    pub const fn form_mut(&mut self) -> &mut CustomerForm {
        &mut self.form
    }

    /// Validate the current form without submitting.
    ///
    /// # Errors
    ///
    /// Returns every field that fails its rule.
    pub fn validate_form(&self) -> Result<CustomerInfo, ValidationErrors> {
        validation::validate(&self.form)
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Start a submission and return the order to dispatch.
    ///
    /// On success the engine is `Submitting` until
    /// [`finish_submission`](Self::finish_submission) is called.
    ///
    /// # Errors
    ///
    /// - `InFlight` if a submission is already in progress
    /// - `Validation` if any customer field is invalid
    /// - `EmptySelection` if the form is valid but nothing is selected
    ///
    /// None of these change the engine's state.
    pub fn begin_submission(&mut self) -> Result<Order, SubmitError> {
        if !self.status.accepts_submission() {
            warn!("Submission rejected: another submission is in flight");
            return Err(SubmitError::InFlight);
        }

        let customer = self.validate_form().map_err(|errors| {
            warn!(fields = %errors, "Submission rejected: invalid customer details");
            SubmitError::Validation(errors)
        })?;

        if !self.selection.has_selection() {
            warn!("Submission rejected: no items selected");
            return Err(SubmitError::EmptySelection);
        }

        let order = Order::assemble(customer, self.line_items(), self.compute_total());
        self.status = SubmissionStatus::Submitting;

        info!(
            reference = %order.reference,
            lines = order.lines.len(),
            total = %order.total_amount,
            "Order submission started"
        );
        Ok(order)
    }

    /// Record the dispatcher's answer for the in-flight submission.
    ///
    /// Success clears the selection and form and returns to `Idle`. Failure
    /// keeps both untouched and moves to `Failed` so the user can retry.
    ///
    /// # Errors
    ///
    /// - `NotSubmitting` if no submission was started
    /// - `Dispatch` carrying the dispatcher's error on failure
    pub fn finish_submission(
        &mut self,
        outcome: Result<(), DispatchError>,
    ) -> Result<(), SubmitError> {
        if self.status != SubmissionStatus::Submitting {
            warn!(status = %self.status, "Dispatch result reported with no submission in flight");
            return Err(SubmitError::NotSubmitting);
        }

        match outcome {
            Ok(()) => {
                self.selection = Selection::new();
                self.form = CustomerForm::default();
                self.status = SubmissionStatus::Idle;
                info!("Order placed; form reset");
                Ok(())
            }
            Err(e) => {
                self.status = SubmissionStatus::Failed;
                warn!(error = %e, "Order dispatch failed; input preserved for retry");
                Err(SubmitError::Dispatch(e))
            }
        }
    }

    /// Validate, assemble, and dispatch an order in one call.
    ///
    /// The dispatcher gets at most `config.dispatch_timeout` to answer.
    /// Returns the dispatched order on success.
    ///
    /// # Errors
    ///
    /// Any error from [`begin_submission`](Self::begin_submission), or
    /// `Dispatch` if the dispatcher fails or times out.
    #[instrument(skip_all, fields(items = self.selection.item_count()))]
    pub async fn submit<D: OrderDispatcher>(&mut self, dispatcher: &D) -> Result<Order, SubmitError> {
        let order = self.begin_submission()?;

        let timeout = self.config.dispatch_timeout;
        let guard = InFlightGuard::new(&mut self.status);
        let outcome = tokio::time::timeout(timeout, dispatcher.dispatch(&order))
            .await
            .unwrap_or(Err(DispatchError::Timeout(timeout)));
        guard.disarm();

        self.finish_submission(outcome)?;
        Ok(order)
    }
}

/// Moves a `Submitting` engine to `Failed` if [`OrderEngine::submit`] is
/// dropped while the dispatch is still pending.
struct InFlightGuard<'a> {
    status: &'a mut SubmissionStatus,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    const fn new(status: &'a mut SubmissionStatus) -> Self {
        Self {
            status,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.status == SubmissionStatus::Submitting {
            *self.status = SubmissionStatus::Failed;
            warn!("Order submission abandoned before dispatch settled; input preserved for retry");
        }
    }
}
