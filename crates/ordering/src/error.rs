//! Submission errors and the notices shown for them.

use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::validation::ValidationErrors;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Nothing has been selected.
    #[error("No items selected")]
    EmptySelection,

    /// One or more customer fields are invalid.
    #[error("Invalid customer details: {0}")]
    Validation(#[from] ValidationErrors),

    /// Another submission has not settled yet.
    #[error("An order is already being submitted")]
    InFlight,

    /// A result was reported but no submission was in progress.
    #[error("No order submission is in progress")]
    NotSubmitting,

    /// The dispatcher did not accept the order.
    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// A short user-facing message, e.g. for a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

impl SubmitError {
    /// What to show the visitor.
    ///
    /// Dispatch failures never expose the underlying cause.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::EmptySelection => Notice {
                title: "No items selected",
                description: "Please add at least one item to your order.",
            },
            Self::Validation(_) => Notice {
                title: "Check your details",
                description: "Please correct the highlighted fields.",
            },
            Self::InFlight => Notice {
                title: "Order in progress",
                description: "Your order is already being placed.",
            },
            Self::NotSubmitting | Self::Dispatch(_) => Notice {
                title: "Error",
                description: "Failed to place order. Please try again.",
            },
        }
    }

    /// Returns `true` if the user can fix this by editing the form.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::Validation(_))
    }
}
