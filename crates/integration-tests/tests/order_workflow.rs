//! Integration tests for the order submission workflow.
//!
//! These drive an `OrderEngine` the way a form front end would: adjust
//! quantities, fill in the form, submit, and inspect what the dispatcher got.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use fishmarket_core::SubmissionStatus;
use fishmarket_integration_tests::{
    FlakyDispatcher, RecordingDispatcher, SlowDispatcher, valid_form,
};
use fishmarket_ordering::{
    Catalog, CustomerForm, DispatchError, Field, OrderConfig, OrderEngine, SubmitError,
};
use rust_decimal_macros::dec;

fn engine() -> OrderEngine {
    OrderEngine::new(Catalog::fish_market(), OrderConfig::default())
}

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_full_order_reaches_dispatcher() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();

    engine.adjust_quantity("1", 1);
    engine.adjust_quantity("1", 1);
    engine.adjust_quantity("4", 1);
    engine.set_form(valid_form());

    let placed = engine.submit(&dispatcher).await.expect("order should be placed");

    let sent = dispatcher.orders();
    assert_eq!(sent.len(), 1);
    let order = &sent[0];
    assert_eq!(order, &placed);
    assert_eq!(order.total_amount.amount, dec!(25.97));
    assert_eq!(order.item_list(), "Fresh Tilapia x2, Fresh Catfish x1");
    assert_eq!(order.customer.email.as_str(), "john@example.com");
    assert!(order.summary().ends_with("Total: GHS 25.97"));
}

#[tokio::test]
async fn test_success_resets_engine() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    engine.adjust_quantity("2", 3);
    engine.set_form(valid_form());

    engine.submit(&dispatcher).await.expect("order should be placed");

    assert!(!engine.has_selection());
    assert_eq!(engine.form(), &CustomerForm::default());
    assert_eq!(engine.status(), SubmissionStatus::Idle);
    assert_eq!(engine.compute_total().amount, dec!(0));
}

#[tokio::test]
async fn test_lines_use_catalog_order_not_click_order() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    for id in ["6", "3", "1"] {
        engine.adjust_quantity(id, 1);
    }
    engine.set_form(valid_form());

    let order = engine.submit(&dispatcher).await.expect("order should be placed");
    let ids: Vec<&str> = order.lines.iter().map(|l| l.product_id.as_str()).collect();
    assert_eq!(ids, ["1", "3", "6"]);
}

// =============================================================================
// Local Rejections
// =============================================================================

#[tokio::test]
async fn test_empty_selection_never_dispatches() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    engine.set_form(valid_form());

    let err = engine.submit(&dispatcher).await.unwrap_err();

    assert_eq!(err, SubmitError::EmptySelection);
    assert_eq!(err.notice().title, "No items selected");
    assert!(dispatcher.orders().is_empty());
    assert_eq!(engine.status(), SubmissionStatus::Idle);
}

#[tokio::test]
async fn test_invalid_form_with_empty_selection_reports_fields() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    engine.set_form(CustomerForm {
        name: "A".into(),
        ..valid_form()
    });

    let Err(SubmitError::Validation(errors)) = engine.submit(&dispatcher).await else {
        panic!("expected validation failure");
    };

    assert_eq!(
        errors.get(Field::Name),
        Some("Name must be at least 2 characters")
    );
    assert!(dispatcher.orders().is_empty());
}

#[tokio::test]
async fn test_selection_cleared_by_decrements_counts_as_empty() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    engine.adjust_quantity("5", 1);
    engine.adjust_quantity("5", -1);
    engine.set_form(valid_form());

    assert_eq!(
        engine.submit(&dispatcher).await.unwrap_err(),
        SubmitError::EmptySelection
    );
}

#[tokio::test]
async fn test_invalid_fields_all_reported() {
    let dispatcher = RecordingDispatcher::default();
    let mut engine = engine();
    engine.adjust_quantity("1", 1);
    engine.set_form(CustomerForm {
        name: "A".into(),
        email: "not-an-email".into(),
        zip: "1".into(),
        ..valid_form()
    });

    let Err(SubmitError::Validation(errors)) = engine.submit(&dispatcher).await else {
        panic!("expected validation failure");
    };

    let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
    assert_eq!(fields, [Field::Name, Field::Email, Field::Zip]);
    assert!(dispatcher.orders().is_empty());
    assert_eq!(engine.quantity("1"), 1);
}

// =============================================================================
// Dispatch Failures
// =============================================================================

#[tokio::test]
async fn test_failed_dispatch_preserves_input_and_retry_succeeds() {
    let dispatcher = FlakyDispatcher::new(1);
    let mut engine = engine();
    engine.adjust_quantity("3", 2);
    engine.set_form(valid_form());
    let selection_before = engine.selection().clone();

    let err = engine.submit(&dispatcher).await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Dispatch(DispatchError::Unavailable(_))
    ));
    assert_eq!(err.notice().description, "Failed to place order. Please try again.");
    assert_eq!(engine.status(), SubmissionStatus::Failed);
    assert_eq!(engine.selection(), &selection_before);
    assert_eq!(engine.form(), &valid_form());

    // User-initiated retry with the same input
    let order = engine.submit(&dispatcher).await.expect("retry should succeed");
    assert_eq!(dispatcher.calls(), 2);
    assert_eq!(dispatcher.accepted(), vec![order]);
    assert!(!engine.has_selection());
}

#[tokio::test]
async fn test_no_automatic_retry() {
    let dispatcher = FlakyDispatcher::new(5);
    let mut engine = engine();
    engine.adjust_quantity("1", 1);
    engine.set_form(valid_form());

    let _ = engine.submit(&dispatcher).await;
    assert_eq!(dispatcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_dispatcher_times_out() {
    let config = OrderConfig::default().with_dispatch_timeout(Duration::from_millis(200));
    let mut engine = OrderEngine::new(Catalog::fish_market(), config);
    engine.adjust_quantity("6", 1);
    engine.set_form(valid_form());

    let slow = SlowDispatcher {
        delay: Duration::from_secs(5),
    };
    let err = engine.submit(&slow).await.unwrap_err();

    assert_eq!(
        err,
        SubmitError::Dispatch(DispatchError::Timeout(Duration::from_millis(200)))
    );
    assert_eq!(engine.quantity("6"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispatcher_within_timeout_succeeds() {
    let config = OrderConfig::default().with_dispatch_timeout(Duration::from_secs(1));
    let mut engine = OrderEngine::new(Catalog::fish_market(), config);
    engine.adjust_quantity("6", 1);
    engine.set_form(valid_form());

    let slow = SlowDispatcher {
        delay: Duration::from_millis(100),
    };
    assert!(engine.submit(&slow).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_submission_can_be_retried() {
    let mut engine = engine();
    engine.adjust_quantity("2", 1);
    engine.set_form(valid_form());

    let slow = SlowDispatcher {
        delay: Duration::from_secs(5),
    };
    let outer = tokio::time::timeout(Duration::from_millis(10), engine.submit(&slow)).await;
    assert!(outer.is_err());
    assert_eq!(engine.status(), SubmissionStatus::Failed);

    let dispatcher = RecordingDispatcher::default();
    let order = engine.submit(&dispatcher).await.expect("retry should succeed");
    assert_eq!(dispatcher.orders(), vec![order]);
}

// =============================================================================
// Single Flight
// =============================================================================

#[test]
fn test_second_submission_while_in_flight_is_rejected() {
    let mut engine = engine();
    engine.adjust_quantity("1", 1);
    engine.set_form(valid_form());

    let first = engine.begin_submission().expect("first submission starts");
    assert_eq!(engine.begin_submission().unwrap_err(), SubmitError::InFlight);

    engine.finish_submission(Ok(())).expect("first submission settles");
    assert_eq!(first.lines.len(), 1);

    // After settling, the reset engine rejects for emptiness instead
    assert_eq!(
        engine.begin_submission().unwrap_err(),
        SubmitError::EmptySelection
    );
}
