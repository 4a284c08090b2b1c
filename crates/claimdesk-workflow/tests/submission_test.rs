mod helpers;

use std::sync::atomic::Ordering;
use std::time::Duration;

use claimdesk_core::ProcessingStatus::{self, *};
use claimdesk_workflow::{
    NotificationId, NotificationKind, SubmissionController, SubmissionError, SubmitOutcome,
};
use helpers::{claim_file, poller_config, FakeClaimsApi, StatusReply, POLL_INTERVAL};
use tokio_test::{assert_pending, assert_ready_eq};

fn controller(api: &std::sync::Arc<FakeClaimsApi>) -> SubmissionController {
    SubmissionController::new(api.clone(), poller_config())
}

fn fill(controller: &mut SubmissionController, claim_id: &str) {
    assert!(controller.set_claim_id(claim_id));
    assert!(controller.set_files(vec![claim_file("photo.jpg"), claim_file("estimate.pdf")]));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_submit_stays_idle() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    assert!(controller.field_errors().is_empty());

    controller.set_claim_id("abc");
    let outcome = controller.submit().await;

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected validation errors, got {:?}", outcome);
    };
    assert_eq!(
        errors.claim_id.as_ref().map(|e| e.message.as_str()),
        Some("Claim ID must be at least 5 characters long")
    );
    assert_eq!(
        errors.files.as_ref().map(|e| e.message.as_str()),
        Some("Please upload at least one file")
    );
    assert_eq!(controller.status(), Idle);
    assert!(!controller.field_errors().is_empty());
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.start_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_characters_block_submission() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    fill(&mut controller, "claim 001");

    let outcome = controller.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(controller.status(), Idle);
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_submit_moves_through_uploading_to_processing() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    api.observe(controller.subscribe());
    fill(&mut controller, "CLAIM-001");

    let outcome = controller.submit().await;

    let SubmitOutcome::Processing(handle) = outcome else {
        panic!("expected processing, got {:?}", outcome);
    };
    assert_eq!(handle.claim_id, "CLAIM-001");
    assert_eq!(handle.uploaded.len(), 2);
    assert_eq!(
        *api.observed.lock().unwrap(),
        vec![("upload", Uploading), ("upload", Uploading), ("start", Uploading)]
    );
    assert_eq!(controller.status(), Processing);
    assert_eq!(api.status_calls(), 0);
    assert!(!controller.controls_enabled());
    assert_eq!(controller.submit_label(), "Processing...");

    let notifications = controller.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].id, NotificationId::Processing);
    assert!(notifications[0].loading);
}

#[tokio::test(start_paused = true)]
async fn test_completed_stops_polling() {
    let api = FakeClaimsApi::with_statuses(vec![
        StatusReply::Status("RUNNING"),
        StatusReply::Status("COMPLETED"),
    ]);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;

    assert_eq!(controller.wait_for_terminal().await, Completed);
    assert_eq!(api.status_calls(), 2);

    tokio::time::sleep(POLL_INTERVAL * 10).await;
    assert_eq!(api.status_calls(), 2);
    assert!(!controller.is_polling());

    let notifications = controller.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(
        notifications[0].action.as_ref().map(|a| a.href.as_str()),
        Some("/workflow/review?claim_id=CLAIM-001")
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_status_stops_polling() {
    let api = FakeClaimsApi::with_statuses(vec![StatusReply::Status("FAILED")]);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;

    assert_eq!(controller.wait_for_terminal().await, Failed);
    tokio::time::sleep(POLL_INTERVAL * 4).await;
    assert_eq!(api.status_calls(), 1);
    assert_eq!(controller.notifications()[0].id, NotificationId::Failed);
    assert!(controller.controls_enabled());
}

#[tokio::test(start_paused = true)]
async fn test_running_keeps_polling() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;

    tokio::time::sleep(POLL_INTERVAL * 3 + Duration::from_millis(10)).await;
    assert_eq!(api.status_calls(), 3);
    assert_eq!(controller.status(), Processing);
    assert!(controller.is_polling());

    let mut terminal = tokio_test::task::spawn(controller.wait_for_terminal());
    assert_pending!(terminal.poll());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_is_ignored_while_processing() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;

    assert!(!controller.cancel());
    assert!(!controller.set_claim_id("OTHER-01"));
    assert!(!controller.set_files(Vec::new()));
    assert_eq!(controller.status(), Processing);
    assert_eq!(controller.claim_id(), "CLAIM-001");
    assert_eq!(controller.files().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_completion_resets_form() {
    let api = FakeClaimsApi::with_statuses(vec![StatusReply::Status("COMPLETED")]);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;
    assert_eq!(controller.wait_for_terminal().await, Completed);

    let rejected = controller.submit().await;
    assert!(matches!(rejected, SubmitOutcome::Rejected(Completed)));

    assert!(controller.cancel());
    assert_eq!(controller.status(), Idle);
    assert_eq!(controller.claim_id(), "");
    assert!(controller.files().is_empty());
    assert!(controller.notifications().is_empty());
    assert!(controller.field_errors().is_empty());
    assert_eq!(controller.submit_label(), "Submit");

    let mut terminal = tokio_test::task::spawn(controller.wait_for_terminal());
    assert_ready_eq!(terminal.poll(), Idle);
}

#[tokio::test(start_paused = true)]
async fn test_upload_failure_never_starts_processing() {
    let api = FakeClaimsApi::new();
    api.fail_upload.store(true, Ordering::SeqCst);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");

    let outcome = controller.submit().await;

    match outcome {
        SubmitOutcome::Failed(SubmissionError::Upload { file_name, .. }) => {
            assert_eq!(file_name, "photo.jpg");
        }
        other => panic!("expected upload failure, got {:?}", other),
    }
    assert_eq!(controller.status(), Failed);
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.start_calls.load(Ordering::SeqCst), 0);

    tokio::time::sleep(POLL_INTERVAL * 2).await;
    assert_eq!(api.status_calls(), 0);

    let notifications = controller.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(
        notifications[0].content,
        "Claim CLAIM-001 processing failed. Please try again."
    );
}

#[tokio::test(start_paused = true)]
async fn test_start_failure_marks_failed() {
    let api = FakeClaimsApi::new();
    api.fail_start.store(true, Ordering::SeqCst);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");

    let outcome = controller.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(SubmissionError::StartProcessing(_))
    ));
    assert_eq!(controller.status(), Failed);
    tokio::time::sleep(POLL_INTERVAL * 2).await;
    assert_eq!(api.status_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_submit_can_be_cancelled() {
    let api = FakeClaimsApi::new();
    api.hang_upload.store(true, Ordering::SeqCst);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");

    let timed_out = tokio::time::timeout(Duration::from_secs(30), controller.submit()).await;

    assert!(timed_out.is_err());
    assert_eq!(api.upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.start_calls.load(Ordering::SeqCst), 0);
    assert_eq!(controller.status(), Failed);
    assert!(controller.controls_enabled());
    assert_eq!(controller.notifications()[0].id, NotificationId::Failed);

    assert!(controller.cancel());
    assert_eq!(controller.status(), Idle);
    assert!(controller.set_claim_id("CLAIM-002"));
    assert_eq!(controller.claim_id(), "CLAIM-002");
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_stops_polling() {
    let api = FakeClaimsApi::new();
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;
    let rx = controller.subscribe();

    drop(controller);
    tokio::time::sleep(POLL_INTERVAL * 5).await;

    assert_eq!(api.status_calls(), 0);
    assert_eq!(*rx.borrow(), Processing);
}

#[tokio::test(start_paused = true)]
async fn test_dismissed_notification_stays_hidden() {
    let api = FakeClaimsApi::with_statuses(vec![StatusReply::Status("COMPLETED")]);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;
    controller.wait_for_terminal().await;

    controller.dismiss(NotificationId::Completed);
    assert!(controller.notifications().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_after_cancel() {
    let api = FakeClaimsApi::with_statuses(vec![
        StatusReply::Status("FAILED"),
        StatusReply::Status("COMPLETED"),
    ]);
    let mut controller = controller(&api);
    fill(&mut controller, "CLAIM-001");
    controller.submit().await;
    assert_eq!(controller.wait_for_terminal().await, Failed);

    assert!(controller.cancel());
    fill(&mut controller, "CLAIM-002");
    controller.submit().await;
    let status: ProcessingStatus = controller.wait_for_terminal().await;
    assert_eq!(status, Completed);
    assert_eq!(api.start_calls.load(Ordering::SeqCst), 2);
}
