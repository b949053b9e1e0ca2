//! End-to-end tests for the onboarding flow over the public API.
//!
//! Each test drives a real controller the way the rendering layer would:
//! observing published state and invoking operations in response.

use std::time::Duration;

use tokio::time::timeout;
use tokio_stream::StreamExt;

use report_onboard::config::FlowConfig;
use report_onboard::onboarding::{step, OnboardingController, TransitionKind};

/// Maximum time any await in these tests may block.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn two_step_wizard_walkthrough() {
    let controller = OnboardingController::new();
    let mut rx = controller.subscribe();

    assert_eq!(controller.snapshot().current_step, step::BASIC_INFO);
    assert!(!controller.is_current_step_valid());
    assert!(!controller.is_complete());

    controller.set_basic_info("Alice", 30, "Medium", "Simple");
    assert!(controller.is_current_step_valid());

    controller.advance_step();
    timeout(
        TEST_TIMEOUT,
        rx.wait_for(|state| state.current_step == step::INTERESTS),
    )
    .await
    .expect("observer timed out")
    .expect("controller dropped");
    assert!(!controller.is_current_step_valid(), "no interests picked yet");

    controller.set_interests_and_days(vec!["Tech".into()], vec![1, 3, 5]);
    assert!(controller.is_current_step_valid());

    controller.advance_step();
    assert!(controller.is_complete());

    let status = controller.status();
    assert!(status.complete);
    assert_eq!(status.current_step, 2);
    assert_eq!(status.user_data.name, "Alice");
    assert_eq!(status.user_data.age, 30);
    assert_eq!(status.user_data.interests, vec!["Tech".to_string()]);
    assert_eq!(status.user_data.report_days, vec![1, 3, 5]);

    let kinds: Vec<TransitionKind> = controller.transitions().iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TransitionKind::Advance, TransitionKind::Advance]);
}

#[tokio::test]
async fn observer_sees_each_publish_fully_formed() {
    let controller = OnboardingController::new();
    let mut updates = controller.updates();

    // The current state arrives before any mutation.
    let initial = timeout(TEST_TIMEOUT, updates.next())
        .await
        .expect("timed out")
        .expect("stream closed");
    assert_eq!(initial.current_step, step::BASIC_INFO);

    controller.set_basic_info("Alice", 30, "Medium", "Simple");
    let after_info = timeout(TEST_TIMEOUT, updates.next())
        .await
        .expect("timed out")
        .expect("stream closed");
    assert_eq!(after_info.user_data.name, "Alice");
    assert_eq!(after_info.user_data.risk_tolerance, "Medium");

    controller.advance_step();
    let after_advance = timeout(TEST_TIMEOUT, updates.next())
        .await
        .expect("timed out")
        .expect("stream closed");
    assert_eq!(after_advance.current_step, step::INTERESTS);
    // The published snapshot carries the merged draft with it.
    assert_eq!(after_advance.user_data.name, "Alice");
}

#[tokio::test]
async fn late_subscriber_starts_from_the_latest_state() {
    let controller = OnboardingController::new();
    controller.set_basic_info("Bob", 42, "High", "Detailed");
    controller.advance_step();

    let mut updates = controller.updates();
    let first = timeout(TEST_TIMEOUT, updates.next())
        .await
        .expect("timed out")
        .expect("stream closed");
    assert_eq!(first.current_step, step::INTERESTS);
    assert_eq!(first.user_data.name, "Bob");
}

#[tokio::test]
async fn concurrent_merges_lose_nothing() {
    let controller = OnboardingController::new();
    let basic_writer = {
        let controller = controller.clone();
        tokio::spawn(async move {
            for _ in 0..100 {
                controller.set_basic_info("Alice", 30, "Medium", "Simple");
            }
        })
    };
    let interests_writer = {
        let controller = controller.clone();
        tokio::spawn(async move {
            for _ in 0..100 {
                controller.set_interests_and_days(vec!["Tech".into()], vec![1, 3, 5]);
            }
        })
    };

    timeout(TEST_TIMEOUT, basic_writer)
        .await
        .expect("timed out")
        .expect("writer panicked");
    timeout(TEST_TIMEOUT, interests_writer)
        .await
        .expect("timed out")
        .expect("writer panicked");

    // Updates are serialized under the channel lock, so both merges land.
    let draft = controller.snapshot().user_data;
    assert_eq!(draft.name, "Alice");
    assert_eq!(draft.interests, vec!["Tech".to_string()]);
    assert_eq!(draft.report_days, vec![1, 3, 5]);
}

#[tokio::test]
async fn wandering_off_the_defined_steps() {
    let controller = OnboardingController::with_config(&FlowConfig::default());
    let full = |controller: &OnboardingController| {
        controller.set_basic_info("Alice", 30, "Medium", "Simple");
        controller.set_interests_and_days(vec!["Tech".into()], vec![1]);
    };
    full(&controller);

    // Below step 0: nothing is valid, nothing is complete.
    controller.retreat_step();
    assert_eq!(controller.snapshot().current_step, -1);
    assert!(!controller.is_current_step_valid());
    assert!(!controller.is_complete());

    // Well past the last step: complete, and still not "valid".
    for _ in 0..5 {
        controller.advance_step();
    }
    assert_eq!(controller.snapshot().current_step, 4);
    assert!(controller.is_complete());
    assert!(!controller.is_current_step_valid());
}
