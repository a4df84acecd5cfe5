//! Integration tests for fencewatchd
//!
//! These tests drive the watch engine, a scripted location source, and the
//! notifier through whole ticks the way the daemon's roster pass does.

use fencewatch_client::{LocationSource, MockLocationSource};
use fencewatch_core::{Classification, Status, WatchEngine};
use fencewatch_notify::{MockMailer, Notifier};
use fencewatch_util::SubjectId;

fn roster(ids: &[&str]) -> Vec<SubjectId> {
    ids.iter().map(|id| SubjectId::new(*id)).collect()
}

/// One full roster pass: poll, observe, notify.
async fn run_tick(
    engine: &mut WatchEngine,
    source: &MockLocationSource,
    notifier: &mut Notifier<MockMailer>,
    roster: &[SubjectId],
) {
    for subject in roster {
        let classification = source.fetch_status(subject).await.unwrap();
        let transition = engine.observe(subject, classification).unwrap();
        if let Some(kind) = transition.alert {
            notifier.notify(kind, subject).await.unwrap();
        }
    }
}

#[tokio::test]
async fn out_of_bounds_escalates_then_recovers() {
    let roster = roster(&["1", "2"]);
    let mut engine = WatchEngine::new(roster.clone());
    let source = MockLocationSource::new();
    let mailer = MockMailer::new();
    let mut notifier = Notifier::new(mailer.clone());

    source.script(
        &roster[0],
        [
            Classification::Unsafe,
            Classification::Unsafe,
            Classification::Safe,
        ],
    );
    // Subject "2" stays on the default Safe outcome throughout.

    // Tick 1: "1" leaves bounds, "2" stays quiet
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Lost));
    assert_eq!(engine.status(&roster[1]), Some(Status::Safe));
    let lines = mailer.sent_subject_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Subject 1 out of bounds"));

    // Tick 2: still out, escalate exactly once
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Critical));
    let lines = mailer.sent_subject_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("extended period"));

    // Tick 3: back inside
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Safe));
    let lines = mailer.sent_subject_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains("returned to bounds"));
}

#[tokio::test]
async fn api_errors_alert_on_every_tick() {
    let roster = roster(&["3"]);
    let mut engine = WatchEngine::new(roster.clone());
    let source = MockLocationSource::new();
    let mailer = MockMailer::new();
    let mut notifier = Notifier::new(mailer.clone());

    source.script(
        &roster[0],
        [Classification::ApiError, Classification::ApiError],
    );

    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Safe));
    assert_eq!(mailer.sent().len(), 1);

    // The same degraded source alerts again on the next tick
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Safe));
    let lines = mailer.sent_subject_lines();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.contains("API error for subject 3")));
}

#[tokio::test]
async fn parked_critical_subject_stays_quiet() {
    let roster = roster(&["5"]);
    let mut engine = WatchEngine::new(roster.clone());
    let source = MockLocationSource::new();
    let mailer = MockMailer::new();
    let mut notifier = Notifier::new(mailer.clone());

    source.script(&roster[0], std::iter::repeat_n(Classification::Unsafe, 4));

    for _ in 0..4 {
        run_tick(&mut engine, &source, &mut notifier, &roster).await;
    }

    assert_eq!(engine.status(&roster[0]), Some(Status::Critical));
    // Only the Lost and Critical transitions alerted; ticks 3 and 4 were silent
    assert_eq!(mailer.sent().len(), 2);
}

#[tokio::test]
async fn all_safe_roster_is_silent_and_polled_in_order() {
    let roster = roster(&["1", "2", "3"]);
    let mut engine = WatchEngine::new(roster.clone());
    let source = MockLocationSource::new();
    let mailer = MockMailer::new();
    let mut notifier = Notifier::new(mailer.clone());

    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    run_tick(&mut engine, &source, &mut notifier, &roster).await;

    assert!(mailer.sent().is_empty());

    let expected: Vec<SubjectId> = roster.iter().chain(roster.iter()).cloned().collect();
    assert_eq!(source.polls(), expected);
}

#[tokio::test]
async fn refused_send_drops_that_alert_but_the_run_continues() {
    let roster = roster(&["1"]);
    let mut engine = WatchEngine::new(roster.clone());
    let source = MockLocationSource::new();
    let mailer = MockMailer::new();
    let mut notifier = Notifier::new(mailer.clone());

    source.script(
        &roster[0],
        [Classification::Unsafe, Classification::Unsafe],
    );
    *mailer.refuse_next_send.lock().unwrap() = true;

    // Tick 1: the Lost alert is refused and dropped, but the status advanced
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Lost));
    assert!(mailer.sent().is_empty());
    assert_eq!(mailer.reconnect_count(), 1);

    // Tick 2: the fresh session delivers the Critical alert
    run_tick(&mut engine, &source, &mut notifier, &roster).await;
    assert_eq!(engine.status(&roster[0]), Some(Status::Critical));
    let lines = mailer.sent_subject_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("extended period"));
}
