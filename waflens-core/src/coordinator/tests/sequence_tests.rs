use crate::coordinator::{OperationKind, SequenceTracker};
use pretty_assertions::assert_eq;

#[test]
fn numbers_increase_across_kinds() {
    let mut tracker = SequenceTracker::default();

    let a = tracker.issue(OperationKind::ProcessLogs);
    let b = tracker.issue(OperationKind::FilterAndSort);
    let c = tracker.issue(OperationKind::FilterAndSort);

    assert!(a < b && b < c);
    assert_eq!(tracker.latest(OperationKind::ProcessLogs), Some(a));
    assert_eq!(tracker.latest(OperationKind::FilterAndSort), Some(c));
}

#[test]
fn older_response_is_stale_even_when_it_arrives_last() {
    // Arrange
    let mut tracker = SequenceTracker::default();
    let first = tracker.issue(OperationKind::FilterAndSort);
    let second = tracker.issue(OperationKind::FilterAndSort);

    // Act: the newer request finishes first.
    let newer = tracker.complete(OperationKind::FilterAndSort, second);
    let older = tracker.complete(OperationKind::FilterAndSort, first);

    // Assert
    assert!(newer);
    assert!(!older);
    assert!(!tracker.has_pending());
}

#[test]
fn staleness_is_per_kind() {
    let mut tracker = SequenceTracker::default();
    let process = tracker.issue(OperationKind::ProcessLogs);
    let _filter = tracker.issue(OperationKind::FilterAndSort);

    assert!(tracker.is_current(OperationKind::ProcessLogs, process));
    assert!(tracker.complete(OperationKind::ProcessLogs, process));
}

#[test]
fn a_response_is_accepted_only_once() {
    let mut tracker = SequenceTracker::default();
    let seq = tracker.issue(OperationKind::ProcessLogs);

    assert!(tracker.complete(OperationKind::ProcessLogs, seq));
    assert!(!tracker.complete(OperationKind::ProcessLogs, seq));
}

#[test]
fn pending_tracks_unanswered_latest_requests() {
    let mut tracker = SequenceTracker::default();
    assert!(!tracker.has_pending());

    let seq = tracker.issue(OperationKind::FilterAndSort);
    assert!(tracker.has_pending());

    tracker.complete(OperationKind::FilterAndSort, seq);
    assert!(!tracker.has_pending());
}

#[test]
fn unknown_kind_has_no_latest() {
    let tracker = SequenceTracker::default();

    assert_eq!(tracker.latest(OperationKind::ProcessLogs), None);
    assert!(!tracker.is_current(OperationKind::ProcessLogs, 0));
}
