//! Single-threaded queue behaviour

use deliq::queue::{Item, Queue, RetryOutcome};
use deliq::DeliError;

// =============================================================================
// Add / Reserve Tests
// =============================================================================

#[test]
fn test_add_then_reserve_returns_same_item() {
    let queue = Queue::new();

    for (i, body) in ["one", "two words", "  padded  "].iter().enumerate() {
        let id = queue.add(*body, i as u32).unwrap();
        let before = queue.len();

        let item = queue.reserve().unwrap();
        assert_eq!(item.id(), id);
        assert_eq!(item.body(), *body);
        assert_eq!(item.initial_retries(), i as u32);
        assert_eq!(queue.len(), before - 1);
    }
}

#[test]
fn test_reserve_on_empty_queue() {
    let queue = Queue::new();

    assert!(matches!(queue.reserve(), Err(DeliError::EmptyQueue)));
    assert_eq!(queue.len(), 0);
}

#[test]
fn test_reserve_on_fully_reserved_queue() {
    let queue = Queue::new();
    queue.add("a", 0).unwrap();
    queue.add("b", 0).unwrap();
    queue.reserve().unwrap();
    queue.reserve().unwrap();

    assert!(matches!(queue.reserve(), Err(DeliError::EmptyQueue)));
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.total_len(), 2);
}

#[test]
fn test_fifo_without_retries() {
    let queue = Queue::new();
    let ids: Vec<String> = (0..5)
        .map(|i| queue.add(format!("job {}", i), 0).unwrap())
        .collect();

    for id in &ids {
        assert_eq!(queue.reserve().unwrap().id(), id);
    }
}

#[test]
fn test_empty_body_rejected() {
    let queue = Queue::new();

    assert!(matches!(queue.add("", 0), Err(DeliError::EmptyBody)));
    assert!(matches!(queue.add(" \r\n\t", 0), Err(DeliError::EmptyBody)));
    assert_eq!(queue.total_len(), 0);
}

// =============================================================================
// Done Tests
// =============================================================================

#[test]
fn test_done_is_false_the_second_time() {
    let queue = Queue::new();
    let id = queue.add("job", 0).unwrap();
    queue.reserve().unwrap();

    assert!(queue.done(&id));
    assert!(!queue.done(&id));
}

#[test]
fn test_done_on_unreserved_item() {
    let queue = Queue::new();
    let id = queue.add("job", 0).unwrap();

    assert!(queue.done(&id));
    assert_eq!(queue.len(), 0);
    assert!(matches!(queue.reserve(), Err(DeliError::EmptyQueue)));
}

#[test]
fn test_done_unknown_id() {
    let queue = Queue::new();
    queue.add("job", 0).unwrap();

    assert!(!queue.done("nope"));
    assert_eq!(queue.len(), 1);
}

// =============================================================================
// Retry Tests
// =============================================================================

#[test]
fn test_retry_n_times_then_fail() {
    let retries = 4;
    let queue = Queue::new();
    let id = queue.add("flaky", retries).unwrap();

    for attempt in 1..=retries {
        let item = queue.reserve().unwrap();
        assert_eq!(item.remaining_retries(), retries - (attempt - 1));
        assert!(queue.retry(&id), "retry {} should succeed", attempt);
    }

    queue.reserve().unwrap();
    assert!(!queue.retry(&id));
    assert_eq!(queue.total_len(), 0);
    assert!(!queue.done(&id));
}

#[test]
fn test_retried_item_comes_back_before_later_items() {
    let queue = Queue::new();
    let a = queue.add("A", 1).unwrap();
    let b = queue.add("B", 1).unwrap();

    assert_eq!(queue.reserve().unwrap().id(), a);
    assert!(queue.retry(&a));

    assert_eq!(queue.reserve().unwrap().id(), a);
    assert_eq!(queue.reserve().unwrap().id(), b);
}

#[test]
fn test_retry_zero_budget_drops_item() {
    let queue = Queue::new();
    let id = queue.add("once", 0).unwrap();
    queue.reserve().unwrap();

    assert_eq!(queue.retry_outcome(&id), RetryOutcome::Exhausted);
    assert_eq!(queue.total_len(), 0);
}

#[test]
fn test_retry_unknown_id_changes_nothing() {
    let queue = Queue::new();
    queue.add("job", 1).unwrap();
    queue.reserve().unwrap();

    assert_eq!(queue.retry_outcome("missing"), RetryOutcome::NotFound);
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.reserved_len(), 1);
}

// =============================================================================
// Item Tests
// =============================================================================

#[test]
fn test_item_retry_invariant() {
    let mut item = Item::new("job", 1).unwrap();

    assert!(item.decrement_retries());
    assert!(!item.decrement_retries());
    assert!(item.remaining_retries() <= item.initial_retries());
}
