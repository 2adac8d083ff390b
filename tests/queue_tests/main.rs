//! Queue Tests
//!
//! Tests verify:
//! - Add/reserve/done/retry semantics
//! - Front-of-queue redelivery after retry
//! - Retry budget exhaustion
//! - Concurrent reservation never hands out an item twice
//! - Registry creates each queue exactly once under contention

mod queue_tests;
