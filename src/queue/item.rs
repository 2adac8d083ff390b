//! Queue item
//!
//! A single unit of work plus its retry and reservation metadata.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DeliError, Result};

/// One unit of queued work
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    body: String,
    initial_retries: u32,
    remaining_retries: u32,
    reserved: bool,
    created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new unreserved item with a fresh id
    ///
    /// Fails with `EmptyBody` if the body is empty or only whitespace.
    pub fn new(body: impl Into<String>, retries: u32) -> Result<Self> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DeliError::EmptyBody);
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            body,
            initial_retries: retries,
            remaining_retries: retries,
            reserved: false,
            created_at: Utc::now(),
        })
    }

    /// Use up one retry
    ///
    /// Returns false (and changes nothing) when no retries are left, which
    /// means the item should be discarded.
    pub fn decrement_retries(&mut self) -> bool {
        if !self.should_retry() {
            return false;
        }

        self.remaining_retries -= 1;
        true
    }

    /// Whether the item still has retries left
    pub fn should_retry(&self) -> bool {
        self.remaining_retries > 0
    }

    pub fn reserve(&mut self) {
        self.reserved = true;
    }

    pub fn release(&mut self) {
        self.reserved = false;
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Retry budget the item was created with
    pub fn initial_retries(&self) -> u32 {
        self.initial_retries
    }

    pub fn remaining_retries(&self) -> u32 {
        self.remaining_retries
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
