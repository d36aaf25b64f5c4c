//! Bounded polling
//!
//! The platform drives resources through their lifecycle asynchronously, so
//! callers that need a terminal state have to poll. This module provides a
//! generic poll-until-predicate helper that is always bounded: an attempt
//! budget is mandatory and an optional wall-clock deadline can tighten it
//! further, so a resource stuck in a non-target state can never hang the
//! caller forever.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::ClientError;

/// Polling interval and bounds
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between consecutive attempts
    pub interval: Duration,
    /// Maximum number of accessor calls before giving up
    pub max_attempts: u32,
    /// Optional wall-clock bound, checked after each attempt
    pub deadline: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
            deadline: None,
        }
    }
}

/// Result of a bounded poll
///
/// Matched and timed out are distinct variants rather than an error overload,
/// so callers can tell "the resource got there" from "we stopped looking".
#[derive(Debug)]
pub enum WaitOutcome<T> {
    /// The predicate matched; `value` is the resource as first observed
    /// matching, after `attempts` accessor calls
    Matched { value: T, attempts: u32 },
    /// The bounds were exhausted without a match; `last` is the most recent
    /// observation, if any
    TimedOut { attempts: u32, last: Option<T> },
}

/// Errors from the wait conveniences on the client
#[derive(Debug, Error)]
pub enum WaitError {
    /// The resource did not reach the target state within the bounds
    #[error("timed out after {attempts} attempt(s) waiting for target state (last state: {})", .last_state.as_deref().unwrap_or("unknown"))]
    TimedOut {
        attempts: u32,
        last_state: Option<String>,
    },

    /// The underlying status call failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Poll an accessor until a predicate matches or the bounds run out
///
/// Invokes `fetch` and tests the result with `predicate`. On a match, returns
/// immediately with no further calls or sleeps; the first call matching means
/// exactly one call total. Between non-matching attempts, sleeps
/// `options.interval`. Accessor errors abort the wait and propagate.
///
/// # Arguments
/// * `fetch` - Async accessor returning the current resource
/// * `predicate` - Condition over the fetched resource
/// * `options` - Interval, attempt budget and optional deadline
pub async fn poll_until<T, F, Fut, P>(
    mut fetch: F,
    predicate: P,
    options: &PollOptions,
) -> Result<WaitOutcome<T>, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
    P: Fn(&T) -> bool,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        debug!("Poll attempt {}/{}", attempts, options.max_attempts);

        let value = fetch().await?;

        if predicate(&value) {
            return Ok(WaitOutcome::Matched { value, attempts });
        }

        if attempts >= options.max_attempts {
            debug!("Attempt budget exhausted after {} attempt(s)", attempts);
            return Ok(WaitOutcome::TimedOut {
                attempts,
                last: Some(value),
            });
        }

        if let Some(deadline) = options.deadline
            && started.elapsed() >= deadline
        {
            debug!("Deadline elapsed after {} attempt(s)", attempts);
            return Ok(WaitOutcome::TimedOut {
                attempts,
                last: Some(value),
            });
        }

        sleep(options.interval).await;
    }
}
