//! Detached remote calls.
//!
//! A detached call is spawned and never awaited by the operation that issued
//! it. Its outcome, success or failure, is logged at `debug` and then
//! discarded; nothing retries it and nothing reconciles local state with it.
//! Calls are tracked only so a short-lived process can [`Detached::settle`]
//! before exiting instead of cancelling them.

use std::{fmt::Display, future::Future};

use tokio_util::task::TaskTracker;

#[derive(Clone, Default)]
pub struct Detached {
  tracker: TaskTracker,
}

impl Detached {
  pub fn new() -> Self { Self::default() }

  /// Spawn `call` on the current runtime and forget about it.
  pub fn spawn<F, T, E>(&self, operation: &'static str, target: String, call: F)
  where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
  {
    self.tracker.spawn(async move {
      match call.await {
        Ok(_) => tracing::debug!(operation, %target, "detached call succeeded"),
        Err(e) => {
          tracing::debug!(operation, %target, error = %e, "detached call failed; discarded")
        }
      }
    });
  }

  /// Number of detached calls still in flight.
  pub fn in_flight(&self) -> usize { self.tracker.len() }

  /// Wait until every call spawned so far has finished. New calls may be
  /// spawned again afterwards.
  pub async fn settle(&self) {
    self.tracker.close();
    self.tracker.wait().await;
    self.tracker.reopen();
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;

  #[tokio::test]
  async fn settle_waits_for_success_and_failure_alike() {
    let detached = Detached::new();
    let done = Arc::new(AtomicUsize::new(0));

    for fail in [false, true] {
      let done = done.clone();
      detached.spawn("probe", "x".into(), async move {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        done.fetch_add(1, Ordering::SeqCst);
        if fail { Err("boom") } else { Ok(()) }
      });
    }

    detached.settle().await;
    assert_eq!(done.load(Ordering::SeqCst), 2);
    assert_eq!(detached.in_flight(), 0);
  }

  #[tokio::test]
  async fn tracker_is_reusable_after_settle() {
    let detached = Detached::new();
    detached.settle().await;

    let done = Arc::new(AtomicUsize::new(0));
    let counter = done.clone();
    detached.spawn("probe", "y".into(), async move {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok::<_, String>(())
    });
    detached.settle().await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
  }
}
