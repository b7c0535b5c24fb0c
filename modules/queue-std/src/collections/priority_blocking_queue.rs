mod priority_blocking_queue_config;

use std::{
  fmt,
  hash::Hash,
  hint,
  marker::PhantomData,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use prioq_core_rs::{AddingLifecycle, BucketStore, CapacityGate, QueueError, WaitOutcome, WaitTimeout};
pub use priority_blocking_queue_config::{PriorityBlockingQueueConfig, DEFAULT_TAKE_RETRY_LIMIT};
use tokio_util::sync::CancellationToken;

use super::DashMapBucketStore;
use crate::{concurrent::TokioAvailabilitySignal, wait::SignalWaiter};


struct Inner<T, P, S> {
  config:    PriorityBlockingQueueConfig,
  store:     S,
  gate:      CapacityGate<TokioAvailabilitySignal>,
  lifecycle: AddingLifecycle,
  shutdown:  CancellationToken,
  disposed:  AtomicBool,
  _pd:       PhantomData<fn(T, P) -> T>,
}

/// Bounded, priority-ordered queue whose enqueue and dequeue operations suspend while the queue is
/// full or empty.
///
/// Elements with a smaller priority key are dequeued first; elements sharing a key leave in
/// insertion order. Blocking enqueues never push the element count past the configured capacity,
/// while [`force_enqueue`](Self::force_enqueue) bypasses the bound. Every waiting operation can be
/// bounded by a [`WaitTimeout`] and interrupted by a [`CancellationToken`]; a cancellation that
/// wins the race leaves the queue untouched.
///
/// Handles are cheap to clone and share the same queue. There is no fairness between priorities:
/// a continuously refilled low key starves higher keys.
pub struct PriorityBlockingQueue<T, P, S = DashMapBucketStore<T, P>> {
  inner: Arc<Inner<T, P, S>>,
}

impl<T, P> PriorityBlockingQueue<T, P>
where
  P: Ord + Hash + Clone,
{
  /// Creates an open, empty queue bounded to `capacity` elements.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::InvalidArgument`] when `capacity` is zero.
  pub fn new(capacity: usize) -> Result<Self, QueueError> {
    Self::from_config(PriorityBlockingQueueConfig::new(capacity))
  }

  /// Creates an open, empty queue from `config`.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::InvalidArgument`] when the configuration is rejected.
  pub fn from_config(config: PriorityBlockingQueueConfig) -> Result<Self, QueueError> {
    Self::with_store(config, DashMapBucketStore::new())
  }
}

impl<T, P, S> PriorityBlockingQueue<T, P, S>
where
  P: Ord,
  S: BucketStore<T, P>,
{
  /// Creates an open queue on top of a caller-supplied bucket store.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::InvalidArgument`] when the configuration is rejected.
  pub fn with_store(config: PriorityBlockingQueueConfig, store: S) -> Result<Self, QueueError> {
    config.validate()?;
    let gate =
      CapacityGate::new(config.capacity(), TokioAvailabilitySignal::new(), TokioAvailabilitySignal::new());
    let inner = Inner {
      config,
      store,
      gate,
      lifecycle: AddingLifecycle::new(),
      shutdown: CancellationToken::new(),
      disposed: AtomicBool::new(false),
      _pd: PhantomData,
    };
    Ok(Self { inner: Arc::new(inner) })
  }

  /// Inserts `item`, waiting as long as necessary for room.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Closed`] once adding is complete and [`QueueError::Disposed`] after
  /// disposal.
  pub async fn enqueue(&self, item: T, priority: P) -> Result<(), QueueError> {
    self.enqueue_inner(item, priority, WaitTimeout::Infinite, None).await
  }

  /// Inserts `item`, waiting at most `timeout` for room.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Timeout`] when no room appeared in time, plus the failures of
  /// [`enqueue`](Self::enqueue).
  pub async fn enqueue_timeout(
    &self,
    item: T,
    priority: P,
    timeout: impl Into<WaitTimeout>,
  ) -> Result<(), QueueError> {
    self.enqueue_inner(item, priority, timeout.into(), None).await
  }

  /// Inserts `item`, waiting at most `timeout` for room unless `cancel` fires first.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Cancelled`] when `cancel` fired before room appeared, plus the failures
  /// of [`enqueue_timeout`](Self::enqueue_timeout).
  pub async fn enqueue_with_cancel(
    &self,
    item: T,
    priority: P,
    timeout: impl Into<WaitTimeout>,
    cancel: &CancellationToken,
  ) -> Result<(), QueueError> {
    self.enqueue_inner(item, priority, timeout.into(), Some(cancel)).await
  }

  /// Inserts `item` immediately, even if that pushes the count past capacity.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Closed`] once adding is complete and [`QueueError::Disposed`] after
  /// disposal.
  pub fn force_enqueue(&self, item: T, priority: P) -> Result<(), QueueError> {
    self.force_enqueue_inner(item, priority, None)
  }

  /// Inserts `item` immediately unless `cancel` has already fired.
  ///
  /// No wait takes place, so a token cancelled after the call starts has no effect.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Cancelled`] for an already cancelled token, plus the failures of
  /// [`force_enqueue`](Self::force_enqueue).
  pub fn force_enqueue_with_cancel(&self, item: T, priority: P, cancel: &CancellationToken) -> Result<(), QueueError> {
    self.force_enqueue_inner(item, priority, Some(cancel))
  }

  /// Removes the element with the smallest priority key, waiting as long as necessary.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Disposed`] after disposal and [`QueueError::InternalInconsistency`]
  /// when a claimed element cannot be found in storage.
  pub async fn dequeue(&self) -> Result<T, QueueError> {
    self.dequeue_inner(WaitTimeout::Infinite, None).await
  }

  /// Removes the element with the smallest priority key, waiting at most `timeout`.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Timeout`] when nothing arrived in time, plus the failures of
  /// [`dequeue`](Self::dequeue).
  pub async fn dequeue_timeout(&self, timeout: impl Into<WaitTimeout>) -> Result<T, QueueError> {
    self.dequeue_inner(timeout.into(), None).await
  }

  /// Removes the element with the smallest priority key, waiting at most `timeout` unless `cancel`
  /// fires first.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Cancelled`] when `cancel` fired before an element arrived, plus the
  /// failures of [`dequeue_timeout`](Self::dequeue_timeout).
  pub async fn dequeue_with_cancel(
    &self,
    timeout: impl Into<WaitTimeout>,
    cancel: &CancellationToken,
  ) -> Result<T, QueueError> {
    self.dequeue_inner(timeout.into(), Some(cancel)).await
  }

  /// Removes the element with the smallest priority key if one is available right now.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Disposed`] after disposal and [`QueueError::InternalInconsistency`]
  /// when a claimed element cannot be found in storage.
  pub fn try_dequeue(&self) -> Result<Option<T>, QueueError> {
    self.ensure_not_disposed()?;
    if !self.inner.gate.try_claim_item() {
      return Ok(None);
    }
    self.take_claimed().map(Some)
  }

  /// Stops accepting insertions. Idempotent.
  ///
  /// Insertions already past their closed check finish before this returns; later ones fail with
  /// [`QueueError::Closed`]. Waiting consumers are not woken and keep draining the queue.
  pub fn complete_adding(&self) {
    if self.inner.lifecycle.complete_adding() {
      tracing::debug!(count = self.len(), "priority blocking queue completed adding");
    }
  }

  /// Closes the queue, fails every pending wait with [`QueueError::Disposed`] and drops all
  /// stored elements. Later calls do nothing.
  pub fn dispose(&self) {
    if self.inner.disposed.swap(true, Ordering::AcqRel) {
      return;
    }
    self.inner.lifecycle.complete_adding();
    self.inner.shutdown.cancel();
    let dropped = self.inner.store.clear();
    self.inner.gate.reset();
    tracing::debug!(dropped, "priority blocking queue disposed");
  }

  /// Returns the number of elements available to consumers.
  #[must_use]
  pub fn len(&self) -> usize {
    self.inner.gate.count()
  }

  /// Returns `true` when no element is available to consumers.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the bound enforced on the blocking enqueue path.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.inner.gate.capacity()
  }

  /// Returns `true` once [`complete_adding`](Self::complete_adding) or
  /// [`dispose`](Self::dispose) has been called.
  #[must_use]
  pub fn is_adding_completed(&self) -> bool {
    self.inner.lifecycle.is_adding_completed()
  }

  /// Returns `true` once [`dispose`](Self::dispose) has been called.
  #[must_use]
  pub fn is_disposed(&self) -> bool {
    self.inner.disposed.load(Ordering::Acquire)
  }

  /// Returns the number of priority buckets created so far. Buckets are never removed.
  #[must_use]
  pub fn bucket_count(&self) -> usize {
    self.inner.store.bucket_count()
  }

  async fn enqueue_inner(
    &self,
    item: T,
    priority: P,
    timeout: WaitTimeout,
    cancel: Option<&CancellationToken>,
  ) -> Result<(), QueueError> {
    self.ensure_open()?;
    let waiter = SignalWaiter::new(timeout, cancel, &self.inner.shutdown);
    waiter.check_interrupted()?;

    while !self.inner.gate.try_reserve_slot() {
      match waiter.wait(self.inner.gate.room_signal()).await {
        | Ok(WaitOutcome::Signaled) => {},
        | Ok(WaitOutcome::TimedOut) => {
          tracing::debug!(capacity = self.capacity(), "enqueue timed out waiting for room");
          return Err(QueueError::Timeout);
        },
        | Err(error) => {
          tracing::debug!(%error, "enqueue interrupted while waiting for room");
          return Err(error);
        },
      }
    }

    let ticket = match self.inner.lifecycle.try_begin_add() {
      | Ok(ticket) => ticket,
      | Err(error) => {
        self.inner.gate.release_slot();
        return Err(error);
      },
    };
    self.inner.store.insert(priority, item);
    self.inner.gate.commit_item();
    drop(ticket);
    Ok(())
  }

  fn force_enqueue_inner(&self, item: T, priority: P, cancel: Option<&CancellationToken>) -> Result<(), QueueError> {
    self.ensure_open()?;
    if cancel.is_some_and(CancellationToken::is_cancelled) {
      return Err(QueueError::Cancelled);
    }

    let ticket = self.inner.lifecycle.try_begin_add()?;
    let occupied = self.inner.gate.force_reserve_slot();
    if occupied > self.capacity() {
      tracing::trace!(occupied, capacity = self.capacity(), "forced enqueue exceeded capacity");
    }
    self.inner.store.insert(priority, item);
    self.inner.gate.commit_item();
    drop(ticket);
    Ok(())
  }

  async fn dequeue_inner(&self, timeout: WaitTimeout, cancel: Option<&CancellationToken>) -> Result<T, QueueError> {
    self.ensure_not_disposed()?;
    let waiter = SignalWaiter::new(timeout, cancel, &self.inner.shutdown);
    waiter.check_interrupted()?;

    while !self.inner.gate.try_claim_item() {
      match waiter.wait(self.inner.gate.items_signal()).await {
        | Ok(WaitOutcome::Signaled) => {},
        | Ok(WaitOutcome::TimedOut) => {
          tracing::debug!("dequeue timed out waiting for an item");
          return Err(QueueError::Timeout);
        },
        | Err(error) => {
          tracing::debug!(%error, "dequeue interrupted while waiting for an item");
          return Err(error);
        },
      }
    }

    self.take_claimed()
  }

  fn take_claimed(&self) -> Result<T, QueueError> {
    for _ in 0..=self.inner.config.take_retry_limit() {
      if let Some(item) = self.inner.store.take_lowest() {
        self.inner.gate.release_slot();
        return Ok(item);
      }
      hint::spin_loop();
    }
    self.ensure_not_disposed()?;
    tracing::error!(
      count = self.inner.gate.count(),
      stored = self.inner.store.len(),
      "claimed an item but every bucket was empty"
    );
    Err(QueueError::InternalInconsistency)
  }

  fn ensure_open(&self) -> Result<(), QueueError> {
    self.ensure_not_disposed()?;
    if self.inner.lifecycle.is_adding_completed() {
      return Err(QueueError::Closed);
    }
    Ok(())
  }

  fn ensure_not_disposed(&self) -> Result<(), QueueError> {
    if self.is_disposed() {
      return Err(QueueError::Disposed);
    }
    Ok(())
  }
}

impl<T, P, S> Clone for PriorityBlockingQueue<T, P, S> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T, P, S> fmt::Debug for PriorityBlockingQueue<T, P, S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PriorityBlockingQueue")
      .field("gate", &self.inner.gate)
      .field("lifecycle", &self.inner.lifecycle)
      .field("disposed", &self.inner.disposed.load(Ordering::Relaxed))
      .finish()
  }
}
