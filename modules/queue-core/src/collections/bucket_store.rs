/// Storage holding one FIFO bucket per distinct priority key.
///
/// Smaller keys are served first. Implementations must be safe to share between producers and
/// consumers: inserting into one bucket, creating a new bucket and scanning for the lowest
/// non-empty bucket may all run at the same time. A scan is not required to observe insertions
/// that race with it, but it never skips an element that was already stored when it started,
/// unless another consumer removed that element first.
pub trait BucketStore<T, P: Ord> {
  /// Appends `item` to the tail of the bucket for `priority`, creating the bucket on first use.
  ///
  /// Concurrent first insertions for the same key create exactly one bucket.
  fn insert(&self, priority: P, item: T);

  /// Removes and returns the head of the lowest-keyed non-empty bucket.
  ///
  /// Returns `None` when every bucket was empty at the time it was visited.
  fn take_lowest(&self) -> Option<T>;

  /// Drains every bucket and returns the number of removed elements.
  ///
  /// Buckets themselves are kept.
  fn clear(&self) -> usize;

  /// Returns the sum of all bucket lengths.
  fn len(&self) -> usize;

  /// Returns `true` when no bucket holds an element.
  fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the number of buckets created so far.
  fn bucket_count(&self) -> usize;
}
