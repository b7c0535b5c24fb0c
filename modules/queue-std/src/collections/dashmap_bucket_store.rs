use std::{collections::VecDeque, fmt, hash::Hash};

use dashmap::DashMap;
use prioq_core_rs::BucketStore;

#[cfg(test)]
mod tests;

/// [`BucketStore`] backed by a sharded [`DashMap`].
///
/// Bucket creation goes through `DashMap::entry`, so concurrent first insertions for the same key
/// create exactly one bucket, and insertions into different buckets mostly land on different
/// shards. A scan snapshots the known keys, sorts them, and visits each bucket under its shard
/// lock; buckets created after the snapshot are picked up by the next scan.
pub struct DashMapBucketStore<T, P>
where
  P: Eq + Hash, {
  buckets: DashMap<P, VecDeque<T>>,
}

impl<T, P> DashMapBucketStore<T, P>
where
  P: Eq + Hash,
{
  /// Creates an empty store.
  #[must_use]
  pub fn new() -> Self {
    Self { buckets: DashMap::new() }
  }

  /// Creates an empty store sized for `priorities` distinct keys.
  #[must_use]
  pub fn with_capacity(priorities: usize) -> Self {
    Self { buckets: DashMap::with_capacity(priorities) }
  }
}

impl<T, P> DashMapBucketStore<T, P>
where
  P: Ord + Hash + Clone,
{
  fn sorted_priorities(&self) -> Vec<P> {
    let mut priorities: Vec<P> = self.buckets.iter().map(|bucket| bucket.key().clone()).collect();
    priorities.sort_unstable();
    priorities
  }
}

impl<T, P> Default for DashMapBucketStore<T, P>
where
  P: Eq + Hash,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T, P> BucketStore<T, P> for DashMapBucketStore<T, P>
where
  P: Ord + Hash + Clone,
{
  fn insert(&self, priority: P, item: T) {
    self
      .buckets
      .entry(priority)
      .or_insert_with(|| {
        tracing::trace!("creating priority bucket");
        VecDeque::new()
      })
      .push_back(item);
  }

  fn take_lowest(&self) -> Option<T> {
    self
      .sorted_priorities()
      .iter()
      .find_map(|priority| self.buckets.get_mut(priority).and_then(|mut bucket| bucket.pop_front()))
  }

  fn clear(&self) -> usize {
    self.buckets.iter_mut().map(|mut bucket| bucket.drain(..).count()).sum()
  }

  fn len(&self) -> usize {
    self.buckets.iter().map(|bucket| bucket.len()).sum()
  }

  fn bucket_count(&self) -> usize {
    self.buckets.len()
  }
}

impl<T, P> fmt::Debug for DashMapBucketStore<T, P>
where
  P: Eq + Hash,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DashMapBucketStore").field("buckets", &self.buckets.len()).finish()
  }
}
