use alloc::{
  collections::{BTreeMap, VecDeque},
  sync::Arc,
  vec::Vec,
};
use core::fmt;

use spin::{Mutex, RwLock};

use super::BucketStore;


type Bucket<T> = Arc<Mutex<VecDeque<T>>>;

/// [`BucketStore`] built on a spin-locked [`BTreeMap`].
///
/// The map keeps keys sorted, so a scan walks buckets in priority order without sorting. The map
/// lock is only held long enough to look up a bucket or snapshot the bucket list; element
/// mutation happens under the per-bucket lock.
pub struct BTreeBucketStore<T, P> {
  buckets: RwLock<BTreeMap<P, Bucket<T>>>,
}

impl<T, P: Ord> BTreeBucketStore<T, P> {
  /// Creates an empty store.
  #[must_use]
  pub const fn new() -> Self {
    Self { buckets: RwLock::new(BTreeMap::new()) }
  }

  fn bucket_for(&self, priority: P) -> Bucket<T> {
    if let Some(bucket) = self.buckets.read().get(&priority) {
      return bucket.clone();
    }
    self.buckets.write().entry(priority).or_insert_with(|| Arc::new(Mutex::new(VecDeque::new()))).clone()
  }

  fn snapshot(&self) -> Vec<Bucket<T>> {
    self.buckets.read().values().cloned().collect()
  }
}

impl<T, P: Ord> Default for BTreeBucketStore<T, P> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, P: Ord> BucketStore<T, P> for BTreeBucketStore<T, P> {
  fn insert(&self, priority: P, item: T) {
    self.bucket_for(priority).lock().push_back(item);
  }

  fn take_lowest(&self) -> Option<T> {
    self.snapshot().iter().find_map(|bucket| bucket.lock().pop_front())
  }

  fn clear(&self) -> usize {
    self.snapshot().iter().map(|bucket| bucket.lock().drain(..).count()).sum()
  }

  fn len(&self) -> usize {
    self.snapshot().iter().map(|bucket| bucket.lock().len()).sum()
  }

  fn bucket_count(&self) -> usize {
    self.buckets.read().len()
  }
}

impl<T, P> fmt::Debug for BTreeBucketStore<T, P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BTreeBucketStore").field("buckets", &self.buckets.read().len()).finish()
  }
}
