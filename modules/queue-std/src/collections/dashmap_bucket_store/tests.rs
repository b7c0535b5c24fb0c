use std::{
  collections::HashSet,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Barrier,
  },
  thread,
};

use prioq_core_rs::BucketStore;

use super::DashMapBucketStore;

#[test]
fn take_lowest_walks_priorities_in_ascending_order() {
  let store = DashMapBucketStore::new();
  store.insert(3, "cat");
  store.insert(1, "lion");
  store.insert(2, "dog");

  assert_eq!(store.take_lowest(), Some("lion"));
  assert_eq!(store.take_lowest(), Some("dog"));
  assert_eq!(store.take_lowest(), Some("cat"));
  assert_eq!(store.take_lowest(), None);
}

#[test]
fn elements_sharing_a_priority_leave_in_insertion_order() {
  let store = DashMapBucketStore::with_capacity(4);
  for value in 0..10 {
    store.insert(-7_i64, value);
  }

  let drained: Vec<_> = std::iter::from_fn(|| store.take_lowest()).collect();
  assert_eq!(drained, (0..10).collect::<Vec<_>>());
}

#[test]
fn empty_buckets_are_kept_and_skipped() {
  let store = DashMapBucketStore::new();
  store.insert(1, 'a');
  store.insert(2, 'b');
  assert_eq!(store.take_lowest(), Some('a'));

  store.insert(0, 'z');
  assert_eq!(store.bucket_count(), 3);
  assert_eq!(store.take_lowest(), Some('z'));
  assert_eq!(store.take_lowest(), Some('b'));
  assert!(store.is_empty());
  assert_eq!(store.bucket_count(), 3);
}

#[test]
fn clear_drains_every_bucket() {
  let store = DashMapBucketStore::new();
  store.insert("high", 1);
  store.insert("low", 2);
  store.insert("low", 3);

  assert_eq!(store.len(), 3);
  assert_eq!(store.clear(), 3);
  assert_eq!(store.len(), 0);
  assert_eq!(store.bucket_count(), 2);
}

#[test]
fn drained_by_parallel_consumers_after_parallel_producers() {
  let store = Arc::new(DashMapBucketStore::new());
  let producers: Vec<_> = (0..4)
    .map(|worker| {
      let store = store.clone();
      thread::spawn(move || {
        for n in 0..250_u32 {
          store.insert(n % 8, worker * 1000 + n);
        }
      })
    })
    .collect();
  for producer in producers {
    producer.join().unwrap();
  }
  assert_eq!(store.bucket_count(), 8);

  let consumers: Vec<_> = (0..4)
    .map(|_| {
      let store = store.clone();
      thread::spawn(move || std::iter::from_fn(|| store.take_lowest()).collect::<Vec<_>>())
    })
    .collect();
  let mut taken: Vec<u32> = consumers.into_iter().flat_map(|consumer| consumer.join().unwrap()).collect();
  taken.sort_unstable();
  taken.dedup();
  assert_eq!(taken.len(), 1000);
}

#[test]
fn racing_first_inserts_share_one_bucket() {
  const WRITERS: usize = 16;
  let store = Arc::new(DashMapBucketStore::new());
  let start = Arc::new(Barrier::new(WRITERS));

  let writers: Vec<_> = (0..WRITERS)
    .map(|worker| {
      let store = store.clone();
      let start = start.clone();
      thread::spawn(move || {
        start.wait();
        store.insert(42_u32, worker);
      })
    })
    .collect();
  for writer in writers {
    writer.join().unwrap();
  }

  assert_eq!(store.bucket_count(), 1);
  assert_eq!(store.len(), WRITERS);
  let mut drained: Vec<_> = std::iter::from_fn(|| store.take_lowest()).collect();
  drained.sort_unstable();
  assert_eq!(drained, (0..WRITERS).collect::<Vec<_>>());
}

#[test]
fn scans_overlapping_new_low_buckets_take_each_item_once() {
  const PRODUCERS: u32 = 4;
  const CONSUMERS: usize = 4;
  const PER_PRODUCER: u32 = 500;
  let store = Arc::new(DashMapBucketStore::new());
  let start = Arc::new(Barrier::new(PRODUCERS as usize + CONSUMERS));
  let producing = Arc::new(AtomicBool::new(true));

  let producers: Vec<_> = (0..PRODUCERS)
    .map(|worker| {
      let store = store.clone();
      let start = start.clone();
      thread::spawn(move || {
        start.wait();
        for n in 0..PER_PRODUCER {
          // Keys descend so every round opens a bucket below the ones being scanned.
          let priority = i64::from(PER_PRODUCER - n) * i64::from(PRODUCERS) + i64::from(worker);
          store.insert(priority, worker * PER_PRODUCER + n);
        }
      })
    })
    .collect();
  let consumers: Vec<_> = (0..CONSUMERS)
    .map(|_| {
      let store = store.clone();
      let start = start.clone();
      let producing = producing.clone();
      thread::spawn(move || {
        start.wait();
        let mut taken = Vec::new();
        loop {
          let still_producing = producing.load(Ordering::Acquire);
          match store.take_lowest() {
            | Some(item) => taken.push(item),
            | None if still_producing => thread::yield_now(),
            | None => break taken,
          }
        }
      })
    })
    .collect();

  for producer in producers {
    producer.join().unwrap();
  }
  producing.store(false, Ordering::Release);

  let mut seen = HashSet::new();
  for consumer in consumers {
    for item in consumer.join().unwrap() {
      assert!(seen.insert(item), "item {item} was taken twice");
    }
  }
  assert_eq!(seen.len(), (PRODUCERS * PER_PRODUCER) as usize);
  assert!(store.is_empty());
  assert_eq!(store.bucket_count(), (PRODUCERS * PER_PRODUCER) as usize);
}
