mod dashmap_bucket_store;
mod priority_blocking_queue;

pub use dashmap_bucket_store::DashMapBucketStore;
pub use priority_blocking_queue::{PriorityBlockingQueue, PriorityBlockingQueueConfig, DEFAULT_TAKE_RETRY_LIMIT};
