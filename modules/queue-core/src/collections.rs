mod btree_bucket_store;
mod bucket_store;

pub use btree_bucket_store::BTreeBucketStore;
pub use bucket_store::BucketStore;
