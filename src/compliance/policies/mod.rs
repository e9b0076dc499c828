mod merge_policy;

pub use merge_policy::{excerpt, MergePolicy};
