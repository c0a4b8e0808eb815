pub mod snapshot;
pub mod story;

pub use snapshot::Snapshot;
pub use story::{PostKind, RawItem, Story};
