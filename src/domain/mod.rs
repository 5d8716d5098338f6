//! Domain logic - pure values independent of git operations

pub mod snapshot;
pub mod tag;
pub mod variant;

pub use snapshot::BuildTagSnapshot;
pub use tag::{BuildTag, TagPattern, DEFAULT_TAG_PATTERN};
pub use variant::BuildVariant;
