//! Structural note operations: creation, splitting, merging, and
//! committing notes.

pub mod add;
pub mod commit;
pub mod merge;
pub mod split;

pub use add::{add, isosec};
pub use merge::merge;
pub use split::split;
