//! Pure response file logic: the line codec and the length policy.
//!
//! Nothing here touches the filesystem; see [`crate::io`] for that.

pub mod escape;
pub mod limit;
