//! Roadmap domain module.
//!
//! The week-by-week learning plan and the supported time commitments.

#[allow(clippy::module_inception)]
mod roadmap;
mod time_commitment;

pub use roadmap::{Roadmap, RoadmapStep};
pub use time_commitment::TimeCommitment;
