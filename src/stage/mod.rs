//! Stage scheduling.
//!
//! Render work is organized into named stages. Producers declare partial-order
//! constraints ("this stage runs after shadow mapping, before post-processing")
//! independently of each other; [`StageGraph::resolve`] turns the combined
//! constraint set into one deterministic linear execution order for the frame
//! driver.
//!
//! Resolution happens once per pipeline configuration, off the per-frame path.
//! A constraint set that admits no linear order (a cycle) is a configuration
//! error surfaced at setup time, never silently dropped.

mod graph;
mod id;
mod requirement;

pub use graph::StageGraph;
pub use id::StageId;
pub use requirement::{OrderRequirement, OrderRequirementBuilder};
