//! Per-frame transient data.
//!
//! Render producers accumulate draw work into keyed data blocks during a
//! frame; the frame driver clears everything through one entry point
//! ([`PipelineDataStore::reset_all`]) before the next frame's accumulation
//! begins. Nothing here touches the GPU; blocks hold CPU-side state that the
//! external driver uploads by opaque handle.
//!
//! # Frame contract
//!
//! ```text
//! reset_all() ──► accumulate (getOrCreate + push) ──► iterate & submit ──► next frame
//! ```
//!
//! `reset_all` must run exactly once per frame before accumulation; holding a
//! block reference across that boundary and expecting old content is a caller
//! error. All types here are single-threaded by contract and not internally
//! synchronized.

mod batch;
mod offsets;
mod parameter;
mod store;

pub use batch::{DEFAULT_BATCH_CAPACITY, DrawBatch, DrawBatchStore, DrawCommand};
pub use offsets::InstanceOffsetStore;
pub use parameter::RenderParameter;
pub use store::{BlockKey, PipelineDataStore, TransientBlock};
