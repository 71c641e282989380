#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod frame;
pub mod pool;
pub mod setup;
pub mod stage;
pub mod uniform;
pub mod utils;

pub use errors::{FrameError, Result};
pub use frame::{
    BlockKey, DEFAULT_BATCH_CAPACITY, DrawBatch, DrawBatchStore, DrawCommand, InstanceOffsetStore,
    PipelineDataStore, RenderParameter, TransientBlock,
};
pub use pool::{ObjectPool, Reusable};
pub use setup::{Pipeline, PipelineConfig, PipelineSetup, SetupPhase};
pub use stage::{OrderRequirement, OrderRequirementBuilder, StageGraph, StageId};
pub use uniform::{
    UniformHook, UniformHookGroup, UniformKind, UniformSink, UniformSourceSet, UniformValue,
    ValueGetter,
};
pub use utils::interner;
