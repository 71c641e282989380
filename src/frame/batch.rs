//! Per-parameter draw command batches.
//!
//! Culling and mesh producers emit draw commands keyed by render parameter;
//! the table groups them so the frame driver can submit one batch per
//! parameter. Batches are created lazily on first access and reuse their
//! backing storage across frames: `reset` empties contents but keeps the
//! key→batch associations, so steady-state frames allocate nothing.

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;

use super::parameter::RenderParameter;
use super::store::TransientBlock;

/// Number of commands a new batch reserves space for.
pub const DEFAULT_BATCH_CAPACITY: usize = 1280;

/// One GPU draw in indexed-indirect layout.
///
/// The core only buffers these; the external driver casts a batch to bytes
/// ([`DrawBatch::as_bytes`]) and uploads it to an indirect buffer referenced
/// by opaque handle.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawCommand {
    pub index_count: u32,
    pub instance_count: u32,
    pub first_index: u32,
    pub base_vertex: i32,
    pub first_instance: u32,
}

/// Draw commands accumulated for one render parameter this frame.
#[derive(Debug)]
pub struct DrawBatch {
    commands: Vec<DrawCommand>,
}

impl DrawBatch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Appends a command to the batch.
    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Number of accumulated commands.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The accumulated commands, in submission order.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Byte view of the batch for upload to an indirect buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.commands)
    }

    /// Empties the batch, keeping its backing storage.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Current command capacity of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.commands.capacity()
    }
}

/// Keyed table of per-parameter draw batches.
///
/// [`batch`](Self::batch) is the memoized get-or-create entry point: within a
/// frame, two lookups with equal keys see the same accumulated state, never
/// two independent batches. Iteration order over batches is unspecified
/// (render parameters are not inherently ordered).
#[derive(Debug)]
pub struct DrawBatchStore<P: RenderParameter> {
    batches: FxHashMap<P, DrawBatch>,
    batch_capacity: usize,
}

impl<P: RenderParameter> DrawBatchStore<P> {
    /// Creates a table whose batches reserve [`DEFAULT_BATCH_CAPACITY`]
    /// commands.
    #[must_use]
    pub fn new() -> Self {
        Self::with_batch_capacity(DEFAULT_BATCH_CAPACITY)
    }

    /// Creates a table with a custom per-batch capacity.
    #[must_use]
    pub fn with_batch_capacity(batch_capacity: usize) -> Self {
        Self {
            batches: FxHashMap::default(),
            batch_capacity,
        }
    }

    /// The batch for `parameter`, created on first access.
    pub fn batch(&mut self, parameter: &P) -> &mut DrawBatch {
        self.batches
            .entry(parameter.clone())
            .or_insert_with(|| DrawBatch::with_capacity(self.batch_capacity))
    }

    /// The batch for `parameter`, if one was ever created.
    #[must_use]
    pub fn get(&self, parameter: &P) -> Option<&DrawBatch> {
        self.batches.get(parameter)
    }

    /// Every live batch with its parameter, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &DrawBatch)> {
        self.batches.iter()
    }

    /// Number of live batches (including empty ones kept across frames).
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Total commands accumulated this frame, across all batches.
    #[must_use]
    pub fn total_command_count(&self) -> usize {
        self.batches.values().map(DrawBatch::len).sum()
    }
}

impl<P: RenderParameter> TransientBlock for DrawBatchStore<P> {
    /// Empties every batch's contents. Key associations and backing storage
    /// survive so subsequent frames reuse the allocations.
    fn reset(&mut self) {
        for batch in self.batches.values_mut() {
            batch.clear();
        }
    }
}

impl<P: RenderParameter> Default for DrawBatchStore<P> {
    fn default() -> Self {
        Self::new()
    }
}
