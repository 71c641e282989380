//! Per-parameter instance counters.

use rustc_hash::FxHashMap;

use super::parameter::RenderParameter;
use super::store::TransientBlock;

/// Assigns contiguous instance-slot ranges per render parameter.
///
/// Producers reserve slots with [`allocate`](Self::allocate) while filling
/// per-instance data; the returned offset is where their instances start
/// within the parameter's instance buffer.
///
/// Unlike [`DrawBatchStore`](super::DrawBatchStore), `reset` drops the
/// key→counter map entirely: every counter must restart each frame at
/// exactly zero, and counters for parameters that stopped being rendered
/// must not linger.
pub struct InstanceOffsetStore<P: RenderParameter> {
    offsets: FxHashMap<P, u32>,
}

impl<P: RenderParameter> InstanceOffsetStore<P> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offsets: FxHashMap::default(),
        }
    }

    /// Reserves `count` instance slots for `parameter`, returning the first
    /// reserved offset. The first allocation of a frame starts at zero.
    pub fn allocate(&mut self, parameter: &P, count: u32) -> u32 {
        let cursor = self.offsets.entry(parameter.clone()).or_insert(0);
        let offset = *cursor;
        *cursor += count;
        offset
    }

    /// Total slots allocated for `parameter` so far this frame.
    #[must_use]
    pub fn allocated(&self, parameter: &P) -> u32 {
        self.offsets.get(parameter).copied().unwrap_or(0)
    }

    /// Every parameter with its allocation total, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, u32)> {
        self.offsets.iter().map(|(p, &count)| (p, count))
    }

    /// Number of parameters that allocated this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl<P: RenderParameter> TransientBlock for InstanceOffsetStore<P> {
    /// Drops every counter. Stale parameters do not survive the frame.
    fn reset(&mut self) {
        self.offsets.clear();
    }
}

impl<P: RenderParameter> Default for InstanceOffsetStore<P> {
    fn default() -> Self {
        Self::new()
    }
}
