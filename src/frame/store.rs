use std::any::Any;

use rustc_hash::FxHashMap;

use crate::errors::{FrameError, Result};
use crate::utils::ident::namespaced_ident;

namespaced_ident! {
    /// Identifier for a registered transient data block.
    pub struct BlockKey
}

/// A per-frame data block owned by a [`PipelineDataStore`].
///
/// `reset` clears the block's accumulated per-frame content. What "clear"
/// means is the block's own business: the draw-batch table empties batches
/// but keeps its key associations and backing storage, while the
/// instance-offset table drops its keys entirely so every counter restarts
/// at zero.
pub trait TransientBlock: Any {
    /// Clears accumulated per-frame content.
    fn reset(&mut self);
}

/// Ordered registry of transient data blocks; the single per-frame reset
/// entry point.
///
/// Registration is a one-time setup operation. Each frame, the driver calls
/// [`reset_all`](Self::reset_all) once before any accumulation; producers
/// then fetch their blocks by key with [`get_mut`](Self::get_mut) and write
/// into them.
///
/// Duplicate registration and unknown lookups are configuration errors:
/// both indicate a miswired producer and fail loudly rather than silently
/// replacing or returning nothing.
pub struct PipelineDataStore {
    /// Blocks in registration order; `reset_all` walks this order.
    blocks: Vec<(BlockKey, Box<dyn TransientBlock>)>,
    index: FxHashMap<BlockKey, usize>,
}

impl PipelineDataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Registers a block under `key`.
    ///
    /// # Errors
    ///
    /// [`FrameError::DuplicateBlock`] if `key` is already taken.
    pub fn register<B: TransientBlock>(&mut self, key: BlockKey, block: B) -> Result<()> {
        if self.index.contains_key(&key) {
            return Err(FrameError::DuplicateBlock(key));
        }
        self.index.insert(key, self.blocks.len());
        self.blocks.push((key, Box::new(block)));
        Ok(())
    }

    /// Fetches the block registered under `key`.
    ///
    /// # Errors
    ///
    /// [`FrameError::UnknownBlock`] if nothing is registered under `key`;
    /// [`FrameError::BlockTypeMismatch`] if the block is not a `B`.
    pub fn get<B: TransientBlock>(&self, key: BlockKey) -> Result<&B> {
        let &i = self.index.get(&key).ok_or(FrameError::UnknownBlock(key))?;
        let block: &dyn Any = self.blocks[i].1.as_ref();
        block.downcast_ref::<B>().ok_or(FrameError::BlockTypeMismatch {
            key,
            expected: std::any::type_name::<B>(),
        })
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<B: TransientBlock>(&mut self, key: BlockKey) -> Result<&mut B> {
        let &i = self.index.get(&key).ok_or(FrameError::UnknownBlock(key))?;
        let block: &mut dyn Any = self.blocks[i].1.as_mut();
        block.downcast_mut::<B>().ok_or(FrameError::BlockTypeMismatch {
            key,
            expected: std::any::type_name::<B>(),
        })
    }

    /// Resets every registered block, in registration order.
    ///
    /// Call exactly once per frame, before accumulation begins. Idempotent:
    /// resetting an already-reset store is a no-op.
    pub fn reset_all(&mut self) {
        for (_, block) in &mut self.blocks {
            block.reset();
        }
        log::trace!("reset {} transient blocks", self.blocks.len());
    }

    /// Number of registered blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Registered keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = BlockKey> + '_ {
        self.blocks.iter().map(|(key, _)| *key)
    }
}

impl Default for PipelineDataStore {
    fn default() -> Self {
        Self::new()
    }
}
