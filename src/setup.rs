//! Pipeline setup and assembly.
//!
//! The host driver owns setup: it collects configuration callbacks from every
//! producer module, runs them in three fixed phases (early, normal, late;
//! each exactly once), and freezes the result into a [`Pipeline`]. There is
//! no global registry and no event bus; producers receive the mutable
//! [`PipelineConfig`] explicitly and write their stages, data blocks, and
//! uniform sources into it.

use smallvec::SmallVec;

use crate::errors::Result;
use crate::frame::PipelineDataStore;
use crate::stage::{StageGraph, StageId};
use crate::uniform::UniformSourceSet;

/// Setup phases, invoked in this fixed order, each exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SetupPhase {
    /// Runs first: foundational registrations other producers build on.
    Early = 0,

    /// The default phase for ordinary producers.
    Normal = 1,

    /// Runs last: overrides and wiring that needs everything else in place.
    Late = 2,
}

impl SetupPhase {
    /// Every phase, in execution order.
    pub const ALL: [Self; 3] = [Self::Early, Self::Normal, Self::Late];

    /// Numeric execution order of the phase.
    #[inline]
    #[must_use]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Phase name (for diagnostics).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Early => "Early",
            Self::Normal => "Normal",
            Self::Late => "Late",
        }
    }
}

/// The mutable setup-time aggregate handed to phase callbacks.
///
/// `C` is the host's rendering-context type consumed by uniform value
/// getters.
pub struct PipelineConfig<C> {
    /// Stage registrations and ordering constraints.
    pub stages: StageGraph,
    /// Transient data block registrations.
    pub data: PipelineDataStore,
    /// Named uniform value sources, wired into hook groups after setup.
    pub uniforms: UniformSourceSet<C>,
}

impl<C> PipelineConfig<C> {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: StageGraph::new(),
            data: PipelineDataStore::new(),
            uniforms: UniformSourceSet::new(),
        }
    }

    /// Resolves the stage graph and freezes the configuration.
    ///
    /// # Errors
    ///
    /// Propagates stage resolution failures ([`crate::FrameError::StageCycle`],
    /// [`crate::FrameError::UnknownStage`]).
    pub fn finalize(self) -> Result<Pipeline<C>> {
        let stage_order = self.stages.resolve()?;
        Ok(Pipeline {
            stage_order,
            data: self.data,
            uniforms: self.uniforms,
        })
    }
}

impl<C> Default for PipelineConfig<C> {
    fn default() -> Self {
        Self::new()
    }
}

type SetupFn<C> = Box<dyn FnOnce(&mut PipelineConfig<C>) -> Result<()>>;

struct SetupEntry<C> {
    phase: SetupPhase,
    /// Insertion order, for stable ordering within a phase.
    order: u16,
    callback: SetupFn<C>,
}

/// Collects setup callbacks and runs them phase by phase.
///
/// # Example
///
/// ```
/// use frameloom::setup::{PipelineSetup, SetupPhase};
/// use frameloom::stage::{OrderRequirement, StageId};
///
/// let mut setup = PipelineSetup::<()>::new();
/// setup.on(SetupPhase::Normal, |config| {
///     config
///         .stages
///         .register(StageId::new("core", "opaque"), OrderRequirement::none());
///     Ok(())
/// });
///
/// let pipeline = setup.run().unwrap();
/// assert_eq!(pipeline.stage_order().len(), 1);
/// ```
pub struct PipelineSetup<C> {
    entries: SmallVec<[SetupEntry<C>; 8]>,
    next_order: u16,
}

impl<C> PipelineSetup<C> {
    /// Creates an empty setup.
    ///
    /// Pre-interns the identifiers every configuration touches so producer
    /// callbacks hit a warm interner.
    #[must_use]
    pub fn new() -> Self {
        crate::utils::interner::preload_common_ids();
        Self {
            entries: SmallVec::new(),
            next_order: 0,
        }
    }

    /// Queues `callback` for `phase`. Within a phase, callbacks run in
    /// insertion order.
    pub fn on(
        &mut self,
        phase: SetupPhase,
        callback: impl FnOnce(&mut PipelineConfig<C>) -> Result<()> + 'static,
    ) -> &mut Self {
        self.entries.push(SetupEntry {
            phase,
            order: self.next_order,
            callback: Box::new(callback),
        });
        self.next_order = self.next_order.wrapping_add(1);
        self
    }

    /// Number of queued callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every callback exactly once (early, then normal, then late) and
    /// freezes the result.
    ///
    /// # Errors
    ///
    /// The first callback error aborts setup; resolution errors surface from
    /// [`PipelineConfig::finalize`].
    pub fn run(self) -> Result<Pipeline<C>> {
        let mut entries = self.entries;
        entries.sort_unstable_by_key(|e| (e.phase.order(), e.order));

        let mut config = PipelineConfig::new();
        for entry in entries {
            log::trace!("running {} setup callback", entry.phase.name());
            (entry.callback)(&mut config)?;
        }
        config.finalize()
    }
}

impl<C> Default for PipelineSetup<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The frozen product of setup.
///
/// Holds the resolved stage execution order and the per-frame state the
/// driver threads through each frame.
pub struct Pipeline<C> {
    stage_order: Vec<StageId>,
    /// Transient per-frame data blocks.
    pub data: PipelineDataStore,
    /// Uniform value sources for wiring hook groups.
    pub uniforms: UniformSourceSet<C>,
}

impl<C> Pipeline<C> {
    /// The stage execution order the frame driver must follow.
    #[must_use]
    pub fn stage_order(&self) -> &[StageId] {
        &self.stage_order
    }

    /// Frame-boundary entry point: clears every transient block and hands
    /// the store back for this frame's accumulation.
    pub fn begin_frame(&mut self) -> &mut PipelineDataStore {
        self.data.reset_all();
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_ordering() {
        assert!(SetupPhase::Early < SetupPhase::Normal);
        assert!(SetupPhase::Normal < SetupPhase::Late);
        assert_eq!(SetupPhase::ALL.map(SetupPhase::order), [0, 1, 2]);
    }
}
