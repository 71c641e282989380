use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::{FrameError, Result};

use super::{OrderRequirement, StageId};

struct StageEntry {
    id: StageId,
    requirement: OrderRequirement,
}

/// Registry of render stages and their ordering constraints.
///
/// Producers register `(StageId, OrderRequirement)` pairs during setup, in any
/// order and without knowing about each other; constraints may reference
/// stages that are registered later. [`resolve`](Self::resolve) then produces
/// one linear execution order satisfying every constraint.
///
/// # Determinism
///
/// Ties between unconstrained stages are broken by registration order, so an
/// identical registration sequence always resolves to an identical order.
///
/// # Example
///
/// ```
/// use frameloom::stage::{OrderRequirement, StageGraph, StageId};
///
/// let shadow = StageId::new("core", "shadow");
/// let opaque = StageId::new("core", "opaque");
///
/// let mut graph = StageGraph::new();
/// graph.register(shadow, OrderRequirement::none());
/// graph.register(opaque, OrderRequirement::builder().after(shadow).build());
///
/// assert_eq!(graph.resolve().unwrap(), [shadow, opaque]);
/// ```
pub struct StageGraph {
    /// Stages in registration order; the order fixes tie-break behavior.
    entries: Vec<StageEntry>,
    index: FxHashMap<StageId, usize>,
}

impl StageGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Registers a stage with its ordering constraints.
    ///
    /// Registering an already-registered stage merges the new constraints into
    /// the existing ones; independent producers constraining the same stage
    /// is expected usage, not an error.
    pub fn register(&mut self, id: StageId, requirement: OrderRequirement) -> &mut Self {
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].requirement.merge(&requirement);
        } else {
            self.index.insert(id, self.entries.len());
            self.entries.push(StageEntry { id, requirement });
        }
        self
    }

    /// Whether `id` has been registered.
    #[must_use]
    pub fn contains(&self, id: StageId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of registered stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered stages, in registration order.
    pub fn stages(&self) -> impl Iterator<Item = StageId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Resolves the constraint set into one linear execution order.
    ///
    /// Every registered stage appears exactly once. For every `after`
    /// constraint the referenced stage comes earlier; for every `before`
    /// constraint it comes later. Among stages that are ready at the same
    /// time, the earliest-registered one is emitted first (Kahn's algorithm
    /// with a lowest-registration-index heap).
    ///
    /// This is a pure read: repeated calls on an unchanged graph return the
    /// same order, and a failed call commits nothing.
    ///
    /// # Errors
    ///
    /// [`FrameError::UnknownStage`] if a constraint references a stage that
    /// was never registered; [`FrameError::StageCycle`] if the constraints
    /// admit no linear order.
    pub fn resolve(&self) -> Result<Vec<StageId>> {
        let n = self.entries.len();

        // Edge X -> Y means X executes before Y. Deduplicate: the same edge
        // declared from both ends must not double-count in-degree.
        let mut edges: FxHashSet<(usize, usize)> = FxHashSet::default();
        for (i, entry) in self.entries.iter().enumerate() {
            for &dep in entry.requirement.after() {
                edges.insert((self.lookup(dep, entry.id)?, i));
            }
            for &succ in entry.requirement.before() {
                edges.insert((i, self.lookup(succ, entry.id)?));
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree = vec![0usize; n];
        for &(from, to) in &edges {
            adjacency[from].push(to);
            in_degree[to] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
            .filter(|&i| in_degree[i] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(i)) = ready.pop() {
            order.push(self.entries[i].id);
            for &next in &adjacency[i] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        // Kahn's terminates short of n exactly when a cycle remains; every
        // stage still holding in-degree sits on or behind it.
        if let Some(entry) = self
            .entries
            .iter()
            .enumerate()
            .find_map(|(i, e)| (in_degree[i] > 0).then_some(e))
        {
            return Err(FrameError::StageCycle { stage: entry.id });
        }

        debug_assert_eq!(order.len(), n);
        log::debug!("resolved {} stages: {:?}", order.len(), order);
        Ok(order)
    }

    fn lookup(&self, referenced: StageId, by: StageId) -> Result<usize> {
        self.index
            .get(&referenced)
            .copied()
            .ok_or(FrameError::UnknownStage { referenced, by })
    }
}

impl Default for StageGraph {
    fn default() -> Self {
        Self::new()
    }
}
