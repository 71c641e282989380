use smallvec::SmallVec;

use super::StageId;

/// Most stages carry a handful of constraints at most; keep them inline.
type StageList = SmallVec<[StageId; 4]>;

/// Frozen ordering constraints for one stage.
///
/// A requirement lists the stages this one must follow (`after`) and the
/// stages it must precede (`before`). Requirements are built through
/// [`OrderRequirementBuilder`] and immutable once built; multiple producers
/// may attach requirements to the same stage without coordinating; the
/// [`StageGraph`](super::StageGraph) merges them on registration.
#[derive(Debug, Clone, Default)]
pub struct OrderRequirement {
    after: StageList,
    before: StageList,
}

impl OrderRequirement {
    /// Starts accumulating a new requirement.
    #[must_use]
    pub fn builder() -> OrderRequirementBuilder {
        OrderRequirementBuilder::default()
    }

    /// The empty constraint set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Stages this stage must execute after.
    #[must_use]
    pub fn after(&self) -> &[StageId] {
        &self.after
    }

    /// Stages this stage must execute before.
    #[must_use]
    pub fn before(&self) -> &[StageId] {
        &self.before
    }

    /// Whether the requirement constrains nothing.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.after.is_empty() && self.before.is_empty()
    }

    /// Folds another requirement into this one, deduplicating.
    pub(crate) fn merge(&mut self, other: &OrderRequirement) {
        for &id in &other.after {
            push_unique(&mut self.after, id);
        }
        for &id in &other.before {
            push_unique(&mut self.before, id);
        }
    }
}

/// Accumulating builder for [`OrderRequirement`].
///
/// ```
/// use frameloom::stage::{OrderRequirement, StageId};
///
/// let shadow = StageId::new("core", "shadow");
/// let post = StageId::new("core", "post_process");
///
/// let req = OrderRequirement::builder().after(shadow).before(post).build();
/// assert_eq!(req.after(), [shadow]);
/// assert_eq!(req.before(), [post]);
/// ```
#[derive(Debug, Default)]
pub struct OrderRequirementBuilder {
    after: StageList,
    before: StageList,
}

impl OrderRequirementBuilder {
    /// Requires the built stage to execute after `stage`.
    #[must_use]
    pub fn after(mut self, stage: StageId) -> Self {
        push_unique(&mut self.after, stage);
        self
    }

    /// Requires the built stage to execute before `stage`.
    #[must_use]
    pub fn before(mut self, stage: StageId) -> Self {
        push_unique(&mut self.before, stage);
        self
    }

    /// Freezes the accumulated constraints.
    #[must_use]
    pub fn build(self) -> OrderRequirement {
        OrderRequirement {
            after: self.after,
            before: self.before,
        }
    }
}

fn push_unique(list: &mut StageList, id: StageId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
