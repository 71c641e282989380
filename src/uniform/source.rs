use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{FrameError, Result};

use super::value::{UniformKind, UniformValue};

/// The read side of a uniform binding: a pure lookup of the current logical
/// value for a named uniform, given an opaque rendering context `C`.
///
/// A getter declares its [`UniformKind`] up front; the declaration is checked
/// against the supported set at construction, and against the values the
/// closure actually produces at poll time. The read must be side-effect-free
/// and must always produce a value; absence of data is a configuration
/// error, not a valid state.
pub struct ValueGetter<C> {
    kind: UniformKind,
    read: Box<dyn Fn(&C, &str) -> Option<UniformValue>>,
}

impl<C> ValueGetter<C> {
    /// Builds a getter for a shader-declared type name.
    ///
    /// The name is validated against the supported kinds immediately, so a
    /// getter built from shader reflection fails here rather than at GPU
    /// submission.
    ///
    /// # Errors
    ///
    /// [`FrameError::UnsupportedUniformType`] if `wgsl_type` names a kind the
    /// sink cannot marshal.
    pub fn new(
        wgsl_type: &str,
        read: impl Fn(&C, &str) -> Option<UniformValue> + 'static,
    ) -> Result<Self> {
        Ok(Self {
            kind: UniformKind::parse(wgsl_type)?,
            read: Box::new(read),
        })
    }

    /// Builds a getter from an already-closed kind.
    #[must_use]
    pub fn of_kind(
        kind: UniformKind,
        read: impl Fn(&C, &str) -> Option<UniformValue> + 'static,
    ) -> Self {
        Self {
            kind,
            read: Box::new(read),
        }
    }

    /// The declared value kind.
    #[must_use]
    pub fn kind(&self) -> UniformKind {
        self.kind
    }

    /// Reads the current logical value for `name`.
    #[must_use]
    pub fn get(&self, ctx: &C, name: &str) -> Option<UniformValue> {
        (self.read)(ctx, name)
    }
}

impl<C> fmt::Debug for ValueGetter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueGetter").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// Named value sources collected during setup and wired into hook groups
/// later.
///
/// This is the explicit two-phase replacement for a process-wide hook
/// registry: producers insert sources while the host runs its setup phases,
/// the frame driver owns the set, and
/// [`UniformHookGroup::wire`](super::UniformHookGroup::wire) consumes it once
/// shader slots are known. Getters are `Arc`-shared so several groups can
/// bind the same source.
pub struct UniformSourceSet<C> {
    sources: FxHashMap<String, Arc<ValueGetter<C>>>,
}

impl<C> UniformSourceSet<C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: FxHashMap::default(),
        }
    }

    /// Registers a named source.
    ///
    /// # Errors
    ///
    /// [`FrameError::DuplicateUniformSource`] if `name` is already taken.
    /// Two producers claiming one uniform is a misconfiguration, never
    /// resolved by last-write-wins.
    pub fn insert(&mut self, name: impl Into<String>, getter: ValueGetter<C>) -> Result<()> {
        let name = name.into();
        if self.sources.contains_key(&name) {
            return Err(FrameError::DuplicateUniformSource(name));
        }
        self.sources.insert(name, Arc::new(getter));
        Ok(())
    }

    /// The source registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ValueGetter<C>>> {
        self.sources.get(name).cloned()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Registered source names, in unspecified order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

impl<C> Default for UniformSourceSet<C> {
    fn default() -> Self {
        Self::new()
    }
}
