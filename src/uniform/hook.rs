use std::error::Error;
use std::sync::Arc;

use crate::errors::{FrameError, Result};

use super::source::{UniformSourceSet, ValueGetter};
use super::value::UniformValue;

/// The write side of a uniform binding: applies a value to its GPU slot.
///
/// Implementations live in the external submission layer and are assumed
/// synchronous: when `set` returns, the value is staged for the next draw
/// that uses the slot. Only the allow-listed [`UniformValue`] kinds ever
/// reach a sink.
pub trait UniformSink {
    /// Applies `value` to the slot.
    fn set(&mut self, value: &UniformValue) -> std::result::Result<(), Box<dyn Error + Send + Sync>>;
}

/// Binds one uniform slot to a value source, applying the value only when it
/// changes.
///
/// The hook keeps the last value it pushed to the sink and compares the
/// freshly read value against it by value equality; the sink is invoked at
/// most once per poll and exactly when the value differs. The first poll has
/// no baseline and always applies.
pub struct UniformHook<C> {
    name: String,
    getter: Arc<ValueGetter<C>>,
    sink: Box<dyn UniformSink>,
    applied: Option<UniformValue>,
}

impl<C> UniformHook<C> {
    /// Creates a hook binding `name` to a getter/sink pair.
    #[must_use]
    pub fn new(name: impl Into<String>, getter: Arc<ValueGetter<C>>, sink: Box<dyn UniformSink>) -> Self {
        Self {
            name: name.into(),
            getter,
            sink,
            applied: None,
        }
    }

    /// The uniform slot name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last value pushed to the sink, if any.
    #[must_use]
    pub fn applied(&self) -> Option<&UniformValue> {
        self.applied.as_ref()
    }

    /// Reads the current value and pushes it to the sink iff it differs from
    /// the last applied value. Returns whether the sink was invoked.
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingUniformValue`] if the getter produced nothing;
    /// [`FrameError::UniformKindMismatch`] if it produced a value of a kind
    /// other than the declared one; [`FrameError::UniformApply`] if the sink
    /// rejected the write. The baseline is only advanced after a successful
    /// write, so a failed apply is retried on the next poll.
    pub fn poll(&mut self, ctx: &C) -> Result<bool> {
        let value = self
            .getter
            .get(ctx, &self.name)
            .ok_or_else(|| FrameError::MissingUniformValue(self.name.clone()))?;

        if value.kind() != self.getter.kind() {
            return Err(FrameError::UniformKindMismatch {
                name: self.name.clone(),
                expected: self.getter.kind(),
                actual: value.kind(),
            });
        }

        if self.applied.as_ref() == Some(&value) {
            return Ok(false);
        }

        self.sink.set(&value).map_err(|source| FrameError::UniformApply {
            name: self.name.clone(),
            source,
        })?;
        self.applied = Some(value);
        Ok(true)
    }
}

/// Uniform hooks scoped to one shader/material, polled once per frame.
///
/// Hooks are independent: a failure reading or applying one hook's value
/// must not prevent the others from being polled. [`poll_all`](Self::poll_all)
/// logs each failure with the group label and moves on.
pub struct UniformHookGroup<C> {
    label: String,
    hooks: Vec<UniformHook<C>>,
}

impl<C> std::fmt::Debug for UniformHookGroup<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformHookGroup")
            .field("label", &self.label)
            .field(
                "hooks",
                &self.hooks.iter().map(UniformHook::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<C> UniformHookGroup<C> {
    /// Creates an empty group labeled for diagnostics (typically the shader
    /// or material name).
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hooks: Vec::new(),
        }
    }

    /// Builds a group by wiring shader slots to collected sources.
    ///
    /// # Errors
    ///
    /// [`FrameError::MissingUniformSource`] if a slot names a source that was
    /// never registered; [`FrameError::DuplicateHook`] if `slots` repeats a
    /// name.
    pub fn wire<I>(label: impl Into<String>, sources: &UniformSourceSet<C>, slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Box<dyn UniformSink>)>,
    {
        let mut group = Self::new(label);
        for (name, sink) in slots {
            let getter = sources
                .get(&name)
                .ok_or_else(|| FrameError::MissingUniformSource(name.clone()))?;
            group.add(UniformHook::new(name, getter, sink))?;
        }
        Ok(group)
    }

    /// Adds a hook to the group.
    ///
    /// # Errors
    ///
    /// [`FrameError::DuplicateHook`] if the group already has a hook with the
    /// same name.
    pub fn add(&mut self, hook: UniformHook<C>) -> Result<()> {
        if self.hooks.iter().any(|h| h.name == hook.name) {
            return Err(FrameError::DuplicateHook(hook.name));
        }
        self.hooks.push(hook);
        Ok(())
    }

    /// Polls every hook once, in registration order.
    ///
    /// A failing hook is reported through `log::warn!` and does not stop the
    /// rest of the group. Returns the number of values actually applied.
    pub fn poll_all(&mut self, ctx: &C) -> usize {
        let mut applied = 0;
        for hook in &mut self.hooks {
            match hook.poll(ctx) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(err) => {
                    log::warn!("uniform group `{}`: hook `{}` failed: {err}", self.label, hook.name);
                }
            }
        }
        applied
    }

    /// The diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of hooks in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// The hooks, in registration order.
    pub fn hooks(&self) -> impl Iterator<Item = &UniformHook<C>> {
        self.hooks.iter()
    }
}
