//! Uniform synchronization.
//!
//! Keeps GPU-bound uniform values in sync with CPU-side state while avoiding
//! redundant writes. Each [`UniformHook`] binds a named uniform slot to a
//! [`ValueGetter`] (the read side, a pure function of the rendering context)
//! and a [`UniformSink`] (the write side, external GPU submission); the hook
//! pushes a value to the sink only when it differs from the last value
//! applied. A GPU state write is assumed non-trivially expensive relative to
//! a value comparison, so the comparison always runs first.
//!
//! [`UniformHookGroup`] scopes hooks to one shader/material and polls them
//! once per frame. [`UniformSourceSet`] is the two-phase setup side: value
//! sources are collected by name during setup, then wired into groups once
//! shader slots are known.

mod hook;
mod source;
mod value;

pub use hook::{UniformHook, UniformHookGroup, UniformSink};
pub use source::{UniformSourceSet, ValueGetter};
pub use value::{UniformKind, UniformValue};
