//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`FrameError`] covers all failure modes:
//! - Stage scheduling configuration errors (cycles, dangling references)
//! - Transient data store configuration errors (duplicate or unknown blocks)
//! - Uniform synchronization errors (unsupported types, missing sources,
//!   failed sink writes)
//!
//! Everything here is a programmer/configuration error: fatal to the setup
//! path it occurs on, surfaced immediately, never retried. The crate performs
//! no I/O, so there is no transient error class.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, FrameError>`.

use thiserror::Error;

use crate::frame::BlockKey;
use crate::stage::StageId;
use crate::uniform::UniformKind;

/// The main error type for the frame-orchestration core.
#[derive(Error, Debug)]
pub enum FrameError {
    // ========================================================================
    // Stage scheduling
    // ========================================================================
    /// The stage ordering constraints form a cycle; no linear order exists.
    #[error("stage ordering cycle involving `{stage}`")]
    StageCycle {
        /// One stage on (or downstream of) the cycle.
        stage: StageId,
    },

    /// A constraint references a stage that was never registered.
    #[error("stage `{referenced}` is required by `{by}` but was never registered")]
    UnknownStage { referenced: StageId, by: StageId },

    // ========================================================================
    // Transient data store
    // ========================================================================
    /// Two producers registered a block under the same key.
    #[error("transient data block `{0}` is already registered")]
    DuplicateBlock(BlockKey),

    /// A lookup named a key with no registered block.
    #[error("no transient data block registered under `{0}`")]
    UnknownBlock(BlockKey),

    /// A typed lookup named a key whose block is of a different type.
    #[error("transient data block `{key}` is not a `{expected}`")]
    BlockTypeMismatch {
        key: BlockKey,
        /// Type name the caller asked for.
        expected: &'static str,
    },

    // ========================================================================
    // Uniform synchronization
    // ========================================================================
    /// A value getter was constructed for a type outside the supported set.
    #[error("`{0}` is not a supported uniform type")]
    UnsupportedUniformType(String),

    /// Two producers registered a value source under the same name.
    #[error("uniform source `{0}` is already registered")]
    DuplicateUniformSource(String),

    /// Wiring a hook group referenced a source that was never registered.
    #[error("no uniform source registered for `{0}`")]
    MissingUniformSource(String),

    /// Two hooks with the same name were added to one group.
    #[error("hook `{0}` is already registered in this group")]
    DuplicateHook(String),

    /// A value source produced no value; absence of data is not a valid state.
    #[error("uniform `{0}` produced no value")]
    MissingUniformValue(String),

    /// A value source produced a value of a kind other than the declared one.
    #[error("uniform `{name}` is declared `{expected}` but its source produced `{actual}`")]
    UniformKindMismatch {
        name: String,
        expected: UniformKind,
        actual: UniformKind,
    },

    /// The external sink rejected a uniform write.
    #[error("failed to apply uniform `{name}`")]
    UniformApply {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrameError>;
