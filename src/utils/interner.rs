//! Global string interner.
//!
//! Converts identifier strings into compact integer symbols that compare and
//! hash in O(1). The namespaced id types ([`StageId`](crate::stage::StageId),
//! [`BlockKey`](crate::frame::BlockKey)) are built on top of this.

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;

/// Global interner instance.
static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);

/// Compact integer handle to an interned string.
pub type Symbol = Spur;

/// Interns a string, returning its symbol.
///
/// Returns the existing symbol if the string was interned before.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Looks up the symbol of an already-interned string without allocating.
#[inline]
#[must_use]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
#[must_use]
pub fn resolve(sym: Symbol) -> &'static str {
    INTERNER.resolve(&sym)
}

/// Pre-interns identifiers every pipeline configuration touches, keeping the
/// first frame's setup path free of interner writes.
pub fn preload_common_ids() {
    let common = [
        // Built-in stage ids
        "core:prepare",
        "core:shadow",
        "core:opaque",
        "core:skybox",
        "core:transparent",
        "core:post_process",
        "core:ui",
        // Built-in transient block keys
        "core:draw_batches",
        "core:instance_offsets",
    ];

    for name in common {
        intern(name);
    }
}
