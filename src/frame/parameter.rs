use std::fmt::Debug;
use std::hash::Hash;

/// Opaque key distinguishing one batchable draw configuration from another
/// (typically a mesh/material combination).
///
/// The core never inspects the key beyond equality and hashing; hosts bring
/// their own type. Keys are cloned into the tables on first use, so cheap
/// clones (ids, handles, small structs) are expected. Key values may be
/// cached and reused across frames by collaborators.
pub trait RenderParameter: Clone + Eq + Hash + Debug + 'static {}

impl<T: Clone + Eq + Hash + Debug + 'static> RenderParameter for T {}
