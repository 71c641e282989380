//! Namespaced identifier newtypes.
//!
//! Both the stage scheduler and the transient data store key their registries
//! by `namespace:name` identifiers. The macro below stamps out the newtype so
//! the two stay structurally identical without sharing a type.

/// Defines a `Copy` identifier newtype backed by the global string interner.
///
/// The generated type stores a single interned `namespace:name` symbol.
/// Equality and hashing go through the symbol; ordering compares the resolved
/// strings so it is stable across processes.
macro_rules! namespaced_ident {
    ($(#[$meta:meta])* $vis:vis struct $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name(crate::utils::interner::Symbol);

        impl $name {
            /// Creates the identifier `namespace:name`, interning it on first use.
            #[must_use]
            $vis fn new(namespace: &str, name: &str) -> Self {
                debug_assert!(!namespace.is_empty(), "identifier namespace must not be empty");
                debug_assert!(!name.is_empty(), "identifier name must not be empty");
                Self(crate::utils::interner::intern(&format!("{namespace}:{name}")))
            }

            /// The full `namespace:name` path.
            #[inline]
            #[must_use]
            $vis fn as_str(self) -> &'static str {
                crate::utils::interner::resolve(self.0)
            }

            /// The namespace component.
            #[must_use]
            $vis fn namespace(self) -> &'static str {
                self.as_str().split_once(':').map_or("", |(ns, _)| ns)
            }

            /// The name component.
            #[must_use]
            $vis fn name(self) -> &'static str {
                self.as_str().split_once(':').map_or(self.as_str(), |(_, n)| n)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.as_str())
            }
        }
    };
}

pub(crate) use namespaced_ident;
