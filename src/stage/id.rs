use crate::utils::ident::namespaced_ident;

namespaced_ident! {
    /// Namespaced identifier for a render stage.
    ///
    /// Stage ids are interned: construction is cheap after first use, and
    /// equality/hashing are integer comparisons. The namespace keeps stages
    /// contributed by independent modules from colliding.
    ///
    /// # Example
    ///
    /// ```
    /// use frameloom::stage::StageId;
    ///
    /// let opaque = StageId::new("core", "opaque");
    /// assert_eq!(opaque.namespace(), "core");
    /// assert_eq!(opaque.name(), "opaque");
    /// assert_eq!(opaque.to_string(), "core:opaque");
    /// ```
    pub struct StageId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_components() {
        let a = StageId::new("core", "opaque");
        let b = StageId::new("core", "opaque");
        let c = StageId::new("host", "opaque");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.namespace(), "core");
        assert_eq!(a.name(), "opaque");
        assert_eq!(a.as_str(), "core:opaque");
    }

    #[test]
    fn test_ordering_is_lexical() {
        let a = StageId::new("core", "alpha");
        let z = StageId::new("core", "zeta");
        assert!(a < z);
    }
}
