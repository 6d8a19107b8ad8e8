/// Anything classified by a string tag.
pub trait Tagged {
    /// The tag identifying the semantic kind of this value.
    fn tag(&self) -> &str;

    /// Exact, case-sensitive tag comparison.
    fn is(&self, tag: &str) -> bool {
        self.tag() == tag
    }
}
