//! The `FlowStage` trait — a closed, ordered set of named stages.

/// A stage in a linear onboarding sequence.
///
/// Implementors are small `Copy` enums. The set is closed: every stage the
/// flow can ever be in appears in [`FlowStage::all`], in declaration order.
/// String keys are the boundary to untyped callers (sidebar rendering,
/// serialization); unknown keys simply fail to parse rather than panic.
pub trait FlowStage: Copy + Eq + Sized + std::fmt::Debug + 'static {
    /// Every stage of the flow, in declaration order.
    fn all() -> &'static [Self];

    /// Stable string key for this stage.
    fn key(&self) -> &'static str;

    /// Parse a string key back into a stage. Returns `None` for any key
    /// outside the closed set.
    fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }

    /// Position of this stage within the declared order.
    fn ordinal(&self) -> usize {
        Self::all()
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}
