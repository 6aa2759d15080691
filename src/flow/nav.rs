//! Sidebar navigation descriptors.

use crate::error::FlowError;
use crate::flow::stage::FlowStage;

/// One entry in the navigation sidebar.
///
/// Maps one or more stage keys to a display title and an ordinal position.
/// Multiple stages may share an ordinal, collapsing sub-stages under a single
/// sidebar entry.
#[derive(Debug, Clone)]
pub struct SidebarNavItem<S: 'static> {
    pub title: &'static str,
    pub idx: usize,
    pub keys: &'static [S],
}

/// Validate a sidebar declaration against the flow's stage set.
///
/// Ordinals must be non-decreasing in declaration order, and every declared
/// stage must be covered by exactly one item.
pub fn validate_nav<S: FlowStage>(items: &[SidebarNavItem<S>]) -> Result<(), FlowError> {
    let mut last_idx = 0usize;
    for item in items {
        if item.idx < last_idx {
            return Err(FlowError::InvalidNav(format!(
                "ordinal {} for {:?} decreases below {}",
                item.idx, item.title, last_idx
            )));
        }
        last_idx = item.idx;
        if item.keys.is_empty() {
            return Err(FlowError::InvalidNav(format!(
                "item {:?} covers no stages",
                item.title
            )));
        }
    }

    for stage in S::all() {
        let covering = items
            .iter()
            .filter(|item| item.keys.contains(stage))
            .count();
        if covering != 1 {
            return Err(FlowError::InvalidNav(format!(
                "stage {} covered by {} items, expected 1",
                stage.key(),
                covering
            )));
        }
    }

    Ok(())
}
