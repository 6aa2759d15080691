//! Step sequence container.
//!
//! Holds the current stage, the sidebar declaration, and a render-dispatch
//! function. Owns no business logic beyond "what is displayed now"; stage
//! transitions are requested by the flows through [`StepSequence::set_stage`].

use crate::error::FlowError;
use crate::flow::nav::{SidebarNavItem, validate_nav};
use crate::flow::stage::FlowStage;
use crate::flow::view::StepView;

/// Render dispatch: stage → view content.
pub type RenderFn<S> = Box<dyn Fn(S) -> StepView + Send + Sync>;

/// A sidebar entry as rendered: title, ordinal, and whether it represents
/// the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub title: &'static str,
    pub idx: usize,
    pub active: bool,
}

/// The full rendered state of a flow: sidebar plus current step content.
#[derive(Debug, Clone)]
pub struct FlowView {
    pub title: String,
    pub description: String,
    pub sidebar: Vec<SidebarEntry>,
    pub content: StepView,
}

/// Generic step-sequence container.
pub struct StepSequence<S: FlowStage> {
    title: String,
    description: String,
    current: S,
    nav: Vec<SidebarNavItem<S>>,
    render: RenderFn<S>,
}

impl<S: FlowStage> StepSequence<S> {
    /// Create a container. The sidebar declaration is validated up front.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        initial: S,
        nav: Vec<SidebarNavItem<S>>,
        render: RenderFn<S>,
    ) -> Result<Self, FlowError> {
        validate_nav(&nav)?;
        Ok(Self {
            title: title.into(),
            description: description.into(),
            current: initial,
            nav,
            render,
        })
    }

    pub fn current(&self) -> S {
        self.current
    }

    pub fn set_stage(&mut self, stage: S) {
        self.current = stage;
    }

    /// Render the view for an arbitrary stage key.
    ///
    /// Keys outside the declared set produce the empty view, never an error.
    pub fn render_key(&self, key: &str) -> StepView {
        match S::from_key(key) {
            Some(stage) => (self.render)(stage),
            None => StepView::empty(),
        }
    }

    /// Render the sidebar plus the current step's content.
    pub fn view(&self) -> FlowView {
        let sidebar = self
            .nav
            .iter()
            .map(|item| SidebarEntry {
                title: item.title,
                idx: item.idx,
                active: item.keys.contains(&self.current),
            })
            .collect();

        FlowView {
            title: self.title.clone(),
            description: self.description.clone(),
            sidebar,
            content: (self.render)(self.current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::view::ViewElement;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStage {
        A,
        B,
    }

    impl FlowStage for TestStage {
        fn all() -> &'static [Self] {
            &[Self::A, Self::B]
        }
        fn key(&self) -> &'static str {
            match self {
                Self::A => "A",
                Self::B => "B",
            }
        }
    }

    fn make_sequence() -> StepSequence<TestStage> {
        StepSequence::new(
            "Test flow",
            "two stages",
            TestStage::A,
            vec![
                SidebarNavItem {
                    title: "First",
                    idx: 0,
                    keys: &[TestStage::A],
                },
                SidebarNavItem {
                    title: "Second",
                    idx: 1,
                    keys: &[TestStage::B],
                },
            ],
            Box::new(|stage| {
                StepView::new(format!("stage {}", stage.key()), "")
                    .with_body(vec![ViewElement::text("hello")])
            }),
        )
        .unwrap()
    }

    #[test]
    fn renders_current_stage() {
        let seq = make_sequence();
        let view = seq.view();
        assert_eq!(view.content.title, "stage A");
        assert!(view.sidebar[0].active);
        assert!(!view.sidebar[1].active);
    }

    #[test]
    fn set_stage_moves_active_entry() {
        let mut seq = make_sequence();
        seq.set_stage(TestStage::B);
        let view = seq.view();
        assert_eq!(view.content.title, "stage B");
        assert!(!view.sidebar[0].active);
        assert!(view.sidebar[1].active);
    }

    #[test]
    fn unknown_key_renders_empty_view() {
        let seq = make_sequence();
        let view = seq.render_key("NOT_A_STAGE");
        assert!(view.is_empty());
    }

    #[test]
    fn known_key_renders_that_stage() {
        let seq = make_sequence();
        let view = seq.render_key("B");
        assert_eq!(view.title, "stage B");
    }

    #[test]
    fn invalid_nav_is_rejected_at_construction() {
        let result = StepSequence::new(
            "Bad",
            "",
            TestStage::A,
            vec![SidebarNavItem {
                title: "Only",
                idx: 0,
                keys: &[TestStage::A],
            }],
            Box::new(|_| StepView::empty()),
        );
        assert!(result.is_err());
    }
}
