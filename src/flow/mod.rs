//! Generic step-sequence machinery shared by both onboarding flows.
//!
//! A flow is a closed, ordered set of stages ([`FlowStage`]), a sidebar
//! declaration mapping stages to display entries, and a container that
//! owns the current stage and render dispatch. Transition rules live with
//! the individual flows; this module only knows "what is displayed now".

pub mod nav;
pub mod sequence;
pub mod stage;
pub mod view;

pub use nav::{SidebarNavItem, validate_nav};
pub use sequence::{FlowView, RenderFn, SidebarEntry, StepSequence};
pub use stage::FlowStage;
pub use view::{StepView, ViewElement};
