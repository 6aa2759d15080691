//! Render output as plain data.
//!
//! Flows render stages to [`StepView`] values instead of widgets; the
//! embedding UI decides how to draw them. This keeps the flow controllers
//! free of any toolkit dependency and makes render dispatch testable.

use serde::Serialize;

use crate::directory::model::Profile;

/// The content a flow renders for one stage: a heading, a description, and
/// a list of view elements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepView {
    pub title: String,
    pub description: String,
    pub body: Vec<ViewElement>,
}

impl StepView {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Vec<ViewElement>) -> Self {
        self.body = body;
        self
    }

    /// The well-defined empty view, returned for stage keys outside the
    /// declared set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.body.is_empty()
    }
}

/// One element of a step's body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewElement {
    /// Plain paragraph text.
    Text { text: String },
    /// An informational banner (degraded lookups, hints).
    Info { text: String },
    /// An actionable button; `enabled` mirrors the flow's gating rules.
    Button {
        label: String,
        action: String,
        enabled: bool,
    },
    /// A resolved profile card.
    ProfileCard { profile: Profile },
    /// A shareable text box with a copy affordance.
    ShareBox { text: String, copied: bool },
    /// Placeholder for the external rich-text composer widget.
    Composer { placeholder: String },
}

impl ViewElement {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::Info { text: text.into() }
    }

    pub fn button(label: impl Into<String>, action: impl Into<String>, enabled: bool) -> Self {
        Self::Button {
            label: label.into(),
            action: action.into(),
            enabled,
        }
    }
}
