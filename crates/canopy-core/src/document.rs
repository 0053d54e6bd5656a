// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for the global document surface the controller presents into.
//!
//! Implementations are best-effort: a missing target element turns the call
//! into a no-op (implementations may log internally) and nothing here fails.

use std::rc::Rc;

use crate::deps::HeadDependency;
use crate::panel_view::PanelView;

/// Selector identifying chrome injected by a previous mount.
pub const CHROME_SELECTOR: &str = "header.main-header";

/// Header/footer content injected once per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    /// Header title text.
    pub title: String,
    /// Year shown in the footer copyright line.
    pub year: i32,
    /// Footer text following the year.
    pub credit: String,
}

/// Outcome of asking the document for an isolated panel scope.
pub enum PanelMount {
    /// A fresh isolated scope and its view.
    Mounted(Rc<dyn PanelView>),
    /// A panel host is already registered on this page.
    AlreadyRegistered,
}

impl std::fmt::Debug for PanelMount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mounted(_) => f.write_str("Mounted(..)"),
            Self::AlreadyRegistered => f.write_str("AlreadyRegistered"),
        }
    }
}

/// Global document operations used by the controller.
pub trait DocumentPort {
    /// Whether any node matches `selector`.
    fn contains(&self, selector: &str) -> bool;
    /// Append a dependency node to the head.
    fn append_head_node(&self, dep: &HeadDependency);
    /// Insert header, footer, and fade overlay at the top of the body.
    fn inject_chrome(&self, chrome: &Chrome);
    /// Create the isolated settings panel scope.
    fn mount_panel(&self) -> PanelMount;

    /// Current body classes.
    fn body_classes(&self) -> Vec<String>;
    /// Add a body class (no-op when present).
    fn add_body_class(&self, class: &str);
    /// Remove a body class (no-op when absent).
    fn remove_body_class(&self, class: &str);
    /// Set an inline body style property.
    fn set_body_style(&self, property: &str, value: &str);
    /// Clear an inline body style property.
    fn remove_body_style(&self, property: &str);

    /// Add or remove a class on the header region.
    fn set_header_class(&self, class: &str, present: bool);
    /// Update `<meta name="theme-color">` if the page has one.
    fn set_theme_color(&self, color: &str);
}
