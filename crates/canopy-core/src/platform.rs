// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for host-platform facts and actions the controller depends on.

/// Host platform (window, clock, color-scheme media query).
pub trait Platform {
    /// Whether the platform currently prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;
    /// Reload the page so initialization reruns from stored state.
    fn reload(&self);
    /// Current calendar year for the footer.
    fn current_year(&self) -> i32;
}
