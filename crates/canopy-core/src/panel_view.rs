// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for the panel's isolated rendering scope (controls + dialog chrome).
//!
//! The view only reflects state; it never reads the store or touches the
//! global document. Implementations are best-effort and silently skip
//! controls that are missing from the scope.

use crate::prefs::{Font, Theme};

/// Controls and dialog chrome inside the isolated panel scope.
pub trait PanelView {
    /// Reflect the theme choice in the theme menu.
    fn show_theme(&self, theme: Theme);
    /// Reflect translucency in the toggle.
    fn show_translucency(&self, translucent: bool);
    /// Reflect the font choice in the font menu.
    fn show_font(&self, font: Font);
    /// Replace the background status text.
    fn show_background_status(&self, text: &str);
    /// Reset the file input so the same file can be picked again.
    fn clear_file_input(&self);

    /// Enter modal presentation: dialog shown, `open` class, backdrop visible.
    fn present_dialog(&self);
    /// Start the exit animation: drop `open`, add `closing`.
    fn begin_dismiss(&self);
    /// Exit animation done: backdrop hidden, modal semantics detached.
    fn finish_dismiss(&self);
}
