// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed notifications broadcast from the panel scope to its host.
//!
//! Each kind accepts exactly one listener. Emitting a kind nobody listens to
//! is a no-op, which keeps the panel usable on its own.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::trace;

use crate::prefs::{Font, Theme};

/// Notification kinds, named as they appear on the wire (`theme-change`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Theme menu changed.
    ThemeChange,
    /// Translucency toggle changed.
    TranslucencyChange,
    /// Font menu changed.
    FontChange,
    /// Background image chosen or cleared.
    BackgroundChange,
    /// Reset pressed; store already cleared.
    ResetRequest,
}

impl EventKind {
    /// Event name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThemeChange => "theme-change",
            Self::TranslucencyChange => "translucency-change",
            Self::FontChange => "font-change",
            Self::BackgroundChange => "background-change",
            Self::ResetRequest => "reset-request",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    /// The kind already has its listener.
    #[error("`{0}` already has a listener")]
    AlreadySubscribed(EventKind),
}

type Handler<T> = Rc<dyn Fn(T)>;

struct Slot<T> {
    kind: EventKind,
    handler: RefCell<Option<Handler<T>>>,
}

impl<T> Slot<T> {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            handler: RefCell::new(None),
        }
    }

    fn subscribe(&self, handler: Handler<T>) -> Result<(), SubscribeError> {
        let mut slot = self.handler.borrow_mut();
        if slot.is_some() {
            return Err(SubscribeError::AlreadySubscribed(self.kind));
        }
        *slot = Some(handler);
        Ok(())
    }

    fn is_subscribed(&self) -> bool {
        self.handler.borrow().is_some()
    }

    fn emit(&self, value: T) {
        // Clone out so the handler may re-enter the panel.
        let handler = self.handler.borrow().clone();
        match handler {
            Some(handler) => handler(value),
            None => trace!(kind = %self.kind, "no listener"),
        }
    }
}

/// Subscription table owned by a panel.
pub struct PanelEvents {
    theme: Slot<Theme>,
    translucency: Slot<bool>,
    font: Slot<Font>,
    background: Slot<Option<String>>,
    reset: Slot<()>,
}

impl fmt::Debug for PanelEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelEvents")
            .field("theme", &self.theme.is_subscribed())
            .field("translucency", &self.translucency.is_subscribed())
            .field("font", &self.font.is_subscribed())
            .field("background", &self.background.is_subscribed())
            .field("reset", &self.reset.is_subscribed())
            .finish()
    }
}

impl Default for PanelEvents {
    fn default() -> Self {
        Self {
            theme: Slot::new(EventKind::ThemeChange),
            translucency: Slot::new(EventKind::TranslucencyChange),
            font: Slot::new(EventKind::FontChange),
            background: Slot::new(EventKind::BackgroundChange),
            reset: Slot::new(EventKind::ResetRequest),
        }
    }
}

impl PanelEvents {
    /// Listen for theme changes.
    pub fn on_theme_change(&self, handler: impl Fn(Theme) + 'static) -> Result<(), SubscribeError> {
        self.theme.subscribe(Rc::new(handler))
    }

    /// Listen for translucency changes.
    pub fn on_translucency_change(
        &self,
        handler: impl Fn(bool) + 'static,
    ) -> Result<(), SubscribeError> {
        self.translucency.subscribe(Rc::new(handler))
    }

    /// Listen for font changes.
    pub fn on_font_change(&self, handler: impl Fn(Font) + 'static) -> Result<(), SubscribeError> {
        self.font.subscribe(Rc::new(handler))
    }

    /// Listen for background changes; `None` means cleared.
    pub fn on_background_change(
        &self,
        handler: impl Fn(Option<String>) + 'static,
    ) -> Result<(), SubscribeError> {
        self.background.subscribe(Rc::new(handler))
    }

    /// Listen for reset requests.
    pub fn on_reset_request(&self, handler: impl Fn(()) + 'static) -> Result<(), SubscribeError> {
        self.reset.subscribe(Rc::new(handler))
    }

    /// Whether `kind` has a listener.
    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::ThemeChange => self.theme.is_subscribed(),
            EventKind::TranslucencyChange => self.translucency.is_subscribed(),
            EventKind::FontChange => self.font.is_subscribed(),
            EventKind::BackgroundChange => self.background.is_subscribed(),
            EventKind::ResetRequest => self.reset.is_subscribed(),
        }
    }

    pub(crate) fn emit_theme(&self, theme: Theme) {
        self.theme.emit(theme);
    }

    pub(crate) fn emit_translucency(&self, translucent: bool) {
        self.translucency.emit(translucent);
    }

    pub(crate) fn emit_font(&self, font: Font) {
        self.font.emit(font);
    }

    pub(crate) fn emit_background(&self, data_uri: Option<String>) {
        self.background.emit(data_uri);
    }

    pub(crate) fn emit_reset(&self) {
        self.reset.emit(());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn second_listener_is_rejected() {
        let events = PanelEvents::default();
        assert!(events.on_font_change(|_| {}).is_ok());
        assert_eq!(
            events.on_font_change(|_| {}),
            Err(SubscribeError::AlreadySubscribed(EventKind::FontChange))
        );
    }

    #[test]
    fn emit_reaches_only_matching_listener() {
        let events = PanelEvents::default();
        let themes = Rc::new(Cell::new(0));
        let fonts = Rc::new(Cell::new(0));
        let t = themes.clone();
        let f = fonts.clone();
        events.on_theme_change(move |_| t.set(t.get() + 1)).unwrap();
        events.on_font_change(move |_| f.set(f.get() + 1)).unwrap();
        events.emit_theme(Theme::Dark);
        events.emit_theme(Theme::Light);
        assert_eq!(themes.get(), 2);
        assert_eq!(fonts.get(), 0);
    }

    #[test]
    fn emit_without_listener_is_noop() {
        let events = PanelEvents::default();
        events.emit_reset();
        events.emit_background(None);
        assert!(!events.is_subscribed(EventKind::ResetRequest));
    }

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(EventKind::ThemeChange.as_str(), "theme-change");
        assert_eq!(EventKind::TranslucencyChange.as_str(), "translucency-change");
        assert_eq!(EventKind::FontChange.as_str(), "font-change");
    }
}
