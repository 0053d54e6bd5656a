// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The settings controller: one owned [`Application`] per page.
//!
//! Startup order matters: head dependencies and chrome first, then the panel
//! (which initializes its own controls from the store), then the stored
//! preferences are applied to the global document. After that the controller
//! only reacts to panel notifications and platform color-scheme changes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::binding;
use crate::config::WidgetConfig;
use crate::deps::DependencyRegistry;
use crate::document::{Chrome, DocumentPort, PanelMount, CHROME_SELECTOR};
use crate::events::SubscribeError;
use crate::panel::Panel;
use crate::platform::Platform;
use crate::prefs::{Font, PrefKey, SettingsSnapshot, Theme, Translucency};
use crate::store::PreferenceStore;

/// Process-wide orchestrator reconciling stored preferences with the page.
pub struct Application {
    config: WidgetConfig,
    store: PreferenceStore,
    document: Rc<dyn DocumentPort>,
    platform: Rc<dyn Platform>,
    dependencies: DependencyRegistry,
    panel: RefCell<Option<Rc<Panel>>>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("dependencies", &self.dependencies)
            .field("panel", &self.panel.borrow())
            .finish_non_exhaustive()
    }
}

impl Application {
    /// Seed the document, mount the panel, and apply stored preferences.
    pub fn start(
        config: WidgetConfig,
        store: PreferenceStore,
        document: Rc<dyn DocumentPort>,
        platform: Rc<dyn Platform>,
    ) -> Rc<Self> {
        let app = Rc::new(Self {
            config,
            store,
            document,
            platform,
            dependencies: DependencyRegistry::new(),
            panel: RefCell::new(None),
        });
        app.seed_document();
        app.attach_panel();
        app.apply_saved_settings();
        info!(panel = app.panel().is_some(), "settings widget started");
        app
    }

    fn seed_document(&self) {
        let document = self.document.as_ref();
        let appended = self
            .dependencies
            .ensure_all(&self.config.dependencies, document);
        debug!(appended, "head dependencies ensured");

        if document.contains(CHROME_SELECTOR) {
            debug!("page chrome already present");
            return;
        }
        document.inject_chrome(&Chrome {
            title: self.config.title.clone(),
            year: self.platform.current_year(),
            credit: self.config.credit.clone(),
        });
    }

    fn attach_panel(self: &Rc<Self>) {
        let view = match self.document.mount_panel() {
            PanelMount::Mounted(view) => view,
            PanelMount::AlreadyRegistered => {
                warn!("settings panel already registered on this page; skipping");
                return;
            }
        };
        let panel = Panel::new(self.store.clone(), view);
        panel.initialize();
        if let Err(err) = self.subscribe(&panel) {
            warn!(%err, "panel notifications not fully wired");
        }
        *self.panel.borrow_mut() = Some(panel);
    }

    fn subscribe(self: &Rc<Self>, panel: &Panel) -> Result<(), SubscribeError> {
        let events = panel.events();
        let app = Rc::downgrade(self);
        events.on_theme_change(forward(&app, Self::apply_theme))?;
        events.on_translucency_change(forward(&app, Self::apply_translucency))?;
        events.on_font_change(forward(&app, Self::apply_font))?;
        events.on_background_change(forward(&app, |app: &Self, uri: Option<String>| {
            app.apply_background(uri.as_deref());
        }))?;
        events.on_reset_request(forward(&app, |app: &Self, (): ()| app.platform.reload()))?;
        Ok(())
    }

    /// Apply every stored preference, or its default, to the document.
    ///
    /// Absent values are never written back.
    pub fn apply_saved_settings(&self) {
        self.apply_theme(self.store.read::<Theme>().unwrap_or_default());
        self.apply_translucency(self.store.read::<Translucency>().unwrap_or_default().0);
        self.apply_font(self.store.read::<Font>().unwrap_or_default());
        self.apply_background(self.store.get_non_empty(PrefKey::BackgroundImage).as_deref());
    }

    /// Show `theme`, resolving `system` against the platform right now.
    pub fn apply_theme(&self, theme: Theme) {
        let resolved = theme.resolve(self.platform.prefers_dark());
        binding::apply_theme(self.document.as_ref(), resolved);
    }

    /// Show header translucency.
    pub fn apply_translucency(&self, translucent: bool) {
        binding::apply_translucency(self.document.as_ref(), translucent);
    }

    /// Show `font` as the only font class.
    pub fn apply_font(&self, font: Font) {
        binding::apply_font(self.document.as_ref(), font);
    }

    /// Show `data_uri` as the page background, or none.
    pub fn apply_background(&self, data_uri: Option<&str>) {
        binding::apply_background(self.document.as_ref(), data_uri);
    }

    /// The platform dark-mode preference changed.
    ///
    /// Only re-applied while the stored theme is `system` or absent.
    pub fn color_scheme_changed(&self, prefers_dark: bool) {
        let theme = self.store.read::<Theme>().unwrap_or_default();
        if !theme.follows_platform() {
            debug!(?theme, "explicit theme ignores platform change");
            return;
        }
        binding::apply_theme(self.document.as_ref(), theme.resolve(prefers_dark));
    }

    /// Settings entry point activated.
    pub fn open_settings(&self) {
        match self.panel() {
            Some(panel) => panel.open(),
            None => debug!("no settings panel to open"),
        }
    }

    /// Close the settings panel, if mounted.
    pub fn close_settings(&self) {
        if let Some(panel) = self.panel() {
            panel.close();
        }
    }

    /// The mounted panel, if this instance owns one.
    pub fn panel(&self) -> Option<Rc<Panel>> {
        self.panel.borrow().clone()
    }

    /// Shared store handle.
    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Document this instance presents into.
    pub fn presentation(&self) -> &dyn DocumentPort {
        self.document.as_ref()
    }

    /// Config this instance was started with.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Stored preferences with defaults filled in.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            theme: self.store.read::<Theme>().unwrap_or_default(),
            translucency: self.store.read::<Translucency>().unwrap_or_default().0,
            font: self.store.read::<Font>().unwrap_or_default(),
            has_background_image: self
                .store
                .get_non_empty(PrefKey::BackgroundImage)
                .is_some(),
            background_image_name: self.store.get_non_empty(PrefKey::BackgroundImageName),
        }
    }
}

/// Adapt an `Application` method into a panel handler holding a weak reference.
fn forward<T: 'static>(
    app: &Weak<Application>,
    apply: fn(&Application, T),
) -> impl Fn(T) + 'static {
    let app = app.clone();
    move |value| {
        if let Some(app) = app.upgrade() {
            apply(&app, value);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use crate::testing::{FixedPlatform, MemoryDocument};

    fn boot(items: &[(&str, &str)], prefers_dark: bool) -> (Rc<Application>, Rc<MemoryDocument>) {
        let doc = Rc::new(MemoryDocument::new());
        let store = PreferenceStore::new(Rc::new(MemoryBackend::with_items(
            items.iter().copied(),
        )));
        let app = Application::start(
            WidgetConfig::default(),
            store,
            doc.clone(),
            Rc::new(FixedPlatform::new(prefers_dark, 2026)),
        );
        (app, doc)
    }

    #[test]
    fn chrome_carries_config_and_year() {
        let (_app, doc) = boot(&[], false);
        let chrome = doc.chrome();
        assert_eq!(chrome.len(), 1);
        assert_eq!(chrome[0].year, 2026);
        assert_eq!(chrome[0].title, "Settings Dialog");
    }

    #[test]
    fn every_notification_kind_is_wired_once() {
        let (app, _doc) = boot(&[], false);
        let panel = app.panel().unwrap();
        let events = panel.events();
        assert!(events.on_theme_change(|_| {}).is_err());
        assert!(events.on_translucency_change(|_| {}).is_err());
        assert!(events.on_font_change(|_| {}).is_err());
        assert!(events.on_background_change(|_| {}).is_err());
        assert!(events.on_reset_request(|()| {}).is_err());
    }

    #[test]
    fn snapshot_fills_defaults() {
        let (app, _doc) = boot(&[("font", "Roboto")], false);
        let snap = app.snapshot();
        assert_eq!(snap.theme, Theme::System);
        assert!(snap.translucency);
        assert_eq!(snap.font, Font::Roboto);
        assert!(!snap.has_background_image);
    }

    #[test]
    fn dropped_application_stops_reacting() {
        let (app, doc) = boot(&[], false);
        let panel = app.panel();
        drop(app);
        if let Some(panel) = panel {
            panel.select_font(Font::Roboto);
        }
        assert_eq!(doc.font_classes(), ["font-OneUISans"]);
    }
}
