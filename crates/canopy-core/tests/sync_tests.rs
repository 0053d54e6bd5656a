// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end settings sync: store <-> panel <-> controller <-> document.
#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use canopy_core::binding::{CUSTOM_BACKGROUND_CLASS, NO_TRANSLUCENCY_CLASS, TRANSLUCENT_CLASS};
use canopy_core::dialog::DialogState;
use canopy_core::panel::{STATUS_CUSTOM, STATUS_NONE};
use canopy_core::platform::Platform;
use canopy_core::testing::{DeferredEncoder, FixedPlatform, MemoryDocument, PickedFile};
use canopy_core::{
    Application, Font, MemoryBackend, PrefKey, PreferenceStore, Theme, WidgetConfig,
};

struct Page {
    app: Rc<Application>,
    doc: Rc<MemoryDocument>,
    backend: Rc<MemoryBackend>,
    platform: Rc<FixedPlatform>,
}

impl Page {
    fn load(backend: Rc<MemoryBackend>, prefers_dark: bool) -> Self {
        let doc = Rc::new(MemoryDocument::new());
        let platform = Rc::new(FixedPlatform::new(prefers_dark, 2025));
        let app = Application::start(
            WidgetConfig::default(),
            PreferenceStore::new(backend.clone()),
            doc.clone(),
            platform.clone(),
        );
        Self {
            app,
            doc,
            backend,
            platform,
        }
    }

    fn fresh() -> Self {
        Self::load(Rc::new(MemoryBackend::new()), false)
    }

    fn reload(self) -> Self {
        let prefers_dark = self.platform.prefers_dark();
        Self::load(self.backend, prefers_dark)
    }
}

fn assert_default_presentation(page: &Page) {
    assert!(page.doc.has_body_class("light"));
    assert!(!page.doc.has_body_class("dark"));
    assert_eq!(page.doc.theme_color().as_deref(), Some("#ffffff"));
    assert!(page.doc.has_header_class(TRANSLUCENT_CLASS));
    assert!(!page.doc.has_header_class(NO_TRANSLUCENCY_CLASS));
    assert_eq!(page.doc.font_classes(), ["font-OneUISans"]);
    assert_eq!(page.doc.body_style("background-image").as_deref(), Some("none"));
    assert!(!page.doc.has_body_class(CUSTOM_BACKGROUND_CLASS));

    let shown = page.doc.panel_view().unwrap().snapshot();
    assert_eq!(shown.theme, Some(Theme::System));
    assert_eq!(shown.translucency, Some(true));
    assert_eq!(shown.font, Some(Font::OneUiSans));
    assert_eq!(shown.status, STATUS_NONE);
}

#[test]
fn empty_store_yields_documented_defaults_and_stays_empty() {
    let page = Page::fresh();
    assert_default_presentation(&page);
    assert!(page.backend.is_empty());
}

#[test]
fn stored_values_are_applied_and_reflected() {
    let backend = Rc::new(MemoryBackend::with_items([
        ("theme", "dark"),
        ("translucency", "false"),
        ("font", "Open Sans"),
        ("customBackgroundImage", "data:image/png,abc"),
        ("backgroundImageName", "sky.png"),
    ]));
    let page = Page::load(backend, false);
    assert!(page.doc.has_body_class("dark"));
    assert_eq!(page.doc.theme_color().as_deref(), Some("#121212"));
    assert!(page.doc.has_header_class(NO_TRANSLUCENCY_CLASS));
    assert_eq!(page.doc.font_classes(), ["font-Open-Sans"]);
    assert_eq!(
        page.doc.body_style("background-image").as_deref(),
        Some("url('data:image/png,abc')")
    );
    let shown = page.doc.panel_view().unwrap().snapshot();
    assert_eq!(shown.theme, Some(Theme::Dark));
    assert_eq!(shown.translucency, Some(false));
    assert_eq!(shown.font, Some(Font::OpenSans));
    assert_eq!(shown.status, "sky.png");
}

#[test]
fn image_without_name_reports_custom_status() {
    let backend = Rc::new(MemoryBackend::with_items([(
        "customBackgroundImage",
        "data:image/png,abc",
    )]));
    let page = Page::load(backend, false);
    assert_eq!(page.doc.panel_view().unwrap().snapshot().status, STATUS_CUSTOM);
}

#[test]
fn unrecognized_stored_values_fall_back_to_defaults() {
    let backend = Rc::new(MemoryBackend::with_items([
        ("theme", "sepia"),
        ("font", "Papyrus"),
        ("translucency", "maybe"),
    ]));
    let page = Page::load(backend, false);
    assert_default_presentation(&page);
    assert_eq!(page.backend.peek("theme").as_deref(), Some("sepia"));
}

#[test]
fn unavailable_storage_still_renders_defaults() {
    let backend = Rc::new(MemoryBackend::new());
    backend.set_unavailable(true);
    let page = Page::load(backend, false);
    assert_default_presentation(&page);
    let panel = page.app.panel().unwrap();
    panel.select_font(Font::Roboto);
    assert_eq!(page.doc.font_classes(), ["font-Roboto"]);
}

#[test]
fn explicit_theme_ignores_platform_changes() {
    for (stored, class) in [("light", "light"), ("dark", "dark")] {
        let page = Page::load(Rc::new(MemoryBackend::with_items([("theme", stored)])), false);
        page.platform.set_prefers_dark(true);
        page.app.color_scheme_changed(true);
        assert!(page.doc.has_body_class(class));
        page.platform.set_prefers_dark(false);
        page.app.color_scheme_changed(false);
        assert!(page.doc.has_body_class(class));
    }
}

#[test]
fn system_or_unset_theme_tracks_platform() {
    let unset = Page::fresh();
    let system = Page::load(Rc::new(MemoryBackend::with_items([("theme", "system")])), false);
    for page in [&unset, &system] {
        page.app.color_scheme_changed(true);
        assert!(page.doc.has_body_class("dark"));
        assert!(!page.doc.has_body_class("light"));
        page.app.color_scheme_changed(false);
        assert!(page.doc.has_body_class("light"));
        assert!(!page.doc.has_body_class("dark"));
    }
}

#[test]
fn switching_to_explicit_theme_stops_tracking() {
    let page = Page::fresh();
    let panel = page.app.panel().unwrap();
    panel.select_theme(Theme::Light);
    page.app.color_scheme_changed(true);
    assert!(page.doc.has_body_class("light"));
    panel.select_theme(Theme::System);
    page.app.color_scheme_changed(true);
    assert!(page.doc.has_body_class("dark"));
}

#[test]
fn panel_edits_persist_and_reach_the_document() {
    let page = Page::fresh();
    let panel = page.app.panel().unwrap();

    panel.select_theme(Theme::Dark);
    panel.set_translucency(false);
    panel.select_font(Font::System);

    assert_eq!(page.backend.peek("theme").as_deref(), Some("dark"));
    assert_eq!(page.backend.peek("translucency").as_deref(), Some("false"));
    assert_eq!(page.backend.peek("font").as_deref(), Some("system"));
    assert!(page.doc.has_body_class("dark"));
    assert!(page.doc.has_header_class(NO_TRANSLUCENCY_CLASS));
    assert_eq!(page.doc.font_classes(), ["font-system"]);
}

#[test]
fn font_changes_keep_a_single_font_class() {
    let page = Page::fresh();
    page.app.apply_font(Font::Roboto);
    page.app.apply_font(Font::OpenSans);
    assert_eq!(page.doc.font_classes(), ["font-Open-Sans"]);
}

#[test]
fn choosing_then_clearing_a_background() {
    let page = Page::fresh();
    let panel = page.app.panel().unwrap();
    let view = page.doc.panel_view().unwrap();
    let encoder = DeferredEncoder::new();

    panel.pick_background(&encoder, PickedFile::png("photo.png", b"\x89PNG"));
    // Nothing happens until the encoder calls back.
    assert_eq!(view.snapshot().status, STATUS_NONE);
    assert_eq!(page.backend.peek("customBackgroundImage"), None);
    assert_eq!(view.snapshot().file_input_clears, 1);

    assert!(encoder.complete_next());
    let stored = page.backend.peek("customBackgroundImage").unwrap();
    assert!(!stored.is_empty());
    assert_eq!(page.backend.peek("backgroundImageName").as_deref(), Some("photo.png"));
    assert_eq!(view.snapshot().status, "photo.png");
    assert_eq!(
        page.doc.body_style("background-image"),
        Some(format!("url('{stored}')"))
    );
    assert!(page.doc.has_body_class(CUSTOM_BACKGROUND_CLASS));

    panel.clear_background();
    assert_eq!(page.backend.peek("customBackgroundImage"), None);
    assert_eq!(page.backend.peek("backgroundImageName"), None);
    assert_eq!(view.snapshot().status, STATUS_NONE);
    assert_eq!(page.doc.body_style("background-image").as_deref(), Some("none"));
}

#[test]
fn background_survives_reload() {
    let page = Page::fresh();
    let encoder = DeferredEncoder::new();
    page.app
        .panel()
        .unwrap()
        .pick_background(&encoder, PickedFile::png("photo.png", b"1"));
    encoder.complete_next();

    let page = page.reload();
    assert_eq!(page.doc.panel_view().unwrap().snapshot().status, "photo.png");
    assert!(page.doc.has_body_class(CUSTOM_BACKGROUND_CLASS));
}

#[test]
fn reset_clears_everything_and_reloads_into_defaults() {
    let page = Page::fresh();
    let panel = page.app.panel().unwrap();
    let encoder = DeferredEncoder::new();
    panel.select_theme(Theme::Dark);
    panel.set_translucency(false);
    panel.select_font(Font::Roboto);
    panel.pick_background(&encoder, PickedFile::png("photo.png", b"1"));
    encoder.complete_next();
    for key in PrefKey::ALL {
        assert!(page.backend.peek(key.as_str()).is_some(), "{key} not stored");
    }

    panel.reset();
    for key in PrefKey::ALL {
        assert_eq!(page.backend.peek(key.as_str()), None, "{key} survived reset");
    }
    assert_eq!(page.platform.reloads(), 1);

    let page = page.reload();
    assert_default_presentation(&page);
}

#[test]
fn open_then_immediate_close_waits_for_animation() {
    let page = Page::fresh();
    let panel = page.app.panel().unwrap();
    let view = page.doc.panel_view().unwrap();

    page.app.open_settings();
    assert!(panel.is_open());
    assert!(view.snapshot().dialog.modal);
    panel.close();

    assert_eq!(panel.state(), DialogState::Closing);
    assert!(view.snapshot().dialog.modal);
    assert!(view.snapshot().dialog.backdrop_visible);
    assert!(view.snapshot().dialog.closing_class);

    panel.transition_finished();
    assert_eq!(panel.state(), DialogState::Closed);
    assert!(!view.snapshot().dialog.modal);
    assert!(!view.snapshot().dialog.backdrop_visible);
}

#[test]
fn second_mount_on_same_page_does_not_duplicate() {
    let doc = Rc::new(MemoryDocument::new());
    let backend = Rc::new(MemoryBackend::new());
    let platform = Rc::new(FixedPlatform::new(false, 2025));
    let start = || {
        Application::start(
            WidgetConfig::default(),
            PreferenceStore::new(backend.clone()),
            doc.clone(),
            platform.clone(),
        )
    };
    let first = start();
    let second = start();
    assert!(first.panel().is_some());
    assert!(second.panel().is_none());
    assert_eq!(doc.chrome().len(), 1);
    assert_eq!(doc.head_nodes().len(), WidgetConfig::default().dependencies.len());

    // The second instance still keeps the page presentation consistent.
    second.open_settings();
    assert_eq!(doc.font_classes(), ["font-OneUISans"]);
}
