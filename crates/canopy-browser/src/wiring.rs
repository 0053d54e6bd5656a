// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! DOM event listeners feeding the controller and the panel.
//!
//! Listeners live for the page and are leaked with `Closure::forget`. Each
//! holds a `Weak` reference, so a dropped controller turns them into no-ops.

use std::rc::{Rc, Weak};

use canopy_core::{Application, Font, Panel, Preference, Theme};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement,
    MediaQueryListEvent,
};

use crate::encoder::FileReaderEncoder;
use crate::markup::{
    CHOOSE_BACKGROUND_ID, CLEAR_BACKGROUND_ID, CLOSE_BUTTON_ID, FONT_SELECT_ID, IMAGE_INPUT_ID,
    RESET_BUTTON_ID, SETTINGS_BUTTON_ID, THEME_SELECT_ID, TRANSLUCENCY_TOGGLE_ID,
};
use crate::panel_view::ShadowPanelView;
use crate::platform::WebPlatform;

/// Attach `handler` for `kind` events on `target` for the page lifetime.
fn listen<E>(target: &EventTarget, kind: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    if target
        .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
        .is_err()
    {
        debug!(kind, "listener rejected");
    }
    callback.forget();
}

/// Run `action` against the panel if it is still alive.
fn on_panel(panel: &Weak<Panel>, action: impl Fn(&Panel) + 'static) -> impl FnMut(Event) + 'static {
    let panel = panel.clone();
    move |_event| {
        if let Some(panel) = panel.upgrade() {
            action(&panel);
        }
    }
}

/// Settings entry point and platform color-scheme changes.
pub fn wire_page(app: &Rc<Application>, document: &Document, platform: &WebPlatform) {
    match document.get_element_by_id(SETTINGS_BUTTON_ID) {
        Some(button) => {
            let app = Rc::downgrade(app);
            listen(&button, "click", move |_: Event| {
                if let Some(app) = app.upgrade() {
                    app.open_settings();
                }
            });
        }
        None => debug!("no settings entry point on page"),
    }

    match platform.dark_scheme_query() {
        Some(query) => {
            let app = Rc::downgrade(app);
            listen(&query, "change", move |event: MediaQueryListEvent| {
                if let Some(app) = app.upgrade() {
                    app.color_scheme_changed(event.matches());
                }
            });
        }
        None => debug!("color-scheme changes will not be tracked"),
    }
}

/// Every control inside the panel's shadow root.
pub fn wire_panel(panel: &Rc<Panel>, view: &ShadowPanelView) {
    let weak = Rc::downgrade(panel);

    if let Some(select) = view.by_id::<HtmlSelectElement>(THEME_SELECT_ID) {
        let source = select.clone();
        listen(
            &select,
            "change",
            on_panel(&weak, move |panel| match Theme::decode(&source.value()) {
                Some(theme) => panel.select_theme(theme),
                None => debug!(value = %source.value(), "unknown theme option"),
            }),
        );
    }

    if let Some(toggle) = view.by_id::<HtmlInputElement>(TRANSLUCENCY_TOGGLE_ID) {
        let source = toggle.clone();
        listen(
            &toggle,
            "change",
            on_panel(&weak, move |panel| panel.set_translucency(source.checked())),
        );
    }

    if let Some(select) = view.by_id::<HtmlSelectElement>(FONT_SELECT_ID) {
        let source = select.clone();
        listen(
            &select,
            "change",
            on_panel(&weak, move |panel| match Font::decode(&source.value()) {
                Some(font) => panel.select_font(font),
                None => debug!(value = %source.value(), "unknown font option"),
            }),
        );
    }

    wire_background(&weak, view);

    if let Some(button) = view.by_id::<HtmlElement>(RESET_BUTTON_ID) {
        listen(&button, "click", on_panel(&weak, Panel::reset));
    }
    if let Some(button) = view.by_id::<HtmlElement>(CLOSE_BUTTON_ID) {
        listen(&button, "click", on_panel(&weak, Panel::close));
    }
    if let Some(backdrop) = view.backdrop() {
        listen(&backdrop, "click", on_panel(&weak, Panel::close));
    }

    if let Some(dialog) = view.dialog() {
        let cancelled = weak.clone();
        listen(&dialog, "cancel", move |event: Event| {
            event.prevent_default();
            if let Some(panel) = cancelled.upgrade() {
                panel.cancel();
            }
        });

        // Transitions of descendants bubble up; only the dialog's own count.
        let own = JsValue::from(dialog.clone());
        let finished = weak.clone();
        listen(&dialog, "transitionend", move |event: Event| {
            let is_dialog = event.target().is_some_and(|target| JsValue::from(target) == own);
            if !is_dialog {
                return;
            }
            if let Some(panel) = finished.upgrade() {
                panel.transition_finished();
            }
        });
    }
}

fn wire_background(panel: &Weak<Panel>, view: &ShadowPanelView) {
    let Some(input) = view.by_id::<HtmlInputElement>(IMAGE_INPUT_ID) else {
        return;
    };

    if let Some(button) = view.by_id::<HtmlElement>(CHOOSE_BACKGROUND_ID) {
        let picker = input.clone();
        listen(&button, "click", move |_: Event| picker.click());
    }

    let source = input.clone();
    let picked = panel.clone();
    listen(&input, "change", move |_: Event| {
        let Some(file) = source.files().and_then(|files| files.get(0)) else {
            debug!("file picker closed without a selection");
            return;
        };
        if let Some(panel) = picked.upgrade() {
            panel.pick_background(&FileReaderEncoder, file);
        }
    });

    if let Some(button) = view.by_id::<HtmlElement>(CLEAR_BACKGROUND_ID) {
        listen(&button, "click", on_panel(panel, Panel::clear_background));
    }
}
