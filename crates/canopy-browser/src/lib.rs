// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Canopy browser host: mounts the settings widget into a live page.
//!
//! Provides the `web_sys` implementations of the `canopy-core` ports (the
//! document, the shadow-root panel view, the window platform, and the
//! `FileReader` encoder) plus the listeners that route DOM events into the
//! controller.
//!
//! # Usage (from JavaScript)
//!
//! ```js
//! import init, { mount } from 'canopy-browser';
//!
//! await init();
//! const settings = mount({ title: 'Docs', logLevel: 'debug' });
//! settings.openSettings();
//! ```
//!
//! Built with the `autostart` feature, the module mounts itself with the
//! default config once the document is interactive.

#![deny(missing_docs)]

mod dom;
mod encoder;
mod logging;
mod markup;
mod panel_view;
mod platform;
mod wiring;

use std::cell::RefCell;
use std::rc::Rc;

use canopy_core::{Application, PreferenceStore, WidgetConfig};
use canopy_store_web::LocalStorageBackend;
use thiserror::Error;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

pub use dom::WebDocument;
pub use encoder::FileReaderEncoder;
pub use logging::{ConsoleMakeWriter, ConsoleWriter};
pub use panel_view::ShadowPanelView;
pub use platform::WebPlatform;

thread_local! {
    // Controllers stay alive for the page; listeners only hold weak refs.
    static MOUNTED: RefCell<Vec<Rc<Application>>> = const { RefCell::new(Vec::new()) };
}

/// Why a mount could not start.
#[derive(Debug, Error)]
pub enum MountError {
    /// Not running in a window context.
    #[error("no global window")]
    NoWindow,
    /// The window has no document.
    #[error("window has no document")]
    NoDocument,
    /// Called before `<body>` exists.
    #[error("document has no body yet")]
    NoBody,
    /// The config object did not decode.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Decode a JS config object; `undefined`/`null` yield the defaults.
fn parse_config(config: JsValue) -> Result<WidgetConfig, MountError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WidgetConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|err| MountError::Config(err.to_string()))
}

fn open_store() -> PreferenceStore {
    match LocalStorageBackend::open() {
        Ok(backend) => PreferenceStore::new(Rc::new(backend)),
        Err(err) => {
            warn!(%err, "localStorage unavailable; settings last for this page only");
            PreferenceStore::in_memory()
        }
    }
}

/// Mount the widget into the current page with `config`.
pub fn mount_with(config: WidgetConfig) -> Result<Rc<Application>, MountError> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();
    logging::init(config.log_level);

    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    let page = Rc::new(WebDocument::new(document.clone()).ok_or(MountError::NoBody)?);
    let platform = WebPlatform::new(window);

    let app = Application::start(config, open_store(), page.clone(), Rc::new(platform.clone()));
    wiring::wire_page(&app, &document, &platform);
    if let (Some(panel), Some(view)) = (app.panel(), page.mounted_view()) {
        wiring::wire_panel(&panel, &view);
    }

    MOUNTED.with(|mounted| mounted.borrow_mut().push(app.clone()));
    info!(title = %app.config().title, "mounted");
    Ok(app)
}

/// Mount the widget. `config` is an optional object with `title`, `credit`,
/// `dependencies`, and `logLevel` fields.
///
/// # Errors
/// Rejects a malformed config or a page without a window, document, or body.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<SettingsHandle, JsError> {
    let config = parse_config(config).map_err(|e| JsError::new(&e.to_string()))?;
    let app = mount_with(config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(SettingsHandle { app })
}

/// JS handle over a mounted widget.
#[wasm_bindgen]
pub struct SettingsHandle {
    app: Rc<Application>,
}

#[wasm_bindgen]
impl SettingsHandle {
    /// Open the settings dialog.
    #[wasm_bindgen(js_name = openSettings)]
    pub fn open_settings(&self) {
        self.app.open_settings();
    }

    /// Close the settings dialog (animated).
    #[wasm_bindgen(js_name = closeSettings)]
    pub fn close_settings(&self) {
        self.app.close_settings();
    }

    /// Whether the dialog is opening or open.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.app.panel().is_some_and(|panel| panel.is_open())
    }

    /// Stored preferences with defaults filled in, as a plain object.
    ///
    /// # Errors
    /// Only if the snapshot cannot be converted to a JS value.
    pub fn settings(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.app.snapshot()).map_err(|e| JsError::new(&e.to_string()))
    }
}

#[cfg(feature = "autostart")]
fn autostart() {
    if let Err(err) = mount_with(WidgetConfig::default()) {
        tracing::error!(%err, "autostart mount failed");
    }
}

/// `document.readyState` before `DOMContentLoaded`.
#[cfg(feature = "autostart")]
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Module start: mount once the document is interactive.
#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn start() {
    logging::init(WidgetConfig::default().log_level);
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        tracing::error!("no document to mount into");
        return;
    };
    if !still_parsing(&document.ready_state()) {
        autostart();
        return;
    }
    let ready = Closure::once_into_js(autostart);
    if document
        .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())
        .is_err()
    {
        tracing::error!("could not wait for DOMContentLoaded");
    }
}
