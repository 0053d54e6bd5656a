// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The settings panel: an isolated component that owns its controls.
//!
//! The panel reads and writes the store itself but never touches the global
//! document. Every edit is persisted first and then broadcast through
//! [`PanelEvents`], so whoever hosts the panel decides what the edit means
//! for the page.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::dialog::{DialogEffect, DialogMachine, DialogState};
use crate::encode::{EncodeError, ImageEncoder};
use crate::events::PanelEvents;
use crate::panel_view::PanelView;
use crate::prefs::{Font, PrefKey, Theme, Translucency};
use crate::store::PreferenceStore;

/// Status text when no background image is stored.
pub const STATUS_NONE: &str = "None selected";
/// Status text when an image is stored without a name.
pub const STATUS_CUSTOM: &str = "Custom image applied";

/// Background status text implied by the store's current contents.
pub fn background_status(store: &PreferenceStore) -> String {
    if store.get_non_empty(PrefKey::BackgroundImage).is_none() {
        return STATUS_NONE.to_owned();
    }
    store
        .get_non_empty(PrefKey::BackgroundImageName)
        .unwrap_or_else(|| STATUS_CUSTOM.to_owned())
}

/// Settings dialog component.
pub struct Panel {
    store: PreferenceStore,
    view: Rc<dyn PanelView>,
    events: PanelEvents,
    dialog: RefCell<DialogMachine>,
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("events", &self.events)
            .field("dialog", &self.dialog.borrow().state())
            .finish_non_exhaustive()
    }
}

impl Panel {
    /// Build a panel over `store` rendering into `view`.
    pub fn new(store: PreferenceStore, view: Rc<dyn PanelView>) -> Rc<Self> {
        Rc::new(Self {
            store,
            view,
            events: PanelEvents::default(),
            dialog: RefCell::new(DialogMachine::new()),
        })
    }

    /// Subscription table for this panel's notifications.
    pub fn events(&self) -> &PanelEvents {
        &self.events
    }

    /// Reflect stored values (or defaults) in every control. Never writes.
    pub fn initialize(&self) {
        self.view
            .show_theme(self.store.read::<Theme>().unwrap_or_default());
        self.view
            .show_translucency(self.store.read::<Translucency>().unwrap_or_default().0);
        self.view
            .show_font(self.store.read::<Font>().unwrap_or_default());
        self.view
            .show_background_status(&background_status(&self.store));
    }

    /// Theme menu changed.
    pub fn select_theme(&self, theme: Theme) {
        self.store.write(theme);
        self.events.emit_theme(theme);
    }

    /// Translucency toggle changed.
    pub fn set_translucency(&self, translucent: bool) {
        self.store.write(Translucency(translucent));
        self.events.emit_translucency(translucent);
    }

    /// Font menu changed.
    pub fn select_font(&self, font: Font) {
        self.store.write(font);
        self.events.emit_font(font);
    }

    /// A file was picked; start encoding it.
    ///
    /// Returns immediately. The status text stays as it was until the encoder
    /// calls back. Concurrent picks are not serialized: the last completion wins.
    pub fn pick_background<E>(self: &Rc<Self>, encoder: &E, file: E::File)
    where
        E: ImageEncoder + ?Sized,
    {
        let name = encoder.file_name(&file);
        self.view.clear_file_input();
        let panel = Rc::downgrade(self);
        encoder.encode(
            file,
            Box::new(move |result| match panel.upgrade() {
                Some(panel) => panel.complete_background_pick(&name, result),
                None => debug!(file = %name, "panel dropped before image was encoded"),
            }),
        );
    }

    /// Encoder finished for the file called `name`.
    pub fn complete_background_pick(&self, name: &str, result: Result<String, EncodeError>) {
        let data_uri = match result {
            Ok(data_uri) => data_uri,
            Err(err) => {
                warn!(%err, file = %name, "background image could not be read");
                return;
            }
        };
        match self.store.try_set(PrefKey::BackgroundImage, &data_uri) {
            // The name only describes a persisted image.
            Ok(()) => {
                if let Err(err) = self.store.try_set(PrefKey::BackgroundImageName, name) {
                    // A stale name would describe the new image.
                    warn!(%err, file = %name, "background name not persisted");
                    self.store.remove(PrefKey::BackgroundImageName);
                }
            }
            Err(err) => warn!(
                %err,
                file = %name,
                bytes = data_uri.len(),
                "background image shown but not persisted"
            ),
        }
        self.events.emit_background(Some(data_uri));
        self.view.show_background_status(name);
    }

    /// Clear button pressed.
    pub fn clear_background(&self) {
        self.store.remove(PrefKey::BackgroundImage);
        self.store.remove(PrefKey::BackgroundImageName);
        self.events.emit_background(None);
        self.view.show_background_status(STATUS_NONE);
    }

    /// Reset button pressed: forget everything, then ask the host to reload.
    pub fn reset(&self) {
        self.store.clear();
        self.events.emit_reset();
    }

    /// Open the dialog.
    pub fn open(&self) {
        let effect = self.dialog.borrow_mut().open();
        self.run(effect);
    }

    /// Close the dialog (animated).
    pub fn close(&self) {
        let effect = self.dialog.borrow_mut().close();
        self.run(effect);
    }

    /// Platform dismiss gesture. The host must suppress the platform default.
    pub fn cancel(&self) {
        self.close();
    }

    /// The dialog's enter/exit animation completed.
    pub fn transition_finished(&self) {
        let effect = self.dialog.borrow_mut().transition_finished();
        self.run(effect);
    }

    /// Current dialog state.
    pub fn state(&self) -> DialogState {
        self.dialog.borrow().state()
    }

    /// Whether the dialog counts as open.
    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    fn run(&self, effect: Option<DialogEffect>) {
        match effect {
            Some(DialogEffect::Present) => self.view.present_dialog(),
            Some(DialogEffect::BeginDismiss) => self.view.begin_dismiss(),
            Some(DialogEffect::FinishDismiss) => self.view.finish_dismiss(),
            None => {}
        }
    }
}
