// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! [`PanelView`] rendering into the panel's shadow root.

use canopy_core::panel_view::PanelView;
use canopy_core::{Font, Preference, Theme};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDialogElement, HtmlInputElement, HtmlSelectElement, ShadowRoot};

use crate::markup::{
    BACKDROP_SELECTOR, BACKGROUND_STATUS_ID, DIALOG_SELECTOR, FONT_SELECT_ID, IMAGE_INPUT_ID,
    THEME_SELECT_ID, TRANSLUCENCY_TOGGLE_ID,
};

/// Panel controls and dialog chrome inside an open shadow root.
///
/// Every lookup is live; a control removed by page script turns the
/// corresponding call into a logged no-op.
#[derive(Debug, Clone)]
pub struct ShadowPanelView {
    root: ShadowRoot,
}

impl ShadowPanelView {
    /// View over `root`, which must already hold the panel markup.
    pub fn new(root: ShadowRoot) -> Self {
        Self { root }
    }

    /// The shadow root itself, for event wiring.
    pub fn root(&self) -> &ShadowRoot {
        &self.root
    }

    /// Element with `id`, cast to `T`.
    pub fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        let found = self
            .root
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<T>().ok());
        if found.is_none() {
            debug!(id, "panel control missing");
        }
        found
    }

    /// The `<dialog>` element.
    pub fn dialog(&self) -> Option<HtmlDialogElement> {
        self.select(DIALOG_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlDialogElement>().ok())
    }

    /// The backdrop behind the dialog.
    pub fn backdrop(&self) -> Option<Element> {
        self.select(BACKDROP_SELECTOR)
    }

    fn select(&self, selector: &str) -> Option<Element> {
        let found = self.root.query_selector(selector).ok().flatten();
        if found.is_none() {
            debug!(selector, "panel element missing");
        }
        found
    }
}

fn swap_classes(el: &Element, remove: &str, add: &str) {
    let classes = el.class_list();
    let _ = classes.remove_1(remove);
    let _ = classes.add_1(add);
}

impl PanelView for ShadowPanelView {
    fn show_theme(&self, theme: Theme) {
        if let Some(select) = self.by_id::<HtmlSelectElement>(THEME_SELECT_ID) {
            select.set_value(theme.encode());
        }
    }

    fn show_translucency(&self, translucent: bool) {
        if let Some(toggle) = self.by_id::<HtmlInputElement>(TRANSLUCENCY_TOGGLE_ID) {
            toggle.set_checked(translucent);
        }
    }

    fn show_font(&self, font: Font) {
        if let Some(select) = self.by_id::<HtmlSelectElement>(FONT_SELECT_ID) {
            select.set_value(font.encode());
        }
    }

    fn show_background_status(&self, text: &str) {
        if let Some(status) = self.by_id::<Element>(BACKGROUND_STATUS_ID) {
            status.set_text_content(Some(text));
        }
    }

    fn clear_file_input(&self) {
        if let Some(input) = self.by_id::<HtmlInputElement>(IMAGE_INPUT_ID) {
            input.set_value("");
        }
    }

    fn present_dialog(&self) {
        let (Some(dialog), Some(backdrop)) = (self.dialog(), self.backdrop()) else {
            return;
        };
        swap_classes(&dialog, "closing", "open");
        swap_classes(&backdrop, "hidden", "show");
        // Re-opening during the exit animation keeps the existing modal session.
        if !dialog.open() && dialog.show_modal().is_err() {
            debug!("showModal refused; dialog shown without modal semantics");
            dialog.set_open(true);
        }
    }

    fn begin_dismiss(&self) {
        if let Some(dialog) = self.dialog() {
            swap_classes(&dialog, "open", "closing");
        }
    }

    fn finish_dismiss(&self) {
        if let Some(backdrop) = self.backdrop() {
            swap_classes(&backdrop, "show", "hidden");
        }
        if let Some(dialog) = self.dialog() {
            dialog.close();
        }
    }
}
