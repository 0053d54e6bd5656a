// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory implementations of every port, for tests and headless hosts.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use crate::deps::HeadDependency;
use crate::document::{Chrome, DocumentPort, PanelMount, CHROME_SELECTOR};
use crate::encode::{EncodeCallback, EncodeError, ImageEncoder};
use crate::panel_view::PanelView;
use crate::platform::Platform;
use crate::prefs::{Font, Theme, FONT_CLASS_PREFIX};

#[derive(Debug, Default)]
struct DocState {
    present: BTreeSet<String>,
    head: Vec<HeadDependency>,
    chrome: Vec<Chrome>,
    body_classes: Vec<String>,
    body_style: BTreeMap<String, String>,
    header_classes: BTreeSet<String>,
    theme_color: Option<String>,
    panel: Option<Rc<RecordingPanelView>>,
}

/// [`DocumentPort`] over plain collections.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: RefCell<DocState>,
}

impl MemoryDocument {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `selector` as matching an existing node.
    pub fn mark_present(&self, selector: &str) {
        self.state.borrow_mut().present.insert(selector.to_owned());
    }

    /// Dependencies appended so far, in order.
    pub fn head_nodes(&self) -> Vec<HeadDependency> {
        self.state.borrow().head.clone()
    }

    /// Chrome injections so far.
    pub fn chrome(&self) -> Vec<Chrome> {
        self.state.borrow().chrome.clone()
    }

    /// Whether the body carries `class`.
    pub fn has_body_class(&self, class: &str) -> bool {
        self.state.borrow().body_classes.iter().any(|c| c == class)
    }

    /// Body classes starting with `font-`.
    pub fn font_classes(&self) -> Vec<String> {
        self.state
            .borrow()
            .body_classes
            .iter()
            .filter(|c| c.starts_with(FONT_CLASS_PREFIX))
            .cloned()
            .collect()
    }

    /// Inline body style value.
    pub fn body_style(&self, property: &str) -> Option<String> {
        self.state.borrow().body_style.get(property).cloned()
    }

    /// Whether the header carries `class`.
    pub fn has_header_class(&self, class: &str) -> bool {
        self.state.borrow().header_classes.contains(class)
    }

    /// Last theme color written.
    pub fn theme_color(&self) -> Option<String> {
        self.state.borrow().theme_color.clone()
    }

    /// View of the mounted panel, if any.
    pub fn panel_view(&self) -> Option<Rc<RecordingPanelView>> {
        self.state.borrow().panel.clone()
    }
}

impl DocumentPort for MemoryDocument {
    fn contains(&self, selector: &str) -> bool {
        self.state.borrow().present.contains(selector)
    }

    fn append_head_node(&self, dep: &HeadDependency) {
        let mut state = self.state.borrow_mut();
        state.present.insert(dep.presence_selector());
        state.head.push(dep.clone());
    }

    fn inject_chrome(&self, chrome: &Chrome) {
        let mut state = self.state.borrow_mut();
        state.present.insert(CHROME_SELECTOR.to_owned());
        state.chrome.push(chrome.clone());
    }

    fn mount_panel(&self) -> PanelMount {
        let mut state = self.state.borrow_mut();
        if state.panel.is_some() {
            return PanelMount::AlreadyRegistered;
        }
        let view = Rc::new(RecordingPanelView::new());
        state.panel = Some(view.clone());
        PanelMount::Mounted(view)
    }

    fn body_classes(&self) -> Vec<String> {
        self.state.borrow().body_classes.clone()
    }

    fn add_body_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.body_classes.iter().any(|c| c == class) {
            state.body_classes.push(class.to_owned());
        }
    }

    fn remove_body_class(&self, class: &str) {
        self.state.borrow_mut().body_classes.retain(|c| c != class);
    }

    fn set_body_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .body_style
            .insert(property.to_owned(), value.to_owned());
    }

    fn remove_body_style(&self, property: &str) {
        self.state.borrow_mut().body_style.remove(property);
    }

    fn set_header_class(&self, class: &str, present: bool) {
        let mut state = self.state.borrow_mut();
        if present {
            state.header_classes.insert(class.to_owned());
        } else {
            state.header_classes.remove(class);
        }
    }

    fn set_theme_color(&self, color: &str) {
        self.state.borrow_mut().theme_color = Some(color.to_owned());
    }
}

/// Dialog chrome as last rendered by a [`RecordingPanelView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogVisual {
    /// Modal semantics attached.
    pub modal: bool,
    /// `open` class present.
    pub open_class: bool,
    /// `closing` class present.
    pub closing_class: bool,
    /// Backdrop visible.
    pub backdrop_visible: bool,
}

/// Everything a [`RecordingPanelView`] has been told to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSnapshot {
    /// Theme menu value.
    pub theme: Option<Theme>,
    /// Translucency toggle value.
    pub translucency: Option<bool>,
    /// Font menu value.
    pub font: Option<Font>,
    /// Background status text.
    pub status: String,
    /// Times the file input was reset.
    pub file_input_clears: usize,
    /// Dialog chrome.
    pub dialog: DialogVisual,
}

/// [`PanelView`] that records what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingPanelView {
    shown: RefCell<PanelSnapshot>,
}

impl RecordingPanelView {
    /// Blank view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current rendering.
    pub fn snapshot(&self) -> PanelSnapshot {
        self.shown.borrow().clone()
    }
}

impl PanelView for RecordingPanelView {
    fn show_theme(&self, theme: Theme) {
        self.shown.borrow_mut().theme = Some(theme);
    }

    fn show_translucency(&self, translucent: bool) {
        self.shown.borrow_mut().translucency = Some(translucent);
    }

    fn show_font(&self, font: Font) {
        self.shown.borrow_mut().font = Some(font);
    }

    fn show_background_status(&self, text: &str) {
        text.clone_into(&mut self.shown.borrow_mut().status);
    }

    fn clear_file_input(&self) {
        self.shown.borrow_mut().file_input_clears += 1;
    }

    fn present_dialog(&self) {
        self.shown.borrow_mut().dialog = DialogVisual {
            modal: true,
            open_class: true,
            closing_class: false,
            backdrop_visible: true,
        };
    }

    fn begin_dismiss(&self) {
        let mut shown = self.shown.borrow_mut();
        shown.dialog.open_class = false;
        shown.dialog.closing_class = true;
    }

    fn finish_dismiss(&self) {
        let mut shown = self.shown.borrow_mut();
        shown.dialog.modal = false;
        shown.dialog.backdrop_visible = false;
    }
}

/// [`Platform`] with a settable color scheme and a reload counter.
#[derive(Debug)]
pub struct FixedPlatform {
    prefers_dark: Cell<bool>,
    reloads: Cell<usize>,
    year: i32,
}

impl FixedPlatform {
    /// Platform reporting `prefers_dark` and `year`.
    pub fn new(prefers_dark: bool, year: i32) -> Self {
        Self {
            prefers_dark: Cell::new(prefers_dark),
            reloads: Cell::new(0),
            year,
        }
    }

    /// Change the reported color scheme (does not notify anyone).
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.set(prefers_dark);
    }

    /// Reload requests so far.
    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl Platform for FixedPlatform {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}

/// A file handed to [`DeferredEncoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime: String,
    /// Contents.
    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// `image/png` file.
    pub fn png(name: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_owned(),
            mime: "image/png".to_owned(),
            bytes: bytes.to_vec(),
        }
    }

    /// Data URI carrying the contents fully percent-encoded.
    pub fn data_uri(&self) -> String {
        let body: String = self.bytes.iter().map(|b| format!("%{b:02X}")).collect();
        format!("data:{},{body}", self.mime)
    }
}

/// [`ImageEncoder`] that parks continuations until the test releases them.
#[derive(Default)]
pub struct DeferredEncoder {
    pending: RefCell<VecDeque<(PickedFile, EncodeCallback)>>,
}

impl std::fmt::Debug for DeferredEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredEncoder")
            .field("pending", &self.pending())
            .finish()
    }
}

impl DeferredEncoder {
    /// Encoder with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodings waiting for release.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Complete the oldest pending encoding successfully.
    ///
    /// Returns `false` if nothing was pending.
    pub fn complete_next(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((file, done)) => {
                done(Ok(file.data_uri()));
                true
            }
            None => false,
        }
    }

    /// Fail the oldest pending encoding with `err`.
    pub fn fail_next(&self, err: EncodeError) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((_, done)) => {
                done(Err(err));
                true
            }
            None => false,
        }
    }
}

impl ImageEncoder for DeferredEncoder {
    type File = PickedFile;

    fn file_name(&self, file: &PickedFile) -> String {
        file.name.clone()
    }

    fn encode(&self, file: PickedFile, done: EncodeCallback) {
        self.pending.borrow_mut().push_back((file, done));
    }
}
