// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! [`DocumentPort`] over the live `web_sys::Document`.

use std::cell::RefCell;
use std::rc::Rc;

use canopy_core::deps::HeadDependency;
use canopy_core::document::{Chrome, DocumentPort, PanelMount, CHROME_SELECTOR};
use tracing::{debug, warn};
use web_sys::{Document, Element, HtmlElement, ShadowRootInit, ShadowRootMode};

use crate::markup::{self, GLOBAL_STYLE_ID, PANEL_HOST_TAG};
use crate::panel_view::ShadowPanelView;

const THEME_COLOR_SELECTOR: &str = "meta[name=\"theme-color\"]";

/// The page document the controller presents into.
#[derive(Debug)]
pub struct WebDocument {
    document: Document,
    body: HtmlElement,
    mounted: RefCell<Option<Rc<ShadowPanelView>>>,
}

impl WebDocument {
    /// Wrap `document`. `None` until the body exists.
    pub fn new(document: Document) -> Option<Self> {
        let body = document.body()?;
        Some(Self {
            document,
            body,
            mounted: RefCell::new(None),
        })
    }

    /// Panel view created by [`DocumentPort::mount_panel`], once mounted.
    pub fn mounted_view(&self) -> Option<Rc<ShadowPanelView>> {
        self.mounted.borrow().clone()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(_) => {
                debug!(selector, "invalid selector");
                None
            }
        }
    }

    fn create(&self, tag: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok();
        if el.is_none() {
            warn!(tag, "could not create element");
        }
        el
    }

    fn append_to_head(&self, el: &Element) {
        let appended = self
            .document
            .head()
            .is_some_and(|head| head.append_child(el).is_ok());
        if !appended {
            debug!(tag = %el.tag_name(), "no head to append to");
        }
    }

    fn ensure_global_style(&self) {
        if self.document.get_element_by_id(GLOBAL_STYLE_ID).is_some() {
            return;
        }
        if let Some(style) = self.create("style") {
            style.set_id(GLOBAL_STYLE_ID);
            style.set_text_content(Some(markup::GLOBAL_CSS));
            self.append_to_head(&style);
        }
    }

    fn mount_shadow_host(&self) -> Option<ShadowPanelView> {
        let host = self.create(PANEL_HOST_TAG)?;
        let root = match host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open)) {
            Ok(root) => root,
            Err(_) => {
                warn!("attachShadow refused; settings panel not mounted");
                return None;
            }
        };
        root.set_inner_html(&markup::panel_html());
        if self.body.append_child(&host).is_err() {
            warn!("could not attach settings panel host");
            return None;
        }
        Some(ShadowPanelView::new(root))
    }
}

impl DocumentPort for WebDocument {
    fn contains(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn append_head_node(&self, dep: &HeadDependency) {
        let el = match dep {
            HeadDependency::Stylesheet { href, .. } => {
                let Some(link) = self.create("link") else {
                    return;
                };
                let _ = link.set_attribute("rel", "stylesheet");
                let _ = link.set_attribute("href", href);
                link
            }
            HeadDependency::ImportMap { json } => {
                let Some(script) = self.create("script") else {
                    return;
                };
                let _ = script.set_attribute("type", "importmap");
                script.set_text_content(Some(json));
                script
            }
            HeadDependency::ModuleScript { name, source } => {
                let Some(script) = self.create("script") else {
                    return;
                };
                let _ = script.set_attribute("type", "module");
                let _ = script.set_attribute("data-canopy-dep", name);
                script.set_text_content(Some(source));
                script
            }
        };
        self.append_to_head(&el);
    }

    fn inject_chrome(&self, chrome: &Chrome) {
        self.ensure_global_style();
        if self
            .body
            .insert_adjacent_html("afterbegin", &markup::chrome_html(chrome))
            .is_err()
        {
            warn!("could not inject page chrome");
        }
    }

    fn mount_panel(&self) -> PanelMount {
        if self.query(PANEL_HOST_TAG).is_some() {
            return PanelMount::AlreadyRegistered;
        }
        match self.mount_shadow_host() {
            Some(view) => {
                let view = Rc::new(view);
                *self.mounted.borrow_mut() = Some(view.clone());
                PanelMount::Mounted(view)
            }
            // Without a scope the controller runs panel-less, as for a duplicate.
            None => PanelMount::AlreadyRegistered,
        }
    }

    fn body_classes(&self) -> Vec<String> {
        self.body
            .class_name()
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    fn add_body_class(&self, class: &str) {
        let _ = self.body.class_list().add_1(class);
    }

    fn remove_body_class(&self, class: &str) {
        let _ = self.body.class_list().remove_1(class);
    }

    fn set_body_style(&self, property: &str, value: &str) {
        if self.body.style().set_property(property, value).is_err() {
            debug!(property, "inline style rejected");
        }
    }

    fn remove_body_style(&self, property: &str) {
        let _ = self.body.style().remove_property(property);
    }

    fn set_header_class(&self, class: &str, present: bool) {
        let Some(header) = self.query(CHROME_SELECTOR) else {
            debug!(class, "no header to restyle");
            return;
        };
        let classes = header.class_list();
        let _ = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }

    fn set_theme_color(&self, color: &str) {
        if let Some(meta) = self.query(THEME_COLOR_SELECTOR) {
            let _ = meta.set_attribute("content", color);
        }
    }
}
