// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Presentation bindings: preference value -> document class/style mutations.
//!
//! Each binding fully determines its slice of presentation state, so applying
//! it twice is the same as applying it once.

use crate::document::DocumentPort;
use crate::prefs::{Font, ResolvedTheme, FONT_CLASS_PREFIX};

/// Header class present while translucency is on.
pub const TRANSLUCENT_CLASS: &str = "translucent";
/// Header class present while translucency is off.
pub const NO_TRANSLUCENCY_CLASS: &str = "no-translucency";
/// Body class present while a custom background image is shown.
pub const CUSTOM_BACKGROUND_CLASS: &str = "custom-background";

/// Show exactly one of `light`/`dark` and update the browser theme color.
pub fn apply_theme(document: &dyn DocumentPort, theme: ResolvedTheme) {
    document.remove_body_class(ResolvedTheme::Light.body_class());
    document.remove_body_class(ResolvedTheme::Dark.body_class());
    document.add_body_class(theme.body_class());
    document.set_theme_color(theme.meta_color());
}

/// Replace every `font-*` body class with the one for `font`.
pub fn apply_font(document: &dyn DocumentPort, font: Font) {
    for class in document.body_classes() {
        if class.starts_with(FONT_CLASS_PREFIX) {
            document.remove_body_class(&class);
        }
    }
    document.add_body_class(font.body_class());
    document.remove_body_style("font-family");
}

/// Toggle header translucency classes.
pub fn apply_translucency(document: &dyn DocumentPort, translucent: bool) {
    document.set_header_class(TRANSLUCENT_CLASS, translucent);
    document.set_header_class(NO_TRANSLUCENCY_CLASS, !translucent);
}

/// Inline `background-image` value for an optional data URI.
pub fn background_image_css(data_uri: Option<&str>) -> String {
    match data_uri {
        Some(uri) => format!("url('{uri}')"),
        None => "none".to_owned(),
    }
}

/// Show `data_uri` as the page background, or the explicit "none" state.
pub fn apply_background(document: &dyn DocumentPort, data_uri: Option<&str>) {
    document.set_body_style("background-image", &background_image_css(data_uri));
    if data_uri.is_some() {
        document.add_body_class(CUSTOM_BACKGROUND_CLASS);
    } else {
        document.remove_body_class(CUSTOM_BACKGROUND_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryDocument;

    #[test]
    fn theme_switch_leaves_single_theme_class() {
        let doc = MemoryDocument::new();
        apply_theme(&doc, ResolvedTheme::Light);
        apply_theme(&doc, ResolvedTheme::Dark);
        assert!(doc.has_body_class("dark"));
        assert!(!doc.has_body_class("light"));
        assert_eq!(doc.theme_color().as_deref(), Some("#121212"));
    }

    #[test]
    fn font_switch_removes_foreign_font_classes() {
        let doc = MemoryDocument::new();
        doc.add_body_class("font-Legacy");
        doc.add_body_class("keep-me");
        doc.set_body_style("font-family", "serif");
        apply_font(&doc, Font::Roboto);
        assert_eq!(doc.font_classes(), ["font-Roboto"]);
        assert!(doc.has_body_class("keep-me"));
        assert_eq!(doc.body_style("font-family"), None);
    }

    #[test]
    fn translucency_classes_are_complementary() {
        let doc = MemoryDocument::new();
        apply_translucency(&doc, false);
        assert!(doc.has_header_class(NO_TRANSLUCENCY_CLASS));
        assert!(!doc.has_header_class(TRANSLUCENT_CLASS));
        apply_translucency(&doc, true);
        assert!(doc.has_header_class(TRANSLUCENT_CLASS));
        assert!(!doc.has_header_class(NO_TRANSLUCENCY_CLASS));
    }

    #[test]
    fn background_none_is_explicit() {
        let doc = MemoryDocument::new();
        apply_background(&doc, Some("data:image/png;base64,AAAA"));
        assert_eq!(
            doc.body_style("background-image").as_deref(),
            Some("url('data:image/png;base64,AAAA')")
        );
        assert!(doc.has_body_class(CUSTOM_BACKGROUND_CLASS));
        apply_background(&doc, None);
        assert_eq!(doc.body_style("background-image").as_deref(), Some("none"));
        assert!(!doc.has_body_class(CUSTOM_BACKGROUND_CLASS));
    }
}
