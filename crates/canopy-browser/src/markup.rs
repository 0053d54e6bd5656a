// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Markup and styles injected into the page and the panel's shadow root.

use std::fmt::Write as _;

use canopy_core::document::Chrome;
use canopy_core::{Font, Preference, Theme};

/// Tag of the element hosting the panel's shadow root.
pub const PANEL_HOST_TAG: &str = "canopy-settings";
/// `id` of the `<style>` element carrying page-level styles.
pub const GLOBAL_STYLE_ID: &str = "canopy-global-style";

/// Header entry point that opens the panel.
pub const SETTINGS_BUTTON_ID: &str = "settings-button";
/// Footer span filled with the current year.
pub const CURRENT_YEAR_ID: &str = "current-year";
/// Full-viewport fade overlay.
pub const FADE_OVERLAY_ID: &str = "content-fade-overlay";

pub const THEME_SELECT_ID: &str = "theme-select";
pub const TRANSLUCENCY_TOGGLE_ID: &str = "translucency-toggle";
pub const FONT_SELECT_ID: &str = "font-select";
pub const CHOOSE_BACKGROUND_ID: &str = "choose-background-button";
pub const CLEAR_BACKGROUND_ID: &str = "clear-background-button";
pub const IMAGE_INPUT_ID: &str = "image-upload-input";
pub const BACKGROUND_STATUS_ID: &str = "current-background-status";
pub const RESET_BUTTON_ID: &str = "reset-settings-button";
pub const CLOSE_BUTTON_ID: &str = "close-settings";

/// Dialog and backdrop selectors inside the shadow root.
pub const DIALOG_SELECTOR: &str = "dialog.settings-dialog";
pub const BACKDROP_SELECTOR: &str = ".backdrop";

/// Page-level styles: theme colors, font classes, header translucency.
pub const GLOBAL_CSS: &str = r#"
@import url('https://fonts.googleapis.com/css2?family=Open+Sans:wght@400;700&family=Roboto:wght@400;700&display=swap');
@font-face {
  font-family: "OneUISans";
  src: url("https://gabemods.github.io/fonts/OneUISans-Regular.ttf") format("truetype");
  font-weight: 400;
  font-style: normal;
}
:root {
  --bg-light: #fafafa;
  --bg-dark: #121212;
  --text-light: #111;
  --text-dark: #eee;
  --solid-bg: #ffffff;
  --accent: #e0a100;
  --transition: 0.25s ease-in-out;
  --md-icon-font: 'Material Symbols Rounded';
  --header-height: 70px;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  background: var(--bg-light);
  color: var(--text-light);
  font-family: 'OneUISans', sans-serif;
  transition: background var(--transition), color var(--transition);
  background-size: cover;
  background-repeat: no-repeat;
  background-position: center center;
  background-attachment: fixed;
}
body.dark {
  background: var(--bg-dark);
  color: var(--text-dark);
  --solid-bg: #121212;
  --fade-overlay-color: rgba(0, 0, 0, 1);
}
body.custom-background { background-color: transparent; }
body.font-system { font-family: system-ui, -apple-system, "Segoe UI", Roboto, Ubuntu, sans-serif; }
body.font-OneUISans { font-family: 'OneUISans', sans-serif; }
body.font-Roboto { font-family: 'Roboto', sans-serif; }
body.font-Open-Sans { font-family: 'Open Sans', sans-serif; }
.main-header {
  position: fixed;
  top: 0; left: 0; right: 0;
  z-index: 200;
  height: var(--header-height);
  padding: 16px 24px;
  display: flex;
  align-items: center;
  font-weight: 900;
  backdrop-filter: blur(15px);
  background: rgba(250, 250, 250, 0);
}
body.dark .main-header { background: rgba(18, 18, 18, 0.7); }
.main-header.no-translucency { background-color: var(--solid-bg); backdrop-filter: none; }
body.dark .main-header.no-translucency { background-color: #121212; }
.header-inner { display: flex; justify-content: space-between; align-items: center; width: 100%; }
.main-header h1 { font-size: 1.3rem; margin: 0; }
body.dark md-icon { color: white; }
body:not(.dark) md-icon { color: #444; }
#content-fade-overlay {
  position: fixed;
  inset: 0;
  z-index: 100000;
  background-color: var(--fade-overlay-color, rgba(255, 255, 255, 1));
  opacity: 0;
  visibility: hidden;
  pointer-events: none;
  transition: opacity 250ms ease-in-out, visibility 250ms ease-in-out;
}
#content-fade-overlay.fade-active { opacity: 1; visibility: visible; pointer-events: auto; }
footer {
  display: flex;
  justify-content: center;
  margin-top: calc(var(--header-height) + 40px);
  padding: 10px 0;
  text-align: center;
  font-size: 0.9rem;
}
footer .custom-divider { border: 0; height: 1px; background-color: rgba(0, 0, 0, 0.2); }
body.dark footer .custom-divider { background-color: rgba(255, 255, 255, 0.2); }
footer a { color: var(--accent); text-decoration: none; }
"#;

const PANEL_CSS: &str = r#"
:host {
  --text-light: #111;
  --text-dark: #eee;
  --red-accent: #b22222;
  --md-icon-font: 'Material Symbols Rounded';
}
.settings-dialog {
  position: fixed;
  inset: 0;
  margin: auto;
  width: 90vw;
  max-width: 320px;
  padding: 24px;
  border: none;
  border-radius: 24px;
  background-color: white;
  color: black;
  box-shadow: 0 4px 20px rgba(0, 0, 0, 0.3);
  z-index: 999;
  opacity: 0;
  transform: translateY(-20px) scale(0.9);
  pointer-events: none;
  transition: opacity 250ms cubic-bezier(0.4, 0, 0.2, 1), transform 250ms cubic-bezier(0.4, 0, 0.2, 1);
}
.settings-dialog.open { opacity: 1; transform: translateY(0) scale(1); pointer-events: auto; }
.settings-dialog.closing { opacity: 0; transform: translateY(-20px) scale(0.9); pointer-events: none; }
.backdrop {
  position: fixed;
  inset: 0;
  z-index: 998;
  background: rgba(0, 0, 0, 0.4);
  opacity: 0;
  pointer-events: none;
  transition: opacity 250ms ease;
}
.backdrop.show { opacity: 1; pointer-events: auto; }
.backdrop.hidden { display: none; }
:host-context(body.dark) .settings-dialog { background-color: #121212; color: white; }
h2 { margin: 0 0 16px; font-size: 1.5rem; }
label.menu { display: block; margin: 12px 0 2px; font-size: 1.1rem; font-weight: 510; }
select {
  width: 100%;
  padding: 14px;
  border: none;
  border-radius: 30px;
  background-color: #f5f8ff;
  color: #1a73e8;
  font-weight: bold;
  font-size: 16px;
  text-align: center;
  appearance: none;
  box-shadow: inset 0 0 0 1px #d0d0d0;
}
:host-context(body.dark) select { background-color: #1e1e1e; color: #90caf9; box-shadow: inset 0 0 0 1px #444; }
.toggle-setting { display: flex; justify-content: space-between; align-items: center; margin: 16px 0; }
.switch { position: relative; display: inline-block; width: 52px; height: 28px; }
.switch input { opacity: 0; width: 0; height: 0; }
.slider { position: absolute; inset: 0; border-radius: 34px; background-color: #ccc; cursor: pointer; transition: background-color 0.3s ease; }
.slider:before {
  content: "";
  position: absolute;
  left: 3px; bottom: 3px;
  width: 22px; height: 22px;
  border-radius: 50%;
  background-color: white;
  transition: transform 0.3s ease;
}
input:checked + .slider { background-color: #0278ff; }
input:checked + .slider:before { transform: translateX(24px); }
:host-context(body.dark) input:checked + .slider { background-color: #90caf9; }
.background-image-controls { display: flex; flex-wrap: wrap; align-items: center; gap: 8px; margin-bottom: 12px; }
.image-picker-button {
  display: inline-flex;
  align-items: center;
  gap: 5px;
  padding: 6px 10px;
  border: 1px solid rgba(0, 0, 0, 0.1);
  border-radius: 5px;
  background: transparent;
  color: inherit;
  font: inherit;
  font-size: 0.9rem;
  cursor: pointer;
}
.image-picker-button md-icon { font-size: 15px; font-family: var(--md-icon-font); }
.image-picker-button.clear-button { background-color: var(--red-accent); border-color: var(--red-accent); color: white; }
.background-status { margin-left: 5px; color: #888; }
.modal-actions { display: flex; justify-content: flex-end; margin-top: 12px; }
.close-button, .reset-button {
  padding: 8px 16px;
  border: none;
  border-radius: 50px;
  background: none;
  color: #1a73e8;
  font: inherit;
  font-weight: 600;
  cursor: pointer;
}
"#;

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Header, footer, and fade overlay, inserted at the top of the body.
pub fn chrome_html(chrome: &Chrome) -> String {
    format!(
        r#"<header class="main-header">
  <div class="header-inner">
    <div class="title-container"><h1 class="text-title">{title}</h1></div>
    <div class="header-icons">
      <md-icon-button id="{SETTINGS_BUTTON_ID}" aria-label="Settings"><md-icon>settings</md-icon></md-icon-button>
    </div>
  </div>
</header>
<footer>
  <div class="container">
    <hr class="custom-divider">
    <span>&copy; <span id="{CURRENT_YEAR_ID}">{year}</span> {credit}</span>
  </div>
</footer>
<div id="{FADE_OVERLAY_ID}"></div>"#,
        title = escape_html(&chrome.title),
        year = chrome.year,
        credit = escape_html(&chrome.credit),
    )
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::System => "System",
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    }
}

fn options<P: Preference>(choices: &[P], label: fn(P) -> &'static str) -> String {
    choices.iter().fold(String::new(), |mut out, &choice| {
        let _ = write!(
            out,
            r#"<option value="{}">{}</option>"#,
            escape_html(choice.encode()),
            escape_html(label(choice))
        );
        out
    })
}

/// Full shadow-root contents for the settings panel.
pub fn panel_html() -> String {
    format!(
        r#"<style>{PANEL_CSS}</style>
<div class="backdrop hidden"></div>
<dialog class="settings-dialog">
  <div class="modal-content">
    <h2>Settings</h2>
    <label class="menu" for="{THEME_SELECT_ID}">Theme</label>
    <select id="{THEME_SELECT_ID}">{themes}</select>
    <div class="toggle-setting">
      <span class="setting-label">Translucency</span>
      <label class="switch">
        <input type="checkbox" id="{TRANSLUCENCY_TOGGLE_ID}">
        <span class="slider"></span>
      </label>
    </div>
    <label class="menu" for="{FONT_SELECT_ID}">Font</label>
    <select id="{FONT_SELECT_ID}">{fonts}</select>
    <div class="setting-item">
      <span class="setting-label">Background Image:</span>
      <div class="background-image-controls">
        <button id="{CHOOSE_BACKGROUND_ID}" class="image-picker-button"><md-icon>image</md-icon> Image picker</button>
        <button id="{CLEAR_BACKGROUND_ID}" class="image-picker-button clear-button"><md-icon>close</md-icon> Clear</button>
        <input type="file" id="{IMAGE_INPUT_ID}" accept="image/*" hidden>
        <span id="{BACKGROUND_STATUS_ID}" class="background-status"></span>
      </div>
    </div>
    <div class="modal-actions">
      <button id="{RESET_BUTTON_ID}" class="reset-button">Reset</button>
      <button id="{CLOSE_BUTTON_ID}" class="close-button">Close</button>
    </div>
  </div>
</dialog>"#,
        themes = options(&Theme::ALL, theme_label),
        fonts = options(&Font::ALL, Font::label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_escapes_host_text() {
        let html = chrome_html(&Chrome {
            title: "<b>Docs</b>".to_owned(),
            year: 2026,
            credit: "Tom & Jerry".to_owned(),
        });
        assert!(html.contains("&lt;b&gt;Docs&lt;/b&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains(r#"<span id="current-year">2026</span>"#));
        assert!(html.contains(r#"class="main-header""#));
    }

    #[test]
    fn menus_offer_every_stored_encoding() {
        let html = panel_html();
        for theme in Theme::ALL {
            assert!(html.contains(&format!(r#"value="{}""#, theme.encode())));
        }
        assert!(html.contains(r#"<option value="Open Sans">Open Sans</option>"#));
        assert!(html.contains(r#"<option value="system">System Default</option>"#));
        assert!(html.contains(r#"accept="image/*""#));
    }

    #[test]
    fn backdrop_starts_hidden() {
        assert!(panel_html().contains(r#"<div class="backdrop hidden"></div>"#));
    }
}
