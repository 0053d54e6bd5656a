// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recognized page preferences: storage keys, string encodings, and defaults.
//!
//! Absence in the store always means "apply the default", never an error. A
//! stored value outside a key's domain decodes to `None` and is handled the
//! same way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Persisted preference keys. The strings are a stable on-disk contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrefKey {
    /// Color theme (`system` | `light` | `dark`).
    Theme,
    /// Header translucency (`true` | `false`).
    Translucency,
    /// Body font family.
    Font,
    /// Background image as a data URI.
    BackgroundImage,
    /// Human-readable name of the background image.
    BackgroundImageName,
}

impl PrefKey {
    /// Every recognized key, in the order they are applied at startup.
    pub const ALL: [Self; 5] = [
        Self::Theme,
        Self::Translucency,
        Self::Font,
        Self::BackgroundImage,
        Self::BackgroundImageName,
    ];

    /// Storage key string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Translucency => "translucency",
            Self::Font => "font",
            Self::BackgroundImage => "customBackgroundImage",
            Self::BackgroundImageName => "backgroundImageName",
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-key preference with a string encoding and a documented default.
pub trait Preference: Copy + Default {
    /// Key the value is stored under.
    const KEY: PrefKey;

    /// Decode a stored string; `None` for values outside the domain.
    fn decode(raw: &str) -> Option<Self>;

    /// Encode for storage.
    fn encode(self) -> &'static str;
}

/// User-selected color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the platform dark-mode preference.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl Theme {
    /// All selectable themes, in menu order.
    pub const ALL: [Self; 3] = [Self::System, Self::Light, Self::Dark];

    /// Resolve to a concrete display theme given the platform preference.
    pub const fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            Self::System if prefers_dark => ResolvedTheme::Dark,
            Self::System | Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
        }
    }

    /// Whether this choice tracks platform color-scheme changes.
    pub const fn follows_platform(self) -> bool {
        matches!(self, Self::System)
    }
}

impl Preference for Theme {
    const KEY: PrefKey = PrefKey::Theme;

    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn encode(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// A theme after `system` has been resolved against the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedTheme {
    /// Light presentation.
    Light,
    /// Dark presentation.
    Dark,
}

impl ResolvedTheme {
    /// Body class carried while this theme is displayed.
    pub const fn body_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// `<meta name="theme-color">` content for this theme.
    pub const fn meta_color(self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#121212",
        }
    }
}

/// Header translucency toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translucency(pub bool);

impl Default for Translucency {
    fn default() -> Self {
        Self(true)
    }
}

impl Preference for Translucency {
    const KEY: PrefKey = PrefKey::Translucency;

    // `on`/`off` were written by older builds of the header script.
    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "true" | "on" => Some(Self(true)),
            "false" | "off" => Some(Self(false)),
            _ => None,
        }
    }

    fn encode(self) -> &'static str {
        if self.0 {
            "true"
        } else {
            "false"
        }
    }
}

/// Body font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Font {
    /// Platform UI font stack.
    #[serde(rename = "system")]
    System,
    /// One UI Sans (bundled webfont).
    #[default]
    #[serde(rename = "OneUISans")]
    OneUiSans,
    /// Roboto.
    #[serde(rename = "Roboto")]
    Roboto,
    /// Open Sans.
    #[serde(rename = "Open Sans")]
    OpenSans,
}

/// Prefix shared by every font body class.
pub const FONT_CLASS_PREFIX: &str = "font-";

impl Font {
    /// All selectable fonts, in menu order.
    pub const ALL: [Self; 4] = [Self::System, Self::OneUiSans, Self::Roboto, Self::OpenSans];

    /// Body class selecting this font.
    pub const fn body_class(self) -> &'static str {
        match self {
            Self::System => "font-system",
            Self::OneUiSans => "font-OneUISans",
            Self::Roboto => "font-Roboto",
            Self::OpenSans => "font-Open-Sans",
        }
    }

    /// Label shown in the font menu.
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "System Default",
            Self::OneUiSans => "OneUISans",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
        }
    }
}

impl Preference for Font {
    const KEY: PrefKey = PrefKey::Font;

    fn decode(raw: &str) -> Option<Self> {
        match raw {
            "system" => Some(Self::System),
            "OneUISans" => Some(Self::OneUiSans),
            "Roboto" => Some(Self::Roboto),
            "Open Sans" => Some(Self::OpenSans),
            _ => None,
        }
    }

    fn encode(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::OneUiSans => "OneUISans",
            Self::Roboto => "Roboto",
            Self::OpenSans => "Open Sans",
        }
    }
}

/// Point-in-time view of every preference with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    /// Stored (or default) theme choice.
    pub theme: Theme,
    /// Stored (or default) translucency.
    pub translucency: bool,
    /// Stored (or default) font.
    pub font: Font,
    /// Whether a background image is persisted.
    pub has_background_image: bool,
    /// Persisted background image name, if any.
    pub background_image_name: Option<String>,
}
