// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings-state synchronization for the Canopy page widget.
//!
//! Keeps persisted preferences and live page presentation in step across two
//! boundaries: the isolated settings [`panel::Panel`] and the global document
//! the [`app::Application`] presents into. The two talk only through typed
//! notifications ([`events::PanelEvents`]). Everything host-specific sits
//! behind a port trait so the whole flow runs headless under `cargo test`.
//!
//! Ports: [`store::StorageBackend`], [`document::DocumentPort`],
//! [`panel_view::PanelView`], [`platform::Platform`], [`encode::ImageEncoder`].

pub mod app;
pub mod binding;
pub mod config;
pub mod deps;
pub mod dialog;
pub mod document;
pub mod encode;
pub mod events;
pub mod panel;
pub mod panel_view;
pub mod platform;
pub mod prefs;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use app::Application;
pub use config::{ConfigError, LogLevel, WidgetConfig};
pub use panel::Panel;
pub use prefs::{Font, PrefKey, Preference, ResolvedTheme, SettingsSnapshot, Theme, Translucency};
pub use store::{MemoryBackend, PreferenceStore, StorageBackend, StoreError};
