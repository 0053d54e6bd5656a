// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Window-backed [`Platform`].

use canopy_core::platform::Platform;
use tracing::{debug, warn};
use web_sys::{MediaQueryList, Window};

/// Media query reporting the platform dark-mode preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// [`Platform`] over the page's `window`.
#[derive(Debug, Clone)]
pub struct WebPlatform {
    window: Window,
}

impl WebPlatform {
    /// Wrap `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// The dark-scheme media query list, when the browser supports it.
    pub fn dark_scheme_query(&self) -> Option<MediaQueryList> {
        match self.window.match_media(DARK_SCHEME_QUERY) {
            Ok(list) => list,
            Err(_) => {
                debug!("matchMedia unsupported; treating platform as light");
                None
            }
        }
    }
}

impl Platform for WebPlatform {
    fn prefers_dark(&self) -> bool {
        self.dark_scheme_query()
            .is_some_and(|list| list.matches())
    }

    fn reload(&self) {
        if self.window.location().reload().is_err() {
            warn!("page reload refused");
        }
    }

    fn current_year(&self) -> i32 {
        let year = js_sys::Date::new_0().get_full_year();
        i32::try_from(year).unwrap_or(i32::MAX)
    }
}
