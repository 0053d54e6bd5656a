// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! External head dependencies (icon fonts, web-component scripts) and the
//! once-only injection registry.

use std::cell::RefCell;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::DocumentPort;

/// A node the widget needs appended to the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HeadDependency {
    /// `<link rel="stylesheet">`; considered present if any link's href contains `marker`.
    Stylesheet {
        /// Stylesheet URL.
        href: String,
        /// Substring identifying an equivalent link already on the page.
        marker: String,
    },
    /// `<script type="importmap">`; at most one per document.
    ImportMap {
        /// Import map JSON body.
        json: String,
    },
    /// Inline `<script type="module">` tagged with `data-canopy-dep="<name>"`.
    ModuleScript {
        /// Tag value identifying the script.
        name: String,
        /// Module source.
        source: String,
    },
}

impl HeadDependency {
    /// Selector matching an already-present equivalent node.
    pub fn presence_selector(&self) -> String {
        match self {
            Self::Stylesheet { marker, .. } => format!("link[href*=\"{marker}\"]"),
            Self::ImportMap { .. } => "script[type=\"importmap\"]".to_owned(),
            Self::ModuleScript { name, .. } => format!("script[data-canopy-dep=\"{name}\"]"),
        }
    }
}

const MATERIAL_MODULE: &str = "\
import '@material/web/all.js';
import { styles as typescaleStyles } from '@material/web/typography/md-typescale-styles.js';
if (document.adoptedStyleSheets) {
  document.adoptedStyleSheets.push(typescaleStyles.styleSheet);
} else {
  const style = document.createElement('style');
  style.textContent = typescaleStyles.cssText;
  document.head.appendChild(style);
}
";

/// Material icon fonts, the `@material/web` import map, and its loader module.
///
/// The import map precedes the module script; browsers ignore import maps
/// added after the first module import.
pub fn default_dependencies() -> Vec<HeadDependency> {
    vec![
        HeadDependency::Stylesheet {
            href: "https://fonts.googleapis.com/icon?family=Material+Icons+Round".to_owned(),
            marker: "Material+Icons+Round".to_owned(),
        },
        HeadDependency::Stylesheet {
            href: "https://fonts.googleapis.com/css2?family=Material+Symbols+Rounded:opsz,wght,FILL,GRAD@20..48,100..700,0..1,-50..200&display=swap".to_owned(),
            marker: "Material+Symbols+Rounded".to_owned(),
        },
        HeadDependency::ImportMap {
            json: r#"{ "imports": { "@material/web/": "https://esm.run/@material/web/" } }"#
                .to_owned(),
        },
        HeadDependency::ModuleScript {
            name: "material-web".to_owned(),
            source: MATERIAL_MODULE.to_owned(),
        },
    ]
}

/// Tracks which dependencies this application instance has already seen.
#[derive(Debug, Default)]
pub struct DependencyRegistry {
    seen: RefCell<BTreeSet<String>>,
}

impl DependencyRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dep` unless it was handled before or the document already has it.
    ///
    /// Returns `true` when a node was appended.
    pub fn ensure(&self, dep: &HeadDependency, document: &dyn DocumentPort) -> bool {
        let selector = dep.presence_selector();
        if !self.seen.borrow_mut().insert(selector.clone()) {
            return false;
        }
        if document.contains(&selector) {
            debug!(%selector, "head dependency already present");
            return false;
        }
        document.append_head_node(dep);
        true
    }

    /// [`ensure`](Self::ensure) every dependency in order; returns how many were appended.
    pub fn ensure_all(&self, deps: &[HeadDependency], document: &dyn DocumentPort) -> usize {
        deps.iter().filter(|dep| self.ensure(dep, document)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryDocument;

    #[test]
    fn selectors_match_each_kind() {
        let deps = default_dependencies();
        assert_eq!(
            deps[0].presence_selector(),
            "link[href*=\"Material+Icons+Round\"]"
        );
        assert_eq!(deps[2].presence_selector(), "script[type=\"importmap\"]");
        assert_eq!(
            deps[3].presence_selector(),
            "script[data-canopy-dep=\"material-web\"]"
        );
    }

    #[test]
    fn import_map_comes_before_module_script() {
        let deps = default_dependencies();
        let map = deps
            .iter()
            .position(|d| matches!(d, HeadDependency::ImportMap { .. }));
        let module = deps
            .iter()
            .position(|d| matches!(d, HeadDependency::ModuleScript { .. }));
        assert!(map < module);
    }

    #[test]
    fn preexisting_nodes_are_not_duplicated() {
        let doc = MemoryDocument::new();
        doc.mark_present("script[type=\"importmap\"]");
        let registry = DependencyRegistry::new();
        let appended = registry.ensure_all(&default_dependencies(), &doc);
        assert_eq!(appended, 3);
        assert!(!doc
            .head_nodes()
            .iter()
            .any(|d| matches!(d, HeadDependency::ImportMap { .. })));
    }

    #[test]
    fn repeated_injection_appends_once() {
        let doc = MemoryDocument::new();
        let deps = default_dependencies();
        assert_eq!(DependencyRegistry::new().ensure_all(&deps, &doc), 4);
        // A second instance on the same page finds every node already there.
        assert_eq!(DependencyRegistry::new().ensure_all(&deps, &doc), 0);
        assert_eq!(doc.head_nodes().len(), 4);
    }
}
