//! Route localization pass.
//!
//! [`RouteLocalizer`] rewrites a route tree in place. Each top-level page is
//! dispatched on its [`RouteOverride`]:
//!
//! - `Excluded`: left untouched.
//! - `CustomPaths`: the default locale rewrites the page, every other locale
//!   with an entry gets a prefixed sibling.
//! - `Absent`: one grouped sibling for the active locales without a custom
//!   path, one dedicated sibling per locale with a custom path, then the page
//!   itself is adjusted for the default locale.
//!
//! Generated siblings are appended after the last page of the level they
//! belong to. Custom paths are read from the [`LocalizedPathIndex`], which is
//! keyed on pre-mutation paths.

use std::collections::HashMap;
use std::path::PathBuf;

use routeloc_source::LocaleRoutes;

use crate::index::LocalizedPathIndex;
use crate::locale::LocaleRegistry;
use crate::overrides::{OverrideTable, RouteOverride};
use crate::page::PageNode;
use crate::paths;

/// Summary of one localization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalizeStats {
    /// Top-level pages visited.
    pub pages: usize,
    /// Pages left untouched because their override is `false`.
    pub excluded: usize,
    /// Redirect-only pages skipped.
    pub redirects: usize,
    /// Sibling routes appended to the top level.
    pub siblings: usize,
    /// Nodes in the appended siblings, children included.
    pub generated_routes: usize,
}

/// Rewrites a route tree for every active locale.
pub struct RouteLocalizer<'a> {
    registry: &'a LocaleRegistry,
    overrides: &'a OverrideTable,
    index: &'a LocalizedPathIndex,
}

impl<'a> RouteLocalizer<'a> {
    /// Create a localizer over a complete index.
    #[must_use]
    pub fn new(
        registry: &'a LocaleRegistry,
        overrides: &'a OverrideTable,
        index: &'a LocalizedPathIndex,
    ) -> Self {
        Self {
            registry,
            overrides,
            index,
        }
    }

    /// Localize `tree` in place.
    ///
    /// Pages keep their position; generated siblings are appended at the end
    /// of `tree` in the order their pages were visited.
    pub fn localize(&self, tree: &mut Vec<PageNode>) -> LocalizeStats {
        let mut stats = LocalizeStats::default();
        let mut generated = Vec::new();

        for page in tree.iter_mut() {
            stats.pages += 1;
            match self.overrides.lookup(page.name.as_deref()) {
                RouteOverride::Excluded => {
                    tracing::debug!(page = ?page.name, "Page excluded from localization");
                    stats.excluded += 1;
                }
                RouteOverride::CustomPaths(routes) => {
                    tracing::debug!(page = ?page.name, locales = routes.len(), "Localizing with custom paths");
                    self.localize_custom(page, routes, &mut generated);
                }
                RouteOverride::Absent if page.is_redirect_only() => {
                    tracing::debug!(path = %page.path, "Skipping redirect-only page");
                    stats.redirects += 1;
                }
                RouteOverride::Absent => self.localize_default(page, &mut generated),
            }
        }

        stats.siblings = generated.len();
        stats.generated_routes = generated.iter().map(PageNode::subtree_len).sum();
        tree.extend(generated);
        stats
    }

    fn localize_custom(&self, page: &mut PageNode, routes: &LocaleRoutes, out: &mut Vec<PageNode>) {
        let original_children = page.children.clone();
        let full_path = paths::normalize(&page.path);
        let default_code = self.registry.default_locale().code.as_str();

        for locale in self.registry.locales() {
            let code = locale.code.as_str();
            let Some(custom) = routes.get(code) else {
                continue;
            };
            let custom = paths::normalize(custom);

            if self.registry.is_default(code) {
                page.path = if paths::should_add_locale_prefix(
                    code,
                    default_code,
                    false,
                    self.registry.include_default_locale_route(),
                ) {
                    paths::prefixed(code, &custom)
                } else {
                    custom
                };
            } else {
                out.push(self.locale_route(page, &original_children, &full_path, code, &custom));
            }
        }
    }

    fn localize_default(&self, page: &mut PageNode, out: &mut Vec<PageNode>) {
        let original_children = page.children.clone();
        let full_path = paths::normalize(&page.path);
        let custom = self.index.get(&full_path);
        let has_custom = |code: &str| custom.is_some_and(|routes| routes.contains_key(code));

        let grouped: Vec<&str> = self
            .registry
            .active_locale_codes()
            .iter()
            .map(String::as_str)
            .filter(|&code| !has_custom(code))
            .collect();

        if let Some(first) = grouped.first() {
            let mut route = page.clone_without_children();
            route.path = paths::grouped(&grouped, &full_path, self.registry.locale_matcher());
            route.name = self.name_for(page.name.as_deref(), first, true);
            route.children = self.localize_children(&original_children, &full_path, &grouped, true);
            tracing::debug!(path = %route.path, locales = grouped.len(), "Grouped route generated");
            out.push(route);
        }

        if let Some(routes) = custom {
            for code in self.registry.active_locale_codes() {
                if let Some(path) = routes.get(code) {
                    let custom = paths::normalize(path);
                    out.push(self.locale_route(page, &original_children, &full_path, code, &custom));
                }
            }
        }

        let default_code = self.registry.default_locale().code.as_str();
        if let Some(path) = custom.and_then(|routes| routes.get(default_code)) {
            page.path = paths::normalize(path);
        }
        let default_children =
            self.localize_children(&original_children, &full_path, &[default_code], false);
        page.children = merge_by_name(std::mem::take(&mut page.children), default_children);
    }

    /// Sibling route for a single locale at an already normalized custom path.
    fn locale_route(
        &self,
        page: &PageNode,
        original_children: &[PageNode],
        full_path: &str,
        code: &str,
        custom: &str,
    ) -> PageNode {
        let mut route = page.clone_without_children();
        route.path = paths::prefixed(code, custom);
        route.name = self.name_for(page.name.as_deref(), code, true);
        route.children = self.localize_children(original_children, full_path, &[code], true);
        route
    }

    fn localize_children(
        &self,
        children: &[PageNode],
        parent_path: &str,
        codes: &[&str],
        suffix: bool,
    ) -> Vec<PageNode> {
        let mut localized = Vec::with_capacity(children.len());

        for child in children {
            if self.overrides.is_excluded(child.name.as_deref()) {
                continue;
            }
            let full_path = paths::join(parent_path, &child.path);

            match self.index.get(&full_path) {
                None => {
                    let Some(first) = codes.first() else {
                        continue;
                    };
                    let path = paths::relative(&child.path);
                    localized.push(self.child_variant(child, path, first, &full_path, codes, suffix));
                }
                Some(routes) => {
                    for &code in codes {
                        let path = routes.get(code).map_or_else(
                            || paths::relative(&child.path),
                            |custom| paths::relative(custom),
                        );
                        localized.push(self.child_variant(child, path, code, &full_path, &[code], suffix));
                    }
                }
            }
        }

        localized
    }

    fn child_variant(
        &self,
        child: &PageNode,
        path: String,
        code: &str,
        full_path: &str,
        codes: &[&str],
        suffix: bool,
    ) -> PageNode {
        let mut variant = child.clone_without_children();
        variant.path = path;
        variant.name = self.name_for(child.name.as_deref(), code, suffix);
        variant.children = self.localize_children(&child.children, full_path, codes, suffix);
        variant
    }

    fn name_for(&self, base: Option<&str>, code: &str, suffix: bool) -> Option<String> {
        paths::route_name(base, code, self.registry.is_default(code), suffix)
    }
}

/// Identity of a child route within its sibling list.
#[derive(Debug, PartialEq, Eq, Hash)]
enum MergeKey {
    Name(String),
    File(PathBuf),
    Path(String),
}

impl MergeKey {
    fn of(node: &PageNode) -> Self {
        match (&node.name, &node.file) {
            (Some(name), _) => Self::Name(name.clone()),
            (None, Some(file)) => Self::File(file.clone()),
            (None, None) => Self::Path(paths::normalize(&node.path)),
        }
    }
}

/// Merge generated children into existing ones.
///
/// A generated node replaces the existing node with the same identity,
/// keeping its position; nodes without a match are appended.
fn merge_by_name(existing: Vec<PageNode>, generated: Vec<PageNode>) -> Vec<PageNode> {
    let positions: HashMap<MergeKey, usize> = existing
        .iter()
        .enumerate()
        .map(|(i, node)| (MergeKey::of(node), i))
        .collect();

    let mut merged = existing;
    for node in generated {
        match positions.get(&MergeKey::of(&node)) {
            Some(&i) => merged[i] = node,
            None => merged.push(node),
        }
    }
    merged
}
