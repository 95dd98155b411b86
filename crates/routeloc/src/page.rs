//! Route tree nodes.
//!
//! [`PageNode`] mirrors the page records emitted by a host framework's page
//! discovery. Fields the engine does not interpret (`meta`, `alias`, ...)
//! are kept in [`PageNode::props`] and copied onto generated routes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One route definition, possibly with nested child routes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    /// Route name used for named navigation and override lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL segment, relative to the parent route.
    #[serde(default)]
    pub path: String,
    /// Page source file, read only while indexing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Redirect target (string or route location object).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Value>,
    /// Nested routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageNode>,
    /// Remaining host-defined properties, preserved verbatim.
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl PageNode {
    /// Create a named page at `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the child routes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<PageNode>) -> Self {
        self.children = children;
        self
    }

    /// Set a redirect target.
    #[must_use]
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(Value::String(target.into()));
        self
    }

    /// Pages that only redirect: no source file, no children, a redirect.
    #[must_use]
    pub fn is_redirect_only(&self) -> bool {
        self.file.is_none() && self.children.is_empty() && self.redirect.is_some()
    }

    /// Copy of this node with an empty child list.
    ///
    /// Generated routes replace their children anyway, so the subtree is
    /// not cloned.
    #[must_use]
    pub fn clone_without_children(&self) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            file: self.file.clone(),
            redirect: self.redirect.clone(),
            children: Vec::new(),
            props: self.props.clone(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(PageNode::subtree_len).sum::<usize>()
    }
}

/// Parse a route tree from the host's JSON representation.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of page objects.
pub fn from_json(json: &str) -> Result<Vec<PageNode>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a route tree to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if a preserved property cannot be serialized.
pub fn to_json(pages: &[PageNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pages)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_redirect_only() {
        assert!(PageNode::new("old", "/old").with_redirect("/new").is_redirect_only());
        assert!(
            !PageNode::new("old", "/old")
                .with_redirect("/new")
                .with_file("pages/old.vue")
                .is_redirect_only()
        );
        assert!(
            !PageNode::new("old", "/old")
                .with_redirect("/new")
                .with_children(vec![PageNode::new("child", "c")])
                .is_redirect_only()
        );
        assert!(!PageNode::new("about", "/about").is_redirect_only());
    }

    #[test]
    fn test_clone_without_children() {
        let page = PageNode::new("about", "/about")
            .with_file("pages/about.vue")
            .with_children(vec![PageNode::new("team", "team")]);
        let copy = page.clone_without_children();
        assert!(copy.children.is_empty());
        assert_eq!(copy.name, page.name);
        assert_eq!(copy.file, page.file);
    }

    #[test]
    fn test_subtree_len() {
        let page = PageNode::new("a", "/a").with_children(vec![
            PageNode::new("b", "b").with_children(vec![PageNode::new("c", "c")]),
            PageNode::new("d", "d"),
        ]);
        assert_eq!(page.subtree_len(), 4);
    }

    #[test]
    fn test_json_preserves_unknown_properties() {
        let input = json!([
            {
                "name": "about",
                "path": "/about",
                "file": "/app/pages/about.vue",
                "meta": { "layout": "wide" },
                "alias": ["/company"],
                "children": [{ "name": "about-team", "path": "team" }]
            }
        ])
        .to_string();

        let pages = from_json(&input).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].props["meta"], json!({ "layout": "wide" }));
        assert_eq!(pages[0].children[0].name.as_deref(), Some("about-team"));

        let output: Value = serde_json::from_str(&to_json(&pages).unwrap()).unwrap();
        let expected: Value = serde_json::from_str(&input).unwrap();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_json_redirect_object() {
        let pages = from_json(r#"[{"path": "/old", "redirect": {"name": "home"}}]"#).unwrap();
        assert!(pages[0].is_redirect_only());
        assert!(pages[0].name.is_none());
    }

    #[test]
    fn test_json_rejects_non_array() {
        assert!(from_json(r#"{"path": "/"}"#).is_err());
    }
}
