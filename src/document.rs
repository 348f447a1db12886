//! Parsed HTML tree with handles onto the script and stylesheet elements of interest.

use std::io;
use std::sync::OnceLock;

use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use regex::Regex;

use crate::error::StructuralError;
use crate::models::{AssetKind, Location};

fn skeleton_patterns() -> &'static [(Regex, StructuralError); 3] {
    static PATTERNS: OnceLock<[(Regex, StructuralError); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                Regex::new(r"(?i)<html[\s/>]").expect("invalid html tag regex"),
                StructuralError::MissingHtml,
            ),
            (
                Regex::new(r"(?i)<head[\s/>]").expect("invalid head tag regex"),
                StructuralError::MissingHead,
            ),
            (
                Regex::new(r"(?i)<body[\s/>]").expect("invalid body tag regex"),
                StructuralError::MissingBody,
            ),
        ]
    })
}

/// An HTML document split into its `head` and `body` sections.
///
/// The parser synthesises missing `html`/`head`/`body` elements, so their presence is
/// checked on the source text as well as on the resulting tree.
pub struct Document {
    dom: RcDom,
    head: Handle,
    body: Handle,
}

impl Document {
    /// Parse a complete HTML document.
    pub fn parse(html: &str) -> Result<Self, StructuralError> {
        if let Some((_, missing)) = skeleton_patterns()
            .iter()
            .find(|(pattern, _)| !pattern.is_match(html))
        {
            return Err(*missing);
        }

        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

        let html_node = find_child_element(&dom.document, "html").ok_or(StructuralError::MissingHtml)?;
        let head = find_child_element(&html_node, "head").ok_or(StructuralError::MissingHead)?;
        let body = find_child_element(&html_node, "body").ok_or(StructuralError::MissingBody)?;

        Ok(Self { dom, head, body })
    }

    /// Candidate elements for `kind` in document order, head before body.
    ///
    /// Only direct children of `<head>` and `<body>` are considered.
    pub fn candidates(&self, kind: AssetKind) -> Vec<Candidate> {
        let mut result = Vec::new();
        for (location, parent) in [(Location::Head, &self.head), (Location::Body, &self.body)] {
            for (position, child) in parent.children.borrow().iter().enumerate() {
                if is_candidate(child, kind) {
                    result.push(Candidate {
                        location,
                        position,
                        node: child.clone(),
                    });
                }
            }
        }
        result
    }

    /// Serialize the whole document, doctype included, back to text.
    pub fn serialize(&self) -> io::Result<String> {
        let mut bytes = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut bytes, &document, SerializeOpts::default())?;
        String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

/// Script or stylesheet element that may be claimed by an emitted asset.
///
/// Holds a shared handle into the tree, so mutating it updates the document in place and
/// the recorded position stays valid for the lifetime of the [`Document`].
#[derive(Clone)]
pub struct Candidate {
    /// Section containing the element.
    pub location: Location,
    /// Index of the element within its parent's child list.
    pub position: usize,
    node: Handle,
}

impl Candidate {
    /// Current value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let NodeData::Element { ref attrs, .. } = self.node.data else {
            return None;
        };
        attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string())
    }

    /// Replace the value of an existing attribute, returning the previous value.
    ///
    /// Attributes are never added; `None` means the element had no such attribute.
    pub fn set_attribute(&self, name: &str, value: &str) -> Option<String> {
        let NodeData::Element { ref attrs, .. } = self.node.data else {
            return None;
        };
        let mut attrs = attrs.borrow_mut();
        let attr = attrs.iter_mut().find(|attr| attr.name.local.as_ref() == name)?;
        let previous = attr.value.to_string();
        attr.value = StrTendril::from_slice(value);
        Some(previous)
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("location", &self.location)
            .field("position", &self.position)
            .field("tag", &element_name(&self.node))
            .finish()
    }
}

fn element_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

fn find_child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some(tag))
        .cloned()
}

fn is_candidate(handle: &Handle, kind: AssetKind) -> bool {
    let NodeData::Element {
        ref name,
        ref attrs,
        ..
    } = handle.data
    else {
        return false;
    };

    match kind {
        AssetKind::Script => name.local.as_ref() == "script",
        AssetKind::Style => {
            name.local.as_ref() == "link"
                && attrs.borrow().iter().any(|attr| {
                    attr.name.local.as_ref() == "rel" && attr.value.as_ref() == "stylesheet"
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" href="main.css">
    <link rel="icon" href="favicon.ico">
    <script src="head.js"></script>
  </head>
  <body>
    <div id="app"></div>
    <script src="main.js"></script>
  </body>
</html>"#;

    #[test]
    fn collects_candidates_in_document_order() {
        let document = Document::parse(PAGE).unwrap();

        let scripts = document.candidates(AssetKind::Script);
        let sources: Vec<Option<String>> = scripts.iter().map(|c| c.attribute("src")).collect();
        assert_eq!(sources, vec![Some("head.js".into()), Some("main.js".into())]);
        assert_eq!(scripts[0].location, Location::Head);
        assert_eq!(scripts[1].location, Location::Body);

        let styles = document.candidates(AssetKind::Style);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].attribute("href").as_deref(), Some("main.css"));
    }

    #[test]
    fn stylesheet_rel_must_be_exact() {
        let document = Document::parse(
            r#"<html><head><link rel="alternate stylesheet" href="a.css"><link rel="preload stylesheet" href="b.css"><link rel="STYLESHEET" href="c.css"><link rel="stylesheet" href="d.css"></head><body></body></html>"#,
        )
        .unwrap();

        let styles = document.candidates(AssetKind::Style);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].attribute("href").as_deref(), Some("d.css"));
        assert_eq!(styles[0].position, 3);
    }

    #[test]
    fn mutations_show_up_in_serialized_output() {
        let document = Document::parse(PAGE).unwrap();
        let script = document
            .candidates(AssetKind::Script)
            .into_iter()
            .find(|c| c.location == Location::Body)
            .unwrap();

        assert_eq!(script.set_attribute("src", "js/main.abc.js").as_deref(), Some("main.js"));
        assert_eq!(script.set_attribute("integrity", "sha"), None);

        let html = document.serialize().unwrap();
        assert!(html.contains(r#"<script src="js/main.abc.js"></script>"#));
        assert!(html.contains(r#"<script src="head.js"></script>"#));
        assert!(!html.contains("integrity"));
    }

    #[test]
    fn untouched_document_keeps_markup() {
        let document = Document::parse(PAGE).unwrap();
        let html = document.serialize().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="main.css">"#));
        assert!(html.contains(r#"<div id="app"></div>"#));
    }

    #[test]
    fn rejects_missing_skeleton_elements() {
        let err = Document::parse("<html><head></head><p>hi</p></html>").err();
        assert_eq!(err, Some(StructuralError::MissingBody));

        let err = Document::parse("<html><body></body></html>").err();
        assert_eq!(err, Some(StructuralError::MissingHead));

        let err = Document::parse("<head></head><body></body>").err();
        assert_eq!(err, Some(StructuralError::MissingHtml));
    }

    #[test]
    fn frameset_documents_have_no_body() {
        let err = Document::parse(
            "<html><head></head><frameset><frame src=\"a.html\"></frameset><!-- <body> --></html>",
        )
        .err();
        assert_eq!(err, Some(StructuralError::MissingBody));
    }
}
