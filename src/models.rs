//! Data structures shared by the strict and loose engines.

use serde::Serialize;

/// Kind of emitted asset, which decides the element and attribute it is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
  /// JavaScript bundle referenced through `<script src>`.
  Script,
  /// Stylesheet referenced through `<link rel="stylesheet" href>`.
  Style,
}

impl AssetKind {
  /// Attribute carrying the asset URL.
  pub fn url_attribute(self) -> &'static str {
    match self {
      AssetKind::Script => "src",
      AssetKind::Style => "href",
    }
  }

  /// Extension (without the dot) emitted bundles of this kind carry.
  pub fn extension(self) -> &'static str {
    match self {
      AssetKind::Script => "js",
      AssetKind::Style => "css",
    }
  }
}

/// Single emitted asset in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
  /// Emitted path, e.g. `js/main.a1b2c3.js`.
  pub path: String,
  /// Asset kind.
  pub kind: AssetKind,
}

impl AssetEntry {
  /// Create a script entry.
  pub fn script(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      kind: AssetKind::Script,
    }
  }

  /// Create a stylesheet entry.
  pub fn style(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      kind: AssetKind::Style,
    }
  }
}

/// Section of the document a candidate element lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
  /// Direct child of `<head>`.
  Head,
  /// Direct child of `<body>`.
  Body,
}

/// Record of one element whose URL attribute was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewrittenAsset {
  /// Section the element lives in.
  pub location: Location,
  /// Index of the element in its parent's child list.
  pub position: usize,
  /// Attribute value before the rewrite.
  pub original: String,
  /// Attribute value written by the rewrite.
  pub rewritten: String,
}
