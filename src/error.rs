//! Failures that abort a rewrite.
//!
//! Only structural problems with the input document cross the engine boundary. Assets
//! without a matching element, elements no asset claims and degenerate origin names are
//! resolved locally by leaving the markup untouched.

use thiserror::Error;

/// A required element of the document skeleton is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
  /// No top level `<html>` element.
  #[error("html document is invalid: missing <html> element")]
  MissingHtml,
  /// `<html>` has no `<head>` child.
  #[error("html document is invalid: missing <head> element")]
  MissingHead,
  /// `<html>` has no `<body>` child.
  #[error("html document is invalid: missing <body> element")]
  MissingBody,
}

/// Error returned by [`crate::AssetRewriter::rewrite`].
#[derive(Debug, Error)]
pub enum RewriteError {
  /// The document does not have the `html`/`head`/`body` skeleton.
  #[error(transparent)]
  Structural(#[from] StructuralError),
  /// A pattern generated from configuration values failed to compile.
  #[error("failed to build asset pattern: {0}")]
  Pattern(#[from] regex::Error),
  /// Writing the rewritten tree back to text failed.
  #[error("failed to serialize rewritten document: {0}")]
  Serialize(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn structural_messages_name_the_missing_element() {
    assert!(StructuralError::MissingBody.to_string().contains("<body>"));
    assert!(StructuralError::MissingHead.to_string().contains("<head>"));

    let wrapped = RewriteError::from(StructuralError::MissingHtml);
    assert!(wrapped.to_string().contains("<html>"));
  }
}
