//! Diagnostics reported back to the host tool
//!
//! Adapters never return errors directly; they append diagnostics and the
//! host decides how to render them.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute path the diagnostic refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        match &self.attribute {
            Some(attr) => write!(f, "{}: {} ({}): {}", level, self.summary, attr, self.detail),
            None => write!(f, "{}: {}: {}", level, self.summary, self.detail),
        }
    }
}

/// Collected diagnostics for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, summary.into(), detail.into(), None);
    }

    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            summary.into(),
            detail.into(),
            Some(attribute.into()),
        );
    }

    pub fn add_attribute_warning(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Warning,
            summary.into(),
            detail.into(),
            Some(attribute.into()),
        );
    }

    fn push(&mut self, severity: Severity, summary: String, detail: String, attribute: Option<String>) {
        if severity == Severity::Error {
            tracing::error!("{}: {}", summary, detail);
        } else {
            tracing::warn!("{}: {}", summary, detail);
        }
        self.items.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }

    pub fn has_error(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_warning("api_url", "Insecure Lynx API URL", "plain http");
        assert!(!diags.has_error());
        assert_eq!(diags.len(), 1);

        diags.add_error("Client Error", "boom");
        assert!(diags.has_error());
    }

    #[test]
    fn test_display_includes_attribute() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error("api_url", "Unknown Lynx API URL", "set LYNX_API_URL");
        let rendered = diags.iter().next().unwrap().to_string();
        assert_eq!(rendered, "Error: Unknown Lynx API URL (api_url): set LYNX_API_URL");
    }
}
