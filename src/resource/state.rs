//! Helpers shared by the resource adapters for moving between state
//! documents and domain models.

use super::diagnostics::Diagnostics;
use crate::lynx::LynxError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nested reference block in a state document: `{ "id": "..." }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceModel {
    #[serde(default)]
    pub id: Option<String>,
}

impl ReferenceModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// Identifier of an optional reference block, empty when unset
pub fn reference_id(reference: &Option<ReferenceModel>) -> &str {
    reference.as_ref().map(ReferenceModel::id).unwrap_or("")
}

/// Decode a state document into its typed model
pub fn decode<T: DeserializeOwned>(doc: Value, diags: &mut Diagnostics) -> Option<T> {
    match serde_json::from_value(doc) {
        Ok(model) => Some(model),
        Err(e) => {
            diags.add_error(
                "Invalid State Document",
                format!("Unable to decode state document: {}", e),
            );
            None
        }
    }
}

/// Encode a typed model back into a state document
pub fn encode<T: Serialize>(model: &T, diags: &mut Diagnostics) -> Option<Value> {
    match serde_json::to_value(model) {
        Ok(doc) => Some(doc),
        Err(e) => {
            diags.add_error(
                "Invalid State Document",
                format!("Unable to encode state document: {}", e),
            );
            None
        }
    }
}

/// Report a client failure the same way for every adapter
pub fn client_error(diags: &mut Diagnostics, operation: &str, entity: &str, err: &LynxError) {
    diags.add_error(
        "Client Error",
        format!("Unable to {} {}, got error: {}", operation, entity, err),
    );
}

/// Value of an optional string attribute, empty when null
pub fn value(attr: &Option<String>) -> String {
    attr.clone().unwrap_or_default()
}

/// Server value as a state attribute, null when the server sent nothing
pub fn from_server(server: String) -> Option<String> {
    if server.is_empty() {
        None
    } else {
        Some(server)
    }
}

/// Server value when present, otherwise keep what the document already had
pub fn server_or(server: String, current: Option<String>) -> Option<String> {
    from_server(server).or(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Doc {
        id: Option<String>,
        name: Option<String>,
    }

    #[test]
    fn test_decode_reports_invalid_document() {
        let mut diags = Diagnostics::new();
        let doc: Option<Doc> = decode(json!({"name": 42}), &mut diags);
        assert!(doc.is_none());
        assert!(diags.has_error());
        assert_eq!(diags.iter().next().unwrap().summary, "Invalid State Document");
    }

    #[test]
    fn test_server_or_prefers_server_value() {
        assert_eq!(server_or("b".into(), Some("a".into())), Some("b".into()));
        assert_eq!(server_or(String::new(), Some("a".into())), Some("a".into()));
        assert_eq!(server_or(String::new(), None), None);
    }

    #[test]
    fn test_reference_id() {
        assert_eq!(reference_id(&Some(ReferenceModel::new("t1"))), "t1");
        assert_eq!(reference_id(&Some(ReferenceModel::default())), "");
        assert_eq!(reference_id(&None), "");
    }
}
