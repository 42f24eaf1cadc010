//! Schema descriptions for the provider and its resources

use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute value type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AttributeType {
    String,
    List { element: Box<AttributeType> },
    /// Single nested object with its own attributes
    Object { attributes: BTreeMap<String, Attribute> },
}

/// A schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Keep the prior state value while the planned value is unknown
    pub use_state_for_unknown: bool,
}

impl Attribute {
    fn new(ty: AttributeType, description: &str) -> Self {
        Self {
            ty,
            description: description.to_string(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            use_state_for_unknown: false,
        }
    }

    pub fn required_string(description: &str) -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn optional_string(description: &str) -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn required_string_list(description: &str) -> Self {
        Self {
            required: true,
            ..Self::new(
                AttributeType::List {
                    element: Box::new(AttributeType::String),
                },
                description,
            )
        }
    }

    /// Computed identifier that survives plans unchanged
    pub fn computed_id(description: &str) -> Self {
        Self {
            computed: true,
            use_state_for_unknown: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    /// Required single nested object holding only a required `id`
    pub fn required_reference(description: &str, id_description: &str) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), Attribute::required_string(id_description));
        Self {
            required: true,
            ..Self::new(AttributeType::Object { attributes }, description)
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Schema of a provider or resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of attributes flagged sensitive
    pub fn sensitive_attributes(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.sensitive)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
