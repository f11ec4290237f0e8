//! Form definitions stored as YAML.
//!
//! A definition names a form and lists its constrained properties in the
//! order they should be bound:
//!
//! ```yaml
//! name: survey
//! properties:
//!   - name: question
//!     default_value: a2
//!     options: [a1, ~, a3, a2]
//!   - name: comment
//!     max_length: 200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bean::PropertySet;
use crate::error::{FieldsError, Result};
use crate::types::{Constrained, ConstrainedProperty};

/// A named, ordered list of constrained properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<ConstrainedProperty>,
}

impl FormDefinition {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a definition from a `.yaml` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FieldsError::DefinitionNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let def = Self::from_yaml_str(&content)?;
        debug!(
            name = %def.name,
            properties = def.properties.len(),
            path = %path.display(),
            "loaded form definition"
        );
        Ok(def)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn property(&self, name: &str) -> Option<&ConstrainedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn constrained(&self) -> Constrained {
        self.properties.iter().cloned().collect()
    }

    /// A property set with every property and no values, usable as a bean
    /// class for whole-form generation.
    pub fn property_set(&self) -> PropertySet {
        self.properties
            .iter()
            .cloned()
            .fold(PropertySet::new(self.name.clone()), PropertySet::property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::BeanClass;
    use crate::types::OptionSlot;
    use tempfile::TempDir;

    const SURVEY: &str = r#"
name: survey
properties:
  - name: question
    default_value: a2
    options: [a1, ~, a3, a2]
  - name: comment
    max_length: 200
    not_null: true
  - name: newsletter
    boolean: true
    editable: false
"#;

    #[test]
    fn parses_properties_in_order() {
        let def = FormDefinition::from_yaml_str(SURVEY).unwrap();
        assert_eq!(def.name, "survey");
        let names: Vec<_> = def.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["question", "comment", "newsletter"]);

        let question = def.property("question").unwrap();
        assert_eq!(question.default_value.as_deref(), Some("a2"));
        let options = question.in_list().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options.slots()[1], OptionSlot::Skip);

        let comment = def.property("comment").unwrap();
        assert_eq!(comment.max_length, Some(200));
        assert!(comment.not_null);

        assert!(!def.property("newsletter").unwrap().editable);
    }

    #[test]
    fn load_from_file_and_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("survey.yaml");
        std::fs::write(&path, SURVEY).unwrap();

        let def = FormDefinition::load(&path).unwrap();
        let yaml = def.to_yaml().unwrap();
        assert_eq!(FormDefinition::from_yaml_str(&yaml).unwrap(), def);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        let err = FormDefinition::load(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, FieldsError::DefinitionNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = FormDefinition::from_yaml_str("name: [unclosed").unwrap_err();
        assert!(matches!(err, FieldsError::Yaml(_)));
    }

    #[test]
    fn property_set_carries_constraints() {
        let def = FormDefinition::from_yaml_str(SURVEY).unwrap();
        let set = def.property_set();
        assert_eq!(
            set.property_names().unwrap(),
            ["question", "comment", "newsletter"]
        );
        assert_eq!(def.constrained().len(), 3);
    }
}
