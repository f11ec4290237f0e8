//! Property constraints and option lists.
//!
//! All types serialize to/from YAML via serde. A constrained property
//! describes how one bean property should be presented in a form: its
//! default, the options it is restricted to, and length or editing limits.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::options::OptionSource;

/// A single selectable value with an optional declared label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionEntryRepr", into = "OptionEntryRepr")]
pub struct OptionEntry {
    pub value: String,
    pub label: Option<String>,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: Some(label.into()),
        }
    }
}

/// YAML shape of an option: either a bare value or a `{value, label}` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum OptionEntryRepr {
    Bare(String),
    Full {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl From<OptionEntryRepr> for OptionEntry {
    fn from(repr: OptionEntryRepr) -> Self {
        match repr {
            OptionEntryRepr::Bare(value) => Self { value, label: None },
            OptionEntryRepr::Full { value, label } => Self { value, label },
        }
    }
}

impl From<OptionEntry> for OptionEntryRepr {
    fn from(entry: OptionEntry) -> Self {
        match entry.label {
            None => OptionEntryRepr::Bare(entry.value),
            Some(label) => OptionEntryRepr::Full {
                value: entry.value,
                label: Some(label),
            },
        }
    }
}

/// One slot in an option list. `Skip` reserves a position without emitting
/// an option; it serializes as `~`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<OptionEntry>", into = "Option<OptionEntry>")]
pub enum OptionSlot {
    Entry(OptionEntry),
    Skip,
}

impl From<Option<OptionEntry>> for OptionSlot {
    fn from(entry: Option<OptionEntry>) -> Self {
        entry.map_or(OptionSlot::Skip, OptionSlot::Entry)
    }
}

impl From<OptionSlot> for Option<OptionEntry> {
    fn from(slot: OptionSlot) -> Self {
        match slot {
            OptionSlot::Entry(entry) => Some(entry),
            OptionSlot::Skip => None,
        }
    }
}

/// An ordered list of option slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionList(Vec<OptionSlot>);

impl OptionList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list of unlabeled options.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            values
                .into_iter()
                .map(|v| OptionSlot::Entry(OptionEntry::new(v)))
                .collect(),
        )
    }

    pub fn entry(mut self, value: impl Into<String>) -> Self {
        self.0.push(OptionSlot::Entry(OptionEntry::new(value)));
        self
    }

    pub fn labeled(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.0
            .push(OptionSlot::Entry(OptionEntry::labeled(value, label)));
        self
    }

    /// Reserve a slot that renders nothing.
    pub fn skip(mut self) -> Self {
        self.0.push(OptionSlot::Skip);
        self
    }

    pub fn slots(&self) -> &[OptionSlot] {
        &self.0
    }

    /// Real entries in declaration order, skip slots left out.
    pub fn entries(&self) -> impl Iterator<Item = &OptionEntry> {
        self.0.iter().filter_map(|slot| match slot {
            OptionSlot::Entry(entry) => Some(entry),
            OptionSlot::Skip => None,
        })
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries().any(|e| e.value == value)
    }

    /// The declared label of the first entry with this value.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.entries()
            .find(|e| e.value == value)
            .and_then(|e| e.label.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<OptionSlot> for OptionList {
    fn from_iter<T: IntoIterator<Item = OptionSlot>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Presentation constraints for a single named property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstrainedProperty {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Renders a `required` marker.
    #[serde(default, skip_serializing_if = "is_false")]
    pub not_null: bool,
    /// Implies a minimum length of one.
    #[serde(default, skip_serializing_if = "is_false")]
    pub not_empty: bool,
    /// Non-editable properties render a `disabled` marker.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub editable: bool,
    /// Accepts several values at once (multi-valued select).
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple: bool,
    /// A checkbox for this property is a single on/off control even when
    /// options are declared.
    #[serde(default, skip_serializing_if = "is_false")]
    pub boolean: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub email: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub url: bool,
}

impl ConstrainedProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            options: None,
            min_length: None,
            max_length: None,
            not_null: false,
            not_empty: false,
            editable: true,
            multiple: false,
            boolean: false,
            email: false,
            url: false,
        }
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Restrict the property to the options of any option source.
    pub fn with_options(mut self, source: impl OptionSource) -> Self {
        self.options = Some(source.option_list());
        self
    }

    pub fn with_min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn with_max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn with_not_empty(mut self, not_empty: bool) -> Self {
        self.not_empty = not_empty;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_boolean(mut self, boolean: bool) -> Self {
        self.boolean = boolean;
        self
    }

    pub fn with_email(mut self, email: bool) -> Self {
        self.email = email;
        self
    }

    pub fn with_url(mut self, url: bool) -> Self {
        self.url = url;
        self
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    /// The option list, when the property is restricted to one.
    pub fn in_list(&self) -> Option<&OptionList> {
        self.options.as_ref()
    }

    /// The option list a checkbox expands into. Boolean properties have
    /// none, whatever options they declare.
    pub fn checkbox_list(&self) -> Option<&OptionList> {
        self.in_list().filter(|_| !self.boolean)
    }

    /// Effective minimum length, folding in `not_empty`.
    pub fn effective_min_length(&self) -> usize {
        let floor = usize::from(self.not_empty);
        self.min_length.unwrap_or(0).max(floor)
    }
}

/// Constraints for every property of a bean, keyed by property name in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constrained(IndexMap<String, ConstrainedProperty>);

impl Constrained {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with(mut self, property: ConstrainedProperty) -> Self {
        self.insert(property);
        self
    }

    pub fn insert(&mut self, property: ConstrainedProperty) {
        self.0.insert(property.name.clone(), property);
    }

    pub fn get(&self, name: &str) -> Option<&ConstrainedProperty> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstrainedProperty> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ConstrainedProperty> for Constrained {
    fn from_iter<T: IntoIterator<Item = ConstrainedProperty>>(iter: T) -> Self {
        let mut constrained = Self::new();
        for property in iter {
            constrained.insert(property);
        }
        constrained
    }
}
