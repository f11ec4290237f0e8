//! Bean contracts: where form values and constraints come from.
//!
//! A [`FormBean`] is a live instance whose properties can be read as ordered
//! name/value pairs. A [`BeanClass`] only knows its property names and can
//! be asked for a fresh instance. Two backends are provided: [`SerdeBean`]
//! reflects any `Serialize` struct, [`PropertySet`] lists properties
//! explicitly.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::error::{FieldsError, Result};
use crate::types::{Constrained, ConstrainedProperty};

/// One property read off a bean, with its values in string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanProperty {
    pub name: String,
    /// `None` when the property holds no value.
    pub value: Option<Vec<String>>,
}

/// A validation failure the bean already recorded for one of its
/// properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub subject: String,
    /// The rejected input, rendered back instead of the property value.
    pub erroneous_value: Option<String>,
}

impl ValidationError {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            erroneous_value: None,
        }
    }

    pub fn with_erroneous_value(mut self, value: impl Into<String>) -> Self {
        self.erroneous_value = Some(value.into());
        self
    }
}

/// A live bean instance.
pub trait FormBean {
    fn type_name(&self) -> &str;

    /// Properties with their current values, in declaration order.
    fn properties(&self) -> Result<Vec<BeanProperty>>;

    /// Constraints for the bean's properties, if the bean declares any.
    fn constrained(&self) -> Option<&Constrained> {
        None
    }

    fn validation_errors(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

/// Bean metadata that can produce instances.
pub trait BeanClass {
    fn type_name(&self) -> &str;

    /// Property names in declaration order, without needing values.
    fn property_names(&self) -> Result<Vec<String>>;

    fn instantiate(&self) -> Result<Box<dyn FormBean>>;
}

/// Reflects any serializable struct as a bean through `serde_json`.
///
/// Field order follows serialization order. Strings are used verbatim,
/// numbers and booleans through their display form, sequences element-wise
/// and `null` as "no value".
#[derive(Debug, Clone)]
pub struct SerdeBean<B> {
    bean: B,
    type_name: String,
    constrained: Option<Constrained>,
    errors: Vec<ValidationError>,
}

impl<B: Serialize> SerdeBean<B> {
    pub fn new(bean: B) -> Self {
        Self {
            bean,
            type_name: short_type_name::<B>(),
            constrained: None,
            errors: Vec::new(),
        }
    }

    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = name.into();
        self
    }

    pub fn with_constrained(mut self, constrained: Constrained) -> Self {
        self.constrained = Some(constrained);
        self
    }

    pub fn with_validation_error(mut self, error: ValidationError) -> Self {
        self.errors.push(error);
        self
    }
}

impl<B: Serialize> FormBean for SerdeBean<B> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn properties(&self) -> Result<Vec<BeanProperty>> {
        let map = match serde_json::to_value(&self.bean)? {
            Value::Object(map) => map,
            other => {
                return Err(FieldsError::InvalidArgument {
                    message: format!(
                        "'{}' should serialize to a map of properties, got {}",
                        self.type_name,
                        value_kind(&other)
                    ),
                });
            }
        };

        let mut properties = Vec::with_capacity(map.len());
        for (name, value) in map {
            let value = property_strings(&self.type_name, &name, &value)?;
            properties.push(BeanProperty { name, value });
        }
        trace!(bean = %self.type_name, count = properties.len(), "reflected bean");
        Ok(properties)
    }

    fn constrained(&self) -> Option<&Constrained> {
        self.constrained.as_ref()
    }

    fn validation_errors(&self) -> Vec<ValidationError> {
        self.errors.clone()
    }
}

fn property_strings(type_name: &str, name: &str, value: &Value) -> Result<Option<Vec<String>>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let mut strings = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => continue,
                    Value::Array(_) | Value::Object(_) => {
                        return Err(nested_property(type_name, name));
                    }
                    scalar => strings.push(scalar_string(scalar)),
                }
            }
            Ok(Some(strings))
        }
        Value::Object(_) => Err(nested_property(type_name, name)),
        scalar => Ok(Some(vec![scalar_string(scalar)])),
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn nested_property(type_name: &str, name: &str) -> FieldsError {
    FieldsError::InvalidArgument {
        message: format!("property '{name}' of '{type_name}' is a nested structure"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>().trim_start_matches('&');
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Class backed by `Default`: instances are default-constructed.
pub struct DefaultClass<T> {
    type_name: String,
    constrained: Option<Constrained>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Serialize + Default + 'static> DefaultClass<T> {
    pub fn new() -> Self {
        Self {
            type_name: short_type_name::<T>(),
            constrained: None,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn with_constrained(mut self, constrained: Constrained) -> Self {
        self.constrained = Some(constrained);
        self
    }

    fn make(&self) -> SerdeBean<T> {
        let bean = SerdeBean::new(T::default()).with_type_name(self.type_name.clone());
        match &self.constrained {
            Some(c) => bean.with_constrained(c.clone()),
            None => bean,
        }
    }
}

impl<T: Serialize + Default + 'static> Default for DefaultClass<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + Default + 'static> BeanClass for DefaultClass<T> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_names(&self) -> Result<Vec<String>> {
        Ok(self
            .make()
            .properties()?
            .into_iter()
            .map(|p| p.name)
            .collect())
    }

    fn instantiate(&self) -> Result<Box<dyn FormBean>> {
        Ok(Box::new(self.make()))
    }
}

type Factory = Arc<dyn Fn() -> Result<Box<dyn FormBean>> + Send + Sync>;

/// Class with declared property names and a fallible factory, for beans
/// that cannot simply be default-constructed.
#[derive(Clone)]
pub struct FactoryClass {
    type_name: String,
    property_names: Vec<String>,
    factory: Factory,
}

impl FactoryClass {
    pub fn new<F>(type_name: impl Into<String>, property_names: Vec<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn FormBean>> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            property_names,
            factory: Arc::new(factory),
        }
    }
}

impl std::fmt::Debug for FactoryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryClass")
            .field("type_name", &self.type_name)
            .field("property_names", &self.property_names)
            .finish_non_exhaustive()
    }
}

impl BeanClass for FactoryClass {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_names(&self) -> Result<Vec<String>> {
        Ok(self.property_names.clone())
    }

    fn instantiate(&self) -> Result<Box<dyn FormBean>> {
        (self.factory)()
    }
}

/// An explicit, ordered set of constrained properties with optional values.
///
/// Usable both as a live bean and as its own class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    name: String,
    constrained: Constrained,
    values: IndexMap<String, Option<Vec<String>>>,
}

impl PropertySet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constrained: Constrained::new(),
            values: IndexMap::new(),
        }
    }

    /// Add a property without a value.
    pub fn property(mut self, property: ConstrainedProperty) -> Self {
        self.values.insert(property.name.clone(), None);
        self.constrained.insert(property);
        self
    }

    /// Add a property holding the given values.
    pub fn property_with_values<I, S>(mut self, property: ConstrainedProperty, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.values.insert(property.name.clone(), Some(values));
        self.constrained.insert(property);
        self
    }

    /// Replace the values of an existing property. Unknown names are ignored.
    pub fn set_values(&mut self, name: &str, values: Option<Vec<String>>) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = values;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FormBean for PropertySet {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> Result<Vec<BeanProperty>> {
        Ok(self
            .values
            .iter()
            .map(|(name, value)| BeanProperty {
                name: name.clone(),
                value: value.clone(),
            })
            .collect())
    }

    fn constrained(&self) -> Option<&Constrained> {
        Some(&self.constrained)
    }
}

impl BeanClass for PropertySet {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn property_names(&self) -> Result<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn instantiate(&self) -> Result<Box<dyn FormBean>> {
        Ok(Box::new(self.clone()))
    }
}
