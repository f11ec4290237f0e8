//! Whole-form generation over the properties of a bean

use formbind_fields::{BeanClass, FormBean};
use formbind_template::Template;
use indexmap::IndexMap;
use tracing::debug;

use crate::builder::FormBuilder;
use crate::error::Result;
use crate::names::effective_name;

/// Submitted values keyed by effective field name.
pub type FormValues = IndexMap<String, Vec<String>>;

/// Where the properties of a form come from.
#[derive(Clone, Copy)]
pub enum BeanSource<'a> {
    /// A live bean whose own values are rendered.
    Instance(&'a dyn FormBean),
    /// Metadata only; an instance is created to discover properties and
    /// values come from the submitted map when one is given.
    Class(&'a dyn BeanClass),
}

impl std::fmt::Debug for BeanSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeanSource::Instance(bean) => f.debug_tuple("Instance").field(&bean.type_name()).finish(),
            BeanSource::Class(class) => f.debug_tuple("Class").field(&class.type_name()).finish(),
        }
    }
}

impl<'a> From<&'a dyn FormBean> for BeanSource<'a> {
    fn from(bean: &'a dyn FormBean) -> Self {
        BeanSource::Instance(bean)
    }
}

impl<'a> From<&'a dyn BeanClass> for BeanSource<'a> {
    fn from(class: &'a dyn BeanClass) -> Self {
        BeanSource::Class(class)
    }
}

impl FormBuilder {
    /// Generate every property of a bean, returning all tags written.
    ///
    /// A live instance renders its own values and ignores `values`; a
    /// validation error carrying an erroneous value replaces the property
    /// value. A class is instantiated first and, when `values` is given,
    /// renders the submitted values looked up by effective name.
    ///
    /// Instantiation and property access failures abort the call. Fields
    /// generated before the failure stay in the template.
    pub fn generate_form<T>(
        &self,
        template: &mut T,
        source: BeanSource<'_>,
        values: Option<&FormValues>,
        prefix: Option<&str>,
    ) -> Result<Vec<String>>
    where
        T: Template + ?Sized,
    {
        let instance: Box<dyn FormBean>;
        let (bean, external): (&dyn FormBean, Option<&FormValues>) = match source {
            BeanSource::Instance(bean) => (bean, None),
            BeanSource::Class(class) => {
                instance = class.instantiate()?;
                (instance.as_ref(), values)
            }
        };

        let constrained = bean.constrained();
        let errors = bean.validation_errors();
        let mut touched = Vec::new();

        for property in bean.properties()? {
            let field_values = match external {
                Some(submitted) => submitted
                    .get(&effective_name(prefix, &property.name))
                    .cloned()
                    .unwrap_or_default(),
                None => errors
                    .iter()
                    .find(|e| e.subject == property.name)
                    .and_then(|e| e.erroneous_value.clone())
                    .map(|erroneous| vec![erroneous])
                    .or(property.value)
                    .unwrap_or_default(),
            };

            let constraint = constrained.and_then(|c| c.get(&property.name));
            touched.extend(self.generate(
                template,
                None,
                &property.name,
                constraint,
                &field_values,
                prefix,
                false,
            ));
        }

        debug!(
            bean = bean.type_name(),
            template = template.name(),
            touched = touched.len(),
            "generated form"
        );
        Ok(touched)
    }

    /// Remove every property of a bean from the template.
    pub fn remove_form<T>(
        &self,
        template: &mut T,
        source: BeanSource<'_>,
        prefix: Option<&str>,
    ) -> Result<()>
    where
        T: Template + ?Sized,
    {
        let (type_name, names): (&str, Vec<String>) = match source {
            BeanSource::Instance(bean) => (
                bean.type_name(),
                bean.properties()?.into_iter().map(|p| p.name).collect(),
            ),
            BeanSource::Class(class) => (class.type_name(), class.property_names()?),
        };

        for name in &names {
            self.remove_field(template, name, prefix);
        }
        debug!(bean = type_name, fields = names.len(), "removed form");
        Ok(())
    }
}
