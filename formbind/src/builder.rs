//! The form builder and its single-field entry points
//!
//! A [`FormBuilder`] holds only configuration. Every operation receives the
//! template by mutable reference, discovers which tags the author declared
//! for a field and writes rendered markup into exactly those tags, returning
//! the ids it wrote so they can be removed again.

use formbind_fields::ConstrainedProperty;
use formbind_template::Template;
use tracing::trace;

use crate::config::FormBuilderConfig;
use crate::markup::{self, Attributes};
use crate::names::{detect_kinds, effective_name, FieldKind, TagKind, ID_FORM_NAME, ID_FORM_VALUE};

/// Convenience for calls that bind no submitted values.
pub const NO_VALUES: &[&str] = &[];

/// Fills form controls into templates and removes them again.
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    pub(crate) config: FormBuilderConfig,
}

/// Everything one field generation needs to know.
pub(crate) struct FieldContext<'a> {
    /// Field part of the tag ids: the effective name, or the template
    /// field name when replacing.
    pub tag_field: &'a str,
    /// Effective name, used for the `name` attribute.
    pub name: &'a str,
    /// Name without prefix, used for dynamic label keys.
    pub field: &'a str,
    pub property: Option<&'a ConstrainedProperty>,
    pub values: &'a [String],
    pub replace: bool,
}

impl<'a> FieldContext<'a> {
    pub fn tag_id(&self, kind: TagKind) -> String {
        kind.tag_id(self.tag_field)
    }

    pub fn default_value(&self) -> Option<&'a str> {
        self.property.and_then(|p| p.default_value.as_deref())
    }

    /// First submitted value, or the property default when nothing was
    /// submitted.
    pub fn first_value(&self) -> Option<&'a str> {
        match self.values.first() {
            Some(value) => Some(value.as_str()),
            None => self.default_value(),
        }
    }

    /// Values that decide checked or selected state. Submitted values
    /// replace the default entirely.
    pub fn active_values(&self, single: bool) -> Vec<&'a str> {
        let values: &'a [String] = self.values;
        if values.is_empty() {
            return self.default_value().into_iter().collect();
        }
        let take = if single { 1 } else { values.len() };
        values.iter().take(take).map(String::as_str).collect()
    }

    /// Append `required` and `disabled` markers from the constraints.
    pub fn constrain(&self, attributes: &mut Attributes) {
        if let Some(property) = self.property {
            if property.not_null {
                attributes.marker(markup::REQUIRED_MARKER);
            }
            if !property.editable {
                attributes.marker(markup::DISABLED_MARKER);
            }
        }
    }
}

/// Whether generation may write `tag`: the template must declare it and,
/// unless replacing, it must not already hold a non-empty value.
pub(crate) fn writable<T>(template: &T, tag: &str, replace: bool) -> bool
where
    T: Template + ?Sized,
{
    template.has_value_id(tag) && (replace || template.value(tag).map_or(true, str::is_empty))
}

/// Set placeholder values for the duration of `render`, then clear them.
pub(crate) fn with_placeholders<T, R>(
    template: &mut T,
    placeholders: &[(&str, Option<&str>)],
    render: impl FnOnce(&mut T) -> R,
) -> R
where
    T: Template + ?Sized,
{
    for (id, value) in placeholders {
        if let Some(value) = value {
            if template.has_value_id(id) {
                template.set_value(id, value);
            }
        }
    }
    let rendered = render(template);
    for (id, _) in placeholders {
        if template.has_value_id(id) {
            template.remove_value(id);
        }
    }
    rendered
}

/// Attributes the author supplied for a control: the
/// `form:<kind>:attributes:<field>` block rendered with `form:name` and
/// `form:value` filled in, or else the default text of the control tag.
pub(crate) fn authored_attributes<T>(
    template: &mut T,
    kind: TagKind,
    ctx: &FieldContext<'_>,
    encoded_value: Option<&str>,
) -> Attributes
where
    T: Template + ?Sized,
{
    let block_id = kind.attributes_id(ctx.tag_field);
    if template.has_block(&block_id) {
        let encoded_name = template.encode(ctx.name);
        let text = with_placeholders(
            template,
            &[(ID_FORM_NAME, Some(encoded_name.as_str())), (ID_FORM_VALUE, encoded_value)],
            |t| t.block(&block_id),
        );
        return Attributes::authored(&text.unwrap_or_default());
    }

    template
        .default_value(&ctx.tag_id(kind))
        .map(Attributes::authored)
        .unwrap_or_default()
}

fn owned_values<V: AsRef<str>>(values: &[V]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_string()).collect()
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormBuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormBuilderConfig {
        &self.config
    }

    /// Generate every control the template declares for a constrained
    /// property. Returns the tag ids that were written.
    pub fn generate_field<T, V>(
        &self,
        template: &mut T,
        property: &ConstrainedProperty,
        values: &[V],
        prefix: Option<&str>,
    ) -> Vec<String>
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        let values = owned_values(values);
        self.generate(template, None, &property.name, Some(property), &values, prefix, false)
    }

    /// Generate the controls for a plain field name without constraints.
    pub fn generate_named_field<T, V>(
        &self,
        template: &mut T,
        name: &str,
        values: &[V],
        prefix: Option<&str>,
    ) -> Vec<String>
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        let values = owned_values(values);
        self.generate(template, None, name, None, &values, prefix, false)
    }

    /// Like [`generate_field`](Self::generate_field), but writes into the
    /// tags of `template_field_name` and overwrites whatever they hold.
    pub fn replace_field<T, V>(
        &self,
        template: &mut T,
        template_field_name: &str,
        property: &ConstrainedProperty,
        values: &[V],
        prefix: Option<&str>,
    ) -> Vec<String>
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        let values = owned_values(values);
        self.generate(
            template,
            Some(template_field_name),
            &property.name,
            Some(property),
            &values,
            prefix,
            true,
        )
    }

    pub fn replace_named_field<T, V>(
        &self,
        template: &mut T,
        template_field_name: &str,
        name: &str,
        values: &[V],
        prefix: Option<&str>,
    ) -> Vec<String>
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        let values = owned_values(values);
        self.generate(
            template,
            Some(template_field_name),
            name,
            None,
            &values,
            prefix,
            true,
        )
    }

    /// Control kinds the template declares for a field.
    pub fn field_kinds<T>(
        &self,
        template: &T,
        name: &str,
        prefix: Option<&str>,
        property: Option<&ConstrainedProperty>,
    ) -> Vec<FieldKind>
    where
        T: Template + ?Sized,
    {
        detect_kinds(template, &effective_name(prefix, name), property)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn generate<T>(
        &self,
        template: &mut T,
        template_field_name: Option<&str>,
        name: &str,
        property: Option<&ConstrainedProperty>,
        values: &[String],
        prefix: Option<&str>,
        replace: bool,
    ) -> Vec<String>
    where
        T: Template + ?Sized,
    {
        let mut touched = Vec::new();
        if name.is_empty() {
            return touched;
        }

        let effective = effective_name(prefix, name);
        let tag_field = template_field_name
            .filter(|tfn| !tfn.is_empty())
            .unwrap_or(effective.as_str());
        let ctx = FieldContext {
            tag_field,
            name: &effective,
            field: name,
            property,
            values,
            replace,
        };

        for kind in detect_kinds(&*template, tag_field, property) {
            match kind {
                FieldKind::Hidden | FieldKind::Input | FieldKind::Secret | FieldKind::Textarea => {
                    self.generate_text(template, &ctx, kind.tag_kind(), &mut touched)
                }
                FieldKind::Radio | FieldKind::CheckboxList | FieldKind::CheckboxBoolean => {
                    self.generate_choice(template, &ctx, kind.tag_kind(), &mut touched)
                }
                FieldKind::Select => self.generate_select(template, &ctx, &mut touched),
            }
        }
        self.generate_display(template, &ctx, &mut touched);

        trace!(
            field = %effective,
            template = template.name(),
            touched = touched.len(),
            replace,
            "generated field"
        );
        touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_template::ParsedTemplate;

    #[test]
    fn guard_skips_tags_holding_content() {
        let mut t = ParsedTemplate::parse("t", "{{v a/}}{{v b/}}").unwrap();
        assert!(writable(&t, "a", false));
        assert!(!writable(&t, "missing", true));

        t.set_value("a", "bound");
        t.set_value("b", "");
        assert!(!writable(&t, "a", false));
        assert!(writable(&t, "a", true));
        assert!(writable(&t, "b", false));
    }

    #[test]
    fn placeholders_are_cleared_after_rendering() {
        let mut t =
            ParsedTemplate::parse("t", "{{b attrs}}data-n=\"{{v form:name/}}\"{{/b}}").unwrap();
        let rendered = with_placeholders(&mut t, &[(ID_FORM_NAME, Some("login"))], |t| {
            t.block("attrs")
        });
        assert_eq!(rendered.as_deref(), Some("data-n=\"login\""));
        assert!(!t.is_value_set(ID_FORM_NAME));
    }

    #[test]
    fn active_values_prefer_submission() {
        let property = ConstrainedProperty::new("q").with_default_value("a2");
        let values = vec!["a1".to_string(), "a3".to_string()];
        let ctx = FieldContext {
            tag_field: "q",
            name: "q",
            field: "q",
            property: Some(&property),
            values: &values,
            replace: false,
        };
        assert_eq!(ctx.active_values(true), ["a1"]);
        assert_eq!(ctx.active_values(false), ["a1", "a3"]);

        let ctx = FieldContext { values: &[], ..ctx };
        assert_eq!(ctx.active_values(false), ["a2"]);
        assert_eq!(ctx.first_value(), Some("a2"));
    }

    #[test]
    fn empty_name_is_a_no_op() {
        let mut t = ParsedTemplate::parse("t", "{{v form:input:/}}").unwrap();
        let builder = FormBuilder::new();
        assert!(builder
            .generate_named_field(&mut t, "", &["x"], None)
            .is_empty());
        assert_eq!(t.render(), "");
    }
}
