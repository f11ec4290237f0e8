//! Radio, checkbox and select controls

use formbind_fields::ConstrainedProperty;
use formbind_template::Template;
use tracing::trace;

use crate::builder::{authored_attributes, with_placeholders, writable, FieldContext, FormBuilder};
use crate::labels::resolve_label;
use crate::markup;
use crate::names::{TagKind, ID_FORM_FIELD, ID_FORM_LABEL, ID_FORM_NAME, ID_FORM_VALUE};

impl FormBuilder {
    /// Radio buttons and checkboxes.
    ///
    /// Without an option list a single control is rendered, checked when the
    /// first active value is truthy. With a list, one control per entry is
    /// appended followed by its label, or the block named like the control
    /// tag is expanded per entry with `form:field` and `form:label` set.
    pub(crate) fn generate_choice<T>(
        &self,
        template: &mut T,
        ctx: &FieldContext<'_>,
        kind: TagKind,
        touched: &mut Vec<String>,
    ) where
        T: Template + ?Sized,
    {
        let tag = ctx.tag_id(kind);
        if !writable(&*template, &tag, ctx.replace) {
            return;
        }
        if ctx.replace {
            template.blank_value(&tag);
        }

        let single = kind == TagKind::Radio;
        let input_type = if single { "radio" } else { "checkbox" };
        let active = ctx.active_values(single);
        let name = template.encode(ctx.name);

        let list = match kind {
            TagKind::Checkbox => ctx.property.and_then(ConstrainedProperty::checkbox_list),
            _ => ctx.property.and_then(ConstrainedProperty::in_list),
        };
        match list {
            None => {
                let value = active.first().map(|v| template.encode(v));
                let mut attributes = authored_attributes(template, kind, ctx, value.as_deref());
                if active.first().is_some_and(|v| self.config.is_truthy(v)) {
                    attributes.marker(&self.config.checked_marker);
                }
                ctx.constrain(&mut attributes);
                template.set_value(&tag, &markup::input(input_type, &name, &attributes));
            }
            Some(list) => {
                let layout = template.has_block(&tag);
                for entry in list.entries() {
                    let value = template.encode(&entry.value);
                    let mut attributes = authored_attributes(template, kind, ctx, Some(value.as_str()));
                    attributes.push("value", &value);
                    if active.contains(&entry.value.as_str()) {
                        attributes.marker(&self.config.checked_marker);
                    }
                    ctx.constrain(&mut attributes);

                    let control = markup::input(input_type, &name, &attributes);
                    let label =
                        resolve_label(&*template, ctx.field, ctx.tag_field, &entry.value, ctx.property);

                    if layout {
                        let rendered = with_placeholders(
                            template,
                            &[
                                (ID_FORM_NAME, Some(name.as_str())),
                                (ID_FORM_VALUE, Some(value.as_str())),
                                (ID_FORM_FIELD, Some(control.as_str())),
                                (ID_FORM_LABEL, Some(label.as_str())),
                            ],
                            |t| t.block(&tag),
                        );
                        template.append_value(&tag, &rendered.unwrap_or_default());
                    } else {
                        template.append_value(&tag, &control);
                        template.append_value(&tag, &label);
                    }
                }
                if !template.is_value_set(&tag) {
                    template.blank_value(&tag);
                }
            }
        }

        trace!(field = %ctx.name, kind = kind.prefix(), checked = active.len(), "rendered choice");
        touched.push(tag);
    }

    /// A select with one option per list entry.
    ///
    /// A default that is not part of the list is prepended as the first
    /// option. The select is multiple when the property says so or when
    /// more than one value is active.
    pub(crate) fn generate_select<T>(
        &self,
        template: &mut T,
        ctx: &FieldContext<'_>,
        touched: &mut Vec<String>,
    ) where
        T: Template + ?Sized,
    {
        let tag = ctx.tag_id(TagKind::Select);
        if !writable(&*template, &tag, ctx.replace) {
            return;
        }

        let active = ctx.active_values(false);
        let name = template.encode(ctx.name);
        let mut attributes = authored_attributes(template, TagKind::Select, ctx, None);

        let mut options = String::new();
        if let Some(list) = ctx.property.and_then(ConstrainedProperty::in_list) {
            let prepended = ctx.default_value().filter(|d| !list.contains(d));
            let values = prepended
                .into_iter()
                .chain(list.entries().map(|e| e.value.as_str()));
            for value in values {
                let selected = if active.contains(&value) {
                    self.config.selected_marker.as_str()
                } else {
                    ""
                };
                let label = resolve_label(&*template, ctx.field, ctx.tag_field, value, ctx.property);
                options.push_str(&markup::option(&template.encode(value), selected, &label));
            }
        }

        if ctx.property.is_some_and(|p| p.multiple) || active.len() > 1 {
            attributes.marker(markup::MULTIPLE_MARKER);
        }
        ctx.constrain(&mut attributes);
        template.set_value(&tag, &markup::select(&name, &attributes, &options));

        trace!(field = %ctx.name, kind = "select", selected = active.len(), "rendered select");
        touched.push(tag);
    }
}
