//! Text-like controls and the display echo

use formbind_fields::ConstrainedProperty;
use formbind_template::Template;
use tracing::trace;

use crate::builder::{authored_attributes, writable, FieldContext, FormBuilder};
use crate::labels::resolve_label;
use crate::markup;
use crate::names::TagKind;

/// What a text-like control renders from the field state.
struct TextRules {
    /// The value is rendered at all; secrets never echo it back.
    set_value: bool,
    /// The value goes into a `value` attribute rather than the content.
    value_as_attribute: bool,
    limit_length: bool,
    disable: bool,
    require: bool,
}

impl TextRules {
    /// Textareas carry their value only as content, never in an attribute.
    fn for_kind(kind: TagKind) -> Self {
        match kind {
            TagKind::Hidden => Self {
                set_value: true,
                value_as_attribute: true,
                limit_length: false,
                disable: false,
                require: false,
            },
            TagKind::Secret => Self {
                set_value: false,
                value_as_attribute: true,
                limit_length: true,
                disable: true,
                require: true,
            },
            TagKind::Textarea => Self {
                set_value: true,
                value_as_attribute: false,
                limit_length: false,
                disable: true,
                require: true,
            },
            _ => Self {
                set_value: true,
                value_as_attribute: true,
                limit_length: true,
                disable: true,
                require: true,
            },
        }
    }
}

fn input_type(kind: TagKind, property: Option<&ConstrainedProperty>) -> &'static str {
    match kind {
        TagKind::Hidden => "hidden",
        TagKind::Secret => "password",
        _ => match property {
            Some(p) if p.email => "email",
            Some(p) if p.url => "url",
            _ => "text",
        },
    }
}

/// At most `max` characters of `value`.
fn truncate(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

impl FormBuilder {
    /// Hidden, input, secret and textarea controls.
    pub(crate) fn generate_text<T>(
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

        let rules = TextRules::for_kind(kind);
        let max_length = ctx.property.and_then(|p| p.max_length);
        let value = ctx.first_value().map(|raw| {
            let raw = match (kind, max_length) {
                (TagKind::Hidden, Some(max)) => truncate(raw, max),
                _ => raw,
            };
            template.encode(raw)
        });

        let mut attributes = authored_attributes(template, kind, ctx, value.as_deref());
        if rules.set_value && rules.value_as_attribute {
            if let Some(value) = &value {
                attributes.push("value", value);
            }
        }
        if rules.limit_length {
            if let Some(property) = ctx.property {
                let min_length = property.effective_min_length();
                if min_length > 0 {
                    attributes.push("minlength", min_length);
                }
                if let Some(max) = property.max_length {
                    attributes.push("maxlength", max);
                }
            }
        }
        if rules.require || rules.disable {
            ctx.constrain(&mut attributes);
        }

        let name = template.encode(ctx.name);
        let control = match kind {
            TagKind::Textarea => {
                let content = value.as_deref().filter(|_| rules.set_value).unwrap_or("");
                markup::textarea(&name, &attributes, content)
            }
            _ => markup::input(input_type(kind, ctx.property), &name, &attributes),
        };
        template.set_value(&tag, &control);

        trace!(field = %ctx.name, kind = kind.prefix(), "rendered control");
        touched.push(tag);
    }

    /// The read-only echo of the current value or values.
    ///
    /// Every submitted value gets its own entry, except for radio and
    /// boolean checkbox fields which only echo the first. List-backed properties echo labels.
    /// Fields with a secret control are never echoed.
    pub(crate) fn generate_display<T>(
        &self,
        template: &mut T,
        ctx: &FieldContext<'_>,
        touched: &mut Vec<String>,
    ) where
        T: Template + ?Sized,
    {
        let tag = ctx.tag_id(TagKind::Display);
        if !writable(&*template, &tag, ctx.replace)
            || template.has_value_id(&ctx.tag_id(TagKind::Secret))
        {
            return;
        }

        let boolean_checkbox = template.has_value_id(&ctx.tag_id(TagKind::Checkbox))
            && ctx.property.and_then(ConstrainedProperty::checkbox_list).is_none();
        let single = boolean_checkbox || template.has_value_id(&ctx.tag_id(TagKind::Radio));
        let listed = ctx.property.is_some_and(|p| p.in_list().is_some());
        let mut entries = ctx.active_values(single);
        if entries.is_empty() {
            entries.push("");
        }

        let mut content = String::new();
        for raw in entries {
            let encoded = template.encode(raw);
            let text = if listed && !raw.is_empty() {
                resolve_label(&*template, ctx.field, ctx.tag_field, raw, ctx.property)
            } else {
                encoded.clone()
            };
            let value = (!raw.is_empty()).then_some(encoded.as_str());
            let attributes = authored_attributes(template, TagKind::Display, ctx, value);
            content.push_str(&markup::display(
                &self.config.display_element,
                &attributes,
                &text,
            ));
        }
        template.set_value(&tag, &content);

        trace!(field = %ctx.name, kind = "display", "rendered display");
        touched.push(tag);
    }
}
