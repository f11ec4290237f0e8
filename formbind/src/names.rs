//! Tag naming conventions shared by generation and removal
//!
//! Templates declare which controls a field has by the value tags they
//! contain: `form:<kind>:<field>` for controls and `form:display:<field>`
//! for the read-only echo of the current value.

use formbind_fields::ConstrainedProperty;
use formbind_template::Template;

pub const PREFIX_FORM_HIDDEN: &str = "form:hidden:";
pub const PREFIX_FORM_INPUT: &str = "form:input:";
pub const PREFIX_FORM_SECRET: &str = "form:secret:";
pub const PREFIX_FORM_TEXTAREA: &str = "form:textarea:";
pub const PREFIX_FORM_RADIO: &str = "form:radio:";
pub const PREFIX_FORM_CHECKBOX: &str = "form:checkbox:";
pub const PREFIX_FORM_SELECT: &str = "form:select:";
pub const PREFIX_FORM_DISPLAY: &str = "form:display:";
pub const PREFIX_FORM_LABEL: &str = "form:label:";

/// Inserted between a kind prefix and the field name to address the
/// block holding authored attributes.
pub const MIDDLE_ATTRIBUTES: &str = "attributes:";

/// Placeholders filled while authored blocks are rendered.
pub const ID_FORM_NAME: &str = "form:name";
pub const ID_FORM_VALUE: &str = "form:value";
pub const ID_FORM_FIELD: &str = "form:field";
pub const ID_FORM_LABEL: &str = "form:label";

pub const SUFFIX_SELECTED: &str = ":selected";
pub const SUFFIX_CHECKED: &str = ":checked";

/// Every tag family a field can be rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Hidden,
    Input,
    Secret,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Display,
}

impl TagKind {
    /// Rendering order; the display echo always comes last.
    pub const ALL: [TagKind; 8] = [
        TagKind::Hidden,
        TagKind::Input,
        TagKind::Secret,
        TagKind::Textarea,
        TagKind::Radio,
        TagKind::Checkbox,
        TagKind::Select,
        TagKind::Display,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            TagKind::Hidden => PREFIX_FORM_HIDDEN,
            TagKind::Input => PREFIX_FORM_INPUT,
            TagKind::Secret => PREFIX_FORM_SECRET,
            TagKind::Textarea => PREFIX_FORM_TEXTAREA,
            TagKind::Radio => PREFIX_FORM_RADIO,
            TagKind::Checkbox => PREFIX_FORM_CHECKBOX,
            TagKind::Select => PREFIX_FORM_SELECT,
            TagKind::Display => PREFIX_FORM_DISPLAY,
        }
    }

    /// `form:<kind>:<field>`
    pub fn tag_id(self, field: &str) -> String {
        format!("{}{field}", self.prefix())
    }

    /// `form:<kind>:attributes:<field>`
    pub fn attributes_id(self, field: &str) -> String {
        format!("{}{MIDDLE_ATTRIBUTES}{field}", self.prefix())
    }
}

/// The kind of control a template declares for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Hidden,
    Input,
    Secret,
    Textarea,
    Radio,
    CheckboxList,
    CheckboxBoolean,
    Select,
}

impl FieldKind {
    pub fn tag_kind(self) -> TagKind {
        match self {
            FieldKind::Hidden => TagKind::Hidden,
            FieldKind::Input => TagKind::Input,
            FieldKind::Secret => TagKind::Secret,
            FieldKind::Textarea => TagKind::Textarea,
            FieldKind::Radio => TagKind::Radio,
            FieldKind::CheckboxList | FieldKind::CheckboxBoolean => TagKind::Checkbox,
            FieldKind::Select => TagKind::Select,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Hidden => "hidden",
            FieldKind::Input => "input",
            FieldKind::Secret => "secret",
            FieldKind::Textarea => "textarea",
            FieldKind::Radio => "radio",
            FieldKind::CheckboxList => "checkbox-list",
            FieldKind::CheckboxBoolean => "checkbox-boolean",
            FieldKind::Select => "select",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control kinds the template declares for `field`, in rendering order.
///
/// A checkbox is a list when the property restricts its values to an option
/// list and is not flagged boolean, and a single boolean control otherwise.
pub fn detect_kinds<T>(
    template: &T,
    field: &str,
    property: Option<&ConstrainedProperty>,
) -> Vec<FieldKind>
where
    T: Template + ?Sized,
{
    let has_list = property.is_some_and(|p| p.checkbox_list().is_some());
    TagKind::ALL
        .iter()
        .filter(|kind| template.has_value_id(&kind.tag_id(field)))
        .filter_map(|kind| match kind {
            TagKind::Hidden => Some(FieldKind::Hidden),
            TagKind::Input => Some(FieldKind::Input),
            TagKind::Secret => Some(FieldKind::Secret),
            TagKind::Textarea => Some(FieldKind::Textarea),
            TagKind::Radio => Some(FieldKind::Radio),
            TagKind::Checkbox if has_list => Some(FieldKind::CheckboxList),
            TagKind::Checkbox => Some(FieldKind::CheckboxBoolean),
            TagKind::Select => Some(FieldKind::Select),
            TagKind::Display => None,
        })
        .collect()
}

/// Prepend the prefix textually. An empty prefix is the same as none.
pub fn effective_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}{name}"),
        _ => name.to_string(),
    }
}
