//! HTML fragments for the generated controls
//!
//! Every function here receives text that is already encoded. Attribute
//! order is fixed: authored attributes first, then `value`, length limits,
//! checked or selected state, `required` and `disabled`.

use std::fmt::Write;

pub const REQUIRED_MARKER: &str = " required=\"required\"";
pub const DISABLED_MARKER: &str = " disabled=\"disabled\"";
pub const MULTIPLE_MARKER: &str = " multiple=\"multiple\"";

/// Attribute text accumulated for one control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(String);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from attribute text written by the template author.
    pub fn authored(text: &str) -> Self {
        Self(sanitize(text))
    }

    /// Append `name="value"`; the value must already be encoded.
    pub fn push(&mut self, name: &str, value: impl std::fmt::Display) {
        let _ = write!(self.0, " {name}=\"{value}\"");
    }

    /// Append a complete marker such as ` checked="checked"`.
    pub fn marker(&mut self, marker: &str) {
        self.0.push_str(marker);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim authored attribute text and separate it from the preceding
/// attribute with a single space.
pub fn sanitize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" {trimmed}")
    }
}

pub fn input(input_type: &str, name: &str, attributes: &Attributes) -> String {
    format!("<input type=\"{input_type}\" name=\"{name}\"{attributes} />")
}

pub fn textarea(name: &str, attributes: &Attributes, content: &str) -> String {
    format!("<textarea name=\"{name}\"{attributes}>{content}</textarea>")
}

pub fn select(name: &str, attributes: &Attributes, options: &str) -> String {
    format!("<select name=\"{name}\"{attributes}>{options}</select>")
}

pub fn option(value: &str, attributes: &str, label: &str) -> String {
    format!("<option value=\"{value}\"{attributes}>{label}</option>")
}

pub fn display(element: &str, attributes: &Attributes, content: &str) -> String {
    format!("<{element}{attributes}>{content}</{element}>")
}
