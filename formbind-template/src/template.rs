//! The template store contract
//!
//! Form generation never owns a template. It receives one by mutable
//! reference, probes which placeholder tags and blocks the author declared,
//! and writes rendered markup into exactly those placeholders.

use crate::error::{Result, TemplateError};

/// A mutable template holding named value tags and named blocks.
///
/// Implementations decide how tags are authored and stored; the form engine
/// only relies on the operations below. All methods take plain `&str` ids so
/// the trait stays object safe and can be passed as `&mut dyn Template`.
pub trait Template {
    /// Name of the template, used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the template declares a value tag with this id.
    fn has_value_id(&self, id: &str) -> bool;

    /// Whether a value has been explicitly set for this id.
    fn is_value_set(&self, id: &str) -> bool;

    /// The explicitly set value for this id, if any.
    fn value(&self, id: &str) -> Option<&str>;

    /// Replace the value of a tag.
    fn set_value(&mut self, id: &str, value: &str);

    /// Append to the value of a tag, starting from empty when unset.
    fn append_value(&mut self, id: &str, value: &str);

    /// Forget the value of a tag so it renders its default again.
    fn remove_value(&mut self, id: &str);

    /// Set a tag to the empty string.
    fn blank_value(&mut self, id: &str) {
        self.set_value(id, "");
    }

    /// The default text the author placed inside a value tag, if any.
    fn default_value(&self, id: &str) -> Option<&str>;

    fn has_default_value(&self, id: &str) -> bool {
        self.default_value(id).is_some()
    }

    /// Whether the template declares a block with this id.
    fn has_block(&self, id: &str) -> bool;

    /// Render a block against the current values.
    fn block(&self, id: &str) -> Option<String>;

    /// Render a block and append the result to a value tag.
    fn append_block(&mut self, value_id: &str, block_id: &str) -> Result<()> {
        let content = self
            .block(block_id)
            .ok_or_else(|| TemplateError::UnknownBlock {
                template: self.name().to_string(),
                block: block_id.to_string(),
            })?;
        self.append_value(value_id, &content);
        Ok(())
    }

    /// Look up a dynamically registered label keyed `"<field>:<value>"`.
    fn lookup_label(&self, _key: &str) -> Option<&str> {
        None
    }

    /// Encode text for safe inclusion in markup, both as element content
    /// and inside double-quoted attributes.
    fn encode(&self, text: &str) -> String {
        html_escape::encode_double_quoted_attribute(text).into_owned()
    }

    /// Serialize the whole template with the current values.
    fn render(&self) -> String;
}
