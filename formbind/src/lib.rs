//! Form field binding for templates
//!
//! `formbind` fills HTML form controls into the value tags of a template and
//! removes them again. Templates declare which controls a field has through
//! tag names:
//!
//! | tag | renders |
//! |-----|---------|
//! | `form:hidden:<field>` | `<input type="hidden">` |
//! | `form:input:<field>` | `<input type="text">`, `email` or `url` |
//! | `form:secret:<field>` | `<input type="password">`, never with a value |
//! | `form:textarea:<field>` | `<textarea>` with the value as content |
//! | `form:radio:<field>` | one radio button per option |
//! | `form:checkbox:<field>` | one checkbox per option, or a single boolean one |
//! | `form:select:<field>` | `<select>` with one `<option>` per entry |
//! | `form:display:<field>` | read-only echo of the value or its label |
//!
//! Generation returns the tag ids it wrote and never overwrites a tag that
//! already holds content. Removal clears those tags so the template renders
//! exactly as before.
//!
//! ```
//! use formbind::{ConstrainedProperty, FormBuilder, ParsedTemplate, Template, NO_VALUES};
//!
//! let mut template = ParsedTemplate::parse(
//!     "login",
//!     r#"<form>{{v form:hidden:token}}id="csrf"{{/v}}</form>"#,
//! )?;
//! let before = template.render();
//!
//! let builder = FormBuilder::new();
//! let token = ConstrainedProperty::new("token").with_default_value("a&b");
//! let touched = builder.generate_field(&mut template, &token, NO_VALUES, None);
//! assert_eq!(touched, ["form:hidden:token"]);
//! assert_eq!(
//!     template.render(),
//!     r#"<form><input type="hidden" name="token" id="csrf" value="a&amp;b" /></form>"#
//! );
//!
//! builder.remove_field(&mut template, "token", None);
//! assert_eq!(template.render(), before);
//! # Ok::<(), formbind::TemplateError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
mod fields;
pub mod form;
pub mod labels;
pub mod markup;
pub mod names;
mod options;
mod remove;
mod select;

pub use builder::{FormBuilder, NO_VALUES};
pub use config::FormBuilderConfig;
pub use error::{FormError, Result};
pub use form::{BeanSource, FormValues};
pub use labels::resolve_label;
pub use names::{FieldKind, TagKind};

pub use formbind_fields::{
    BeanClass, BeanProperty, Constrained, ConstrainedProperty, DefaultClass, EnumOptions,
    FactoryClass, FieldsError, FormBean, FormDefinition, OptionEntry, OptionEnum, OptionList,
    OptionSlot, OptionSource, PropertySet, SerdeBean, ValidationError,
};
pub use formbind_template::{ParsedTemplate, Template, TemplateError};
