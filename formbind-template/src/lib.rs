//! Template store for formbind
//!
//! `formbind-template` defines the [`Template`] contract the form engine
//! mutates, plus [`ParsedTemplate`], a small in-memory implementation with
//! value tags, named blocks and a dynamic label bundle.
//!
//! ```
//! use formbind_template::{ParsedTemplate, Template};
//!
//! let mut t = ParsedTemplate::parse("greeting", "Hello {{v who}}world{{/v}}!")?;
//! assert_eq!(t.render(), "Hello world!");
//! t.set_value("who", "there");
//! assert_eq!(t.render(), "Hello there!");
//! # Ok::<(), formbind_template::TemplateError>(())
//! ```

pub mod error;
pub mod parsed;
pub mod template;

pub use error::{Result, TemplateError};
pub use parsed::ParsedTemplate;
pub use template::Template;
