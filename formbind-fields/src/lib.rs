//! Property metadata for form binding
//!
//! `formbind-fields` describes what the form engine binds: constrained
//! properties with defaults and option lists, option sources, and the bean
//! contracts that supply property names and values.
//!
//! # Architecture
//!
//! - **Schema-only**: owns constraints, never renders markup
//! - **YAML on disk**: form definitions load from a single `.yaml` file
//! - **Reflection through serde**: any `Serialize` struct can act as a bean
//! - **Explicit skip slots**: option lists reserve positions with
//!   [`OptionSlot::Skip`] rather than null values

pub mod bean;
pub mod definition;
pub mod error;
pub mod options;
pub mod types;

pub use bean::{
    BeanClass, BeanProperty, DefaultClass, FactoryClass, FormBean, PropertySet, SerdeBean,
    ValidationError,
};
pub use definition::FormDefinition;
pub use error::{FieldsError, Result};
pub use options::{EnumOptions, OptionEnum, OptionSource};
pub use types::{Constrained, ConstrainedProperty, OptionEntry, OptionList, OptionSlot};
