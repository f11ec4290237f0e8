//! Marking ad hoc checked and selected tags
//!
//! These primitives work without property metadata. For a name and a value
//! they fill `<name>:<value>:selected` and `<name>:<value>:checked` when the
//! template declares them, and `<name>:checked` when the value is truthy.

use formbind_template::Template;
use tracing::trace;

use crate::builder::FormBuilder;
use crate::names::{SUFFIX_CHECKED, SUFFIX_SELECTED};

impl FormBuilder {
    /// Mark the tags for each value; returns the ids that were set.
    pub fn select_parameter<T, V>(&self, template: &mut T, name: &str, values: &[V]) -> Vec<String>
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        let mut touched: Vec<String> = Vec::new();
        if name.is_empty() || values.is_empty() {
            return touched;
        }

        let flag_id = format!("{name}{SUFFIX_CHECKED}");
        for value in values {
            let value = value.as_ref();

            let selected_id = format!("{name}:{value}{SUFFIX_SELECTED}");
            if template.has_value_id(&selected_id) {
                template.set_value(&selected_id, &self.config.selected_marker);
                touched.push(selected_id);
            }

            let checked_id = format!("{name}:{value}{SUFFIX_CHECKED}");
            if template.has_value_id(&checked_id) {
                template.set_value(&checked_id, &self.config.checked_marker);
                touched.push(checked_id);
            }

            if template.has_value_id(&flag_id) && self.config.is_truthy(value) {
                template.set_value(&flag_id, &self.config.checked_marker);
                if !touched.contains(&flag_id) {
                    touched.push(flag_id.clone());
                }
            }
        }

        trace!(field = name, touched = touched.len(), "selected parameter");
        touched
    }

    /// Clear `<name>:checked` and the per-value tags.
    pub fn unselect_parameter<T, V>(&self, template: &mut T, name: &str, values: &[V])
    where
        T: Template + ?Sized,
        V: AsRef<str>,
    {
        if name.is_empty() {
            return;
        }

        let flag_id = format!("{name}{SUFFIX_CHECKED}");
        if template.has_value_id(&flag_id) {
            template.remove_value(&flag_id);
        }

        for value in values {
            let value = value.as_ref();
            for suffix in [SUFFIX_SELECTED, SUFFIX_CHECKED] {
                let id = format!("{name}:{value}{suffix}");
                if template.has_value_id(&id) {
                    template.remove_value(&id);
                }
            }
        }
    }
}
