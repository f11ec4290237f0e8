//! Removal of generated fields
//!
//! Removal needs no property metadata: it probes every tag family for the
//! field and clears whatever is set, so a template returns to the content
//! it had before generation.

use formbind_template::Template;
use tracing::debug;

use crate::builder::FormBuilder;
use crate::names::{effective_name, TagKind};

impl FormBuilder {
    /// Clear every tag generation could have written for `name` under
    /// `prefix`.
    pub fn remove_field<T>(&self, template: &mut T, name: &str, prefix: Option<&str>)
    where
        T: Template + ?Sized,
    {
        if name.is_empty() {
            return;
        }
        self.remove_template_field(template, &effective_name(prefix, name));
    }

    /// Clear the tags of a template field name as written by
    /// [`replace_field`](Self::replace_field).
    pub fn remove_template_field<T>(&self, template: &mut T, template_field_name: &str)
    where
        T: Template + ?Sized,
    {
        if template_field_name.is_empty() {
            return;
        }

        let mut removed = 0;
        for kind in TagKind::ALL {
            let id = kind.tag_id(template_field_name);
            if template.is_value_set(&id) {
                template.remove_value(&id);
                removed += 1;
            }
        }
        debug!(field = template_field_name, removed, "removed field");
    }

    /// Clear exactly the tags a generate call reported as touched.
    pub fn remove_tags<T, S>(&self, template: &mut T, tags: &[S])
    where
        T: Template + ?Sized,
        S: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref();
            if template.is_value_set(tag) {
                template.remove_value(tag);
            }
        }
    }
}
