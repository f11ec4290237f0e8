//! Label resolution for option values

use formbind_fields::ConstrainedProperty;
use formbind_template::Template;

use crate::names::PREFIX_FORM_LABEL;

/// The best display label for `value`, highest priority first:
///
/// 1. the template's dynamic label bundle, keyed `"<field>:<value>"` with
///    the unprefixed field name
/// 2. a `form:label:<tag field>:<value>` block authored in the template,
///    used verbatim
/// 3. the label declared next to the option in the property's list
/// 4. the raw value
///
/// Everything except an authored block is encoded.
pub fn resolve_label<T>(
    template: &T,
    field: &str,
    tag_field: &str,
    value: &str,
    property: Option<&ConstrainedProperty>,
) -> String
where
    T: Template + ?Sized,
{
    if let Some(label) = template.lookup_label(&format!("{field}:{value}")) {
        return template.encode(label);
    }

    if let Some(block) = template.block(&format!("{PREFIX_FORM_LABEL}{tag_field}:{value}")) {
        return block;
    }

    if let Some(label) = property
        .and_then(ConstrainedProperty::in_list)
        .and_then(|list| list.label_for(value))
    {
        return template.encode(label);
    }

    template.encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_fields::OptionList;
    use formbind_template::ParsedTemplate;

    fn property() -> ConstrainedProperty {
        ConstrainedProperty::new("color")
            .with_options(OptionList::new().labeled("red", "Red & warm").entry("blue"))
    }

    #[test]
    fn falls_through_every_tier() {
        let mut t = ParsedTemplate::parse("t", "{{b form:label:color:red}}<b>Rouge</b>{{/b}}")
            .unwrap();
        let p = property();
        t.add_label("color:red", "Dynamic");

        assert_eq!(resolve_label(&t, "color", "color", "red", Some(&p)), "Dynamic");
        t.remove_label("color:red");
        assert_eq!(
            resolve_label(&t, "color", "color", "red", Some(&p)),
            "<b>Rouge</b>"
        );

        let plain = ParsedTemplate::parse("t", "").unwrap();
        assert_eq!(
            resolve_label(&plain, "color", "color", "red", Some(&p)),
            "Red &amp; warm"
        );
        assert_eq!(resolve_label(&plain, "color", "color", "blue", Some(&p)), "blue");
        assert_eq!(resolve_label(&plain, "color", "color", "a<b", None), "a&lt;b");
    }

    #[test]
    fn dynamic_key_uses_unprefixed_name() {
        let mut t = ParsedTemplate::parse("t", "").unwrap();
        t.add_label("color:red", "Rouge");
        assert_eq!(resolve_label(&t, "color", "mycolor", "red", None), "Rouge");
        assert_eq!(resolve_label(&t, "mycolor", "mycolor", "red", None), "red");
    }
}
