//! End-to-end form scenarios: single fields, label priority and whole
//! beans.

use formbind::{
    BeanSource, Constrained, ConstrainedProperty, DefaultClass, FieldKind, FormBuilder,
    OptionList, ParsedTemplate, SerdeBean, Template, NO_VALUES,
};
use serde::Serialize;

fn parse(source: &str) -> ParsedTemplate {
    ParsedTemplate::parse("scenario", source).unwrap()
}

#[test_log::test]
fn hidden_field_with_encoded_default() {
    let mut template = parse("{{v form:hidden:hidden}}id=\"thehiddenone\"{{/v}}");
    let property = ConstrainedProperty::new("hidden")
        .with_default_value("non&e")
        .with_max_length(20);

    FormBuilder::new().generate_field(&mut template, &property, NO_VALUES, None);
    assert_eq!(
        template.value("form:hidden:hidden"),
        Some("<input type=\"hidden\" name=\"hidden\" id=\"thehiddenone\" value=\"non&amp;e\" />")
    );
}

#[test_log::test]
fn radio_submission_wins_and_display_uses_label() {
    let mut template = parse("{{v form:radio:question/}}|{{v form:display:question/}}");
    template.add_label("question:a1", "answer1");
    let property = ConstrainedProperty::new("question")
        .with_options(OptionList::from_values(["a1", "a3", "a2"]))
        .with_default_value("a2");

    let touched = FormBuilder::new().generate_field(&mut template, &property, &["a1"], None);
    assert_eq!(touched, ["form:radio:question", "form:display:question"]);

    let radio = template.value("form:radio:question").unwrap();
    assert!(radio.contains("value=\"a1\" checked=\"checked\" />answer1"));
    assert!(radio.contains("value=\"a2\" />a2"));
    assert_eq!(template.value("form:display:question"), Some("<div>answer1</div>"));
}

#[test_log::test]
fn boolean_checkbox_submission_wins() {
    let builder = FormBuilder::new();
    let checked = "<input type=\"checkbox\" name=\"invoice\" checked=\"checked\" />";

    let mut template = parse("{{v form:checkbox:invoice/}}");
    let invoice = ConstrainedProperty::new("invoice").with_default_value("true");
    assert_eq!(
        builder.field_kinds(&template, "invoice", None, Some(&invoice)),
        [FieldKind::CheckboxBoolean]
    );
    builder.generate_field(&mut template, &invoice, NO_VALUES, None);
    assert_eq!(template.render(), checked);

    let mut template = parse("{{v form:checkbox:invoice/}}");
    let invoice = ConstrainedProperty::new("invoice").with_default_value("false");
    builder.generate_field(&mut template, &invoice, &["true"], None);
    assert_eq!(template.render(), checked);
}

#[test_log::test]
fn select_out_of_list_value_is_only_echoed() {
    let mut template = parse("{{v form:select:colors/}}{{v form:display:colors/}}");
    let colors = ConstrainedProperty::new("colors")
        .with_options(OptionList::from_values(["black", "red", "blue"]));

    FormBuilder::new().generate_field(&mut template, &colors, &["orange"], None);
    assert_eq!(
        template.value("form:select:colors"),
        Some(
            "<select name=\"colors\"><option value=\"black\">black</option>\
             <option value=\"red\">red</option><option value=\"blue\">blue</option></select>"
        )
    );
    assert_eq!(template.value("form:display:colors"), Some("<div>orange</div>"));
}

#[test_log::test]
fn label_priority_falls_back_tier_by_tier() {
    let mut template = parse("{{v form:display:color/}}");
    let color = ConstrainedProperty::new("color")
        .with_options(OptionList::new().labeled("red", "Declared red"));
    let builder = FormBuilder::new();

    template.add_label("color:red", "Dynamic red");
    builder.generate_field(&mut template, &color, &["red"], None);
    assert_eq!(template.render(), "<div>Dynamic red</div>");
    builder.remove_field(&mut template, "color", None);

    template.remove_label("color:red");
    builder.generate_field(&mut template, &color, &["red"], None);
    assert_eq!(template.render(), "<div>Declared red</div>");
    builder.remove_field(&mut template, "color", None);

    let bare = ConstrainedProperty::new("color").with_options(OptionList::from_values(["red"]));
    builder.generate_field(&mut template, &bare, &["red"], None);
    assert_eq!(template.render(), "<div>red</div>");
}

#[derive(Serialize, Default)]
struct Registration {
    login: String,
    password: Option<String>,
    question: Option<String>,
    colors: Vec<String>,
    newsletter: bool,
    comment: Option<String>,
}

const REGISTRATION: &str = "<form>\n\
    {{v form:hidden:id}}x{{/v}}\n\
    {{v form:input:login}}class=\"wide\"{{/v}}{{v form:display:login/}}\n\
    {{v form:secret:password/}}\n\
    {{b form:label:question:a1}}First answer{{/b}}\
    {{v form:radio:question/}}{{v form:display:question/}}\n\
    {{v form:checkbox:colors/}}{{v form:display:colors/}}\n\
    {{v form:checkbox:newsletter/}}\n\
    {{v form:textarea:comment/}}\n\
    </form>";

fn registration_constraints() -> Constrained {
    Constrained::new()
        .with(ConstrainedProperty::new("login").with_not_null(true).with_max_length(16))
        .with(
            ConstrainedProperty::new("question")
                .with_options(OptionList::from_values(["a1", "a2"]))
                .with_default_value("a2"),
        )
        .with(
            ConstrainedProperty::new("colors")
                .with_options(OptionList::from_values(["red", "green", "blue"])),
        )
}

#[test_log::test]
fn whole_form_round_trip() {
    let mut template = parse(REGISTRATION);
    let original = template.render();
    let builder = FormBuilder::new();

    let bean = SerdeBean::new(Registration {
        login: "ernest".into(),
        password: Some("secret".into()),
        question: None,
        colors: vec!["green".into(), "purple".into()],
        newsletter: true,
        comment: None,
    })
    .with_constrained(registration_constraints());

    let touched = builder
        .generate_form(&mut template, BeanSource::Instance(&bean), None, None)
        .unwrap();
    assert_eq!(
        touched,
        [
            "form:input:login",
            "form:display:login",
            "form:secret:password",
            "form:radio:question",
            "form:display:question",
            "form:checkbox:colors",
            "form:display:colors",
            "form:checkbox:newsletter",
            "form:textarea:comment",
        ]
    );

    let rendered = template.render();
    assert!(rendered.contains("name=\"login\" class=\"wide\" value=\"ernest\" maxlength=\"16\" required=\"required\""));
    assert!(!rendered.contains("secret\""));
    assert!(rendered.contains("value=\"a2\" checked=\"checked\" />a2"));
    assert!(rendered.contains("/>First answer"));
    assert!(rendered.contains("<div>green</div><div>purple</div>"));
    assert!(rendered.contains("name=\"newsletter\" checked=\"checked\""));
    assert!(!rendered.contains("{{v"));

    builder
        .remove_form(&mut template, BeanSource::Instance(&bean), None)
        .unwrap();
    assert_eq!(template.render(), original);
}

#[test_log::test]
fn class_with_submitted_values_round_trip() {
    let mut template = parse(REGISTRATION);
    let original = template.render();
    let builder = FormBuilder::new();
    let class = DefaultClass::<Registration>::new().with_constrained(registration_constraints());

    let mut values = formbind::FormValues::new();
    values.insert("login".into(), vec!["<admin>".into()]);
    values.insert("question".into(), vec!["a1".into()]);

    builder
        .generate_form(&mut template, BeanSource::Class(&class), Some(&values), None)
        .unwrap();
    let rendered = template.render();
    assert!(rendered.contains("value=\"&lt;admin&gt;\""));
    assert!(rendered.contains("<div>&lt;admin&gt;</div>"));
    assert!(rendered.contains("<div>First answer</div>"));

    builder
        .remove_form(&mut template, BeanSource::Class(&class), None)
        .unwrap();
    assert_eq!(template.render(), original);
}
