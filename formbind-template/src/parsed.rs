//! In-memory template parsed from a minimal tag syntax
//!
//! ```text
//! {{v id/}}                 value tag without default
//! {{v id}}default{{/v}}     value tag whose default text is "default"
//! {{b id}}content{{/b}}     named block, not rendered in place
//! ```
//!
//! Ids run up to the closing `}}` or `/}}` and may contain `/`, so option
//! values such as `http://x` can be part of an id. An id cannot contain
//! whitespace or `}`, and a trailing `/` is read as self-closing.
//!
//! Blocks may contain value tags but not other blocks. Everything outside a
//! tag is kept verbatim, so a template with no values set renders back to its
//! source minus the block definitions and tag syntax.

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use tracing::trace;

use crate::error::{Result, TemplateError};
use crate::template::Template;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(/?)(v|b)(?:\s+([^\s}]+?))?\s*(/?)\}\}").expect("tag pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Value(String),
}

struct OpenBlock {
    id: String,
    parts: Vec<Part>,
    line: usize,
}

struct OpenValue {
    id: String,
    start: usize,
    line: usize,
}

/// A template parsed into content, blocks and value defaults, holding its
/// own value store and dynamic label bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    name: String,
    content: Vec<Part>,
    blocks: IndexMap<String, Vec<Part>>,
    defaults: HashMap<String, String>,
    value_ids: IndexSet<String>,
    values: HashMap<String, String>,
    labels: IndexMap<String, String>,
}

impl ParsedTemplate {
    /// Parse template source.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let mut content = Vec::new();
        let mut blocks = IndexMap::new();
        let mut defaults = HashMap::new();
        let mut value_ids = IndexSet::new();
        let mut open_block: Option<OpenBlock> = None;
        let mut open_value: Option<OpenValue> = None;
        let mut cursor = 0;

        for caps in TAG.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let kind = caps.get(2).map_or("", |m| m.as_str());
            let id = caps.get(3).map(|m| m.as_str());
            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());
            let line = line_at(source, whole.start());

            if let Some(open) = open_value.take() {
                if closing && kind == "v" && id.is_none() {
                    defaults
                        .entry(open.id)
                        .or_insert_with(|| source[open.start..whole.start()].to_string());
                    cursor = whole.end();
                    continue;
                }
                return Err(parse_error(
                    &name,
                    line,
                    format!("tag inside the default of value '{}'", open.id),
                ));
            }

            push_text(
                parts_mut(&mut content, &mut open_block),
                &source[cursor..whole.start()],
            );
            cursor = whole.end();

            match (closing, kind, id) {
                (false, "v", Some(id)) => {
                    value_ids.insert(id.to_string());
                    parts_mut(&mut content, &mut open_block).push(Part::Value(id.to_string()));
                    if !self_closing {
                        open_value = Some(OpenValue {
                            id: id.to_string(),
                            start: whole.end(),
                            line,
                        });
                    }
                }
                (false, "b", Some(id)) => {
                    if self_closing {
                        return Err(parse_error(
                            &name,
                            line,
                            format!("block '{id}' cannot be self-closing"),
                        ));
                    }
                    if let Some(outer) = &open_block {
                        return Err(parse_error(
                            &name,
                            line,
                            format!("block '{id}' is nested inside block '{}'", outer.id),
                        ));
                    }
                    if blocks.contains_key(id) {
                        return Err(parse_error(
                            &name,
                            line,
                            format!("block '{id}' is declared twice"),
                        ));
                    }
                    open_block = Some(OpenBlock {
                        id: id.to_string(),
                        parts: Vec::new(),
                        line,
                    });
                }
                (true, "b", None) => {
                    let Some(block) = open_block.take() else {
                        return Err(parse_error(&name, line, "block end without a block".into()));
                    };
                    blocks.insert(block.id, block.parts);
                }
                (true, "v", None) => {
                    return Err(parse_error(&name, line, "value end without a value".into()));
                }
                (false, _, None) => {
                    return Err(parse_error(&name, line, "tag is missing an id".into()));
                }
                _ => {
                    return Err(parse_error(
                        &name,
                        line,
                        format!("malformed tag '{}'", whole.as_str()),
                    ));
                }
            }
        }

        if let Some(open) = open_value {
            return Err(parse_error(
                &name,
                open.line,
                format!("unterminated value '{}'", open.id),
            ));
        }

        push_text(
            parts_mut(&mut content, &mut open_block),
            &source[cursor..],
        );

        if let Some(block) = open_block {
            return Err(parse_error(
                &name,
                block.line,
                format!("unterminated block '{}'", block.id),
            ));
        }

        trace!(
            template = %name,
            values = value_ids.len(),
            blocks = blocks.len(),
            "parsed template"
        );

        Ok(Self {
            name,
            content,
            blocks,
            defaults,
            value_ids,
            values: HashMap::new(),
            labels: IndexMap::new(),
        })
    }

    /// Register a dynamic label keyed `"<field>:<value>"`.
    pub fn add_label(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }

    /// Drop a dynamic label, returning it if it was registered.
    pub fn remove_label(&mut self, key: &str) -> Option<String> {
        self.labels.shift_remove(key)
    }

    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// All declared value ids in declaration order.
    pub fn value_ids(&self) -> impl Iterator<Item = &str> {
        self.value_ids.iter().map(String::as_str)
    }

    /// All declared block ids in declaration order.
    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    fn render_parts(&self, parts: &[Part]) -> String {
        let mut out = String::new();
        for part in parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Value(id) => {
                    if let Some(value) = self.values.get(id) {
                        out.push_str(value);
                    } else if let Some(default) = self.defaults.get(id) {
                        out.push_str(default);
                    }
                }
            }
        }
        out
    }
}

impl Template for ParsedTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_value_id(&self, id: &str) -> bool {
        self.value_ids.contains(id)
    }

    fn is_value_set(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.values.insert(id.to_string(), value.to_string());
    }

    fn append_value(&mut self, id: &str, value: &str) {
        self.values.entry(id.to_string()).or_default().push_str(value);
    }

    fn remove_value(&mut self, id: &str) {
        self.values.remove(id);
    }

    fn default_value(&self, id: &str) -> Option<&str> {
        self.defaults.get(id).map(String::as_str)
    }

    fn has_block(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    fn block(&self, id: &str) -> Option<String> {
        self.blocks.get(id).map(|parts| self.render_parts(parts))
    }

    fn lookup_label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    fn render(&self) -> String {
        self.render_parts(&self.content)
    }
}

fn parts_mut<'a>(content: &'a mut Vec<Part>, open_block: &'a mut Option<OpenBlock>) -> &'a mut Vec<Part> {
    match open_block {
        Some(block) => &mut block.parts,
        None => content,
    }
}

fn push_text(parts: &mut Vec<Part>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Part::Text(last)) = parts.last_mut() {
        last.push_str(text);
    } else {
        parts.push(Part::Text(text.to_string()));
    }
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

fn parse_error(template: &str, line: usize, message: String) -> TemplateError {
    TemplateError::Parse {
        template: template.to_string(),
        line,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_may_contain_slashes() {
        let t = ParsedTemplate::parse(
            "t",
            "{{b form:label:site:http://x}}X{{/b}}{{v site:http://x:checked/}}{{v a/}}",
        )
        .unwrap();
        assert_eq!(
            t.block_ids().collect::<Vec<_>>(),
            ["form:label:site:http://x"]
        );
        assert_eq!(
            t.value_ids().collect::<Vec<_>>(),
            ["site:http://x:checked", "a"]
        );
        assert_eq!(t.block("form:label:site:http://x").as_deref(), Some("X"));
    }

    #[test]
    fn renders_text_and_unset_values() {
        let t = ParsedTemplate::parse("t", "<p>{{v greeting/}}</p>").unwrap();
        assert!(t.has_value_id("greeting"));
        assert!(!t.is_value_set("greeting"));
        assert_eq!(t.render(), "<p></p>");
    }

    #[test]
    fn renders_default_until_set() {
        let mut t = ParsedTemplate::parse("t", "[{{v who}}world{{/v}}]").unwrap();
        assert_eq!(t.default_value("who"), Some("world"));
        assert_eq!(t.render(), "[world]");

        t.set_value("who", "there");
        assert_eq!(t.render(), "[there]");

        t.remove_value("who");
        assert_eq!(t.render(), "[world]");
    }

    #[test]
    fn blocks_are_not_rendered_in_place() {
        let mut t =
            ParsedTemplate::parse("t", "a{{b row}}<li>{{v item/}}</li>{{/b}}b{{v list/}}").unwrap();
        assert_eq!(t.render(), "ab");
        assert!(t.has_block("row"));
        assert!(t.has_value_id("item"));

        t.set_value("item", "one");
        t.append_block("list", "row").unwrap();
        t.set_value("item", "two");
        t.append_block("list", "row").unwrap();
        t.remove_value("item");
        assert_eq!(t.render(), "ab<li>one</li><li>two</li>");
    }

    #[test]
    fn empty_block_is_declared() {
        let t = ParsedTemplate::parse("t", "{{b nothing}}{{/b}}").unwrap();
        assert!(t.has_block("nothing"));
        assert_eq!(t.block("nothing").as_deref(), Some(""));
    }

    #[test]
    fn append_unknown_block_fails() {
        let mut t = ParsedTemplate::parse("t", "{{v list/}}").unwrap();
        let err = t.append_block("list", "missing").unwrap_err();
        assert!(matches!(err, TemplateError::UnknownBlock { .. }));
    }

    #[test]
    fn append_value_starts_from_empty() {
        let mut t = ParsedTemplate::parse("t", "{{v x}}dflt{{/v}}").unwrap();
        t.append_value("x", "a");
        t.append_value("x", "b");
        assert_eq!(t.value("x"), Some("ab"));
        assert_eq!(t.render(), "ab");
    }

    #[test]
    fn rejects_nested_blocks() {
        let err = ParsedTemplate::parse("t", "{{b a}}{{b b}}{{/b}}{{/b}}").unwrap_err();
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn rejects_unterminated_block_with_line() {
        let err = ParsedTemplate::parse("t", "x\n\n{{b a}}oops").unwrap_err();
        assert_eq!(
            err,
            TemplateError::Parse {
                template: "t".into(),
                line: 3,
                message: "unterminated block 'a'".into(),
            }
        );
    }

    #[test]
    fn rejects_unterminated_value() {
        let err = ParsedTemplate::parse("t", "{{v a}}never closed").unwrap_err();
        assert!(err.to_string().contains("unterminated value 'a'"));
    }

    #[test]
    fn rejects_tag_inside_default() {
        let err = ParsedTemplate::parse("t", "{{v a}}{{v b/}}{{/v}}").unwrap_err();
        assert!(err.to_string().contains("default of value 'a'"));
    }

    #[test]
    fn rejects_stray_block_end() {
        assert!(ParsedTemplate::parse("t", "{{/b}}").is_err());
        assert!(ParsedTemplate::parse("t", "{{/v}}").is_err());
    }

    #[test]
    fn ids_may_contain_colons() {
        let t = ParsedTemplate::parse("t", "{{v form:input:login/}}{{b form:label:q:a1}}A{{/b}}")
            .unwrap();
        assert!(t.has_value_id("form:input:login"));
        assert_eq!(t.block("form:label:q:a1").as_deref(), Some("A"));
    }

    #[test]
    fn label_bundle_add_remove_clear() {
        let mut t = ParsedTemplate::parse("t", "").unwrap();
        t.add_label("color:red", "Rouge");
        t.add_label("color:blue", "Bleu");
        assert_eq!(t.lookup_label("color:red"), Some("Rouge"));
        assert_eq!(t.remove_label("color:red").as_deref(), Some("Rouge"));
        assert_eq!(t.lookup_label("color:red"), None);
        t.clear_labels();
        assert_eq!(t.lookup_label("color:blue"), None);
    }

    #[test]
    fn encode_escapes_markup_and_quotes() {
        let t = ParsedTemplate::parse("t", "").unwrap();
        assert_eq!(t.encode("non&e"), "non&amp;e");
        assert_eq!(t.encode("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }
}
