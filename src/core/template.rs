//! Prompt templates with `{{name}}` placeholders.
//!
//! A placeholder is written `{{name}}`, optionally padded with whitespace
//! (`{{ name }}`) or prefixed with `$` (`{{$name}}`). Names are made of ASCII
//! alphanumerics and `_`. Any other `{{ ... }}` sequence, and an unclosed
//! `{{`, is kept as literal text.

use std::collections::HashMap;
use std::num::NonZeroU32;

use super::error::LlmError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// An immutable prompt template, parsed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    raw: String,
    segments: Vec<Segment>,
    max_output_tokens: Option<NonZeroU32>,
}

impl PromptTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = parse(&raw);
        Self {
            raw,
            segments,
            max_output_tokens: None,
        }
    }

    /// Limit the length of completions produced from this template.
    pub fn with_max_output_tokens(mut self, max_output_tokens: NonZeroU32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn max_output_tokens(&self) -> Option<NonZeroU32> {
        self.max_output_tokens
    }

    /// Placeholder names in order of first appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder with its value from `inputs`.
    ///
    /// Values are inserted verbatim and are not scanned for placeholders.
    /// Keys without a matching placeholder are ignored.
    pub fn render(&self, inputs: &PromptInputs) -> Result<String, LlmError> {
        let mut rendered = String::with_capacity(self.raw.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder(name) => {
                    let value =
                        inputs
                            .get(name)
                            .ok_or_else(|| LlmError::MissingPlaceholderValue {
                                name: name.clone(),
                            })?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }
}

fn parse(raw: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };

        match placeholder_name(&after_open[..end]) {
            Some(name) => {
                literal.push_str(&rest[..start]);
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.to_string()));
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Keep the first brace as text and rescan from the next one so
                // that `{{{name}}}` still finds the inner placeholder.
                literal.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

fn placeholder_name(inner: &str) -> Option<&str> {
    let trimmed = inner.trim();
    let name = trimmed.strip_prefix('$').unwrap_or(trimmed);

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    valid.then_some(name)
}

/// Values for template placeholders, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInputs {
    values: HashMap<String, String>,
}

impl PromptInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for PromptInputs {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for PromptInputs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TLDR: &str = "{{input}}\n\nOne line TLDR with the fewest words.";

    #[test]
    fn test_renders_tldr_prompt() {
        let template = PromptTemplate::new(TLDR);
        let inputs = PromptInputs::new().with("input", "A\nB\nC");

        let rendered = template.render(&inputs).unwrap();

        assert_eq!(rendered, "A\nB\nC\n\nOne line TLDR with the fewest words.");
    }

    #[test]
    fn test_accepts_dollar_prefix_and_padding() {
        let template = PromptTemplate::new("[{{$input}}] [{{ input }}] [{{ $input }}]");
        let inputs = PromptInputs::new().with("input", "x");

        assert_eq!(template.render(&inputs).unwrap(), "[x] [x] [x]");
    }

    #[test]
    fn test_every_placeholder_is_replaced() {
        let template = PromptTemplate::new("{{greeting}}, {{name}}! {{name}} again, {{greeting}}.");
        let inputs = PromptInputs::new()
            .with("greeting", "Hello")
            .with("name", "Ada")
            .with("unused", "ignored");

        let rendered = template.render(&inputs).unwrap();

        assert_eq!(rendered, "Hello, Ada! Ada again, Hello.");
        for name in template.placeholders() {
            assert!(!rendered.contains(&format!("{{{{{name}}}}}")));
        }
    }

    #[test]
    fn test_missing_value_names_first_placeholder_by_position() {
        let template = PromptTemplate::new("{{first}} {{known}} {{second}}");
        let inputs = PromptInputs::new().with("known", "k");

        let err = template.render(&inputs).unwrap_err();

        match err {
            LlmError::MissingPlaceholderValue { name } => assert_eq!(name, "first"),
            other => panic!("Expected MissingPlaceholderValue, got {other:?}"),
        }
    }

    #[test]
    fn test_render_is_repeatable() {
        let template = PromptTemplate::new(TLDR);
        let inputs = PromptInputs::new().with("input", "same text");

        assert_eq!(
            template.render(&inputs).unwrap(),
            template.render(&inputs).unwrap()
        );
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let raw = "Plain text with { single } braces and }} stray closers.";
        let template = PromptTemplate::new(raw);

        assert_eq!(template.render(&PromptInputs::new()).unwrap(), raw);
        assert_eq!(
            template
                .render(&PromptInputs::new().with("input", "unused"))
                .unwrap(),
            raw
        );
        assert_eq!(template.placeholders().count(), 0);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let template = PromptTemplate::new("{{input}}");
        let inputs = PromptInputs::new()
            .with("input", "{{other}}")
            .with("other", "should not appear");

        assert_eq!(template.render(&inputs).unwrap(), "{{other}}");
    }

    #[test]
    fn test_invalid_or_unclosed_braces_stay_literal() {
        let template = PromptTemplate::new("{{not a name}} {{}} {{input}} {{unclosed");
        let inputs = PromptInputs::new().with("input", "ok");

        assert_eq!(
            template.render(&inputs).unwrap(),
            "{{not a name}} {{}} ok {{unclosed"
        );
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["input"]);
    }

    #[test]
    fn test_triple_braces_keep_outer_brace() {
        let template = PromptTemplate::new("{{{input}}}");
        let inputs = PromptInputs::new().with("input", "v");

        assert_eq!(template.render(&inputs).unwrap(), "{v}");
    }

    #[test]
    fn test_max_output_tokens() {
        let template = PromptTemplate::new(TLDR);
        assert_eq!(template.max_output_tokens(), None);

        let limit = NonZeroU32::new(100).unwrap();
        let template = template.with_max_output_tokens(limit);
        assert_eq!(template.max_output_tokens(), Some(limit));
        assert_eq!(template.raw(), TLDR);
    }

    #[test]
    fn test_inputs_from_hash_map_and_iterator() {
        let mut map = HashMap::new();
        map.insert("input".to_string(), "from map".to_string());
        let inputs = PromptInputs::from(map);
        assert_eq!(inputs.get("input"), Some("from map"));

        let inputs: PromptInputs = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs.get("b"), Some("2"));
        assert!(!inputs.is_empty());
    }
}
