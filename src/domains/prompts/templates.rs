//! Declarative prompt templates.
//!
//! Templates use a small placeholder syntax:
//! - `{{variable}}` is replaced with the argument's value
//! - `{{#if variable}}content{{/if}}` keeps `content` only if the argument is set
//! - `{{#if variable}}content{{else}}alternative{{/if}}`
//!
//! Conditionals do not nest. Placeholders without a value are dropped.

use async_trait::async_trait;
use rmcp::model::{PromptArgument, PromptMessageRole};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

use super::error::PromptError;
use super::prompt::{Arguments, Message, Prompt, RenderPrompt};

const IF_OPEN: &str = "{{#if ";
const ELSE: &str = "{{else}}";
const IF_CLOSE: &str = "{{/if}}";
const TAG_OPEN: &str = "{{";
const TAG_CLOSE: &str = "}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Check that every required argument has a value.
    pub fn validate(&self, arguments: &Arguments) -> Result<(), PromptError> {
        self.arguments
            .iter()
            .filter(|arg| arg.required.unwrap_or(false))
            .find(|arg| argument_text(arguments, &arg.name).is_none())
            .map_or(Ok(()), |arg| Err(PromptError::missing_argument(&arg.name)))
    }

    /// Render the template text with the given arguments.
    pub fn render_text(&self, arguments: &Arguments) -> Result<String, PromptError> {
        let expanded = expand_conditionals(&self.template, arguments)?;
        Ok(substitute(&expanded, arguments))
    }
}

#[async_trait]
impl<C: Send + Sync + 'static> RenderPrompt<C> for PromptTemplate {
    async fn render(
        &self,
        arguments: Option<Arguments>,
        _context: Option<&C>,
    ) -> Result<Vec<Message>, PromptError> {
        let arguments = arguments.unwrap_or_default();
        self.validate(&arguments)?;
        let text = self.render_text(&arguments)?;
        Ok(vec![Message::new_text(PromptMessageRole::User, text)])
    }
}

/// Text form of an argument. Null and missing values have none.
fn argument_text<'a>(arguments: &'a Arguments, name: &str) -> Option<Cow<'a, str>> {
    match arguments.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn is_set(arguments: &Arguments, name: &str) -> bool {
    argument_text(arguments, name).is_some_and(|text| !text.is_empty())
}

fn expand_conditionals(source: &str, arguments: &Arguments) -> Result<String, PromptError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some((before, after_open)) = rest.split_once(IF_OPEN) {
        out.push_str(before);

        let (variable, after_tag) = after_open
            .split_once(TAG_CLOSE)
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let variable = variable.trim();
        let (body, tail) = after_tag.split_once(IF_CLOSE).ok_or_else(|| {
            PromptError::template(format!("Missing {{{{/if}}}} for '{variable}'"))
        })?;
        let (then_branch, else_branch) = body.split_once(ELSE).unwrap_or((body, ""));

        out.push_str(if is_set(arguments, variable) {
            then_branch
        } else {
            else_branch
        });
        rest = tail;
    }

    out.push_str(rest);
    Ok(out)
}

fn substitute(source: &str, arguments: &Arguments) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find(TAG_OPEN) {
        let Some(len) = rest[start..].find(TAG_CLOSE) else {
            break;
        };
        let tag = &rest[start..start + len + TAG_CLOSE.len()];
        let key = tag[TAG_OPEN.len()..tag.len() - TAG_CLOSE.len()].trim();

        out.push_str(&rest[..start]);
        if key.starts_with('#') || key.starts_with('/') || key == "else" {
            // stray block tag
            out.push_str(tag);
        } else if let Some(value) = argument_text(arguments, key) {
            out.push_str(&value);
        }
        rest = &rest[start + tag.len()..];
    }

    out.push_str(rest);
    out
}

/// Builder for template-backed prompts.
pub struct PromptBuilder {
    name: String,
    description: Option<String>,
    tags: BTreeSet<String>,
    arguments: Vec<PromptArgument>,
    template: String,
}

impl PromptBuilder {
    /// Create a new builder with the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: BTreeSet::new(),
            arguments: Vec::new(),
            template: String::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add a required argument.
    pub fn required_arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.arguments.push(argument(name, description, true));
        self
    }

    /// Add an optional argument.
    pub fn optional_arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.arguments.push(argument(name, description, false));
        self
    }

    /// Add a fully specified argument.
    pub fn argument(mut self, argument: PromptArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// The bare template, without tags.
    pub fn into_template(self) -> PromptTemplate {
        PromptTemplate::new(self.name, self.description, self.arguments, self.template)
    }

    /// Build a prompt rendered by this template.
    pub fn build<C: Send + Sync + 'static>(self) -> Prompt<C> {
        let tags = self.tags.clone();
        let template = self.into_template();
        let prompt = Prompt::new(template.name.clone(), template.clone())
            .with_arguments(template.arguments)
            .with_tags(tags);

        match template.description {
            Some(description) => prompt.with_description(description),
            None => prompt,
        }
    }
}

fn argument(name: impl Into<String>, description: impl Into<String>, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.into(),
        title: None,
        description: Some(description.into()),
        required: Some(required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    fn template(text: &str) -> PromptTemplate {
        PromptTemplate::new("test", None, vec![], text)
    }

    #[test]
    fn test_simple_substitution() {
        let result = template("Hello, {{name}}!")
            .render_text(&args(json!({"name": "World"})))
            .unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_non_string_values() {
        let result = template("{{count}} items, strict={{strict}}")
            .render_text(&args(json!({"count": 3, "strict": true})))
            .unwrap();
        assert_eq!(result, "3 items, strict=true");
    }

    #[test]
    fn test_conditional_with_value() {
        let result = template("Hello{{#if name}}, {{name}}{{/if}}!")
            .render_text(&args(json!({"name": "World"})))
            .unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_conditional_without_value() {
        let t = template("Hello{{#if name}}, {{name}}{{/if}}!");
        assert_eq!(t.render_text(&Arguments::new()).unwrap(), "Hello!");
        assert_eq!(t.render_text(&args(json!({"name": ""}))).unwrap(), "Hello!");
    }

    #[test]
    fn test_conditional_with_else() {
        let result = template("Hello, {{#if name}}{{name}}{{else}}stranger{{/if}}!")
            .render_text(&Arguments::new())
            .unwrap();
        assert_eq!(result, "Hello, stranger!");
    }

    #[test]
    fn test_unmatched_placeholders_are_dropped() {
        let result = template("A{{missing}}B").render_text(&Arguments::new()).unwrap();
        assert_eq!(result, "AB");
    }

    #[test]
    fn test_unclosed_conditional() {
        let err = template("{{#if name}}never closed")
            .render_text(&Arguments::new())
            .unwrap_err();
        assert!(matches!(err, PromptError::TemplateError(_)));
    }

    #[test]
    fn test_validate_required_arguments() {
        let t = PromptBuilder::new("greet")
            .required_arg("name", "Who")
            .optional_arg("style", "How")
            .into_template();

        assert!(t.validate(&args(json!({"name": "Ada"}))).is_ok());
        let err = t.validate(&args(json!({"style": "formal"}))).unwrap_err();
        assert!(matches!(err, PromptError::MissingArgument(ref a) if a == "name"));
        assert!(t.validate(&args(json!({"name": null}))).is_err());
    }

    #[test]
    fn test_builder() {
        let prompt: Prompt = PromptBuilder::new("greeting")
            .description("A greeting prompt")
            .tag("social")
            .required_arg("name", "The name to greet")
            .optional_arg("style", "The greeting style")
            .template("Hello, {{name}}!")
            .build();

        assert_eq!(prompt.name(), "greeting");
        assert_eq!(prompt.description(), Some("A greeting prompt"));
        assert_eq!(prompt.arguments().len(), 2);
        assert!(prompt.has_tag("social"));
    }

    #[test]
    fn test_render_as_prompt() {
        let prompt: Prompt = PromptBuilder::new("greeting")
            .required_arg("name", "The name to greet")
            .template("Hello, {{name}}!")
            .build();

        let messages = tokio_test::block_on(prompt.render(Some(args(json!({"name": "Ada"}))), None))
            .unwrap();
        let json = serde_json::to_value(&messages).unwrap();
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[0]["content"]["text"], "Hello, Ada!");

        let missing = tokio_test::block_on(prompt.render(None, None)).unwrap_err();
        assert!(matches!(missing, PromptError::MissingArgument(_)));
    }
}
