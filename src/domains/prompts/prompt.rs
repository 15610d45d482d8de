//! Prompt definitions.
//!
//! A [`Prompt`] is an immutable, cheaply clonable value: metadata plus a
//! shared render procedure. Prompts are built either from a declarative
//! template (see [`PromptBuilder`](super::templates::PromptBuilder)) or from
//! a function whose typed parameter struct becomes the argument contract.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use rmcp::model::{Prompt as McpPrompt, PromptArgument, PromptMessage, PromptMessageRole};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::error::PromptError;

/// A single rendered prompt message.
pub type Message = PromptMessage;

/// Arguments supplied to a render, in their MCP wire shape.
pub type Arguments = Map<String, Value>;

/// The render procedure behind a prompt.
///
/// `C` is the caller-supplied context. It is passed through unexamined.
#[async_trait]
pub trait RenderPrompt<C = ()>: Send + Sync {
    /// Produce the messages for the given arguments and context.
    async fn render(
        &self,
        arguments: Option<Arguments>,
        context: Option<&C>,
    ) -> Result<Vec<Message>, PromptError>;
}

/// Conversion of a prompt function's return value into messages.
///
/// Plain strings become a single user message.
pub trait IntoMessages {
    fn into_messages(self) -> Vec<Message>;
}

impl IntoMessages for Vec<Message> {
    fn into_messages(self) -> Vec<Message> {
        self
    }
}

impl IntoMessages for Message {
    fn into_messages(self) -> Vec<Message> {
        vec![self]
    }
}

impl IntoMessages for String {
    fn into_messages(self) -> Vec<Message> {
        vec![Message::new_text(PromptMessageRole::User, self)]
    }
}

impl IntoMessages for &'static str {
    fn into_messages(self) -> Vec<Message> {
        self.to_string().into_messages()
    }
}

impl IntoMessages for Vec<String> {
    fn into_messages(self) -> Vec<Message> {
        self.into_iter()
            .map(|text| Message::new_text(PromptMessageRole::User, text))
            .collect()
    }
}

/// A named, renderable prompt.
pub struct Prompt<C = ()> {
    name: String,
    description: Option<String>,
    tags: BTreeSet<String>,
    arguments: Vec<PromptArgument>,
    renderer: Arc<dyn RenderPrompt<C>>,
}

impl<C> Clone for Prompt<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            arguments: self.arguments.clone(),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<C> fmt::Debug for Prompt<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prompt")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("tags", &self.tags)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl<C> Prompt<C> {
    /// The prompt's own name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// The arguments this prompt accepts.
    pub fn arguments(&self) -> &[PromptArgument] {
        &self.arguments
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Replace the declared argument list.
    pub fn with_arguments(mut self, arguments: Vec<PromptArgument>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Whether both values share the same render procedure, i.e. one is a
    /// clone of the other.
    pub fn same_definition(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.renderer, &other.renderer)
    }

    /// Run the render procedure.
    pub async fn render(
        &self,
        arguments: Option<Arguments>,
        context: Option<&C>,
    ) -> Result<Vec<Message>, PromptError> {
        self.renderer.render(arguments, context).await
    }

    /// Describe this prompt for an MCP `prompts/list` response under `key`.
    pub fn to_mcp_prompt(&self, key: &str) -> McpPrompt {
        McpPrompt {
            name: key.to_string(),
            title: None,
            description: self.description.clone(),
            arguments: Some(self.arguments.clone()),
            icons: None,
            meta: None,
        }
    }
}

impl<C: Send + Sync + 'static> Prompt<C> {
    /// Create a prompt from any render procedure.
    pub fn new(name: impl Into<String>, renderer: impl RenderPrompt<C> + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: BTreeSet::new(),
            arguments: Vec::new(),
            renderer: Arc::new(renderer),
        }
    }

    /// Create a prompt from an async function taking a typed argument struct.
    ///
    /// The JSON schema of `A` becomes the argument list. Without an explicit
    /// `name`, the function's own name is used; without a `description`, the
    /// doc comment of `A` is used.
    pub fn from_fn<A, F, Fut, R>(
        func: F,
        name: Option<&str>,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Self, PromptError>
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, PromptError>> + Send + 'static,
        R: IntoMessages + Send + 'static,
    {
        let name = resolve_name::<F>(name)?;
        let render: Box<RenderFn<A, C>> = Box::new(move |args: A, _context: Option<&C>| {
            let pending = func(args);
            async move { pending.await.map(IntoMessages::into_messages) }.boxed()
        });
        Ok(Self::from_render_fn(name, description, tags, render))
    }

    /// Like [`from_fn`](Self::from_fn), for functions that also want the
    /// render context.
    pub fn from_fn_with_context<A, F, Fut, R>(
        func: F,
        name: Option<&str>,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Self, PromptError>
    where
        C: Clone,
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A, Option<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, PromptError>> + Send + 'static,
        R: IntoMessages + Send + 'static,
    {
        let name = resolve_name::<F>(name)?;
        let render: Box<RenderFn<A, C>> = Box::new(move |args: A, context: Option<&C>| {
            let pending = func(args, context.cloned());
            async move { pending.await.map(IntoMessages::into_messages) }.boxed()
        });
        Ok(Self::from_render_fn(name, description, tags, render))
    }

    /// Create a prompt from a synchronous function.
    pub fn from_sync_fn<A, F, R>(
        func: F,
        name: Option<&str>,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Self, PromptError>
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> Result<R, PromptError> + Send + Sync + 'static,
        R: IntoMessages + Send + 'static,
    {
        let name = resolve_name::<F>(name)?;
        let render: Box<RenderFn<A, C>> = Box::new(move |args: A, _context: Option<&C>| {
            futures::future::ready(func(args).map(IntoMessages::into_messages)).boxed()
        });
        Ok(Self::from_render_fn(name, description, tags, render))
    }

    fn from_render_fn<A>(
        name: String,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
        render: Box<RenderFn<A, C>>,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
    {
        let (arguments, schema_description) = argument_contract::<A>();
        Self {
            renderer: Arc::new(FnRenderer {
                prompt: name.clone(),
                render,
            }),
            name,
            description: description.map(str::to_string).or(schema_description),
            tags: tags.unwrap_or_default(),
            arguments,
        }
    }
}

type RenderFn<A, C> = dyn for<'c> Fn(A, Option<&'c C>) -> BoxFuture<'static, Result<Vec<Message>, PromptError>>
    + Send
    + Sync;

/// Render procedure backed by a function of a typed argument struct.
struct FnRenderer<A, C> {
    prompt: String,
    render: Box<RenderFn<A, C>>,
}

#[async_trait]
impl<A, C> RenderPrompt<C> for FnRenderer<A, C>
where
    A: DeserializeOwned + Send + 'static,
    C: Send + Sync + 'static,
{
    async fn render(
        &self,
        arguments: Option<Arguments>,
        context: Option<&C>,
    ) -> Result<Vec<Message>, PromptError> {
        let args: A = serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
            .map_err(|e| PromptError::invalid_arguments(&self.prompt, e.to_string()))?;
        (self.render)(args, context).await
    }
}

fn resolve_name<F>(name: Option<&str>) -> Result<String, PromptError> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => Ok(name.to_string()),
        None => callable_name::<F>()
            .ok_or_else(|| PromptError::missing_name(std::any::type_name::<F>())),
    }
}

/// Last path segment of a function item's type name.
///
/// Closures (including ones defined inside generic functions) and function
/// pointers have no usable name.
fn callable_name<F>() -> Option<String> {
    let full = std::any::type_name::<F>();

    // Drop generic arguments at any depth, keeping only the item path.
    let mut path = String::with_capacity(full.len());
    let mut depth = 0usize;
    for ch in full.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => path.push(ch),
            _ => {}
        }
    }

    // A fn item is a plain `a::b::name` path; closures carry `{{closure}}`
    // and fn pointers read `fn(..) -> ..`.
    let is_item_path = path.split("::").all(|segment| {
        !segment.is_empty()
            && !segment.starts_with(|c: char| c.is_ascii_digit())
            && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
    });
    if !is_item_path {
        return None;
    }

    path.rsplit("::").next().map(str::to_string)
}

/// Argument list and description derived from the JSON schema of `A`.
fn argument_contract<A: JsonSchema>() -> (Vec<PromptArgument>, Option<String>) {
    let schema = serde_json::to_value(schemars::schema_for!(A)).unwrap_or(Value::Null);
    let text = |value: &Value, field: &str| value.get(field).and_then(Value::as_str).map(str::to_string);

    let required: BTreeSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let arguments = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| PromptArgument {
                    name: name.clone(),
                    title: text(property, "title"),
                    description: text(property, "description"),
                    required: Some(required.contains(name.as_str())),
                })
                .collect()
        })
        .unwrap_or_default();

    (arguments, text(&schema, "description"))
}
