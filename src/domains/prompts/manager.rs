//! Prompt manager: the keyed collection of prompts.
//!
//! The manager owns the mapping from key to [`Prompt`], applies the
//! configured [`DuplicateBehavior`] when a key is registered twice, and
//! renders prompts by key. It does no locking of its own; the server builds
//! it once and shares it read-only.

use rmcp::model::Prompt as McpPrompt;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use tracing::{debug, info, warn};

use super::error::PromptError;
use super::policy::DuplicateBehavior;
use super::prompt::{Arguments, IntoMessages, Message, Prompt};

/// Registry of prompts, keyed by name.
pub struct PromptManager<C = ()> {
    /// Key: registered key, Value: prompt
    prompts: HashMap<String, Prompt<C>>,

    duplicate_behavior: DuplicateBehavior,
}

impl<C> Default for PromptManager<C> {
    fn default() -> Self {
        Self::new(DuplicateBehavior::default())
    }
}

impl<C> PromptManager<C> {
    /// Create an empty manager with the given duplicate policy.
    pub fn new(duplicate_behavior: DuplicateBehavior) -> Self {
        Self {
            prompts: HashMap::new(),
            duplicate_behavior,
        }
    }

    /// Create an empty manager from a configured policy name.
    ///
    /// `None` or an empty value selects `warn`. Any other unrecognized value
    /// is a [`PromptError::Configuration`].
    pub fn from_policy(policy: Option<&str>) -> Result<Self, PromptError> {
        DuplicateBehavior::resolve(policy).map(Self::new)
    }

    pub fn duplicate_behavior(&self) -> DuplicateBehavior {
        self.duplicate_behavior
    }

    /// Get a prompt by key.
    pub fn get_prompt(&self, key: &str) -> Option<&Prompt<C>> {
        self.prompts.get(key)
    }

    /// All registered prompts, indexed by registered key.
    pub fn get_prompts(&self) -> &HashMap<String, Prompt<C>> {
        &self.prompts
    }

    /// Check if a prompt is registered under `key`.
    pub fn has_prompt(&self, key: &str) -> bool {
        self.prompts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.prompts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Add a prompt under `key`, or under its own name when no key is given.
    ///
    /// Returns the prompt that is registered under the key afterwards. Under
    /// [`DuplicateBehavior::Ignore`] that is the one already present.
    pub fn add_prompt(&mut self, prompt: Prompt<C>, key: Option<&str>) -> Result<Prompt<C>, PromptError> {
        let key = key.filter(|k| !k.is_empty()).unwrap_or(prompt.name()).to_string();

        match self.prompts.entry(key) {
            Entry::Vacant(entry) => {
                info!("Registering prompt: {}", entry.key());
                entry.insert(prompt.clone());
                Ok(prompt)
            }
            Entry::Occupied(mut entry) => match self.duplicate_behavior {
                DuplicateBehavior::Warn => {
                    warn!("Prompt already exists: {}", entry.key());
                    entry.insert(prompt.clone());
                    Ok(prompt)
                }
                DuplicateBehavior::Replace => {
                    debug!("Replacing prompt: {}", entry.key());
                    entry.insert(prompt.clone());
                    Ok(prompt)
                }
                DuplicateBehavior::Error => Err(PromptError::already_exists(entry.key())),
                DuplicateBehavior::Ignore => {
                    debug!("Keeping existing prompt: {}", entry.key());
                    Ok(entry.get().clone())
                }
            },
        }
    }

    /// Prompts as advertised to MCP clients, sorted by key.
    pub fn list_mcp_prompts(&self) -> Vec<McpPrompt> {
        self.keys()
            .into_iter()
            .filter_map(|key| self.prompts.get(key).map(|p| p.to_mcp_prompt(key)))
            .collect()
    }

    /// Render a prompt by key.
    ///
    /// An unknown key fails with [`PromptError::NotFound`] without calling
    /// anything. Otherwise the prompt's render procedure runs once and its
    /// result, error or not, is returned as is.
    pub async fn render_prompt(
        &self,
        name: &str,
        arguments: Option<Arguments>,
        context: Option<&C>,
    ) -> Result<Vec<Message>, PromptError> {
        let prompt = self
            .get_prompt(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        debug!(prompt = name, "Rendering prompt");
        prompt.render(arguments, context).await
    }
}

impl<C: Send + Sync + 'static> PromptManager<C> {
    /// Build a prompt from an async function and add it.
    ///
    /// See [`Prompt::from_fn`] for how the metadata is inferred.
    pub fn add_prompt_from_fn<A, F, Fut, R>(
        &mut self,
        func: F,
        name: Option<&str>,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Prompt<C>, PromptError>
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, PromptError>> + Send + 'static,
        R: IntoMessages + Send + 'static,
    {
        let prompt = Prompt::from_fn(func, name, description, tags)?;
        self.add_prompt(prompt, None)
    }

    /// Build a prompt from an async function that also receives the render
    /// context, and add it.
    pub fn add_prompt_from_fn_with_context<A, F, Fut, R>(
        &mut self,
        func: F,
        name: Option<&str>,
        description: Option<&str>,
        tags: Option<BTreeSet<String>>,
    ) -> Result<Prompt<C>, PromptError>
    where
        C: Clone,
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(A, Option<C>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, PromptError>> + Send + 'static,
        R: IntoMessages + Send + 'static,
    {
        let prompt = Prompt::from_fn_with_context(func, name, description, tags)?;
        self.add_prompt(prompt, None)
    }
}
