//! Generation port - the text service that proposes tasks and flavor lines.
//!
//! The session only talks to [`TaskGenerator`]. [`PromptedGenerator`] is the
//! stock implementation: it turns each request into a prompt, hands it to a
//! raw [`CompletionClient`] and parses the JSON reply.

mod prompts;

pub use prompts::*;

use async_trait::async_trait;
use board_rules::{FlavorKind, Language, TaskDraft};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GenerationError;

fn default_difficulty() -> i32 {
    1
}

/// A task proposed by the generator. Every field is untrusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSuggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
}

impl TaskSuggestion {
    pub fn new(title: impl Into<String>, description: impl Into<String>, difficulty: i32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            difficulty,
        }
    }
}

impl From<TaskSuggestion> for TaskDraft {
    fn from(suggestion: TaskSuggestion) -> Self {
        TaskDraft::new(suggestion.title, suggestion.description, suggestion.difficulty)
    }
}

/// The text-generation collaborator consumed by the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGenerator: Send + Sync {
    /// Propose follow-up tasks for a task. Two to four are expected, any
    /// number is tolerated.
    async fn followup_tasks(
        &self,
        title: &str,
        description: &str,
        language: Language,
    ) -> Result<Vec<TaskSuggestion>, GenerationError>;

    /// Propose an ordered quest line from a start task toward a goal.
    async fn campaign_tasks(
        &self,
        start_title: &str,
        goal: &str,
        milestones: &str,
        language: Language,
    ) -> Result<Vec<TaskSuggestion>, GenerationError>;

    /// A short flavor line for an event.
    async fn flavor_text(
        &self,
        kind: FlavorKind,
        subject: &str,
        language: Language,
    ) -> Result<String, GenerationError>;
}

/// A single raw completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// JSON schema the reply must follow, if structured output is wanted.
    pub response_schema: Option<String>,
}

/// A raw prompt-in, text-out model endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;
}

/// [`TaskGenerator`] built on a [`CompletionClient`].
pub struct PromptedGenerator<C> {
    client: C,
    goal_context: String,
}

impl<C: CompletionClient> PromptedGenerator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            goal_context: DEFAULT_GOAL_CONTEXT.to_string(),
        }
    }

    /// Replace the context line sent with follow-up requests.
    pub fn with_goal_context(mut self, context: impl Into<String>) -> Self {
        self.goal_context = context.into();
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn request_tasks(&self, request: CompletionRequest) -> Result<Vec<TaskSuggestion>, GenerationError> {
        let text = self.client.complete(request).await?;
        parse_task_response(&text).inspect_err(|e| warn!(error = %e, "Discarding malformed task reply"))
    }
}

#[async_trait]
impl<C: CompletionClient> TaskGenerator for PromptedGenerator<C> {
    async fn followup_tasks(
        &self,
        title: &str,
        description: &str,
        language: Language,
    ) -> Result<Vec<TaskSuggestion>, GenerationError> {
        self.request_tasks(CompletionRequest {
            system: Some(followup_system(language)),
            prompt: followup_prompt(title, description, language, &self.goal_context),
            response_schema: Some(TASK_SCHEMA.to_string()),
        })
        .await
    }

    async fn campaign_tasks(
        &self,
        start_title: &str,
        goal: &str,
        milestones: &str,
        language: Language,
    ) -> Result<Vec<TaskSuggestion>, GenerationError> {
        self.request_tasks(CompletionRequest {
            system: Some(campaign_system(language)),
            prompt: campaign_prompt(start_title, goal, milestones, language),
            response_schema: Some(TASK_SCHEMA.to_string()),
        })
        .await
    }

    async fn flavor_text(
        &self,
        kind: FlavorKind,
        subject: &str,
        language: Language,
    ) -> Result<String, GenerationError> {
        let text = self
            .client
            .complete(CompletionRequest {
                system: None,
                prompt: flavor_prompt(kind, subject, language),
                response_schema: None,
            })
            .await?;
        Ok(text.trim().to_string())
    }
}
