//! refs::default_branch
//!
//! Whether a run analyzes the repository's default branch.

use crate::core::config::ConfigError;
use crate::core::event::WorkflowEvent;
use crate::core::types::strip_heads_prefix;

use super::resolver::RefResolver;

/// Decides whether the current ref is the default branch.
#[derive(Debug)]
pub struct DefaultBranchClassifier<'a> {
    resolver: &'a RefResolver,
    event: Option<WorkflowEvent>,
}

impl<'a> DefaultBranchClassifier<'a> {
    /// Classify using `resolver`. The event payload is read from
    /// `GITHUB_EVENT_PATH` when it is needed.
    pub fn new(resolver: &'a RefResolver) -> Self {
        Self {
            resolver,
            event: None,
        }
    }

    /// Use an already-loaded event payload.
    #[must_use]
    pub fn with_event(mut self, event: WorkflowEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Whether the run analyzes the default branch.
    ///
    /// `CODE_SCANNING_IS_ANALYZING_DEFAULT_BRANCH=true` short-circuits to
    /// true. Otherwise the current ref, without `refs/heads/`, is compared
    /// with the payload's `repository.default_branch`. Scheduled runs carry
    /// no repository in their payload, so the environment ref stands in for
    /// the default branch.
    ///
    /// # Errors
    ///
    /// Fails if the current ref cannot be resolved, the event name is
    /// missing, or the event payload cannot be read.
    pub async fn is_analyzing_default_branch(&self) -> Result<bool, ConfigError> {
        let env = self.resolver.env();
        if env.default_branch_override() {
            return Ok(true);
        }

        let current = self.resolver.current_ref().await?.without_heads_prefix();

        let default_branch = if env.event_name()? == "schedule" {
            Some(strip_heads_prefix(env.ref_name()?).to_string())
        } else {
            let loaded;
            let event = match &self.event {
                Some(event) => event,
                None => {
                    loaded = WorkflowEvent::load(&env.event_path()?)?;
                    &loaded
                }
            };
            event.default_branch().map(str::to_string)
        };

        tracing::debug!("Current ref {}, default branch {:?}", current, default_branch);
        Ok(default_branch.as_deref() == Some(current.as_str()))
    }
}
