//! Uniform contract implemented by operation handlers.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::output::{OutputObject, OutputSharedIds};

use super::operation::Operation;

/// Failure reported by an operation handler.
pub type HandlerError = Box<dyn Error + Send + Sync + 'static>;

/// Successful result of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationOutput {
    /// Serialised result payload.
    pub result: Vec<u8>,
    /// Output objects produced by the operation.
    pub outputs: Vec<OutputObject>,
}

impl OperationOutput {
    /// Creates an output with a result payload and no output objects.
    pub fn with_result(result: impl Into<Vec<u8>>) -> Self {
        Self {
            result: result.into(),
            outputs: Vec::new(),
        }
    }
}

/// Implementation of one operation.
///
/// Handlers receive the acting user, the serialised parameters and the
/// caller's output slots, and return either a complete output or an error.
pub trait OperationHandler: Send + Sync {
    /// Runs the operation.
    ///
    /// # Errors
    ///
    /// Returns any failure of the operation's own logic.
    fn handle(
        &self,
        user_id: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, HandlerError>;
}

impl<F> OperationHandler for F
where
    F: Fn(&str, &[u8], &OutputSharedIds) -> Result<OperationOutput, HandlerError> + Send + Sync,
{
    fn handle(
        &self,
        user_id: &str,
        parameters: &[u8],
        shared_ids: &OutputSharedIds,
    ) -> Result<OperationOutput, HandlerError> {
        self(user_id, parameters, shared_ids)
    }
}

/// Handler table with one entry per implemented operation.
///
/// Every implemented operation must be wired; reserved operations have no
/// slot.
#[derive(Clone)]
pub struct OperationHandlers {
    /// Handler for [`Operation::SearchConcept`].
    pub search_concept: Arc<dyn OperationHandler>,
    /// Handler for [`Operation::SearchModifier`].
    pub search_modifier: Arc<dyn OperationHandler>,
    /// Handler for [`Operation::ExploreQuery`].
    pub explore_query: Arc<dyn OperationHandler>,
    /// Handler for [`Operation::GetCohorts`].
    pub get_cohorts: Arc<dyn OperationHandler>,
    /// Handler for [`Operation::AddCohort`].
    pub add_cohort: Arc<dyn OperationHandler>,
    /// Handler for [`Operation::DeleteCohort`].
    pub delete_cohort: Arc<dyn OperationHandler>,
}

impl OperationHandlers {
    /// Wires the same handler for every implemented operation.
    #[must_use]
    pub fn uniform(handler: Arc<dyn OperationHandler>) -> Self {
        Self {
            search_concept: Arc::clone(&handler),
            search_modifier: Arc::clone(&handler),
            explore_query: Arc::clone(&handler),
            get_cohorts: Arc::clone(&handler),
            add_cohort: Arc::clone(&handler),
            delete_cohort: handler,
        }
    }

    /// Handler for `operation`, or `None` for reserved operations.
    #[must_use]
    pub fn get(&self, operation: Operation) -> Option<&dyn OperationHandler> {
        let handler = match operation {
            Operation::SearchConcept => &self.search_concept,
            Operation::SearchModifier => &self.search_modifier,
            Operation::ExploreQuery => &self.explore_query,
            Operation::GetCohorts => &self.get_cohorts,
            Operation::AddCohort => &self.add_cohort,
            Operation::DeleteCohort => &self.delete_cohort,
            Operation::SurvivalQuery | Operation::SearchOntology => return None,
        };
        Some(handler.as_ref())
    }
}

impl fmt::Debug for OperationHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationHandlers").finish_non_exhaustive()
    }
}
