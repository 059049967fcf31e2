//! Operation dispatch for the hive data source.
//!
//! Callers name an operation with a string token, supply the acting user,
//! serialised parameters and their output slots, and receive either the
//! handler's output or a single [`DispatchError`].
//!
//! ## Operations
//!
//! | Token             | Status          |
//! |-------------------|-----------------|
//! | `search-concept`  | implemented     |
//! | `search-modifier` | implemented     |
//! | `explore-query`   | implemented     |
//! | `get-cohorts`     | implemented     |
//! | `add-cohort`      | implemented     |
//! | `delete-cohort`   | implemented     |
//! | `survival-query`  | not implemented |
//! | `search-ontology` | not implemented |

mod errors;
mod handler;
mod operation;
mod router;

pub use self::errors::DispatchError;
pub use self::handler::{HandlerError, OperationHandler, OperationHandlers, OperationOutput};
pub use self::operation::Operation;
pub use self::router::OperationDispatcher;
