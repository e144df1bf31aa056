//! Operation execution traits.
//!
//! Operations are structs where the fields ARE the parameters - no
//! duplication. Each implements [`Execute`] against the storage context and
//! returns its response as JSON.

use serde_json::Value;

// Re-export for use in implementations
pub use async_trait::async_trait;

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C, E> {
    async fn execute(&self, ctx: &C) -> std::result::Result<Value, E>;
}

/// Operation metadata, used for activity logging
pub trait Operation {
    /// The verb this operation performs (e.g. "move")
    const VERB: &'static str;
    /// The noun it acts on (e.g. "task")
    const NOUN: &'static str;

    /// Canonical "verb noun" op string
    fn op() -> String {
        format!("{} {}", Self::VERB, Self::NOUN)
    }
}
