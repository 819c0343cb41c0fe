//! What the node needs from its host platform.

use crate::db::Credential;
use crate::types::Record;

/// Node parameters as set by the user in the host's UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeParameters {
    /// Operation selector value, e.g. `executeQuery` or `insert`.
    pub operation: String,
    /// SQL for `executeQuery`.
    pub query: Option<String>,
    /// Target table for `insert`.
    pub table: Option<String>,
    /// Projection for the post-insert SELECT; `*` when unset.
    pub return_fields: Option<String>,
}

/// Host-side accessors used during one invocation.
pub trait ExecutionContext {
    /// Credentials configured for the node, if any.
    fn credentials(&self) -> Option<&Credential>;

    fn parameters(&self) -> &NodeParameters;

    /// The input batch, in order.
    fn input_data(&self) -> &[Record];
}

/// An `ExecutionContext` backed by plain values.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    credentials: Option<Credential>,
    parameters: NodeParameters,
    items: Vec<Record>,
}

impl StaticContext {
    pub fn new(credentials: Option<Credential>, parameters: NodeParameters, items: Vec<Record>) -> Self {
        Self {
            credentials,
            parameters,
            items,
        }
    }
}

impl ExecutionContext for StaticContext {
    fn credentials(&self) -> Option<&Credential> {
        self.credentials.as_ref()
    }

    fn parameters(&self) -> &NodeParameters {
        &self.parameters
    }

    fn input_data(&self) -> &[Record] {
        &self.items
    }
}
