//! QuestDB node: the operation executor invoked by the host platform.
//!
//! One call to `execute` is one invocation: fetch credentials, open a
//! connection, dispatch on the operation, normalize the rows, close the
//! connection. Nothing is kept between invocations.

mod context;
mod operation;

pub use context::{ExecutionContext, NodeParameters, StaticContext};
pub use operation::Operation;

use tracing::info;

use crate::db::{
    build_select, insert_records, run_query, with_connection, ConnectionConfig, Connector,
    DatabaseBackend, DbError, DEFAULT_RETURN_FIELDS,
};
use crate::types::{prepare_output_data, return_json_array, NodeOutput, Record};

/// Run one invocation of the node.
///
/// # Errors
/// - `MissingCredentials` if the host has no credentials; nothing is opened.
/// - `ConnectFailed` if the connection cannot be opened.
/// - `UnsupportedOperation` for an unknown operation name, after the
///   connection has been opened and closed again.
/// - `MissingParameter` / `QueryFailed` from the operation itself.
///
/// Whatever happens after the connection is opened, it is closed before this
/// function returns.
pub fn execute(ctx: &dyn ExecutionContext, connector: &dyn Connector) -> Result<NodeOutput, DbError> {
    let credentials = ctx.credentials().ok_or(DbError::MissingCredentials)?;
    let config = ConnectionConfig::from_credential(credentials);
    let params = ctx.parameters();

    let rows = with_connection(connector, config, |db| {
        let operation: Operation = params.operation.parse()?;
        info!(%operation, items = ctx.input_data().len(), "Executing operation");
        match operation {
            Operation::ExecuteQuery => execute_query(db, params),
            Operation::Insert => insert(db, params, ctx.input_data()),
        }
    })?;

    Ok(prepare_output_data(return_json_array(rows)))
}

/// Run the caller's query once, regardless of how many input items there are.
fn execute_query(db: &mut dyn DatabaseBackend, params: &NodeParameters) -> Result<Vec<Record>, DbError> {
    let query = params.query.as_deref().ok_or_else(|| DbError::MissingParameter {
        name: "query".to_string(),
    })?;
    run_query(db, query)
}

/// Insert every item, then return the table's current contents.
///
/// The follow-up SELECT is unfiltered: it returns every row of the table,
/// not only the rows just inserted.
fn insert(
    db: &mut dyn DatabaseBackend,
    params: &NodeParameters,
    items: &[Record],
) -> Result<Vec<Record>, DbError> {
    let table = params.table.as_deref().ok_or_else(|| DbError::MissingParameter {
        name: "table".to_string(),
    })?;
    let return_fields = params.return_fields.as_deref().unwrap_or(DEFAULT_RETURN_FIELDS);

    insert_records(db, table, items)?;
    run_query(db, &build_select(table, return_fields))
}
