//! Shared types for host records and node output.

mod record;

pub use record::{prepare_output_data, records_from_json, return_json_array, NodeOutput, OutputItem, Record};
