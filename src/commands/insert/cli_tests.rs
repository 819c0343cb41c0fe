//! CLI parsing tests for insert command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_required_arg_test! {
        command: "insert",
        test_name: test_insert_requires_table,
        required_arg: "--table",
    }

    crate::cli_defaults_test! {
        command: "insert",
        variant: Insert,
        required_args: ["--table", "product"],
        defaults: {
            return_fields: "*",
            input: None,
        },
    }

    crate::cli_option_test! {
        command: "insert",
        variant: Insert,
        test_name: test_insert_with_return_fields,
        args: ["--table", "product", "--return-fields", "id,name"],
        field: return_fields,
        expected: "id,name",
    }

    crate::cli_option_test! {
        command: "insert",
        variant: Insert,
        test_name: test_insert_with_input,
        args: ["-t", "product", "-i", "rows.json"],
        field: input,
        expected: Some(PathBuf::from("rows.json")),
    }

    crate::cli_error_test! {
        command: "insert",
        test_name: test_insert_rejects_query_flag,
        args: ["--table", "product", "--query", "SELECT 1"],
    }
}
