use serde_json::Value;
use thiserror::Error;

use crate::ingestion::domain::table_ref::Row;

#[derive(Error, Debug)]
pub enum RowParseError {
    #[error("row {line}: invalid JSON: {source}")]
    Syntax {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("row {line}: expected a JSON object, got {found}")]
    NotAnObject { line: usize, found: &'static str },
    #[error("row {line}: input is not valid UTF-8: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("failed to read row input: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses one line of input as a row literal.
///
/// `line` is the 1-based position of the input, used in error messages.
pub fn parse_row(input: &str, line: usize) -> Result<Row, RowParseError> {
    let value: Value =
        serde_json::from_str(input).map_err(|source| RowParseError::Syntax { line, source })?;
    match value {
        Value::Object(row) => Ok(row),
        other => Err(RowParseError::NotAnObject {
            line,
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
