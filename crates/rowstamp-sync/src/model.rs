//! Pending schema-change descriptions.

use serde::{Deserialize, Serialize};

/// A pending table/column synchronization action.
///
/// Carries its own dialect key; the registry uses it to select a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAndColumnModel {
    /// Dialect key naming the database flavor this change targets.
    pub dialect: String,
    /// Target table name.
    pub table_name: String,
    /// Previous table name, set when the change includes a rename.
    pub old_table_name: Option<String>,
    /// Table comment.
    pub comment: Option<String>,
    /// Column definitions making up the change.
    pub columns: Vec<ColumnModel>,
}

impl TableAndColumnModel {
    /// Change model for `table_name` on the given dialect.
    pub fn new(dialect: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            dialect: dialect.into(),
            table_name: table_name.into(),
            old_table_name: None,
            comment: None,
            columns: Vec::new(),
        }
    }

    /// Record the table's previous name.
    pub fn renamed_from(mut self, old_name: impl Into<String>) -> Self {
        self.old_table_name = Some(old_name.into());
        self
    }

    /// Set the table comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Append a column definition.
    pub fn column(mut self, column: ColumnModel) -> Self {
        self.columns.push(column);
        self
    }

    /// The dialect key used for handler selection.
    #[must_use]
    pub fn dialect(&self) -> &str {
        &self.dialect
    }
}

/// One column definition within a schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    /// Column name.
    pub name: String,
    /// SQL type text as the dialect expects it (e.g. `varchar`).
    pub sql_type: String,
    /// Declared length for sized types.
    pub length: Option<u32>,
    /// Precision for decimal types.
    pub precision: Option<u8>,
    /// Scale for decimal types.
    pub scale: Option<u8>,
    /// Whether the column admits NULL.
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
    /// Default value expression.
    pub default: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
}

impl ColumnModel {
    /// Column `name` of the given SQL type, nullable and unconstrained.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            primary_key: false,
            default: None,
            comment: None,
        }
    }

    /// Set the declared length.
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set precision and scale for decimal types.
    pub fn decimal_precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Set the nullable flag.
    pub fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Mark the column as part of the primary key.
    pub fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }

    /// Set the default value expression.
    pub fn default(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Set the column comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
