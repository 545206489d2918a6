//! Value-level description of the persisted schema.
//!
//! Instead of declaring models through inheritance or macros, each table
//! is a `TableSpec` constant: plain data naming its columns, constraints,
//! and indexes. `Database::initialize_schema` renders the registry to
//! idempotent DDL for the development bootstrap. The versioned migration
//! under `./migrations` creates the same shape for production.

/// Describes one persisted table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    pub checks: &'static [CheckSpec],
    pub indexes: &'static [IndexSpec],
}

/// Describes one column of a [`TableSpec`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary_key: bool,
    pub nullable: bool,
    /// SQL expression for the column default, verbatim.
    pub default: Option<&'static str>,
    /// Expression of a STORED generated column. Such a column is written
    /// only by the database and is rejected if named in an INSERT or
    /// UPDATE, which is what keeps it consistent with its inputs.
    pub generated_as: Option<&'static str>,
}

/// A named CHECK constraint.
#[derive(Debug, Clone, Copy)]
pub struct CheckSpec {
    pub name: &'static str,
    pub expression: &'static str,
}

/// A named btree index. `columns` is the parenthesized index list,
/// including any ordering qualifiers.
#[derive(Debug, Clone, Copy)]
pub struct IndexSpec {
    pub name: &'static str,
    pub columns: &'static str,
}

/// The todos table: the one entity this application persists.
pub const TODOS: TableSpec = TableSpec {
    name: "todos",
    columns: &[
        ColumnSpec {
            name: "id",
            sql_type: "BIGSERIAL",
            primary_key: true,
            nullable: false,
            default: None,
            generated_as: None,
        },
        ColumnSpec {
            name: "title",
            sql_type: "VARCHAR(200)",
            primary_key: false,
            nullable: false,
            default: None,
            generated_as: None,
        },
        ColumnSpec {
            name: "content",
            sql_type: "TEXT",
            primary_key: false,
            nullable: false,
            default: Some("''"),
            generated_as: None,
        },
        ColumnSpec {
            name: "created_at",
            sql_type: "TIMESTAMPTZ",
            primary_key: false,
            nullable: false,
            default: Some("now()"),
            generated_as: None,
        },
        ColumnSpec {
            name: "completed_at",
            sql_type: "TIMESTAMPTZ",
            primary_key: false,
            nullable: true,
            default: None,
            generated_as: None,
        },
        ColumnSpec {
            name: "is_completed",
            sql_type: "BOOLEAN",
            primary_key: false,
            nullable: false,
            default: None,
            generated_as: Some("completed_at IS NOT NULL"),
        },
    ],
    checks: &[CheckSpec {
        name: "title_not_empty",
        // trim() first, so whitespace-only titles fail the check too.
        expression: "length(trim(title)) > 0",
    }],
    indexes: &[
        IndexSpec {
            name: "idx_todos_created_at",
            columns: "created_at DESC",
        },
        IndexSpec {
            name: "idx_todos_is_completed",
            columns: "is_completed",
        },
    ],
};

/// Every table the application persists.
pub static REGISTRY: &[TableSpec] = &[TODOS];

impl TableSpec {
    /// Renders `CREATE TABLE IF NOT EXISTS` DDL for this table.
    pub fn create_table_sql(&self) -> String {
        let mut clauses: Vec<String> = self.columns.iter().map(column_ddl).collect();
        for check in self.checks {
            clauses.push(format!(
                "CONSTRAINT {} CHECK ({})",
                check.name, check.expression
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            clauses.join(",\n    ")
        )
    }

    /// Renders one `CREATE INDEX IF NOT EXISTS` statement per index.
    pub fn create_index_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|index| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                    index.name, self.name, index.columns
                )
            })
            .collect()
    }

    /// The full DDL for this table: the table itself, then its indexes.
    pub fn ddl_statements(&self) -> Vec<String> {
        let mut statements = vec![self.create_table_sql()];
        statements.extend(self.create_index_sql());
        statements
    }
}

/// The DDL for every registered table, in creation order.
pub fn ddl_statements() -> Vec<String> {
    REGISTRY
        .iter()
        .flat_map(TableSpec::ddl_statements)
        .collect()
}

fn column_ddl(column: &ColumnSpec) -> String {
    let mut ddl = format!("{} {}", column.name, column.sql_type);
    if let Some(expression) = column.generated_as {
        // A generated column takes no other qualifiers.
        ddl.push_str(&format!(" GENERATED ALWAYS AS ({expression}) STORED"));
        return ddl;
    }
    if column.primary_key {
        ddl.push_str(" PRIMARY KEY");
    } else if !column.nullable {
        ddl.push_str(" NOT NULL");
    }
    if let Some(default) = column.default {
        ddl.push_str(&format!(" DEFAULT {default}"));
    }
    ddl
}
