//! Translation of document queries and entity metadata into PostgreSQL
//!
//! Documents live in a JSONB `data` column. Field names are interpolated into
//! the generated SQL, so every name is checked against [`IDENTIFIER_REGEX`]
//! first; values always travel as bind parameters.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;
use crate::domain::storage::{
    DocumentQuery, FilterCondition, FilterOperator, FilterValue, SortKind, SortOrder,
    StorageEntity,
};

static IDENTIFIER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// A value bound to a positional `$n` parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

/// Generated statement with its bind parameters in order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// Rejects anything that is not a plain lowercase identifier
pub fn validate_identifier(name: &str) -> Result<&str, DomainError> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(name)
    } else {
        Err(DomainError::validation(format!(
            "Nombre de campo no permitido: '{}'",
            name
        )))
    }
}

/// `SELECT data` for a page of documents matching the query
pub fn select_statement(table: &str, query: &DocumentQuery) -> Result<SqlStatement, DomainError> {
    let table = validate_identifier(table)?;
    let (where_clause, params) = where_clause(&query.conditions)?;

    let order_by = match &query.sort {
        Some(sort) => {
            let field = validate_identifier(&sort.field)?;
            let direction = match sort.order {
                SortOrder::Asc => "ASC",
                SortOrder::Desc => "DESC",
            };
            let key = match sort.kind {
                SortKind::Value => format!("NULLIF(data->'{}', 'null'::jsonb)", field),
                SortKind::Timestamp => format!("(data->>'{}')::timestamptz", field),
            };
            format!("{} {}, key ASC", key, direction)
        }
        None => "created_at ASC, key ASC".to_string(),
    };

    let mut sql = format!(
        "SELECT data FROM {} WHERE {} ORDER BY {}",
        table, where_clause, order_by
    );

    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    if query.offset > 0 {
        sql.push_str(&format!(" OFFSET {}", query.offset));
    }

    Ok(SqlStatement { sql, params })
}

/// `SELECT COUNT(*)` over documents matching every condition
pub fn count_statement(
    table: &str,
    conditions: &[FilterCondition],
) -> Result<SqlStatement, DomainError> {
    let table = validate_identifier(table)?;
    let (where_clause, params) = where_clause(conditions)?;

    Ok(SqlStatement {
        sql: format!("SELECT COUNT(*) AS count FROM {} WHERE {}", table, where_clause),
        params,
    })
}

/// Table, index and unique index DDL for an entity's collection
pub fn schema_statements<E: StorageEntity>() -> Result<Vec<String>, DomainError> {
    let table = validate_identifier(E::COLLECTION)?;

    let mut statements = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         key VARCHAR(255) PRIMARY KEY, \
         data JSONB NOT NULL, \
         created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(), \
         updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW())",
        table
    )];

    for fields in E::indexes() {
        let columns = fields
            .iter()
            .map(|f| validate_identifier(f).map(|f| format!("(data->>'{}')", f)))
            .collect::<Result<Vec<_>, _>>()?;

        statements.push(format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {} ({})",
            table,
            fields.join("_"),
            table,
            columns.join(", ")
        ));
    }

    for constraint in E::unique_constraints() {
        let name = validate_identifier(constraint.name)?;
        let columns = constraint
            .fields
            .iter()
            .map(|f| {
                validate_identifier(f).map(|f| {
                    if constraint.folds_case(f) {
                        format!("(lower(data->>'{}'))", f)
                    } else {
                        format!("(data->>'{}')", f)
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        statements.push(format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ({})",
            unique_index_name(table, name),
            table,
            columns.join(", ")
        ));
    }

    Ok(statements)
}

pub fn unique_index_name(table: &str, constraint: &str) -> String {
    format!("uq_{}_{}", table, constraint)
}

fn where_clause(conditions: &[FilterCondition]) -> Result<(String, Vec<SqlParam>), DomainError> {
    let mut builder = ParamBuilder::default();
    let mut clauses = Vec::with_capacity(conditions.len());

    for condition in conditions {
        clauses.push(builder.condition(condition)?);
    }

    let clause = if clauses.is_empty() {
        "TRUE".to_string()
    } else {
        clauses.join(" AND ")
    };

    Ok((clause, builder.params))
}

#[derive(Default)]
struct ParamBuilder {
    params: Vec<SqlParam>,
}

impl ParamBuilder {
    fn push(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    /// Typed field expression and placeholder for a comparison against `value`
    fn operands(&mut self, field: &str, value: &FilterValue) -> (String, String) {
        match value {
            FilterValue::String(s) => (
                format!("data->>'{}'", field),
                self.push(SqlParam::Text(s.clone())),
            ),
            FilterValue::Number(n) => (
                format!("(data->>'{}')::double precision", field),
                self.push(SqlParam::Float(*n)),
            ),
            FilterValue::Bool(b) => (
                format!("(data->>'{}')::boolean", field),
                self.push(SqlParam::Bool(*b)),
            ),
            FilterValue::DateTime(dt) => (
                format!("(data->>'{}')::timestamptz", field),
                self.push(SqlParam::Timestamp(*dt)),
            ),
        }
    }

    fn compare(&mut self, field: &str, op: &str, value: &FilterValue) -> String {
        let (expr, placeholder) = self.operands(field, value);
        format!("{} {} {}", expr, op, placeholder)
    }

    fn any_equal(&mut self, field: &str, values: &[FilterValue]) -> Option<String> {
        if values.is_empty() {
            return None;
        }

        let parts: Vec<String> = values
            .iter()
            .map(|value| self.compare(field, "=", value))
            .collect();

        Some(format!("({})", parts.join(" OR ")))
    }

    fn condition(&mut self, condition: &FilterCondition) -> Result<String, DomainError> {
        let field = validate_identifier(&condition.field)?;
        let missing = format!("data->>'{}' IS NULL", field);

        let sql = match &condition.operator {
            FilterOperator::Eq(value) => self.compare(field, "=", value),
            FilterOperator::Ne(value) => {
                format!("({} OR {})", missing, self.compare(field, "<>", value))
            }
            FilterOperator::ContainsIgnoreCase(needle) => {
                let pattern = format!("%{}%", escape_like(needle));
                format!(
                    "data->>'{}' ILIKE {} ESCAPE '\\'",
                    field,
                    self.push(SqlParam::Text(pattern))
                )
            }
            FilterOperator::Gt(value) => self.compare(field, ">", value),
            FilterOperator::Gte(value) => self.compare(field, ">=", value),
            FilterOperator::Lt(value) => self.compare(field, "<", value),
            FilterOperator::Lte(value) => self.compare(field, "<=", value),
            FilterOperator::In(values) => self
                .any_equal(field, values)
                .unwrap_or_else(|| "FALSE".to_string()),
            FilterOperator::NotIn(values) => match self.any_equal(field, values) {
                Some(any) => format!("({} OR NOT {})", missing, any),
                None => "TRUE".to_string(),
            },
            FilterOperator::ArrayContains(value) => {
                let element = match value {
                    FilterValue::String(s) => {
                        format!("{}::text", self.push(SqlParam::Text(s.clone())))
                    }
                    FilterValue::Number(n) => {
                        format!("{}::double precision", self.push(SqlParam::Float(*n)))
                    }
                    FilterValue::Bool(b) => format!("{}::boolean", self.push(SqlParam::Bool(*b))),
                    FilterValue::DateTime(dt) => format!(
                        "{}::text",
                        self.push(SqlParam::Text(
                            dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
                        ))
                    ),
                };
                format!("data->'{}' @> jsonb_build_array({})", field, element)
            }
        };

        Ok(sql)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
