//! Statement rendering.
//!
//! The compiler walks a statement node in textual order, emitting one
//! placeholder per bound value through the active [`Dialect`] and collecting
//! the values in the same order. The placeholder counter is threaded through
//! the whole traversal, so nested subqueries continue the numbering of the
//! enclosing statement. Rendering is total: well-formed inputs never fail.

use crate::dialect::{Dialect, Generic};
use crate::param::Parameter;
use crate::predicate::{Operator, Predicate};
use crate::stmt::{Component, Delete, Insert, Select, Update};
use crate::value::Value;

/// A rendered statement: SQL text plus the bound values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub parameters: Vec<Option<Value>>,
}

impl Statement {
    pub fn new(text: impl Into<String>, parameters: Vec<Option<Value>>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render a statement node into its flat form.
pub trait Compile {
    /// Render with an explicit dialect.
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement;

    /// Render with the driver-neutral [`Generic`] dialect.
    fn compile(&self) -> Statement {
        self.compile_with(&Generic)
    }
}

impl Compile for Select {
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement {
        let mut c = Compiler::new(dialect);
        let text = c.select(self);
        c.finish(text)
    }
}

impl Compile for Insert {
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement {
        let mut c = Compiler::new(dialect);
        let text = c.insert(self);
        c.finish(text)
    }
}

impl Compile for Update {
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement {
        let mut c = Compiler::new(dialect);
        let text = c.update(self);
        c.finish(text)
    }
}

impl Compile for Delete {
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement {
        let mut c = Compiler::new(dialect);
        let text = c.delete(self);
        c.finish(text)
    }
}

impl Compile for Predicate {
    fn compile_with(&self, dialect: &dyn Dialect) -> Statement {
        let mut c = Compiler::new(dialect);
        let text = c.predicate(self);
        c.finish(text)
    }
}

/// One rendering pass. Fragments are built in textual order so parameter
/// collection order matches placeholder emission order by construction.
struct Compiler<'d> {
    dialect: &'d dyn Dialect,
    parameters: Vec<Option<Value>>,
}

impl<'d> Compiler<'d> {
    fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            parameters: Vec::new(),
        }
    }

    fn finish(self, text: String) -> Statement {
        Statement::new(text, self.parameters)
    }

    /// Emit one placeholder, binding `value`, and return its marker.
    fn placeholder(&mut self, value: Option<Value>) -> String {
        let marker = self.dialect.placeholder(self.parameters.len() + 1);
        self.parameters.push(value);
        marker
    }

    fn parameter(&mut self, p: &Parameter) -> String {
        match p {
            Parameter::Field(f) => f.qualified_name(),
            Parameter::Value(v) => self.placeholder(v.clone()),
            Parameter::Values(vs) => {
                let markers: Vec<String> =
                    vs.iter().map(|v| self.placeholder(v.clone())).collect();
                format!("({})", markers.join(", "))
            }
            Parameter::Function(f) => {
                let args: Vec<String> = f.arguments().iter().map(|a| self.parameter(a)).collect();
                format!("{}({})", f.name(), args.join(", "))
            }
            Parameter::Query(q) => {
                let inner = self.select(q);
                format!("({inner})")
            }
            Parameter::Null => "NULL".to_string(),
        }
    }

    fn predicate(&mut self, p: &Predicate) -> String {
        match p {
            Predicate::Expression { left, op, right } => match op {
                // IS NULL instead of `= NULL`
                Operator::Equal if right.is_null() => {
                    format!("{} IS NULL", self.parameter(left))
                }
                // contains: collection on the left, member on the right;
                // swap into `member IN collection` at render time
                Operator::Contains => {
                    let member = self.parameter(right);
                    let collection = self.parameter(left);
                    format!("{member} {} {collection}", op.sql())
                }
                _ => {
                    let l = self.parameter(left);
                    let r = self.parameter(right);
                    format!("{l} {} {r}", op.sql())
                }
            },
            Predicate::And(members) => self.group(members, " AND "),
            Predicate::Or(members) => self.group(members, " OR "),
            Predicate::Not(inner) => {
                let rendered = self.predicate(inner);
                if rendered.is_empty() {
                    return String::new();
                }
                // AND/OR groups already carry parentheses
                if matches!(**inner, Predicate::And(_) | Predicate::Or(_)) {
                    format!("NOT {rendered}")
                } else {
                    format!("NOT ({rendered})")
                }
            }
        }
    }

    /// Parenthesized AND/OR group; empty groups render to nothing.
    fn group(&mut self, members: &[Predicate], separator: &str) -> String {
        let parts: Vec<String> = members
            .iter()
            .map(|m| self.predicate(m))
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            return String::new();
        }
        format!("({})", parts.join(separator))
    }

    fn component(&mut self, c: &Component) -> String {
        match c {
            Component::Field(f) => match f.alias() {
                Some(alias) => format!("{} AS {alias}", f.qualified_name()),
                None => f.qualified_name(),
            },
            Component::Literal(sql) => sql.clone(),
            Component::Subquery { query, alias } => {
                let inner = self.select(query);
                match alias {
                    Some(alias) => format!("({inner}) AS {alias}"),
                    None => format!("({inner})"),
                }
            }
            Component::Function { function, alias } => {
                let rendered = self.parameter(&Parameter::Function(function.clone()));
                match alias {
                    Some(alias) => format!("{rendered} AS {alias}"),
                    None => rendered,
                }
            }
        }
    }

    fn select(&mut self, s: &Select) -> String {
        // Fields first, then sources, then predicate: parameter order follows.
        let fields = if s.fields.is_empty() {
            "*".to_string()
        } else {
            let parts: Vec<String> = s.fields.iter().map(|f| self.component(f)).collect();
            parts.join(", ")
        };

        let sources: Vec<String> = s.sources.iter().map(|src| self.component(src)).collect();

        let mut sql = format!("SELECT {fields} FROM {}", sources.join(", "));

        for join in &s.joins {
            sql.push_str(&format!(
                " {} JOIN {} ON {} = {}",
                join.kind.keyword(),
                join.kind.table(),
                join.left_key.qualified_name(),
                join.right_key.qualified_name()
            ));
        }

        if let Some(predicate) = &s.predicate {
            let rendered = self.predicate(predicate);
            if !rendered.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&rendered);
            }
        }

        if !s.order.is_empty() {
            let entries: Vec<String> = s
                .order
                .iter()
                .map(|o| format!("{} {}", o.field.qualified_name(), o.direction.keyword()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&entries.join(", "));
        }

        let pagination = self.dialect.limit_offset(s.limit, s.offset);
        if !pagination.is_empty() {
            sql.push(' ');
            sql.push_str(&pagination);
        }

        sql
    }

    fn insert(&mut self, i: &Insert) -> String {
        if i.columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", i.table);
        }

        // One frozen ordering drives the column list, the placeholder list,
        // and the parameter vector.
        let columns: Vec<String> = i
            .columns
            .iter()
            .map(|(f, _)| f.qualified_name())
            .collect();
        let markers: Vec<String> = i
            .columns
            .iter()
            .map(|(_, v)| self.placeholder(v.clone()))
            .collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            i.table,
            columns.join(", "),
            markers.join(", ")
        )
    }

    fn update(&mut self, u: &Update) -> String {
        // SET placeholders are emitted before the predicate walks, so SET
        // parameters always precede predicate parameters.
        let assignments: Vec<String> = u
            .values
            .iter()
            .map(|(f, v)| {
                let marker = self.placeholder(v.clone());
                format!("{} = {marker}", f.qualified_name())
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", u.table, assignments.join(", "));

        if let Some(predicate) = &u.predicate {
            let rendered = self.predicate(predicate);
            if !rendered.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&rendered);
            }
        }

        sql
    }

    fn delete(&mut self, d: &Delete) -> String {
        let mut sql = format!("DELETE FROM {}", d.table);

        if let Some(predicate) = &d.predicate {
            let rendered = self.predicate(predicate);
            if !rendered.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&rendered);
            }
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Postgres, Sqlite};
    use crate::field::field;
    use crate::stmt::select;

    fn count_markers(text: &str, marker: &str) -> usize {
        text.matches(marker).count()
    }

    #[test]
    fn postgres_numbers_climb_across_subqueries() {
        let inner = select("orders")
            .field(field("user_id"))
            .filter(field("total").gt(100));
        let stmt = select("users")
            .filter(field("status").eq("active") & field("id").contained_in(inner))
            .compile_with(&Postgres);
        assert_eq!(
            stmt.text,
            "SELECT * FROM users WHERE (status = $1 AND id IN \
             (SELECT user_id FROM orders WHERE total > $2))"
        );
        assert_eq!(
            stmt.parameters,
            vec![Some(Value::text("active")), Some(Value::text("100"))]
        );
    }

    #[test]
    fn sqlite_uses_positional_markers() {
        let stmt = select("users")
            .filter(field("id").contained_in(vec![1, 2]))
            .compile_with(&Sqlite);
        assert_eq!(stmt.text, "SELECT * FROM users WHERE id IN (?, ?)");
        assert_eq!(count_markers(&stmt.text, "?"), stmt.parameters.len());
    }

    #[test]
    fn generic_marker_count_matches_parameters() {
        let stmt = select("users")
            .filter(
                (field("a").eq(1) | field("b").eq(2)) & field("c").contained_in(vec![3, 4, 5]),
            )
            .compile();
        assert_eq!(count_markers(&stmt.text, "%@"), stmt.parameters.len());
        assert_eq!(stmt.parameters.len(), 5);
    }

    #[test]
    fn rendering_is_idempotent() {
        let query = select("users")
            .filter(field("id").gt(10))
            .limit(5)
            .offset(2);
        assert_eq!(query.compile(), query.compile());
    }

    #[test]
    fn dialect_can_reorder_pagination() {
        struct OffsetFirst;
        impl Dialect for OffsetFirst {
            fn placeholder(&self, _index: usize) -> String {
                "?".to_string()
            }
            fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
                let mut out = String::new();
                if let Some(n) = offset {
                    out.push_str(&format!("OFFSET {n} ROWS"));
                }
                if let Some(n) = limit {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(&format!("FETCH NEXT {n} ROWS ONLY"));
                }
                out
            }
        }

        let stmt = select("users").limit(5).offset(10).compile_with(&OffsetFirst);
        assert_eq!(
            stmt.text,
            "SELECT * FROM users OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn value_none_binds_through_placeholder() {
        let stmt = crate::stmt::insert("users")
            .set("name", "Ann")
            .set_null("nickname")
            .compile();
        assert_eq!(
            stmt.text,
            "INSERT INTO users (name, nickname) VALUES (%@, %@)"
        );
        assert_eq!(stmt.parameters, vec![Some(Value::text("Ann")), None]);
    }
}
