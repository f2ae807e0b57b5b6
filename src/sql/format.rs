//! Indented tree rendering of a parsed [`Statement`].
//!
//! One node per line, two spaces of indentation per depth level, fields in
//! declaration order. Empty optional fields render as `none` rather than
//! being skipped, so two trees that differ only in an absent clause still
//! produce line-aligned output.

use crate::sql::ast::*;

const INDENT: &str = "  ";

struct TreeWriter {
    out: String,
}

impl TreeWriter {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// `label:` followed by children, or `label: none` when there are none.
    fn section<T>(
        &mut self,
        depth: usize,
        label: &str,
        items: &[T],
        mut write: impl FnMut(&mut Self, usize, &T),
    ) {
        if items.is_empty() {
            self.line(depth, format!("{label}: none"));
            return;
        }
        self.line(depth, format!("{label}:"));
        for item in items {
            write(self, depth + 1, item);
        }
    }

    fn optional_expr(&mut self, depth: usize, label: &str, expr: &Option<Expr>) {
        match expr {
            Some(expr) => {
                self.line(depth, format!("{label}:"));
                self.expr(depth + 1, expr);
            }
            None => self.line(depth, format!("{label}: none")),
        }
    }

    fn statement(&mut self, depth: usize, stmt: &Statement) {
        match stmt {
            Statement::Select(sel) => self.select(depth, sel),
            Statement::Insert(ins) => {
                self.line(depth, "Insert");
                self.line(depth + 1, format!("table: {}", ins.table));
                self.section(depth + 1, "columns", &ins.columns, |w, d, c| w.line(d, c));
                self.section(depth + 1, "values", &ins.values, |w, d, row| {
                    w.line(d, "Row");
                    for lit in row {
                        w.line(d + 1, literal_label(lit));
                    }
                });
            }
            Statement::Update(upd) => {
                self.line(depth, "Update");
                self.line(depth + 1, format!("table: {}", upd.table));
                self.section(depth + 1, "assignments", &upd.assignments, |w, d, a| {
                    w.line(d, format!("Assign {}", a.column));
                    w.expr(d + 1, &a.value);
                });
                self.optional_expr(depth + 1, "where", &upd.where_clause);
            }
            Statement::Delete(del) => {
                self.line(depth, "Delete");
                self.line(depth + 1, format!("table: {}", del.table));
                self.optional_expr(depth + 1, "where", &del.where_clause);
            }
            Statement::CreateTable(ct) => {
                self.line(depth, "CreateTable");
                self.line(depth + 1, format!("table: {}", ct.table));
                self.section(depth + 1, "columns", &ct.columns, |w, d, c| {
                    w.line(d, format!("ColumnDef {} {}", c.name, c.type_name));
                    for constraint in &c.constraints {
                        w.line(d + 1, constraint.to_string());
                    }
                });
            }
        }
    }

    fn select(&mut self, depth: usize, sel: &SelectStatement) {
        self.line(depth, if sel.distinct { "Select DISTINCT" } else { "Select" });
        self.section(depth + 1, "columns", &sel.columns, |w, d, item| match item {
            SelectItem::Wildcard => w.line(d, "*"),
            SelectItem::QualifiedWildcard(table) => w.line(d, format!("{table}.*")),
            SelectItem::Expr { expr, alias } => {
                match alias {
                    Some(alias) => w.line(d, format!("Item AS {alias}")),
                    None => w.line(d, "Item"),
                }
                w.expr(d + 1, expr);
            }
        });
        self.line(depth + 1, "from:");
        self.line(depth + 2, table_label(&sel.from));
        self.section(depth + 1, "joins", &sel.joins, |w, d, join| {
            w.line(d, format!("Join {}", join.kind.as_str()));
            w.line(d + 1, table_label(&join.table));
            w.line(d + 1, "on:");
            w.expr(d + 2, &join.on);
        });
        self.optional_expr(depth + 1, "where", &sel.where_clause);
        self.section(depth + 1, "order_by", &sel.order_by, |w, d, item| {
            w.line(d, if item.desc { "Order DESC" } else { "Order ASC" });
            w.expr(d + 1, &item.expr);
        });
        match &sel.limit {
            Some(n) => self.line(depth + 1, format!("limit: {n}")),
            None => self.line(depth + 1, "limit: none"),
        }
    }

    fn expr(&mut self, depth: usize, expr: &Expr) {
        match expr {
            Expr::Column { table: Some(t), name } => self.line(depth, format!("Column {t}.{name}")),
            Expr::Column { table: None, name } => self.line(depth, format!("Column {name}")),
            Expr::Literal(lit) => self.line(depth, literal_label(lit)),
            Expr::BinaryOp { op, left, right } => {
                self.line(depth, format!("BinaryOp {}", op.symbol()));
                self.expr(depth + 1, left);
                self.expr(depth + 1, right);
            }
            Expr::UnaryOp { op, expr } => {
                self.line(depth, format!("UnaryOp {}", op.symbol()));
                self.expr(depth + 1, expr);
            }
            Expr::IsNull { expr, negated } => {
                self.line(depth, if *negated { "IsNotNull" } else { "IsNull" });
                self.expr(depth + 1, expr);
            }
            Expr::InList { expr, list, negated } => {
                self.line(depth, if *negated { "NotInList" } else { "InList" });
                self.expr(depth + 1, expr);
                self.section(depth + 1, "list", list, |w, d, e| w.expr(d, e));
            }
            Expr::Function { name, args } => {
                self.line(depth, format!("Function {name}"));
                for arg in args {
                    self.expr(depth + 1, arg);
                }
            }
            Expr::Subquery(query) => {
                self.line(depth, "Subquery");
                self.select(depth + 1, query);
            }
        }
    }
}

fn table_label(table: &TableRef) -> String {
    match &table.alias {
        Some(alias) => format!("Table {} AS {alias}", table.name),
        None => format!("Table {}", table.name),
    }
}

fn literal_label(lit: &Literal) -> String {
    match lit {
        Literal::Number(n) => format!("Number {n}"),
        Literal::String(_) => format!("String {lit}"),
        Literal::Null => "Null".to_string(),
    }
}

/// Render `stmt` as an indented tree. The output has no trailing newline.
pub fn format_ast(stmt: &Statement) -> String {
    let mut writer = TreeWriter { out: String::new() };
    writer.statement(0, stmt);
    let len = writer.out.trim_end_matches('\n').len();
    writer.out.truncate(len);
    writer.out
}
