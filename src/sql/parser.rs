//! Recursive-descent SQL parser for mp-db.
//!
//! The entry point is [`Parser::parse`], which tokenizes the input and
//! parses exactly one statement, optionally followed by `;`. The first rule
//! mismatch aborts the parse with a [`SyntaxError`] positioned at the
//! offending token; there is no recovery and no partial tree.

use crate::error::SyntaxError;
use crate::sql::ast::*;
use crate::sql::lexer::{tokenize, Token, TokenKind};

type Result<T> = std::result::Result<T, SyntaxError>;

/// Maximum nesting of parenthesised expressions and subqueries.
const MAX_NESTING_DEPTH: usize = 64;

/// A recursive-descent parser that transforms a token stream into an AST.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Parse a pre-tokenized statement.
pub fn parse_statement(tokens: Vec<Token>) -> Result<Statement> {
    Parser::new(tokens).parse_statement()
}

impl Parser {
    /// Parse a SQL string into a single statement.
    pub fn parse(sql: &str) -> Result<Statement> {
        parse_statement(tokenize(sql))
    }

    /// Create a parser over `tokens`. A missing trailing `Eof` is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line,
                column,
            });
        }
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // =======================================================================
    // Token helpers
    // =======================================================================

    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never moves past it.
        &self.tokens[self.pos]
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !tok.is_eof() {
            self.pos += 1;
        }
        tok
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.current().is_keyword(kw)
    }

    fn at_symbol(&self, sym: &str) -> bool {
        self.current().is_symbol(sym)
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_symbol(&mut self, sym: &str) -> bool {
        if self.at_symbol(sym) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            self.expected(kw)
        }
    }

    fn expect_symbol(&mut self, sym: &str) -> Result<()> {
        if self.eat_symbol(sym) {
            Ok(())
        } else {
            self.expected(&format!("'{sym}'"))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String> {
        if self.current().kind == TokenKind::Identifier {
            Ok(self.advance().text)
        } else {
            self.expected(what)
        }
    }

    /// Fail at the current token. A lexical error token always reports its
    /// own diagnostic instead of `message`.
    fn fail<T>(&self, message: impl Into<String>) -> Result<T> {
        let tok = self.current();
        let message = if tok.kind == TokenKind::Error {
            tok.text.clone()
        } else {
            message.into()
        };
        Err(SyntaxError::new(message, tok.line, tok.column))
    }

    fn expected<T>(&self, what: &str) -> Result<T> {
        self.fail(format!("expected {what} but found {}", self.current().describe()))
    }

    fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.fail("expression nested too deeply");
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse `'(' item (',' item)* ')'`.
    ///
    /// When an item is not followed by `,` or `)`, the error names the
    /// separator if the next token could begin another item, and the closing
    /// parenthesis otherwise.
    fn parse_paren_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
        starts_item: fn(&Token) -> bool,
    ) -> Result<Vec<T>> {
        self.expect_symbol("(")?;
        let mut items = vec![item(self)?];
        loop {
            if self.eat_symbol(",") {
                items.push(item(self)?);
            } else if self.eat_symbol(")") {
                return Ok(items);
            } else if starts_item(self.current()) {
                return self.expected("','");
            } else {
                return self.expected("')'");
            }
        }
    }

    // =======================================================================
    // Statement dispatch
    // =======================================================================

    /// Parse one statement, an optional `;`, and require end of input.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        let tok = self.current();
        let stmt = if tok.is_keyword("SELECT") {
            Statement::Select(self.parse_select()?)
        } else if tok.is_keyword("INSERT") {
            Statement::Insert(self.parse_insert()?)
        } else if tok.is_keyword("UPDATE") {
            Statement::Update(self.parse_update()?)
        } else if tok.is_keyword("DELETE") {
            Statement::Delete(self.parse_delete()?)
        } else if tok.is_keyword("CREATE") {
            Statement::CreateTable(self.parse_create_table()?)
        } else {
            return self.expected("a statement keyword");
        };

        self.eat_symbol(";");
        if !self.current().is_eof() {
            return self.fail(format!(
                "unexpected token after statement: {}",
                self.current().describe()
            ));
        }
        Ok(stmt)
    }

    // =======================================================================
    // SELECT
    // =======================================================================

    fn parse_select(&mut self) -> Result<SelectStatement> {
        self.expect_keyword("SELECT")?;
        let distinct = self.eat_keyword("DISTINCT");

        let mut columns = vec![self.parse_select_item()?];
        while self.eat_symbol(",") {
            columns.push(self.parse_select_item()?);
        }

        self.expect_keyword("FROM")?;
        let from = self.parse_table_ref()?;

        let mut joins = Vec::new();
        while let Some(kind) = self.parse_join_kind()? {
            let table = self.parse_table_ref()?;
            self.expect_keyword("ON")?;
            let on = self.parse_expr()?;
            joins.push(Join { kind, table, on });
        }

        let where_clause = self.parse_where()?;

        let mut order_by = Vec::new();
        if self.eat_keyword("ORDER") {
            self.expect_keyword("BY")?;
            order_by.push(self.parse_order_by_item()?);
            while self.eat_symbol(",") {
                order_by.push(self.parse_order_by_item()?);
            }
        }

        let limit = if self.eat_keyword("LIMIT") {
            if self.current().kind != TokenKind::Number {
                return self.expected("a row count");
            }
            Some(self.advance().text)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            joins,
            where_clause,
            order_by,
            limit,
        })
    }

    fn parse_subquery(&mut self) -> Result<SelectStatement> {
        self.enter_nested()?;
        let query = self.parse_select();
        self.depth -= 1;
        query
    }

    fn parse_select_item(&mut self) -> Result<SelectItem> {
        if self.eat_symbol("*") {
            return Ok(SelectItem::Wildcard);
        }

        // table.*
        if self.current().kind == TokenKind::Identifier
            && self.peek_ahead(1).is_symbol(".")
            && self.peek_ahead(2).is_symbol("*")
        {
            let table = self.advance().text;
            self.advance(); // .
            self.advance(); // *
            return Ok(SelectItem::QualifiedWildcard(table));
        }

        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;
        Ok(SelectItem::Expr { expr, alias })
    }

    fn parse_optional_alias(&mut self) -> Result<Option<String>> {
        if self.eat_keyword("AS") {
            Ok(Some(self.expect_identifier("alias")?))
        } else if self.current().kind == TokenKind::Identifier {
            Ok(Some(self.advance().text))
        } else {
            Ok(None)
        }
    }

    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let name = self.expect_identifier("table name")?;
        let alias = self.parse_optional_alias()?;
        Ok(TableRef { name, alias })
    }

    fn parse_join_kind(&mut self) -> Result<Option<JoinKind>> {
        if self.eat_keyword("JOIN") {
            return Ok(Some(JoinKind::Inner));
        }
        if self.eat_keyword("INNER") {
            self.expect_keyword("JOIN")?;
            return Ok(Some(JoinKind::Inner));
        }
        if self.eat_keyword("LEFT") {
            self.eat_keyword("OUTER");
            self.expect_keyword("JOIN")?;
            return Ok(Some(JoinKind::Left));
        }
        Ok(None)
    }

    fn parse_where(&mut self) -> Result<Option<Expr>> {
        if self.eat_keyword("WHERE") {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_order_by_item(&mut self) -> Result<OrderByItem> {
        let expr = self.parse_expr()?;
        let desc = if self.eat_keyword("DESC") {
            true
        } else {
            self.eat_keyword("ASC");
            false
        };
        Ok(OrderByItem { expr, desc })
    }

    // =======================================================================
    // INSERT
    // =======================================================================

    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.expect_keyword("INSERT")?;
        self.expect_keyword("INTO")?;
        let table = self.expect_identifier("table name")?;

        let columns = if self.at_symbol("(") {
            self.parse_paren_list(|p| p.expect_identifier("column name"), starts_identifier)?
        } else {
            Vec::new()
        };

        self.expect_keyword("VALUES")?;
        let mut values = vec![self.parse_paren_list(Self::parse_literal, starts_literal)?];
        while self.eat_symbol(",") {
            values.push(self.parse_paren_list(Self::parse_literal, starts_literal)?);
        }
        if self.at_symbol("(") {
            return self.expected("','");
        }

        Ok(InsertStatement {
            table,
            columns,
            values,
        })
    }

    fn parse_literal(&mut self) -> Result<Literal> {
        if let Some(number) = self.parse_signed_number() {
            return Ok(number);
        }
        let kind = self.current().kind;
        match kind {
            TokenKind::Number => Ok(Literal::Number(self.advance().text)),
            TokenKind::StringLiteral => Ok(Literal::String(self.advance().text)),
            _ if self.eat_keyword("NULL") => Ok(Literal::Null),
            _ => self.expected("a literal value"),
        }
    }

    /// `-` immediately followed by a number folds into one literal.
    fn parse_signed_number(&mut self) -> Option<Literal> {
        if self.at_symbol("-") && self.peek_ahead(1).kind == TokenKind::Number {
            self.advance();
            let digits = self.advance().text;
            Some(Literal::Number(format!("-{digits}")))
        } else {
            None
        }
    }

    // =======================================================================
    // UPDATE / DELETE
    // =======================================================================

    fn parse_update(&mut self) -> Result<UpdateStatement> {
        self.expect_keyword("UPDATE")?;
        let table = self.expect_identifier("table name")?;
        self.expect_keyword("SET")?;

        let mut assignments = vec![self.parse_assignment()?];
        while self.eat_symbol(",") {
            assignments.push(self.parse_assignment()?);
        }

        let where_clause = self.parse_where()?;
        Ok(UpdateStatement {
            table,
            assignments,
            where_clause,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let column = self.expect_identifier("column name")?;
        self.expect_symbol("=")?;
        let value = self.parse_expr()?;
        Ok(Assignment { column, value })
    }

    fn parse_delete(&mut self) -> Result<DeleteStatement> {
        self.expect_keyword("DELETE")?;
        self.expect_keyword("FROM")?;
        let table = self.expect_identifier("table name")?;
        let where_clause = self.parse_where()?;
        Ok(DeleteStatement {
            table,
            where_clause,
        })
    }

    // =======================================================================
    // CREATE TABLE
    // =======================================================================

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        self.expect_keyword("CREATE")?;
        self.expect_keyword("TABLE")?;
        let table = self.expect_identifier("table name")?;
        let columns = self.parse_paren_list(Self::parse_column_def, starts_identifier)?;
        Ok(CreateTableStatement { table, columns })
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef> {
        let name = self.expect_identifier("column name")?;
        let type_name = self.parse_type_name()?;

        let mut constraints = Vec::new();
        loop {
            if self.eat_keyword("PRIMARY") {
                self.expect_keyword("KEY")?;
                constraints.push(ColumnConstraint::PrimaryKey);
            } else if self.eat_keyword("NOT") {
                self.expect_keyword("NULL")?;
                constraints.push(ColumnConstraint::NotNull);
            } else if self.eat_keyword("NULL") {
                constraints.push(ColumnConstraint::Null);
            } else if self.eat_keyword("UNIQUE") {
                constraints.push(ColumnConstraint::Unique);
            } else if self.eat_keyword("DEFAULT") {
                constraints.push(ColumnConstraint::Default(self.parse_literal()?));
            } else {
                break;
            }
        }

        Ok(ColumnDef {
            name,
            type_name,
            constraints,
        })
    }

    /// A type name with an optional `(n)` or `(n, m)` size suffix.
    fn parse_type_name(&mut self) -> Result<String> {
        let mut type_name = self.expect_identifier("column type")?.to_ascii_uppercase();
        if self.at_symbol("(") {
            let sizes = self.parse_paren_list(
                |p| {
                    if p.current().kind == TokenKind::Number {
                        Ok(p.advance().text)
                    } else {
                        p.expected("a type size")
                    }
                },
                |tok| tok.kind == TokenKind::Number,
            )?;
            type_name.push('(');
            type_name.push_str(&sizes.join(", "));
            type_name.push(')');
        }
        Ok(type_name)
    }

    // =======================================================================
    // Expression parser (precedence climbing)
    // =======================================================================
    //
    // Precedence (lowest to highest):
    //   1. OR
    //   2. AND
    //   3. NOT (prefix)
    //   4. comparison, [NOT] IN, IS [NOT] NULL, [NOT] LIKE
    //   5. addition (+, -)
    //   6. multiplication (*, /, %)
    //   7. unary minus
    //   8. primary (literals, columns, function calls, parens, subqueries)

    fn parse_expr(&mut self) -> Result<Expr> {
        self.enter_nested()?;
        let expr = self.parse_or_expr();
        self.depth -= 1;
        expr
    }

    fn parse_or_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_and_expr()?;
        while self.eat_keyword("OR") {
            let right = self.parse_and_expr()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_not_expr()?;
        while self.eat_keyword("AND") {
            let right = self.parse_not_expr()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not_expr(&mut self) -> Result<Expr> {
        let mut negations = 0;
        while self.eat_keyword("NOT") {
            negations += 1;
        }
        let mut expr = self.parse_comparison_expr()?;
        for _ in 0..negations {
            expr = Expr::UnaryOp {
                op: UnaryOp::Not,
                expr: Box::new(expr),
            };
        }
        Ok(expr)
    }

    fn parse_comparison_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_add_expr()?;

        loop {
            if let Some(op) = comparison_op(self.current()) {
                self.advance();
                let right = self.parse_add_expr()?;
                left = binary(op, left, right);
            } else if self.eat_keyword("IS") {
                let negated = self.eat_keyword("NOT");
                self.expect_keyword("NULL")?;
                left = Expr::IsNull {
                    expr: Box::new(left),
                    negated,
                };
            } else if self.at_keyword("IN")
                || (self.at_keyword("NOT") && self.peek_ahead(1).is_keyword("IN"))
            {
                let negated = self.eat_keyword("NOT");
                self.expect_keyword("IN")?;
                let list = self.parse_in_list()?;
                left = Expr::InList {
                    expr: Box::new(left),
                    list,
                    negated,
                };
            } else if self.at_keyword("LIKE")
                || (self.at_keyword("NOT") && self.peek_ahead(1).is_keyword("LIKE"))
            {
                let op = if self.eat_keyword("NOT") {
                    BinaryOp::NotLike
                } else {
                    BinaryOp::Like
                };
                self.expect_keyword("LIKE")?;
                let pattern = self.parse_add_expr()?;
                left = binary(op, left, pattern);
            } else {
                break;
            }
        }

        Ok(left)
    }

    /// The parenthesised part of `IN (...)`: a subquery or an expression list.
    fn parse_in_list(&mut self) -> Result<Vec<Expr>> {
        if self.at_symbol("(") && self.peek_ahead(1).is_keyword("SELECT") {
            self.advance();
            let query = self.parse_subquery()?;
            self.expect_symbol(")")?;
            return Ok(vec![Expr::Subquery(Box::new(query))]);
        }
        self.parse_paren_list(Self::parse_expr, starts_expr)
    }

    fn parse_add_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_mul_expr()?;
        loop {
            let op = if self.at_symbol("+") {
                BinaryOp::Add
            } else if self.at_symbol("-") {
                BinaryOp::Sub
            } else {
                break;
            };
            self.advance();
            let right = self.parse_mul_expr()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_mul_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary_expr()?;
        loop {
            let op = if self.at_symbol("*") {
                BinaryOp::Mul
            } else if self.at_symbol("/") {
                BinaryOp::Div
            } else if self.at_symbol("%") {
                BinaryOp::Mod
            } else {
                break;
            };
            self.advance();
            let right = self.parse_unary_expr()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr> {
        let mut negations = 0;
        while self.at_symbol("-") && self.peek_ahead(1).kind != TokenKind::Number {
            self.advance();
            negations += 1;
        }
        let mut expr = self.parse_primary_expr()?;
        for _ in 0..negations {
            expr = Expr::UnaryOp {
                op: UnaryOp::Neg,
                expr: Box::new(expr),
            };
        }
        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr> {
        if let Some(number) = self.parse_signed_number() {
            return Ok(Expr::Literal(number));
        }

        let kind = self.current().kind;
        match kind {
            TokenKind::Number => return Ok(Expr::Literal(Literal::Number(self.advance().text))),
            TokenKind::StringLiteral => {
                return Ok(Expr::Literal(Literal::String(self.advance().text)))
            }
            TokenKind::Identifier => return self.parse_column_or_function(),
            _ => {}
        }

        if self.eat_keyword("NULL") {
            return Ok(Expr::Literal(Literal::Null));
        }

        if self.at_symbol("(") {
            if self.peek_ahead(1).is_keyword("SELECT") {
                self.advance();
                let query = self.parse_subquery()?;
                self.expect_symbol(")")?;
                return Ok(Expr::Subquery(Box::new(query)));
            }
            self.advance();
            let expr = self.parse_expr()?;
            self.expect_symbol(")")?;
            return Ok(expr);
        }

        self.expected("an expression")
    }

    fn parse_column_or_function(&mut self) -> Result<Expr> {
        let name = self.expect_identifier("column name")?;

        if self.at_symbol("(") {
            let args = if self.peek_ahead(1).is_symbol(")") {
                self.advance();
                self.advance();
                Vec::new()
            } else if self.peek_ahead(1).is_symbol("*") {
                self.advance(); // (
                self.advance(); // *
                self.expect_symbol(")")?;
                vec![Expr::Column {
                    table: None,
                    name: "*".into(),
                }]
            } else {
                self.parse_paren_list(Self::parse_expr, starts_expr)?
            };
            return Ok(Expr::Function {
                name: name.to_ascii_uppercase(),
                args,
            });
        }

        if self.eat_symbol(".") {
            let column = self.expect_identifier("column name")?;
            return Ok(Expr::Column {
                table: Some(name),
                name: column,
            });
        }

        Ok(Expr::Column { table: None, name })
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn comparison_op(tok: &Token) -> Option<BinaryOp> {
    if tok.kind != TokenKind::Symbol {
        return None;
    }
    match tok.text.as_str() {
        "=" => Some(BinaryOp::Eq),
        "<>" => Some(BinaryOp::NotEq),
        "<" => Some(BinaryOp::Lt),
        ">" => Some(BinaryOp::Gt),
        "<=" => Some(BinaryOp::LtEq),
        ">=" => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn starts_identifier(tok: &Token) -> bool {
    tok.kind == TokenKind::Identifier
}

fn starts_literal(tok: &Token) -> bool {
    matches!(tok.kind, TokenKind::Number | TokenKind::StringLiteral)
        || tok.is_keyword("NULL")
        || tok.is_symbol("-")
}

fn starts_expr(tok: &Token) -> bool {
    starts_literal(tok) || starts_identifier(tok) || tok.is_symbol("(") || tok.is_keyword("NOT")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(sql: &str) -> Statement {
        Parser::parse(sql).unwrap_or_else(|e| panic!("{sql:?} failed: {e}"))
    }

    fn parse_err(sql: &str) -> SyntaxError {
        Parser::parse(sql).expect_err("expected a syntax error")
    }

    fn select(sql: &str) -> SelectStatement {
        match parse_ok(sql) {
            Statement::Select(sel) => sel,
            other => panic!("expected Select, got {other:?}"),
        }
    }

    fn col(name: &str) -> Expr {
        Expr::Column {
            table: None,
            name: name.into(),
        }
    }

    fn num(n: &str) -> Expr {
        Expr::Literal(Literal::Number(n.into()))
    }

    // -- SELECT tests -------------------------------------------------------

    #[test]
    fn parse_simple_select() {
        let sel = select("SELECT * FROM users");
        assert!(!sel.distinct);
        assert_eq!(sel.columns, vec![SelectItem::Wildcard]);
        assert_eq!(sel.from.name, "users");
        assert!(sel.joins.is_empty());
        assert!(sel.where_clause.is_none());
    }

    #[test]
    fn table_name_preserves_case() {
        assert_eq!(select("select * from USERS").from.name, "USERS");
    }

    #[test]
    fn parse_select_with_where_and_or() {
        let sel = select("SELECT id FROM users WHERE age > 18 AND name = 'Alice' OR active = 1");
        match sel.where_clause {
            Some(Expr::BinaryOp { op, left, .. }) => {
                assert_eq!(op, BinaryOp::Or);
                assert!(matches!(*left, Expr::BinaryOp { op: BinaryOp::And, .. }));
            }
            other => panic!("expected OR at top level, got {other:?}"),
        }
    }

    #[test]
    fn parse_select_with_aliases() {
        let sel = select("SELECT id AS user_id, name n FROM users AS u");
        assert_eq!(
            sel.columns,
            vec![
                SelectItem::Expr {
                    expr: col("id"),
                    alias: Some("user_id".into())
                },
                SelectItem::Expr {
                    expr: col("name"),
                    alias: Some("n".into())
                },
            ]
        );
        assert_eq!(sel.from.alias.as_deref(), Some("u"));
    }

    #[test]
    fn parse_select_with_joins() {
        let sel = select(
            "SELECT u.name, o.total FROM users u JOIN orders o ON u.id = o.user_id \
             LEFT OUTER JOIN items i ON i.order_id = o.id",
        );
        assert_eq!(sel.joins.len(), 2);
        assert_eq!(sel.joins[0].kind, JoinKind::Inner);
        assert_eq!(sel.joins[0].table.name, "orders");
        assert_eq!(sel.joins[0].table.alias.as_deref(), Some("o"));
        assert_eq!(sel.joins[1].kind, JoinKind::Left);
        assert_eq!(
            sel.joins[0].on,
            binary(
                BinaryOp::Eq,
                Expr::Column {
                    table: Some("u".into()),
                    name: "id".into()
                },
                Expr::Column {
                    table: Some("o".into()),
                    name: "user_id".into()
                },
            )
        );
    }

    #[test]
    fn parse_inner_join_keyword() {
        let sel = select("SELECT * FROM a INNER JOIN b ON a.id = b.a_id");
        assert_eq!(sel.joins[0].kind, JoinKind::Inner);
    }

    #[test]
    fn join_without_on_is_error() {
        let err = parse_err("SELECT * FROM a JOIN b");
        assert!(err.message.contains("expected ON"), "{err}");
    }

    #[test]
    fn parse_select_table_star() {
        let sel = select("SELECT u.* FROM users u");
        assert_eq!(sel.columns, vec![SelectItem::QualifiedWildcard("u".into())]);
    }

    #[test]
    fn parse_subquery_in_where() {
        let sel = select("SELECT * FROM users WHERE id IN (SELECT user_id FROM orders)");
        match sel.where_clause {
            Some(Expr::InList { list, negated, .. }) => {
                assert!(!negated);
                assert_eq!(list.len(), 1);
                assert!(matches!(&list[0], Expr::Subquery(q) if q.from.name == "orders"));
            }
            other => panic!("expected InList, got {other:?}"),
        }
    }

    #[test]
    fn parse_in_value_list() {
        let sel = select("SELECT * FROM t WHERE id NOT IN (1, 2, 3)");
        match sel.where_clause {
            Some(Expr::InList { list, negated, .. }) => {
                assert!(negated);
                assert_eq!(list, vec![num("1"), num("2"), num("3")]);
            }
            other => panic!("expected InList, got {other:?}"),
        }
    }

    #[test]
    fn parse_is_null_and_like() {
        let sel = select("SELECT * FROM t WHERE a IS NOT NULL AND b NOT LIKE 'x%'");
        match sel.where_clause {
            Some(Expr::BinaryOp { left, right, .. }) => {
                assert!(matches!(*left, Expr::IsNull { negated: true, .. }));
                assert!(matches!(*right, Expr::BinaryOp { op: BinaryOp::NotLike, .. }));
            }
            other => panic!("expected AND, got {other:?}"),
        }
    }

    #[test]
    fn parse_distinct_order_limit() {
        let sel = select("SELECT DISTINCT name FROM users ORDER BY name DESC, id LIMIT 10;");
        assert!(sel.distinct);
        assert_eq!(sel.order_by.len(), 2);
        assert!(sel.order_by[0].desc);
        assert!(!sel.order_by[1].desc);
        assert_eq!(sel.limit.as_deref(), Some("10"));
    }

    #[test]
    fn parse_function_call() {
        let sel = select("SELECT count(*), max(age) FROM users");
        match &sel.columns[0] {
            SelectItem::Expr {
                expr: Expr::Function { name, args },
                ..
            } => {
                assert_eq!(name, "COUNT");
                assert_eq!(args, &vec![col("*")]);
            }
            other => panic!("expected Function, got {other:?}"),
        }
    }

    #[test]
    fn parse_expression_precedence() {
        // 1 + 2 * 3 < 10 parses as (1 + (2 * 3)) < 10
        let sel = select("SELECT * FROM t WHERE 1 + 2 * 3 < 10");
        let expected = binary(
            BinaryOp::Lt,
            binary(
                BinaryOp::Add,
                num("1"),
                binary(BinaryOp::Mul, num("2"), num("3")),
            ),
            num("10"),
        );
        assert_eq!(sel.where_clause, Some(expected));
    }

    #[test]
    fn parse_negative_numbers_and_unary_minus() {
        let sel = select("SELECT -5, -x FROM t");
        assert_eq!(
            sel.columns[0],
            SelectItem::Expr {
                expr: num("-5"),
                alias: None
            }
        );
        assert_eq!(
            sel.columns[1],
            SelectItem::Expr {
                expr: Expr::UnaryOp {
                    op: UnaryOp::Neg,
                    expr: Box::new(col("x"))
                },
                alias: None
            }
        );
    }

    #[test]
    fn parse_nested_parens_in_expr() {
        let sel = select("SELECT * FROM t WHERE ((a = 1))");
        assert_eq!(sel.where_clause, Some(binary(BinaryOp::Eq, col("a"), num("1"))));
    }

    // -- INSERT tests -------------------------------------------------------

    #[test]
    fn parse_simple_insert() {
        match parse_ok("INSERT INTO users (name) VALUES ('John')") {
            Statement::Insert(ins) => {
                assert_eq!(ins.table, "users");
                assert_eq!(ins.columns, vec!["name".to_string()]);
                assert_eq!(ins.values, vec![vec![Literal::String("John".into())]]);
            }
            other => panic!("expected Insert, got {other:?}"),
        }
    }

    #[test]
    fn parse_insert_multiple_rows_without_columns() {
        match parse_ok("INSERT INTO t VALUES (1, 'a'), (-2, NULL);") {
            Statement::Insert(ins) => {
                assert!(ins.columns.is_empty());
                assert_eq!(ins.values.len(), 2);
                assert_eq!(
                    ins.values[1],
                    vec![Literal::Number("-2".into()), Literal::Null]
                );
            }
            other => panic!("expected Insert, got {other:?}"),
        }
    }

    #[test]
    fn insert_missing_close_paren() {
        let err = parse_err("INSERT INTO users (name VALUES ('John')");
        assert!(err.message.contains("expected ')'"), "{err}");
        assert_eq!((err.line, err.column), (1, 25));
    }

    #[test]
    fn insert_missing_comma_between_values() {
        let err = parse_err("INSERT INTO t (a, b) VALUES (1 2)");
        assert!(err.message.contains("expected ','"), "{err}");
        assert_eq!(err.column, 32);
    }

    #[test]
    fn insert_missing_comma_between_rows() {
        let err = parse_err("INSERT INTO t VALUES (1) (2)");
        assert!(err.message.contains("expected ','"), "{err}");
    }

    #[test]
    fn insert_values_must_be_literals() {
        let err = parse_err("INSERT INTO t VALUES (a)");
        assert!(err.message.contains("expected a literal value"), "{err}");
    }

    // -- UPDATE / DELETE tests ---------------------------------------------

    #[test]
    fn parse_update_multiple_assignments() {
        match parse_ok("UPDATE users SET age = age + 1, name = 'Bob' WHERE id = 1") {
            Statement::Update(upd) => {
                assert_eq!(upd.table, "users");
                assert_eq!(upd.assignments.len(), 2);
                assert_eq!(upd.assignments[1].column, "name");
                assert_eq!(
                    upd.assignments[0].value,
                    binary(BinaryOp::Add, col("age"), num("1"))
                );
                assert!(upd.where_clause.is_some());
            }
            other => panic!("expected Update, got {other:?}"),
        }
    }

    #[test]
    fn update_without_set_is_error() {
        let err = parse_err("UPDATE users age = 1");
        assert!(err.message.contains("expected SET"), "{err}");
    }

    #[test]
    fn parse_delete_with_and_without_where() {
        match parse_ok("DELETE FROM users WHERE id = 1") {
            Statement::Delete(del) => {
                assert_eq!(del.table, "users");
                assert!(del.where_clause.is_some());
            }
            other => panic!("expected Delete, got {other:?}"),
        }
        match parse_ok("delete from Users") {
            Statement::Delete(del) => {
                assert_eq!(del.table, "Users");
                assert!(del.where_clause.is_none());
            }
            other => panic!("expected Delete, got {other:?}"),
        }
    }

    // -- CREATE TABLE tests -------------------------------------------------

    #[test]
    fn parse_create_table() {
        let stmt = parse_ok(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                name varchar(100) NOT NULL,
                price DECIMAL(10, 2) DEFAULT 0,
                email TEXT UNIQUE NULL
            )",
        );
        match stmt {
            Statement::CreateTable(ct) => {
                assert_eq!(ct.table, "users");
                assert_eq!(ct.columns.len(), 4);
                assert_eq!(ct.columns[0].type_name, "INTEGER");
                assert_eq!(ct.columns[0].constraints, vec![ColumnConstraint::PrimaryKey]);
                assert_eq!(ct.columns[1].type_name, "VARCHAR(100)");
                assert_eq!(ct.columns[1].constraints, vec![ColumnConstraint::NotNull]);
                assert_eq!(ct.columns[2].type_name, "DECIMAL(10, 2)");
                assert_eq!(
                    ct.columns[2].constraints,
                    vec![ColumnConstraint::Default(Literal::Number("0".into()))]
                );
                assert_eq!(
                    ct.columns[3].constraints,
                    vec![ColumnConstraint::Unique, ColumnConstraint::Null]
                );
            }
            other => panic!("expected CreateTable, got {other:?}"),
        }
    }

    #[test]
    fn create_table_missing_comma() {
        let err = parse_err("CREATE TABLE t (id INTEGER name TEXT)");
        assert!(err.message.contains("expected ','"), "{err}");
    }

    #[test]
    fn create_table_missing_close_paren() {
        let err = parse_err("CREATE TABLE t (id INTEGER");
        assert!(err.message.contains("expected ')'"), "{err}");
        assert!(err.message.contains("end of input"), "{err}");
    }

    #[test]
    fn create_requires_table_keyword() {
        let err = parse_err("CREATE INDEX idx ON t (a)");
        assert!(err.message.contains("expected TABLE"), "{err}");
        assert_eq!(err.column, 8);
    }

    // -- Error policy -------------------------------------------------------

    #[test]
    fn misspelled_keyword_reports_offending_token() {
        let err = parse_err("SELECT * FORM users");
        assert!(err.message.contains("FORM"), "{err}");
        assert_eq!((err.line, err.column), (1, 10));
    }

    #[test]
    fn incomplete_select() {
        let err = parse_err("SELECT * FROM");
        assert!(err.message.contains("end of input"), "{err}");
    }

    #[test]
    fn empty_input_is_error_at_origin() {
        let err = parse_err("");
        assert!(err.message.contains("expected a statement keyword"));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn unknown_leading_keyword() {
        let err = parse_err("FROBNICATE THE WIDGETS");
        assert!(err.message.contains("expected a statement keyword"));
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse_err("DELETE FROM t; DELETE FROM u");
        assert!(err.message.contains("unexpected token after statement"));
        assert_eq!(err.column, 16);
    }

    #[test]
    fn trailing_semicolon_is_allowed() {
        parse_ok("SELECT * FROM t;");
    }

    #[test]
    fn error_position_on_later_line() {
        let err = parse_err("SELECT *\nFROM users\nWHERE id = )");
        assert_eq!((err.line, err.column), (3, 12));
    }

    #[test]
    fn unterminated_string_surfaces_lexical_error() {
        let err = parse_err("SELECT * FROM t WHERE name = 'bob");
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.column, 30);
    }

    #[test]
    fn deep_nesting_is_rejected_not_overflowed() {
        let sql = format!("SELECT * FROM t WHERE {}1{}", "(".repeat(500), ")".repeat(500));
        let err = parse_err(&sql);
        assert!(err.message.contains("nested too deeply"));
    }

    #[test]
    fn parse_statement_accepts_tokens_without_eof() {
        let mut tokens = tokenize("DELETE FROM t");
        tokens.pop();
        assert!(parse_statement(tokens).is_ok());
    }
}
