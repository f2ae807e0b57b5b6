//! Hand-written SQL tokenizer for mp-db.
//!
//! The [`Lexer`] takes a raw SQL string and produces a `Vec<Token>`. It never
//! fails: characters it does not understand become single-character
//! [`TokenKind::Symbol`] tokens, and unterminated literals become a
//! [`TokenKind::Error`] token, so the parser reports every problem at the
//! exact position where it occurs.

/// The category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    StringLiteral,
    Symbol,
    /// A lexical anomaly. The token text holds the diagnostic message.
    Error,
    /// End-of-input sentinel, always the last token.
    Eof,
}

/// A single SQL token with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, case preserved. String literals and quoted identifiers
    /// hold their unescaped contents.
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Case-insensitive keyword test. `keyword` must be upper case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(keyword)
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Human-readable rendering used in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::StringLiteral => format!("string '{}'", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword lookup
// ---------------------------------------------------------------------------

const KEYWORDS: &[&str] = &[
    "AND", "AS", "ASC", "BY", "CREATE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "FROM", "IN",
    "INNER", "INSERT", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "ON",
    "OR", "ORDER", "OUTER", "PRIMARY", "SELECT", "SET", "TABLE", "UNIQUE", "UPDATE", "VALUES",
    "WHERE",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

const TWO_CHAR_SYMBOLS: &[&str] = &["<=", ">=", "<>"];

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// A hand-written SQL tokenizer.
///
/// Create one with [`Lexer::new`], then call [`Lexer::tokenize`] to obtain
/// the full token stream (terminated by an [`TokenKind::Eof`] token).
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input.
    ///
    /// The returned vector always ends with exactly one `Eof` token, even
    /// for empty input.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    // -- helpers ------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            s.push(ch);
            self.advance();
        }
        s
    }

    /// Skip whitespace and comments. An unterminated block comment yields
    /// an error token positioned at the `/*`.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            self.advance_while(char::is_whitespace);
            match (self.peek(), self.peek_at(1)) {
                (Some('-'), Some('-')) => {
                    self.advance_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.advance();
                    self.advance();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (None, _) => {
                                return Some(Token::new(
                                    TokenKind::Error,
                                    "unterminated block comment",
                                    line,
                                    column,
                                ));
                            }
                            (Some('*'), Some('/')) => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => return None,
            }
        }
    }

    // -- main scanner -------------------------------------------------------

    fn next_token(&mut self) -> Token {
        if let Some(err) = self.skip_trivia() {
            return err;
        }

        let (line, column) = (self.line, self.column);
        let ch = match self.peek() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, "", line, column),
        };

        if ch == '\'' {
            return self.read_quoted('\'', TokenKind::StringLiteral, "unterminated string literal");
        }
        if ch == '"' {
            return self.read_quoted('"', TokenKind::Identifier, "unterminated quoted identifier");
        }
        if ch.is_ascii_digit() {
            return self.read_number();
        }
        if ch.is_ascii_alphabetic() || ch == '_' {
            let word = self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let kind = if is_keyword(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Token::new(kind, word, line, column);
        }

        self.read_symbol()
    }

    // -- literal readers ----------------------------------------------------

    /// Read a literal delimited by `quote`, where a doubled quote stands for
    /// one literal quote character.
    fn read_quoted(&mut self, quote: char, kind: TokenKind, unterminated: &str) -> Token {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None => return Token::new(TokenKind::Error, unterminated, line, column),
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        s.push(quote);
                    } else {
                        break;
                    }
                }
                Some(c) => s.push(c),
            }
        }
        Token::new(kind, s, line, column)
    }

    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = self.advance_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.advance();
            text.push('.');
            text.push_str(&self.advance_while(|c| c.is_ascii_digit()));
        }
        Token::new(TokenKind::Number, text, line, column)
    }

    fn read_symbol(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        if let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) {
            let pair: String = [a, b].iter().collect();
            if TWO_CHAR_SYMBOLS.contains(&pair.as_str()) {
                self.advance();
                self.advance();
                return Token::new(TokenKind::Symbol, pair, line, column);
            }
        }
        let ch = self.advance().map(String::from).unwrap_or_default();
        Token::new(TokenKind::Symbol, ch, line, column)
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(sql: &str) -> Vec<Token> {
    Lexer::new(sql).tokenize()
}

// ===========================================================================
// Tests
// ===========================================================================
