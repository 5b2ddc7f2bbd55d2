//! Template parser.
//!
//! # Syntax
//!
//! ```text
//! template  := ( text | "\$" | placeholder )*
//! placeholder := "$" ident call*                short form
//!              | "${" name call* "}"            braced form
//! name      := ident ( "." ident )*             dotted keys, braced form only
//! call      := "." ident "(" [ arg ( "," arg )* ] ")"
//! arg       := 'text' | "text" | integer | "$" … | "${" … "}"
//! ```
//!
//! A `$` that does not start a placeholder is literal text. In the braced
//! form a dotted segment followed by `(` is a method call, otherwise it is
//! part of the key (`${project.name}` vs `${name.trim()}`).

use archgen_core::application::EvaluationError;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Expr(Expr),
}

/// A property reference followed by method calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub name: String,
    pub calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    pub args: Vec<Arg>,
    /// Byte offset of the method name in the template.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Expr(Expr),
}

impl Expr {
    /// Every property name this expression reads, including inside arguments.
    pub fn names<'e>(&'e self, out: &mut Vec<&'e str>) {
        out.push(&self.name);
        for call in &self.calls {
            for arg in &call.args {
                if let Arg::Expr(inner) = arg {
                    inner.names(out);
                }
            }
        }
    }
}

/// Parse `template` into segments.
pub fn parse(template: &str) -> Result<Vec<Segment>, EvaluationError> {
    let mut parser = Parser::new(template);
    parser.run()?;
    Ok(parser.segments)
}

/// Parse as far as possible; returns the segments read before any error.
pub fn parse_partial(template: &str) -> Vec<Segment> {
    let mut parser = Parser::new(template);
    let _ = parser.run();
    parser.segments
}

struct Parser<'t> {
    src: &'t str,
    pos: usize,
    segments: Vec<Segment>,
    text: String,
}

impl<'t> Parser<'t> {
    fn new(src: &'t str) -> Self {
        Self {
            src,
            pos: 0,
            segments: Vec::new(),
            text: String::new(),
        }
    }

    fn run(&mut self) -> Result<(), EvaluationError> {
        while let Some(c) = self.peek() {
            match c {
                '\\' if self.peek_at(1) == Some('$') => {
                    self.pos += 2;
                    self.text.push('$');
                }
                '$' => match self.placeholder()? {
                    Some(expr) => {
                        self.flush_text();
                        self.segments.push(Segment::Expr(expr));
                    }
                    None => {
                        self.bump();
                        self.text.push('$');
                    }
                },
                _ => {
                    self.bump();
                    self.text.push(c);
                }
            }
        }
        self.flush_text();
        Ok(())
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.segments
                .push(Segment::Text(std::mem::take(&mut self.text)));
        }
    }

    /// At a `$`: parse a placeholder, or return `None` (consuming nothing)
    /// if the `$` is literal.
    fn placeholder(&mut self) -> Result<Option<Expr>, EvaluationError> {
        match self.peek_at(1) {
            Some('{') => {
                let open = self.pos;
                self.pos += 2;
                self.skip_ws();
                let expr = self.braced_expr()?;
                self.skip_ws();
                if !self.eat('}') {
                    return Err(self.error_at(open, "unclosed '${'"));
                }
                Ok(Some(expr))
            }
            Some(c) if is_ident_start(c) => {
                self.bump();
                let name = self.ident(false);
                let calls = self.calls()?;
                Ok(Some(Expr { name, calls }))
            }
            _ => Ok(None),
        }
    }

    fn braced_expr(&mut self) -> Result<Expr, EvaluationError> {
        if !self.peek().is_some_and(is_ident_start) {
            return Err(self.error("expected a property name"));
        }
        let mut name = self.ident(true);

        // Extend the key with dotted segments that are not method calls.
        loop {
            let save = self.pos;
            if !self.eat('.') || !self.peek().is_some_and(is_ident_start) {
                self.pos = save;
                break;
            }
            let segment = self.ident(true);
            if self.peek() == Some('(') {
                self.pos = save;
                break;
            }
            name.push('.');
            name.push_str(&segment);
        }

        let calls = self.calls()?;
        Ok(Expr { name, calls })
    }

    /// `.method(args)` repeated. Stops (without consuming) at a `.` that does
    /// not start a call, so `$groupId.app` keeps `.app` as text.
    fn calls(&mut self) -> Result<Vec<Call>, EvaluationError> {
        let mut calls = Vec::new();
        loop {
            let save = self.pos;
            if !self.eat('.') || !self.peek().is_some_and(is_ident_start) {
                self.pos = save;
                return Ok(calls);
            }
            let position = self.pos;
            let method = self.ident(false);
            if !self.eat('(') {
                self.pos = save;
                return Ok(calls);
            }
            let args = self.args()?;
            calls.push(Call {
                method,
                args,
                position,
            });
        }
    }

    /// After `(`: arguments up to and including `)`.
    fn args(&mut self) -> Result<Vec<Arg>, EvaluationError> {
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat(')') {
            return Ok(args);
        }
        loop {
            self.skip_ws();
            args.push(self.arg()?);
            self.skip_ws();
            if self.eat(')') {
                return Ok(args);
            }
            if !self.eat(',') {
                return Err(self.error("expected ',' or ')'"));
            }
        }
    }

    fn arg(&mut self) -> Result<Arg, EvaluationError> {
        match self.peek() {
            Some(q @ ('\'' | '"')) => self.quoted(q).map(Arg::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.integer().map(Arg::Int),
            Some('$') => match self.placeholder()? {
                Some(expr) => Ok(Arg::Expr(expr)),
                None => Err(self.error("expected a property reference")),
            },
            Some(_) => Err(self.error("expected a string, integer or $reference")),
            None => Err(self.error("unexpected end of template")),
        }
    }

    /// A quoted string. Inside, only the quote itself can be escaped; every
    /// other backslash is kept so regex escapes pass through unchanged.
    fn quoted(&mut self, quote: char) -> Result<String, EvaluationError> {
        let open = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') if self.peek() == Some(quote) => {
                    self.bump();
                    out.push(quote);
                }
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(self.error_at(open, "unterminated string")),
            }
        }
    }

    fn integer(&mut self) -> Result<i64, EvaluationError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| self.error_at(start, "invalid integer"))
    }

    fn ident(&mut self, allow_hyphen: bool) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || (allow_hyphen && c == '-'))
        {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> EvaluationError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, position: usize, reason: &str) -> EvaluationError {
        EvaluationError::Syntax {
            position,
            reason: reason.to_string(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
