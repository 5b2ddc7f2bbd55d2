//! String methods callable from templates.
//!
//! Names follow the Java `String` API archetype authors already know
//! (`toUpperCase`, `replaceAll`, `substring`, ...) plus a few case helpers
//! for turning artifact ids into type and module names.

use std::fmt;

use archgen_core::application::EvaluationError;
use fancy_regex::Regex;

/// A value produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
}

impl Value {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Call `method` on `receiver`.
pub fn call(method: &str, receiver: Value, args: Vec<Value>) -> Result<Value, EvaluationError> {
    let s = receiver.into_string();
    let args = Args {
        method,
        values: args,
    };

    let value = match method {
        "toUpperCase" => {
            args.arity(0)?;
            Value::Str(s.to_uppercase())
        }
        "toLowerCase" => {
            args.arity(0)?;
            Value::Str(s.to_lowercase())
        }
        "trim" => {
            args.arity(0)?;
            Value::Str(s.trim().to_string())
        }
        "length" => {
            args.arity(0)?;
            Value::Int(s.chars().count() as i64)
        }
        "capitalize" => {
            args.arity(0)?;
            Value::Str(capitalize(&s))
        }
        "uncapitalize" => {
            args.arity(0)?;
            Value::Str(uncapitalize(&s))
        }
        "capitaliseAllWords" | "capitalizeAllWords" => {
            args.arity(0)?;
            Value::Str(capitalise_all_words(&s))
        }
        "toCamelCase" => {
            args.arity(0)?;
            Value::Str(to_pascal_case(&s))
        }
        "toLowerCamelCase" => {
            args.arity(0)?;
            Value::Str(uncapitalize(&to_pascal_case(&s)))
        }
        "toSnakeCase" => {
            args.arity(0)?;
            Value::Str(split_words(&s).join("_"))
        }
        "toKebabCase" => {
            args.arity(0)?;
            Value::Str(split_words(&s).join("-"))
        }
        "replace" => {
            args.arity(2)?;
            let (from, to) = (args.str(0)?, args.str(1)?);
            Value::Str(s.replace(from, to))
        }
        "replaceAll" => {
            args.arity(2)?;
            let re = args.regex(0)?;
            let replacement = java_replacement(args.str(1)?);
            Value::Str(args.replace(&re, &s, 0, &replacement)?)
        }
        "replaceFirst" => {
            args.arity(2)?;
            let re = args.regex(0)?;
            let replacement = java_replacement(args.str(1)?);
            Value::Str(args.replace(&re, &s, 1, &replacement)?)
        }
        "substring" => substring(&s, &args)?,
        _ => {
            return Err(EvaluationError::Method {
                method: method.to_string(),
                reason: "unknown method".into(),
            });
        }
    };
    Ok(value)
}

struct Args<'m> {
    method: &'m str,
    values: Vec<Value>,
}

impl Args<'_> {
    fn error(&self, reason: impl Into<String>) -> EvaluationError {
        EvaluationError::Method {
            method: self.method.to_string(),
            reason: reason.into(),
        }
    }

    fn arity(&self, expected: usize) -> Result<(), EvaluationError> {
        if self.values.len() == expected {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {expected} argument(s), got {}",
                self.values.len()
            )))
        }
    }

    fn str(&self, index: usize) -> Result<&str, EvaluationError> {
        match &self.values[index] {
            Value::Str(s) => Ok(s),
            Value::Int(_) => Err(self.error(format!("argument {} must be a string", index + 1))),
        }
    }

    fn index(&self, index: usize) -> Result<usize, EvaluationError> {
        match &self.values[index] {
            Value::Int(n) => usize::try_from(*n)
                .map_err(|_| self.error(format!("index {n} is negative"))),
            Value::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| self.error(format!("argument {} must be an integer", index + 1))),
        }
    }

    fn regex(&self, index: usize) -> Result<Regex, EvaluationError> {
        let pattern = self.str(index)?;
        Regex::new(pattern).map_err(|e| self.error(format!("invalid regex '{pattern}': {e}")))
    }

    /// Replace the first `limit` matches, or all of them when `limit` is 0.
    fn replace(
        &self,
        re: &Regex,
        text: &str,
        limit: usize,
        replacement: &str,
    ) -> Result<String, EvaluationError> {
        re.try_replacen(text, limit, replacement)
            .map(|replaced| replaced.into_owned())
            .map_err(|e| self.error(format!("matching '{}' failed: {e}", re.as_str())))
    }
}

/// `substring(begin)` or `substring(begin, end)`, counted in characters.
fn substring(s: &str, args: &Args<'_>) -> Result<Value, EvaluationError> {
    let len = s.chars().count();
    let (begin, end) = match args.values.len() {
        1 => (args.index(0)?, len),
        2 => (args.index(0)?, args.index(1)?),
        n => return Err(args.error(format!("expected 1 or 2 arguments, got {n}"))),
    };
    if begin > end || end > len {
        return Err(args.error(format!(
            "range {begin}..{end} out of bounds for length {len}"
        )));
    }
    Ok(Value::Str(s.chars().skip(begin).take(end - begin).collect()))
}

/// Convert a Java replacement string to `fancy_regex` syntax.
///
/// Java writes group references as `$1` and escapes with `\`; `fancy_regex` needs
/// `${1}` (so `$1a` is not read as group `1a`) and `$$` for a literal dollar.
fn java_replacement(java: &str) -> String {
    let mut out = String::with_capacity(java.len());
    let mut chars = java.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('$') => out.push_str("$$"),
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            },
            '$' => match chars.peek() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        out.push(d);
                    }
                    out.push('}');
                }
                Some('{') => out.push('$'),
                _ => out.push_str("$$"),
            },
            _ => out.push(c),
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first letter of every whitespace-separated word, keeping
/// the whitespace as is.
fn capitalise_all_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Split an identifier into lowercase words.
///
/// Separators are `_`, `-`, `.` and whitespace. Case transitions split too:
/// `myApp` → `my`, `app`; `HTTPServer` → `http`, `server`.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);
        if let Some(&next) = chars.peek() {
            let lower_to_upper = c.is_lowercase() && next.is_uppercase();
            let acronym_end = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if lower_to_upper || acronym_end {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}
