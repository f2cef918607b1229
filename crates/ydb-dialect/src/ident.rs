//! Identifier parsing.
//!
//! An [`Ident`] is a table or column name, optionally dotted
//! (`folder.series`). Segments are either plain (`[A-Za-z_][A-Za-z0-9_]*`) or
//! backtick-quoted, where any character but NUL is allowed and a literal
//! backtick is written twice.
//!
//! Rendering is left to the [`QueryCompiler`](crate::QueryCompiler): every
//! segment is wrapped in the dialect's identifier quotes, whether or not it
//! was quoted in the source.
//!
//! # Example
//! ```ignore
//! use ydb_dialect::Ident;
//!
//! let t = Ident::parse("series")?;
//! let c = Ident::parse("`release date`")?;
//! # Ok::<(), ydb_dialect::YdbError>(())
//! ```

use crate::error::{YdbError, YdbResult};

const QUOTE: char = '`';

/// A parsed SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    parts: Vec<String>,
}

impl Ident {
    /// A single-segment identifier taken verbatim.
    ///
    /// No syntax check is applied; the compiler still escapes the quote
    /// character, so any non-empty name without NUL is safe.
    pub fn new(name: &str) -> YdbResult<Self> {
        if name.is_empty() {
            return Err(YdbError::validation("Identifier cannot be empty"));
        }
        if name.contains('\0') {
            return Err(YdbError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![name.to_string()],
        })
    }

    /// Parse a dotted, optionally backtick-quoted identifier.
    pub fn parse(s: &str) -> YdbResult<Self> {
        if s.is_empty() {
            return Err(YdbError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(YdbError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(YdbError::validation("Trailing '.' in identifier"));
                        }
                    }
                    Some(c) => {
                        return Err(YdbError::validation(format!(
                            "Expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if chars.peek() == Some(&QUOTE) {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some(QUOTE) => {
                            if chars.peek() == Some(&QUOTE) {
                                chars.next();
                                name.push(QUOTE);
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => return Err(YdbError::validation("Unclosed quoted identifier")),
                    }
                }
                if name.is_empty() {
                    return Err(YdbError::validation("Empty quoted identifier"));
                }
                parts.push(name);
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let ok = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c.is_ascii_alphanumeric()
                };
                if !ok {
                    return Err(YdbError::validation(format!(
                        "Invalid character in identifier '{s}': '{c}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(YdbError::validation("Empty identifier segment"));
            }
            parts.push(name);
        }

        Ok(Self { parts })
    }

    /// The unquoted segments, in order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The last segment (the column or table name itself).
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in builder APIs.
pub trait IntoIdent {
    fn into_ident(self) -> YdbResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> YdbResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> YdbResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> YdbResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> YdbResult<Ident> {
        Ident::parse(&self)
    }
}
