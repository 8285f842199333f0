//! Minimal tolerant reader used only by tests, so test documents can be
//! written as plain source strings. The shipped API consumes pre-parsed
//! expressions; parsing proper stays upstream.

use lyra_core::{Atom, Expr, Position, Span};

/// Read every top-level expression out of `src`, tolerating stray closers
/// and unclosed lists.
pub(crate) fn read_all(src: &str) -> Vec<Expr> {
    let mut reader = Reader::new(src);
    let mut out = Vec::new();
    while let Some(expr) = reader.read_expr() {
        out.push(expr);
    }
    out
}

struct Reader<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos)
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == ',' {
                self.bump();
            } else if ch == ';' {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else {
                break;
            }
        }
    }

    fn read_expr(&mut self) -> Option<Expr> {
        self.skip_trivia();
        let start = self.position();
        let ch = self.peek()?;
        match ch {
            '(' | '[' => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    self.skip_trivia();
                    match self.peek() {
                        // Unclosed list at end of input: keep what we have.
                        None => break,
                        Some(')') | Some(']') => {
                            self.bump();
                            break;
                        }
                        Some(_) => match self.read_expr() {
                            Some(item) => items.push(item),
                            None => break,
                        },
                    }
                }
                Some(Expr::List(items, Span::new(start, self.position())))
            }
            ')' | ']' => {
                // Stray closer: skip and keep reading.
                self.bump();
                self.read_expr()
            }
            '"' => {
                self.bump();
                let mut value = String::new();
                while let Some(c) = self.bump() {
                    match c {
                        '"' => break,
                        '\\' => {
                            if let Some(esc) = self.bump() {
                                value.push(match esc {
                                    'n' => '\n',
                                    other => other,
                                });
                            }
                        }
                        other => value.push(other),
                    }
                }
                Some(Expr::Atom(Atom::Str(value), Span::new(start, self.position())))
            }
            ':' => {
                self.bump();
                Some(Expr::Atom(
                    Atom::Symbol(":".to_string()),
                    Span::new(start, self.position()),
                ))
            }
            _ => {
                let mut token = String::new();
                while let Some(c) = self.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',' | ';' | ':') {
                        break;
                    }
                    token.push(c);
                    self.bump();
                }
                if token.is_empty() {
                    self.bump();
                    return self.read_expr();
                }
                let span = Span::new(start, self.position());
                let atom = match token.as_str() {
                    "true" => Atom::Bool(true),
                    "false" => Atom::Bool(false),
                    "nil" => Atom::Nil,
                    _ if looks_numeric(&token) => match token.parse::<f64>() {
                        Ok(n) => Atom::Number(n),
                        Err(_) => Atom::Symbol(token),
                    },
                    _ => Atom::Symbol(token),
                };
                Some(Expr::Atom(atom, span))
            }
        }
    }
}

fn looks_numeric(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') | Some('+') | Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}
