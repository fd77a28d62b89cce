//! Tokenizer and recursive-descent parser for configuration templates.
//!
//! The grammar is fixed and small. Names are `[A-Za-z0-9_]+` with no
//! surrounding whitespace inside their delimiters; whitespace between the
//! tokens of a conditional is insignificant. Parsing is total: input that
//! does not form a complete macro is kept as literal text, so expansion
//! can never fail on malformed syntax.

use super::ast::Node;

/// Parse a template document into nodes.
pub fn parse(input: &str) -> Vec<Node> {
    let mut cursor = Cursor::new(input);
    parse_nodes(&mut cursor, false)
}

/// Byte-offset cursor over the template text.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume `lit` if the input continues with it.
    fn eat(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn eat_char(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consume a non-empty run of name characters.
    fn eat_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            self.bump();
        }
        if self.pos > start {
            Some(&self.src[start..self.pos])
        } else {
            None
        }
    }
}

/// Parse nodes until end of input, or, inside a conditional branch, until
/// the branch's closing parenthesis.
///
/// Literal parentheses inside a branch must balance; the first unmatched
/// `)` ends the branch (the caller consumes it).
fn parse_nodes(cursor: &mut Cursor<'_>, in_branch: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut depth = 0usize;

    while let Some(ch) = cursor.peek() {
        if ch == '$' {
            let start = cursor.pos;
            if let Some(node) = parse_macro(cursor) {
                flush_literal(&mut nodes, &mut literal);
                nodes.push(node);
                continue;
            }
            // Not a complete macro: keep the `$` literal and rescan from
            // the next character.
            cursor.pos = start;
            literal.push('$');
            cursor.bump();
            continue;
        }

        if in_branch {
            match ch {
                '(' => depth += 1,
                ')' if depth == 0 => break,
                ')' => depth -= 1,
                _ => {}
            }
        }

        literal.push(ch);
        cursor.bump();
    }

    flush_literal(&mut nodes, &mut literal);
    nodes
}

fn flush_literal(nodes: &mut Vec<Node>, literal: &mut String) {
    if !literal.is_empty() {
        nodes.push(Node::Literal(std::mem::take(literal)));
    }
}

/// Try to parse one macro form at the cursor.
///
/// Returns `None` when the input is not a complete form; the cursor
/// position is then unspecified and the caller restores its saved one.
fn parse_macro(cursor: &mut Cursor<'_>) -> Option<Node> {
    if cursor.rest().starts_with("$if") {
        return parse_conditional(cursor);
    }

    if cursor.eat("$!{") {
        let name = cursor.eat_name()?.to_string();
        cursor.eat_char('}').then(|| Node::PathRef(name))
    } else if cursor.eat("${") {
        let name = cursor.eat_name()?.to_string();
        cursor.eat_char('}').then(|| Node::VariableRef(name))
    } else {
        None
    }
}

fn parse_conditional(cursor: &mut Cursor<'_>) -> Option<Node> {
    if !cursor.eat("$if") {
        return None;
    }
    // `$iffy` is literal text, not a conditional.
    if cursor.peek().is_some_and(|ch| !ch.is_whitespace() && ch != '(') {
        return None;
    }

    cursor.skip_whitespace();
    cursor.eat_char('(').then_some(())?;
    let condition = cursor.eat_name()?.to_string();
    cursor.eat_char(')').then_some(())?;

    cursor.skip_whitespace();
    cursor.eat_char('(').then_some(())?;
    let then_branch = parse_nodes(cursor, true);
    cursor.eat_char(')').then_some(())?;

    cursor.skip_whitespace();
    cursor.eat("else").then_some(())?;
    cursor.skip_whitespace();
    cursor.eat_char('(').then_some(())?;
    let else_branch = parse_nodes(cursor, true);
    cursor.eat_char(')').then_some(())?;

    Some(Node::Conditional {
        condition,
        then_branch,
        else_branch,
    })
}
