//! Layout rules for JavaScript and TypeScript

use crate::error::{FormatError, Result};
use crate::options::{ArrowParens, FormatOptions, TrailingCommas};
use crate::script::doc::Doc;
use crate::script::lexer::{Token, TokenType};
use crate::script::tree::{Delim, Group, Node};

// Keywords followed by an expression rather than ending one
const EXPR_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "throw", "case", "yield",
    "await", "extends", "as", "satisfies", "keyof", "export", "import", "default", "const", "let",
    "var", "else", "do",
];

// Keywords that open a statement block
const BLOCK_KEYWORDS: &[&str] = &["else", "try", "finally", "do", "static"];

// Keywords whose parentheses hold a condition or loop header
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "with"];

// Keywords whose parentheses hold a parameter list
const FUNCTION_KEYWORDS: &[&str] = &["function", "async"];

// A statement continues onto the next line after these
const CONTINUE_AFTER: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "&&=", "||=", "??=", "<<=", "&=", "|=", "^=", "+",
    "-", "*", "/", "%", "**", "&&", "||", "??", "==", "===", "!=", "!==", "<=", ">=", "<<", "&",
    "|", "^", ",", ".", "?.", "=>", "?", "~", "...", "@",
];

const CONTINUE_AFTER_KEYWORDS: &[&str] = &[
    "extends", "implements", "new", "typeof", "instanceof", "in", "of", "as", "satisfies", "keyof",
    "else", "export", "import", "const", "let", "var", "function", "class",
];

// ...or when the next line starts with these
const CONTINUE_BEFORE: &[&str] = &[
    ".", "?.", "=", "+=", "-=", "*=", "/=", "&&", "||", "??", "==", "===", "!=", "!==", "<=", ">=",
    "|", "&", "?", ":", ",", "=>",
];

const CONTINUE_BEFORE_KEYWORDS: &[&str] =
    &["else", "catch", "finally", "as", "satisfies", "instanceof", "extends", "implements"];

fn is_keyword(word: &str) -> bool {
    EXPR_KEYWORDS.contains(&word)
        || BLOCK_KEYWORDS.contains(&word)
        || CONTROL_KEYWORDS.contains(&word)
        || FUNCTION_KEYWORDS.contains(&word)
}

/// Does `node` end an operand, so that a following `(`/`[` is a call/index?
fn is_value_end(node: &Node, after_generic_close: bool) -> bool {
    match node {
        Node::Group(group) => group.delim != Delim::Brace,
        Node::Token(token) => match token.typ {
            TokenType::Ident => !is_keyword(&token.lexeme),
            TokenType::Number | TokenType::String | TokenType::Template | TokenType::Regex => true,
            TokenType::Punct => after_generic_close && token.lexeme == ">",
            _ => false,
        },
    }
}

/// `promise.catch` names a property, so it ends a value like any identifier
fn is_property(nodes: &[Node], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|p| nodes.get(p));
    nodes.get(i).is_some_and(|n| n.as_token().is_some_and(|t| t.typ == TokenType::Ident))
        && before.is_some_and(|n| n.is_punct(".") || n.is_punct("?."))
}

fn value_end_at(nodes: &[Node], i: usize, after_generic_close: bool) -> bool {
    is_property(nodes, i) || nodes.get(i).is_some_and(|n| is_value_end(n, after_generic_close))
}

/// The statement without the comments trailing it
fn code_of(stmt: &[Node]) -> &[Node] {
    let len = stmt.iter().rposition(|n| !n.is_comment()).map_or(0, |p| p + 1);
    &stmt[..len]
}

fn is_case_label(stmt: &[Node]) -> bool {
    match stmt.first() {
        Some(first) if first.is_ident("case") => true,
        Some(first) if first.is_ident("default") => stmt.get(1).is_some_and(|n| n.is_punct(":")),
        _ => false,
    }
}

/// Whether the brace group at `idx` is a statement block (as opposed to an
/// object literal, type literal, or import/export specifier list)
fn brace_is_block(nodes: &[Node], idx: usize, statement: bool) -> bool {
    let prev = idx.checked_sub(1).and_then(|p| nodes.get(p));

    match prev {
        None => statement,
        Some(Node::Group(group)) => group.delim == Delim::Paren,
        Some(Node::Token(token)) => match token.typ {
            TokenType::Ident => {
                BLOCK_KEYWORDS.contains(&token.lexeme.as_str())
                    || !EXPR_KEYWORDS.contains(&token.lexeme.as_str())
            }
            TokenType::Punct => match token.lexeme.as_str() {
                "=>" | ">" => true,
                ":" => statement && is_case_label(nodes),
                _ => false,
            },
            TokenType::String => true,
            _ => false,
        },
    }
}

fn is_switch_body(nodes: &[Node], idx: usize) -> bool {
    let before = |n: usize| idx.checked_sub(n).and_then(|p| nodes.get(p));
    before(1).is_some_and(|n| n.is_group(Delim::Paren))
        && before(2).is_some_and(|n| n.is_ident("switch"))
}

/// After a block's closing brace, does `next` still belong to the statement?
fn continues_block(stmt: &[Node], next: &Node) -> bool {
    let Node::Token(token) = next else {
        return false;
    };

    match token.typ {
        TokenType::Ident => match token.lexeme.as_str() {
            "else" | "catch" | "finally" | "as" | "satisfies" => true,
            "while" => stmt.first().is_some_and(|n| n.is_ident("do")),
            _ => false,
        },
        TokenType::Punct => matches!(token.lexeme.as_str(), ";" | "," | "." | "?." | "?" | ":"),
        _ => false,
    }
}

/// Across a source line break, does `next` continue the statement?
fn continues_line(stmt: &[Node], next: &Node) -> bool {
    let Some(prev) = stmt.last() else {
        return false;
    };
    let last = stmt.len() - 1;

    if let Node::Token(token) = prev {
        match token.typ {
            TokenType::Punct if CONTINUE_AFTER.contains(&token.lexeme.as_str()) => return true,
            TokenType::Ident
                if !is_property(stmt, last)
                    && CONTINUE_AFTER_KEYWORDS.contains(&token.lexeme.as_str()) =>
            {
                return true
            }
            _ => {}
        }
    }

    // `if (ready)` followed by its body on the next line
    if prev.is_group(Delim::Paren) && last >= 1 && !is_property(stmt, last - 1) {
        if let Some(Node::Token(keyword)) = stmt.get(last - 1) {
            if keyword.typ == TokenType::Ident
                && CONTROL_KEYWORDS.contains(&keyword.lexeme.as_str())
            {
                return true;
            }
        }
    }

    let first = next.first_token();
    match (next, first.typ) {
        (Node::Token(_), TokenType::Punct) => CONTINUE_BEFORE.contains(&first.lexeme.as_str()),
        (Node::Token(_), TokenType::Ident) => {
            CONTINUE_BEFORE_KEYWORDS.contains(&first.lexeme.as_str())
        }
        _ => false,
    }
}

/// Split a block body into statements
fn split_statements(nodes: &[Node]) -> Vec<&[Node]> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < nodes.len() {
        let node = &nodes[i];
        let stmt = &nodes[start..=i];

        let end = match nodes.get(i + 1) {
            None => true,
            Some(_) if node.is_punct(";") => true,
            // `a + // why` carries on below the comment
            Some(next) if node.is_line_comment() => !continues_line(code_of(stmt), next),
            Some(next) if node.is_group(Delim::Brace) && brace_is_block(stmt, i - start, true) => {
                !continues_block(stmt, next)
            }
            Some(next) if next.first_token().newlines_before > 0 => !continues_line(stmt, next),
            Some(_) => false,
        };

        if !end {
            i += 1;
            continue;
        }

        // A comment on the same line stays with its statement
        let mut last = i;
        if !node.is_comment() {
            if let Some(next) = nodes.get(i + 1) {
                if next.is_comment() && next.first_token().newlines_before == 0 {
                    last = i + 1;
                }
            }
        }

        statements.push(&nodes[start..=last]);
        start = last + 1;
        i = last + 1;
    }

    statements
}

/// One entry of a comma (or semicolon) separated list
struct Element<'n> {
    nodes: &'n [Node],
    separator: Option<&'n str>,
    trailing: Vec<&'n Token>,
}

impl Element<'_> {
    fn has_code(&self) -> bool {
        self.nodes.iter().any(|n| !n.is_comment())
    }
}

fn split_elements(children: &[Node]) -> Vec<Element<'_>> {
    let mut elements = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < children.len() {
        let node = &children[i];
        if !(node.is_punct(",") || node.is_punct(";")) {
            i += 1;
            continue;
        }

        let separator = node.first_token().lexeme.as_str();
        let mut element =
            Element { nodes: &children[start..i], separator: Some(separator), trailing: Vec::new() };

        i += 1;
        while let Some(comment) = children.get(i) {
            if comment.is_comment() && comment.first_token().newlines_before == 0 {
                element.trailing.push(comment.first_token());
                i += 1;
            } else {
                break;
            }
        }

        elements.push(element);
        start = i;
    }

    if start < children.len() {
        let mut nodes = &children[start..];
        let mut trailing = Vec::new();
        while let Some((last, rest)) = nodes.split_last() {
            if last.is_comment() && rest.iter().any(|n| !n.is_comment()) {
                trailing.insert(0, last.first_token());
                nodes = rest;
            } else {
                break;
            }
        }
        elements.push(Element { nodes, separator: None, trailing });
    }

    elements
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Object,
    Array,
    Arguments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sep {
    None,
    Space,
    Break,
}

/// Spacing decisions within one statement or list element
#[derive(Debug, Default)]
struct Spacing {
    ternary_depth: usize,
    generic_depth: usize,
    after_generic_open: bool,
    after_generic_close: bool,
    after_prefix: bool,
    after_postfix: bool,
    after_line_comment: bool,
}

impl Spacing {
    fn advance(&mut self, nodes: &[Node], i: usize) -> Result<Sep> {
        let node = &nodes[i];
        let prev = i.checked_sub(1).and_then(|p| nodes.get(p));
        let next = nodes.get(i + 1);

        let token = node.first_token();
        let punct = if token.typ == TokenType::Punct && node.as_token().is_some() {
            Some(token.lexeme.as_str())
        } else {
            None
        };
        // `a++` ends a value just like `a`
        let prev_is_value = self.after_postfix
            || i.checked_sub(1).is_some_and(|p| value_end_at(nodes, p, self.after_generic_close));

        if punct == Some("<") && !prev_is_value && next_starts_markup(next) {
            return Err(FormatError::Unsupported { what: "JSX".to_string(), pos: token.pos });
        }

        let generic_open = punct == Some("<")
            && !token.spaced
            && prev.is_some_and(|p| p.as_token().is_some_and(|t| t.typ == TokenType::Ident))
            && prev_is_value;
        let generic_close = punct == Some(">") && self.generic_depth > 0;
        let optional = punct == Some("?") && is_optional_marker(next);

        let sep = match prev {
            None => Sep::None,
            Some(_) if self.after_line_comment => Sep::Break,
            Some(prev) => {
                if self.space_before(prev, node, punct, prev_is_value, generic_open, optional) {
                    Sep::Space
                } else {
                    Sep::None
                }
            }
        };

        // State for the node after this one
        self.after_prefix = match punct {
            Some("!" | "~") => !(prev_is_value && !token.spaced),
            Some("+" | "-" | "++" | "--") => !prev_is_value,
            _ => false,
        };
        self.after_postfix = matches!(punct, Some("++" | "--")) && prev_is_value;
        if generic_open {
            self.generic_depth += 1;
        }
        if generic_close {
            self.generic_depth -= 1;
        }
        self.after_generic_open = generic_open;
        self.after_generic_close = generic_close;
        if punct == Some("?") && !optional {
            self.ternary_depth += 1;
        }
        self.after_line_comment = node.is_line_comment();

        Ok(sep)
    }

    fn space_before(
        &mut self,
        prev: &Node,
        node: &Node,
        punct: Option<&str>,
        prev_is_value: bool,
        generic_open: bool,
        optional: bool,
    ) -> bool {
        let p = prev.last_token();
        let token = node.first_token();

        if node.is_comment() {
            return true;
        }
        // `a + +b` and `- -x` must not fuse into `++`/`--`
        if prev.as_token().is_some_and(|t| t.typ == TokenType::Punct)
            && node.as_token().is_some_and(|t| t.typ == TokenType::Punct)
            && ((p.lexeme.ends_with('+') && token.lexeme.starts_with('+'))
                || (p.lexeme.ends_with('-') && token.lexeme.starts_with('-')))
        {
            return true;
        }
        if prev.as_token().is_some()
            && matches!(p.lexeme.as_str(), "..." | "@" | "#" | "." | "?.")
            && p.typ == TokenType::Punct
        {
            return false;
        }
        if self.after_prefix || self.after_generic_open {
            return false;
        }

        if let Some(group) = node.as_group() {
            return match group.delim {
                Delim::Paren => {
                    if self.after_generic_close || prev.as_group().is_some() {
                        false
                    } else if p.typ == TokenType::Ident {
                        !prev_is_value
                    } else {
                        true
                    }
                }
                Delim::Bracket => !prev_is_value,
                Delim::Brace => true,
            };
        }

        if let Some(punct) = punct {
            return match punct {
                "," | ";" | "." | "?." => false,
                ":" => {
                    if self.ternary_depth > 0 {
                        self.ternary_depth -= 1;
                        true
                    } else {
                        false
                    }
                }
                "?" => !optional,
                "++" | "--" => !prev_is_value,
                "!" => !(prev_is_value && !token.spaced),
                "<" => !generic_open,
                ">" if self.generic_depth > 0 => false,
                _ if punct.starts_with('>') && p.lexeme == ">" && !token.spaced => false,
                _ => true,
            };
        }

        // Tagged template
        !(token.typ == TokenType::Template && !token.spaced && prev_is_value)
    }
}

fn next_starts_markup(next: Option<&Node>) -> bool {
    match next {
        Some(Node::Token(token)) => {
            !token.spaced && (token.typ == TokenType::Ident || token.is_punct(">"))
        }
        _ => false,
    }
}

/// `name?: Type` or `(value?)` rather than a conditional
fn is_optional_marker(next: Option<&Node>) -> bool {
    match next {
        None => true,
        Some(node) => node.is_punct(":") || node.is_punct(",") || node.is_punct("="),
    }
}

/// Builds a layout document from a bracket tree
pub struct DocBuilder<'a> {
    options: &'a FormatOptions,
}

impl<'a> DocBuilder<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, nodes: &[Node]) -> Result<Doc> {
        self.statements(nodes, false)
    }

    fn statements(&self, nodes: &[Node], switch_body: bool) -> Result<Doc> {
        let mut parts = Vec::new();

        for (i, stmt) in split_statements(nodes).into_iter().enumerate() {
            let doc = self.inline(stmt, true)?;
            if i == 0 {
                parts.push(doc);
                continue;
            }

            let mut line = vec![Doc::HardLine];
            if stmt.first().is_some_and(|n| n.first_token().newlines_before >= 2) {
                line.push(Doc::HardLine);
            }
            line.push(doc);

            let line = Doc::concat(line);
            if switch_body && !is_case_label(stmt) {
                parts.push(Doc::indent(line));
            } else {
                parts.push(line);
            }
        }

        Ok(Doc::concat(parts))
    }

    /// Lay out a run of nodes that belong on one logical line
    fn inline(&self, nodes: &[Node], statement: bool) -> Result<Doc> {
        let mut parts = Vec::new();
        let mut chain_start: Option<usize> = None;
        let mut spacing = Spacing::default();

        for (i, node) in nodes.iter().enumerate() {
            let after_generic_close = spacing.after_generic_close;

            let sep = spacing.advance(nodes, i)?;
            let member_break = i > 0
                && node.first_token().newlines_before > 0
                && (node.is_punct(".") || node.is_punct("?."));

            if sep == Sep::Break || member_break {
                // The rest of the expression continues one level deeper
                chain_start.get_or_insert(parts.len());
                parts.push(Doc::HardLine);
            } else if sep == Sep::Space {
                parts.push(Doc::text(" "));
            }

            parts.push(self.node(nodes, i, statement, after_generic_close)?);
        }

        if let Some(start) = chain_start {
            let chain = parts.split_off(start);
            parts.push(Doc::indent(Doc::concat(chain)));
        }

        Ok(Doc::concat(parts))
    }

    fn node(
        &self,
        nodes: &[Node],
        i: usize,
        statement: bool,
        after_generic_close: bool,
    ) -> Result<Doc> {
        let group = match &nodes[i] {
            Node::Token(token) => return Ok(self.token(token)),
            Node::Group(group) => group,
        };

        let prev = i.checked_sub(1).and_then(|p| nodes.get(p));
        let next = nodes.get(i + 1);
        let prev_is_value =
            i.checked_sub(1).is_some_and(|p| value_end_at(nodes, p, after_generic_close));

        match group.delim {
            Delim::Brace => {
                if brace_is_block(nodes, i, statement) {
                    self.block(group, is_switch_body(nodes, i))
                } else {
                    self.list(group, ListKind::Object)
                }
            }
            Delim::Bracket => {
                if prev_is_value {
                    self.enclosed(group)
                } else {
                    self.list(group, ListKind::Array)
                }
            }
            Delim::Paren => {
                if next.is_some_and(|n| n.is_punct("=>")) {
                    if let Some(param) = self.bare_arrow_param(group) {
                        return Ok(Doc::text(param));
                    }
                    return self.list(group, ListKind::Arguments);
                }

                if prev_is_value {
                    return self.list(group, ListKind::Arguments);
                }

                match prev {
                    Some(Node::Token(t))
                        if t.typ == TokenType::Ident
                            && FUNCTION_KEYWORDS.contains(&t.lexeme.as_str()) =>
                    {
                        self.list(group, ListKind::Arguments)
                    }
                    _ => self.enclosed(group),
                }
            }
        }
    }

    fn token(&self, token: &Token) -> Doc {
        match token.typ {
            TokenType::String => Doc::text(self.normalize_quotes(&token.lexeme)),
            TokenType::LineComment => Doc::text(token.lexeme.trim_end()),
            TokenType::BlockComment if token.lexeme.contains('\n') => {
                let mut parts = Vec::new();
                for (i, line) in token.lexeme.lines().enumerate() {
                    if i == 0 {
                        parts.push(Doc::text(line.trim_end()));
                        continue;
                    }
                    parts.push(Doc::HardLine);
                    let line = line.trim();
                    if line.starts_with('*') {
                        parts.push(Doc::text(format!(" {}", line)));
                    } else {
                        parts.push(Doc::text(line));
                    }
                }
                Doc::concat(parts)
            }
            _ => Doc::text(token.lexeme.as_str()),
        }
    }

    /// Parentheses or brackets printed exactly around their contents
    fn enclosed(&self, group: &Group) -> Result<Doc> {
        Ok(Doc::concat(vec![
            Doc::text(group.delim.open()),
            self.inline(&group.children, false)?,
            Doc::text(group.delim.close()),
        ]))
    }

    fn block(&self, group: &Group, switch_body: bool) -> Result<Doc> {
        if group.children.is_empty() {
            return Ok(Doc::text("{}"));
        }

        Ok(Doc::concat(vec![
            Doc::text("{"),
            Doc::indent(Doc::concat(vec![
                Doc::HardLine,
                self.statements(&group.children, switch_body)?,
            ])),
            Doc::HardLine,
            Doc::text("}"),
        ]))
    }

    fn list(&self, group: &Group, kind: ListKind) -> Result<Doc> {
        let open = group.delim.open();
        let close = group.delim.close();
        let elements = split_elements(&group.children);

        if elements.is_empty() {
            return Ok(Doc::text(format!("{}{}", open, close)));
        }

        let docs =
            elements.iter().map(|e| self.inline(e.nodes, false)).collect::<Result<Vec<_>>>()?;
        let last = elements.len() - 1;

        if kind == ListKind::Arguments && self.should_hug(&elements, &docs) {
            let mut parts = vec![Doc::text(open)];
            for (i, (element, doc)) in elements.iter().zip(docs).enumerate() {
                parts.push(doc);
                if i < last {
                    parts.push(Doc::text(element.separator.unwrap_or(",")));
                    parts.push(Doc::text(" "));
                }
            }
            parts.push(Doc::text(close));
            return Ok(Doc::concat(parts));
        }

        let dominant = elements.iter().find_map(|e| e.separator).unwrap_or(",");
        let padding = if kind == ListKind::Object && self.options.bracket_spacing {
            Doc::Line
        } else {
            Doc::SoftLine
        };

        let mut body = vec![padding.clone()];
        for (i, (element, doc)) in elements.iter().zip(docs).enumerate() {
            if i > 0 {
                body.push(Doc::Line);
                let blank_before =
                    element.nodes.first().is_some_and(|n| n.first_token().newlines_before >= 2);
                if blank_before {
                    body.push(Doc::if_break(Doc::SoftLine));
                }
            }

            body.push(doc);

            if i < last {
                body.push(Doc::text(element.separator.unwrap_or(",")));
            } else if let Some(hole) = element.separator.filter(|_| !element.has_code()) {
                // `[a, ,]` ends in a hole that only its comma keeps
                body.push(Doc::text(hole));
            } else if let Some(trailing) = self.trailing_separator(element, dominant) {
                body.push(Doc::if_break(Doc::text(trailing)));
            }

            for comment in &element.trailing {
                body.push(Doc::text(" "));
                body.push(self.token(comment));
                if comment.typ == TokenType::LineComment {
                    body.push(Doc::BreakParent);
                }
            }
        }

        Ok(Doc::group(Doc::concat(vec![
            Doc::text(open),
            Doc::indent(Doc::concat(body)),
            padding,
            Doc::text(close),
        ])))
    }

    /// `fn(a, b => { ... })` and `fn({ ... })` keep the brackets on the call line
    fn should_hug(&self, elements: &[Element<'_>], docs: &[Doc]) -> bool {
        if elements.iter().any(|e| !e.trailing.is_empty()) {
            return false;
        }

        let Some((last, rest)) = docs.split_last() else {
            return false;
        };
        if last.has_hard_break() && rest.iter().all(|d| !d.has_hard_break()) {
            return true;
        }

        match elements {
            [only] => {
                only.nodes.len() == 1
                    && (only.nodes[0].is_group(Delim::Brace)
                        || only.nodes[0].is_group(Delim::Bracket))
            }
            _ => false,
        }
    }

    fn trailing_separator(&self, element: &Element<'_>, dominant: &str) -> Option<&'static str> {
        if !element.has_code() {
            return None;
        }
        if dominant == ";" {
            return Some(";");
        }
        if self.options.trailing_commas == TrailingCommas::None {
            return None;
        }
        // A rest element must stay last
        if element.nodes.first().is_some_and(|n| n.is_punct("...")) {
            return None;
        }
        Some(",")
    }

    fn bare_arrow_param<'g>(&self, group: &'g Group) -> Option<&'g str> {
        if self.options.arrow_parens != ArrowParens::Avoid {
            return None;
        }
        match group.children.as_slice() {
            [Node::Token(token)] if token.typ == TokenType::Ident && !is_keyword(&token.lexeme) => {
                Some(token.lexeme.as_str())
            }
            _ => None,
        }
    }

    /// Re-quote a string literal with the preferred quote unless that
    /// would need more escapes
    fn normalize_quotes(&self, lexeme: &str) -> String {
        let Some(quote) = lexeme.chars().next() else {
            return lexeme.to_string();
        };
        if lexeme.len() < 2 || !lexeme.ends_with(quote) {
            return lexeme.to_string();
        }

        let body = &lexeme[1..lexeme.len() - 1];
        let preferred = self.options.quote_style.preferred();
        let alternate = self.options.quote_style.alternate();

        let (mut preferred_count, mut alternate_count) = (0usize, 0usize);
        let mut chars = body.chars();
        while let Some(ch) = chars.next() {
            let ch = if ch == '\\' { chars.next().unwrap_or('\\') } else { ch };
            if ch == preferred {
                preferred_count += 1;
            } else if ch == alternate {
                alternate_count += 1;
            }
        }

        let enclosing = if preferred_count > alternate_count { alternate } else { preferred };
        if enclosing == quote {
            return lexeme.to_string();
        }

        let mut out = String::with_capacity(lexeme.len() + 2);
        out.push(enclosing);
        let mut chars = body.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some(q) if q == quote => out.push(q),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => out.push('\\'),
                },
                c if c == enclosing => {
                    out.push('\\');
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        out.push(enclosing);
        out
    }
}
