use crate::error::FormatError;
use crate::script::lexer::{Token, TokenType};
use crate::script::MAX_NESTING;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Bracket,
    Brace,
}

impl Delim {
    fn from_open(lexeme: &str) -> Option<Self> {
        match lexeme {
            "(" => Some(Delim::Paren),
            "[" => Some(Delim::Bracket),
            "{" => Some(Delim::Brace),
            _ => None,
        }
    }

    fn from_close(lexeme: &str) -> Option<Self> {
        match lexeme {
            ")" => Some(Delim::Paren),
            "]" => Some(Delim::Bracket),
            "}" => Some(Delim::Brace),
            _ => None,
        }
    }

    pub fn open(&self) -> &'static str {
        match self {
            Delim::Paren => "(",
            Delim::Bracket => "[",
            Delim::Brace => "{",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Delim::Paren => ")",
            Delim::Bracket => "]",
            Delim::Brace => "}",
        }
    }
}

/// A balanced bracket pair and everything between
#[derive(Debug, Clone)]
pub struct Group {
    pub delim: Delim,
    pub open: Token,
    pub close: Token,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub enum Node {
    Token(Token),
    Group(Group),
}

impl Node {
    /// The first token in source order (the opener for a group)
    pub fn first_token(&self) -> &Token {
        match self {
            Node::Token(token) => token,
            Node::Group(group) => &group.open,
        }
    }

    /// The last token in source order (the closer for a group)
    pub fn last_token(&self) -> &Token {
        match self {
            Node::Token(token) => token,
            Node::Group(group) => &group.close,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(token) => Some(token),
            Node::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            Node::Token(_) => None,
        }
    }

    pub fn is_punct(&self, lexeme: &str) -> bool {
        self.as_token().is_some_and(|t| t.is_punct(lexeme))
    }

    pub fn is_ident(&self, lexeme: &str) -> bool {
        self.as_token().is_some_and(|t| t.is_ident(lexeme))
    }

    pub fn is_group(&self, delim: Delim) -> bool {
        self.as_group().is_some_and(|g| g.delim == delim)
    }

    pub fn is_line_comment(&self) -> bool {
        self.as_token().is_some_and(|t| t.typ == TokenType::LineComment)
    }

    pub fn is_comment(&self) -> bool {
        self.as_token().is_some_and(|t| t.is_comment())
    }
}

/// Nest a flat token stream into bracket groups
pub fn build_tree(tokens: Vec<Token>) -> Result<Vec<Node>, FormatError> {
    let mut stack: Vec<(Token, Vec<Node>)> = Vec::new();
    let mut nodes: Vec<Node> = Vec::new();

    for token in tokens {
        if token.typ == TokenType::Eof {
            break;
        }

        if token.typ == TokenType::Punct {
            if Delim::from_open(&token.lexeme).is_some() {
                if stack.len() >= MAX_NESTING {
                    return Err(FormatError::TooDeep { limit: MAX_NESTING, pos: token.pos });
                }
                stack.push((token, std::mem::take(&mut nodes)));
                continue;
            }

            if let Some(delim) = Delim::from_close(&token.lexeme) {
                let Some((open, outer)) = stack.pop() else {
                    return Err(FormatError::UnexpectedClose {
                        found: token.lexeme.clone(),
                        pos: token.pos,
                    });
                };

                if Delim::from_open(&open.lexeme) != Some(delim) {
                    let expected =
                        Delim::from_open(&open.lexeme).map(|d| d.close()).unwrap_or("?");
                    return Err(FormatError::MismatchedBracket {
                        expected: expected.to_string(),
                        found: token.lexeme.clone(),
                        pos: token.pos,
                    });
                }

                let children = std::mem::replace(&mut nodes, outer);
                nodes.push(Node::Group(Group { delim, open, close: token, children }));
                continue;
            }
        }

        nodes.push(Node::Token(token));
    }

    if let Some((open, _)) = stack.pop() {
        return Err(FormatError::UnclosedBracket { open: open.lexeme, pos: open.pos });
    }

    Ok(nodes)
}
