use crate::error::{FormatError, Position};
use crate::script::MAX_NESTING;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Ident,
    Number,
    String,
    Template,
    Regex,
    Punct,
    LineComment,
    BlockComment,
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub typ: TokenType,
    pub lexeme: String,
    pub pos: Position,
    /// Line breaks between the previous token and this one
    pub newlines_before: usize,
    /// Whether any whitespace separated this token from the previous one
    pub spaced: bool,
}

impl Token {
    pub fn is_punct(&self, lexeme: &str) -> bool {
        self.typ == TokenType::Punct && self.lexeme == lexeme
    }

    pub fn is_ident(&self, lexeme: &str) -> bool {
        self.typ == TokenType::Ident && self.lexeme == lexeme
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.typ, TokenType::LineComment | TokenType::BlockComment)
    }
}

// Longest first. '>' is deliberately never merged with a following '>' so
// that nested generic closers stay separate tokens.
const PUNCTUATORS: &[&str] = &[
    "...", "===", "!==", "**=", "&&=", "||=", "??=", "<<=", "=>", "==", "!=", "<=", ">=", "&&",
    "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "**", "<<", "{",
    "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*", "/", "%", "&", "|", "^", "!", "~",
    "?", ":", "=", ".", "@", "#",
];

// After these keywords a '/' starts a regular expression, not a division
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

// A ')' closing the header of one of these is followed by a statement
const HEADER_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

pub struct Lexer {
    input: Vec<char>,
    current: usize,
    offset: usize,
    line: usize,
    column: usize,
    template_depth: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            current: 0,
            offset: 0,
            line: 1,
            column: 1,
            template_depth: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, FormatError> {
        let mut tokens: Vec<Token> = Vec::new();
        // One entry per open '(': does it hold a control header?
        let mut parens: Vec<bool> = Vec::new();
        let mut after_header = false;

        loop {
            let (newlines_before, spaced) = self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token {
                    typ: TokenType::Eof,
                    lexeme: String::new(),
                    pos: self.current_position(),
                    newlines_before,
                    spaced,
                });
                break;
            }

            let mut significant = tokens.iter().rev().filter(|t| !t.is_comment());
            let prev = significant.next();
            let property = is_property(prev, significant.next());

            let regex_allowed = after_header || regex_allowed(prev, property);
            let pos = self.current_position();
            let start = self.current;
            let typ = self.next_token(regex_allowed)?;
            let lexeme = self.slice(start, self.current);

            if !matches!(typ, TokenType::LineComment | TokenType::BlockComment) {
                after_header = false;
                if typ == TokenType::Punct && lexeme == "(" {
                    let header = !property
                        && prev.is_some_and(|t| {
                            t.typ == TokenType::Ident
                                && HEADER_KEYWORDS.contains(&t.lexeme.as_str())
                        });
                    parens.push(header);
                } else if typ == TokenType::Punct && lexeme == ")" {
                    after_header = parens.pop().unwrap_or(false);
                }
            }

            tokens.push(Token { typ, lexeme, pos, newlines_before, spaced });
        }

        Ok(tokens)
    }

    fn next_token(&mut self, regex_allowed: bool) -> Result<TokenType, FormatError> {
        let pos = self.current_position();
        let Some(ch) = self.current_char() else {
            return Ok(TokenType::Eof);
        };

        match ch {
            '"' | '\'' => {
                self.scan_string(ch)?;
                Ok(TokenType::String)
            }
            '`' => {
                self.scan_template()?;
                Ok(TokenType::Template)
            }
            '/' if self.peek() == Some('/') => {
                self.scan_line_comment();
                Ok(TokenType::LineComment)
            }
            '/' if self.peek() == Some('*') => {
                self.scan_block_comment()?;
                Ok(TokenType::BlockComment)
            }
            '/' if regex_allowed => {
                self.scan_regex()?;
                Ok(TokenType::Regex)
            }
            _ if ch.is_ascii_digit()
                || (ch == '.' && self.peek().is_some_and(|c| c.is_ascii_digit())) =>
            {
                self.scan_number();
                Ok(TokenType::Number)
            }
            _ if is_ident_start(ch) => {
                self.advance();
                while self.current_char().is_some_and(is_ident_char) {
                    self.advance();
                }
                Ok(TokenType::Ident)
            }
            _ => self.scan_punct(ch, pos),
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<(), FormatError> {
        let pos = self.current_position();
        self.advance(); // Skip opening quote

        loop {
            match self.current_char() {
                None | Some('\n') => return Err(FormatError::UnterminatedString { pos }),
                Some('\\') => {
                    self.advance();
                    if self.is_at_end() {
                        return Err(FormatError::UnterminatedString { pos });
                    }
                    self.advance();
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn scan_template(&mut self) -> Result<(), FormatError> {
        let pos = self.current_position();
        if self.template_depth >= MAX_NESTING {
            return Err(FormatError::TooDeep { limit: MAX_NESTING, pos });
        }

        self.template_depth += 1;
        let result = self.scan_template_body(pos);
        self.template_depth -= 1;
        result
    }

    fn scan_template_body(&mut self, pos: Position) -> Result<(), FormatError> {
        self.advance(); // Skip opening '`'

        loop {
            match self.current_char() {
                None => return Err(FormatError::UnterminatedTemplate { pos }),
                Some('\\') => {
                    self.advance();
                    if self.is_at_end() {
                        return Err(FormatError::UnterminatedTemplate { pos });
                    }
                    self.advance();
                }
                Some('`') => {
                    self.advance();
                    return Ok(());
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    self.advance();
                    self.scan_substitution(pos)?;
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Skip the body of `${ ... }` up to and including its closing brace
    fn scan_substitution(&mut self, template_pos: Position) -> Result<(), FormatError> {
        let mut depth = 1usize;

        while depth > 0 {
            match self.current_char() {
                None => return Err(FormatError::UnterminatedTemplate { pos: template_pos }),
                Some('{') => {
                    depth += 1;
                    self.advance();
                }
                Some('}') => {
                    depth -= 1;
                    self.advance();
                }
                Some(q @ ('"' | '\'')) => self.scan_string(q)?,
                Some('`') => self.scan_template()?,
                Some(_) => self.advance(),
            }
        }

        Ok(())
    }

    fn scan_line_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn scan_block_comment(&mut self) -> Result<(), FormatError> {
        let pos = self.current_position();
        self.advance();
        self.advance(); // Skip "/*"

        loop {
            match self.current_char() {
                None => return Err(FormatError::UnterminatedComment { pos }),
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn scan_regex(&mut self) -> Result<(), FormatError> {
        let pos = self.current_position();
        self.advance(); // Skip opening '/'

        let mut in_class = false;
        loop {
            match self.current_char() {
                None | Some('\n') => return Err(FormatError::UnterminatedRegex { pos }),
                Some('\\') => {
                    self.advance();
                    if self.is_at_end() {
                        return Err(FormatError::UnterminatedRegex { pos });
                    }
                    self.advance();
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        // Flags
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }

        Ok(())
    }

    fn scan_number(&mut self) {
        let hex = self.current_char() == Some('0')
            && matches!(self.peek(), Some('x' | 'X' | 'b' | 'B' | 'o' | 'O'));

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                self.advance();
            } else if (ch == '+' || ch == '-')
                && !hex
                && matches!(self.previous_char(), Some('e' | 'E'))
            {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_punct(&mut self, ch: char, pos: Position) -> Result<TokenType, FormatError> {
        let rest = self.slice(self.current, (self.current + 3).min(self.input.len()));

        let matched = PUNCTUATORS.iter().find(|p| rest.starts_with(*p)).copied();
        let matched = match matched {
            // `a?.5:1` is a conditional, not optional chaining
            Some("?.") if self.input.get(self.current + 2).is_some_and(|c| c.is_ascii_digit()) => {
                Some("?")
            }
            other => other,
        };

        match matched {
            Some(p) => {
                for _ in 0..p.chars().count() {
                    self.advance();
                }
                Ok(TokenType::Punct)
            }
            None => Err(FormatError::UnexpectedChar { ch, pos }),
        }
    }

    /// Returns (line breaks skipped, whether anything was skipped)
    fn skip_whitespace(&mut self) -> (usize, bool) {
        let mut newlines = 0;
        let mut spaced = false;

        while let Some(ch) = self.current_char() {
            if !ch.is_whitespace() {
                break;
            }
            if ch == '\n' {
                newlines += 1;
            }
            spaced = true;
            self.advance();
        }

        (newlines, spaced)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input.get(start..end).map(|chars| chars.iter().collect()).unwrap_or_default()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.current).copied()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.current + 1).copied()
    }

    fn previous_char(&self) -> Option<char> {
        self.current.checked_sub(1).and_then(|i| self.input.get(i)).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.current += 1;
            self.offset += ch.len_utf8();

            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn current_position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// `obj.delete` names a property, not the operator
fn is_property(prev: Option<&Token>, before: Option<&Token>) -> bool {
    prev.is_some_and(|t| t.typ == TokenType::Ident)
        && before.is_some_and(|t| t.is_punct(".") || t.is_punct("?."))
}

fn regex_allowed(prev: Option<&Token>, property: bool) -> bool {
    match prev {
        None => true,
        Some(token) => match token.typ {
            TokenType::Ident => {
                !property && REGEX_PREFIX_KEYWORDS.contains(&token.lexeme.as_str())
            }
            TokenType::Punct => !matches!(token.lexeme.as_str(), ")" | "]" | "}" | "++" | "--"),
            TokenType::Number | TokenType::String | TokenType::Template | TokenType::Regex => false,
            _ => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    fn kinds(input: &str) -> Vec<(TokenType, String)> {
        lex(input).into_iter().map(|t| (t.typ, t.lexeme)).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].typ, TokenType::Eof);
    }

    #[test]
    fn test_longest_punctuator_wins() {
        let tokens = lex("a === b ?? c?.d");
        let puncts: Vec<_> =
            tokens.iter().filter(|t| t.typ == TokenType::Punct).map(|t| t.lexeme.as_str()).collect();
        assert_eq!(puncts, vec!["===", "??", "?."]);
    }

    #[test]
    fn test_closing_angles_stay_separate() {
        let tokens = lex("Map<K, Array<V>>");
        let closers = tokens.iter().filter(|t| t.is_punct(">")).count();
        assert_eq!(closers, 2);
        assert!(!tokens[8].spaced);
    }

    #[test]
    fn test_strings_keep_their_quotes() {
        assert_eq!(kinds("'it\\'s'")[0], (TokenType::String, "'it\\'s'".to_string()));
        assert_eq!(kinds("\"hi\"")[0], (TokenType::String, "\"hi\"".to_string()));
    }

    #[test]
    fn test_template_with_nested_substitution() {
        let tokens = lex("`a ${ {x: `b${c}`}.x } d` + 1");
        assert_eq!(tokens[0].typ, TokenType::Template);
        assert_eq!(tokens[0].lexeme, "`a ${ {x: `b${c}`}.x } d`");
        assert!(tokens[1].is_punct("+"));
    }

    #[test]
    fn test_regex_versus_division() {
        let tokens = lex("x = a / b / c");
        assert!(tokens.iter().all(|t| t.typ != TokenType::Regex));

        let tokens = lex("const re = /ab+c[/]/gi;");
        assert_eq!(tokens[3].typ, TokenType::Regex);
        assert_eq!(tokens[3].lexeme, "/ab+c[/]/gi");
    }

    #[test]
    fn test_regex_after_control_header() {
        let tokens = lex("if (x) /foo/.test(y)");
        assert_eq!(tokens[4].typ, TokenType::Regex);
        assert_eq!(tokens[4].lexeme, "/foo/");

        let tokens = lex("while ((a)) /b/.exec(c)");
        assert!(tokens.iter().any(|t| t.typ == TokenType::Regex && t.lexeme == "/b/"));

        // Calls and member names stay divisions
        let tokens = lex("f(x) / 2; a.if(b) / c; obj.delete / 2");
        assert!(tokens.iter().all(|t| t.typ != TokenType::Regex));
    }

    #[test]
    fn test_template_nesting_limit() {
        let mut deep = String::from("1");
        for _ in 0..200 {
            deep = format!("`${{{}}}`", deep);
        }
        assert!(matches!(Lexer::new(&deep).tokenize(), Err(FormatError::TooDeep { .. })));
    }

    #[test]
    fn test_comments() {
        let tokens = lex("// note  \n/* block */ x");
        assert_eq!(tokens[0].typ, TokenType::LineComment);
        assert_eq!(tokens[0].lexeme, "// note  ");
        assert_eq!(tokens[1].typ, TokenType::BlockComment);
        assert_eq!(tokens[1].newlines_before, 1);
        assert_eq!(tokens[2].lexeme, "x");
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("1.5e-3 0xFF 10n .5");
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|t| t.typ == TokenType::Number)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(numbers, vec!["1.5e-3", "0xFF", "10n", ".5"]);
    }

    #[test]
    fn test_newline_tracking() {
        let tokens = lex("a\n\n\nb c");
        assert_eq!(tokens[1].newlines_before, 3);
        assert_eq!(tokens[2].newlines_before, 0);
        assert!(tokens[2].spaced);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Lexer::new("'open").tokenize(),
            Err(FormatError::UnterminatedString { .. })
        ));
        assert!(matches!(
            Lexer::new("`open").tokenize(),
            Err(FormatError::UnterminatedTemplate { .. })
        ));
        assert!(matches!(
            Lexer::new("/* open").tokenize(),
            Err(FormatError::UnterminatedComment { .. })
        ));
        assert!(matches!(
            Lexer::new("x = /open").tokenize(),
            Err(FormatError::UnterminatedRegex { .. })
        ));
        assert!(matches!(
            Lexer::new("a \\ b").tokenize(),
            Err(FormatError::UnexpectedChar { ch: '\\', .. })
        ));
    }
}
