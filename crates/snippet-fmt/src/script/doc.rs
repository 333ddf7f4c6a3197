//! Width-aware layout documents and their printer

/// A layout document. Groups print on one line when they fit the
/// remaining width, otherwise their lines break.
#[derive(Debug, Clone)]
pub enum Doc {
    Nil,
    Text(String),
    /// A space when flat, a newline when broken
    Line,
    /// Nothing when flat, a newline when broken
    SoftLine,
    /// Always a newline
    HardLine,
    /// Forces the enclosing group to break, prints nothing
    BreakParent,
    Indent(Box<Doc>),
    Group { contents: Box<Doc>, breaks: bool },
    /// Printed only when the enclosing group is broken
    IfBreak(Box<Doc>),
    Concat(Vec<Doc>),
}

impl Doc {
    pub fn text(s: impl Into<String>) -> Doc {
        Doc::Text(s.into())
    }

    pub fn concat(parts: Vec<Doc>) -> Doc {
        Doc::Concat(parts)
    }

    pub fn indent(doc: Doc) -> Doc {
        Doc::Indent(Box::new(doc))
    }

    pub fn group(doc: Doc) -> Doc {
        let breaks = doc.has_hard_break();
        Doc::Group { contents: Box::new(doc), breaks }
    }

    pub fn if_break(doc: Doc) -> Doc {
        Doc::IfBreak(Box::new(doc))
    }

    /// Whether printing this document always produces a line break
    pub fn has_hard_break(&self) -> bool {
        match self {
            Doc::HardLine | Doc::BreakParent => true,
            Doc::Text(s) => s.contains('\n'),
            Doc::Indent(inner) => inner.has_hard_break(),
            Doc::Group { breaks, .. } => *breaks,
            Doc::Concat(parts) => parts.iter().any(Doc::has_hard_break),
            Doc::Nil | Doc::Line | Doc::SoftLine | Doc::IfBreak(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

pub struct Printer {
    width: usize,
    indent_width: usize,
}

impl Printer {
    pub fn new(width: usize, indent_width: usize) -> Self {
        Self { width, indent_width }
    }

    pub fn print(&self, doc: &Doc) -> String {
        let mut out = String::new();
        let mut column = 0usize;
        let mut stack: Vec<(usize, Mode, &Doc)> = vec![(0, Mode::Break, doc)];

        while let Some((indent, mode, doc)) = stack.pop() {
            match doc {
                Doc::Nil | Doc::BreakParent => {}
                Doc::Text(s) => {
                    out.push_str(s);
                    column = match s.rfind('\n') {
                        Some(i) => s[i + 1..].chars().count(),
                        None => column + s.chars().count(),
                    };
                }
                Doc::Concat(parts) => {
                    for part in parts.iter().rev() {
                        stack.push((indent, mode, part));
                    }
                }
                Doc::Indent(inner) => stack.push((indent + self.indent_width, mode, inner)),
                Doc::Group { contents, breaks } => {
                    let next = if mode == Mode::Flat {
                        Mode::Flat
                    } else if !*breaks && self.fits(contents, &stack, self.remaining(column)) {
                        Mode::Flat
                    } else {
                        Mode::Break
                    };
                    stack.push((indent, next, contents));
                }
                Doc::IfBreak(inner) => {
                    if mode == Mode::Break {
                        stack.push((indent, mode, inner));
                    }
                }
                Doc::Line | Doc::SoftLine | Doc::HardLine => {
                    let broken = matches!(doc, Doc::HardLine) || mode == Mode::Break;
                    if broken {
                        let trimmed = out.trim_end_matches(' ').len();
                        out.truncate(trimmed);
                        out.push('\n');
                        out.push_str(&" ".repeat(indent));
                        column = indent;
                    } else if matches!(doc, Doc::Line) {
                        out.push(' ');
                        column += 1;
                    }
                }
            }
        }

        out.trim_end().to_string()
    }

    fn remaining(&self, column: usize) -> isize {
        self.width as isize - column as isize
    }

    /// Would `doc` printed flat, followed by the pending commands up to
    /// their next line break, stay within `remaining` columns?
    fn fits(&self, doc: &Doc, rest: &[(usize, Mode, &Doc)], mut remaining: isize) -> bool {
        let mut rest_idx = rest.len();
        let mut stack: Vec<(Mode, &Doc)> = vec![(Mode::Flat, doc)];

        loop {
            if remaining < 0 {
                return false;
            }

            let (mode, doc) = match stack.pop() {
                Some(item) => item,
                None => {
                    if rest_idx == 0 {
                        return true;
                    }
                    rest_idx -= 1;
                    let (_, mode, doc) = rest[rest_idx];
                    (mode, doc)
                }
            };

            match doc {
                Doc::Nil | Doc::BreakParent => {}
                Doc::Text(s) => match s.find('\n') {
                    Some(i) => return remaining >= s[..i].chars().count() as isize,
                    None => remaining -= s.chars().count() as isize,
                },
                Doc::Concat(parts) => {
                    for part in parts.iter().rev() {
                        stack.push((mode, part));
                    }
                }
                Doc::Indent(inner) => stack.push((mode, inner)),
                Doc::Group { contents, breaks } => {
                    let mode = if *breaks { Mode::Break } else { mode };
                    stack.push((mode, contents));
                }
                Doc::IfBreak(inner) => {
                    if mode == Mode::Break {
                        stack.push((mode, inner));
                    }
                }
                Doc::Line => {
                    if mode == Mode::Break {
                        return true;
                    }
                    remaining -= 1;
                }
                Doc::SoftLine => {
                    if mode == Mode::Break {
                        return true;
                    }
                }
                Doc::HardLine => return true,
            }
        }
    }
}
