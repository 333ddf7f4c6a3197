//! A pretty-printer for JavaScript and TypeScript snippets.
//!
//! Source is lexed, nested into bracket groups, laid out as a [`doc::Doc`]
//! and printed to the configured width. Anything the layout rules do not
//! understand (JSX, unbalanced brackets, unterminated literals) is an error,
//! which the caller turns into "keep the original".

pub mod builder;
pub mod doc;
pub mod lexer;
pub mod tree;

use crate::error::Result;
use crate::formatter::StructuredEngine;
use crate::language::Language;
use crate::options::FormatOptions;

use builder::DocBuilder;
use doc::Printer;
use lexer::Lexer;
use tree::build_tree;

/// Deepest bracket or template nesting the layout rules will recurse into
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, Copy)]
pub struct ScriptEngine {
    language: Language,
}

impl ScriptEngine {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl StructuredEngine for ScriptEngine {
    fn name(&self) -> &'static str {
        self.language.as_str()
    }

    fn format(&self, text: &str, options: &FormatOptions) -> Result<String> {
        let tokens = Lexer::new(text).tokenize()?;
        let nodes = build_tree(tokens)?;
        let doc = DocBuilder::new(options).build(&nodes)?;
        Ok(Printer::new(options.line_width, options.indent_width).print(&doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::options::{ArrowParens, QuoteStyle, TrailingCommas};

    fn js(input: &str) -> String {
        ScriptEngine::new(Language::JavaScript).format(input, &FormatOptions::default()).unwrap()
    }

    fn ts(input: &str) -> String {
        ScriptEngine::new(Language::TypeScript).format(input, &FormatOptions::default()).unwrap()
    }

    #[test]
    fn test_prefers_single_quotes() {
        assert_eq!(js(r#"const greeting = "hello";"#), "const greeting = 'hello';");
    }

    #[test]
    fn test_keeps_quotes_that_avoid_escapes() {
        assert_eq!(js(r#"const s = "it's";"#), r#"const s = "it's";"#);
        assert_eq!(js(r"const s = 'it\'s';"), r#"const s = "it's";"#);
    }

    #[test]
    fn test_double_quote_style() {
        let options = FormatOptions { quote_style: QuoteStyle::Double, ..Default::default() };
        let out = ScriptEngine::new(Language::JavaScript).format("f('x')", &options).unwrap();
        assert_eq!(out, r#"f("x")"#);
    }

    #[test]
    fn test_arrow_parens() {
        assert_eq!(js("const add = (a) => a + 1;"), "const add = a => a + 1;");
        assert_eq!(js("const add = (a, b) => a + b;"), "const add = (a, b) => a + b;");

        let options = FormatOptions { arrow_parens: ArrowParens::Always, ..Default::default() };
        let out = ScriptEngine::new(Language::JavaScript)
            .format("const id = (a) => a;", &options)
            .unwrap();
        assert_eq!(out, "const id = (a) => a;");
    }

    #[test]
    fn test_object_spacing() {
        assert_eq!(js("const o = {a:1,b:2}"), "const o = { a: 1, b: 2 }");
    }

    #[test]
    fn test_long_object_breaks_with_trailing_commas() {
        let input = r#"const config = {entry: "./src/index.js", output: {path: "dist", filename: "bundle.js"}, mode: "production"};"#;
        let expected = "const config = {
  entry: './src/index.js',
  output: { path: 'dist', filename: 'bundle.js' },
  mode: 'production',
};";
        assert_eq!(js(input), expected);
    }

    #[test]
    fn test_no_trailing_commas() {
        let options = FormatOptions {
            trailing_commas: TrailingCommas::None,
            line_width: 20,
            ..Default::default()
        };
        let out = ScriptEngine::new(Language::JavaScript)
            .format("const list = [alpha, beta, gamma];", &options)
            .unwrap();
        assert_eq!(out, "const list = [\n  alpha,\n  beta,\n  gamma\n];");
    }

    #[test]
    fn test_function_body() {
        assert_eq!(
            js(r#"function greet(name){return "Hi " + name}"#),
            "function greet(name) {\n  return 'Hi ' + name\n}"
        );
    }

    #[test]
    fn test_callback_hugs_call() {
        assert_eq!(
            js("items.forEach((item) => { console.log(item); });"),
            "items.forEach(item => {\n  console.log(item);\n});"
        );
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            js("if (ready) { start() } else { wait() }"),
            "if (ready) {\n  start()\n} else {\n  wait()\n}"
        );
    }

    #[test]
    fn test_switch_cases() {
        let input = "switch (x) {\ncase 1:\nfoo();\nbreak;\ndefault:\nbar();\n}";
        let expected = "switch (x) {\n  case 1:\n    foo();\n    break;\n  default:\n    bar();\n}";
        assert_eq!(js(input), expected);
    }

    #[test]
    fn test_class() {
        let input = "class Greeter { constructor(name) { this.name = name; } greet() { return this.name; } }";
        let expected = "class Greeter {
  constructor(name) {
    this.name = name;
  }
  greet() {
    return this.name;
  }
}";
        assert_eq!(js(input), expected);
    }

    #[test]
    fn test_export_default_object() {
        let input = r#"export default {name: "app", data() { return {count: 0} }}"#;
        let expected = "export default {
  name: 'app',
  data() {
    return { count: 0 }
  },
}";
        assert_eq!(js(input), expected);
    }

    #[test]
    fn test_import_specifiers() {
        assert_eq!(
            js(r#"import {useState,useEffect} from "react";"#),
            "import { useState, useEffect } from 'react';"
        );
    }

    #[test]
    fn test_comments_survive() {
        let input = "// setup\nconst a = 1; // one\n\n/* two */\nconst b = 2;";
        assert_eq!(js(input), "// setup\nconst a = 1; // one\n\n/* two */\nconst b = 2;");
    }

    #[test]
    fn test_blank_lines_collapse_to_one() {
        assert_eq!(js("a();\n\n\n\nb();"), "a();\n\nb();");
    }

    #[test]
    fn test_member_chain_keeps_breaks() {
        assert_eq!(js("promise\n.then(a)\n.catch(b);"), "promise\n  .then(a)\n  .catch(b);");
    }

    #[test]
    fn test_operators_and_unary() {
        assert_eq!(js("x=-1;y=!a&&b;i++"), "x = -1;\ny = !a && b;\ni++");
        assert_eq!(js("const t = a?b:c"), "const t = a ? b : c");
    }

    #[test]
    fn test_signs_never_fuse() {
        assert_eq!(js("x = a++ + +b;"), "x = a++ + +b;");
        assert_eq!(js("y = a-- - -b;"), "y = a-- - -b;");
        assert_eq!(js("z = - -c;"), "z = - -c;");
        assert_eq!(js("w = a + ++b;"), "w = a + ++b;");
    }

    #[test]
    fn test_array_holes_are_kept() {
        assert_eq!(js("const holes = [a, ,];"), "const holes = [a, ,];");
        assert_eq!(js("const sparse = [, a, , b];"), "const sparse = [, a, , b];");
    }

    #[test]
    fn test_keyword_member_names_are_calls() {
        assert_eq!(
            js("fetch(url).catch(err => console.error(err));"),
            "fetch(url).catch(err => console.error(err));"
        );
        assert_eq!(
            js("cache.delete(key);\nconst b = a.new(c);"),
            "cache.delete(key);\nconst b = a.new(c);"
        );
    }

    #[test]
    fn test_regex_after_control_header() {
        assert_eq!(js("if (x) /foo/.test(y);"), "if (x) /foo/.test(y);");
    }

    #[test]
    fn test_line_breaks_after_bang_and_async_are_kept() {
        assert_eq!(ts("const x = foo!\nbar()"), "const x = foo!\nbar()");
        assert_eq!(js("async\nfunction f() {}"), "async\nfunction f() {}");
    }

    #[test]
    fn test_comment_inside_expression_indents_the_rest() {
        assert_eq!(js("const s = 'a' + // tail\n'b';"), "const s = 'a' + // tail\n  'b';");
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let input = format!("x = {}1{}", "[".repeat(500), "]".repeat(500));
        let err = ScriptEngine::new(Language::JavaScript)
            .format(&input, &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormatError::TooDeep { limit: MAX_NESTING, .. }));
    }

    #[test]
    fn test_typescript_annotations() {
        assert_eq!(
            ts("function f(a?:string, b:Array<number>):void {}"),
            "function f(a?: string, b: Array<number>): void {}"
        );
        assert_eq!(
            ts("const m = new Map<string, Array<number>>();"),
            "const m = new Map<string, Array<number>>();"
        );
    }

    #[test]
    fn test_interface_members() {
        assert_eq!(
            ts("interface User {\nname: string;\nage?: number;\n}"),
            "interface User {\n  name: string;\n  age?: number;\n}"
        );
    }

    #[test]
    fn test_jsx_is_unsupported() {
        let err = ScriptEngine::new(Language::JavaScript)
            .format("const el = <div className='x'>hi</div>;", &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::Unsupported { .. } | FormatError::UnterminatedRegex { .. }
        ));
    }

    #[test]
    fn test_unbalanced_is_an_error() {
        assert!(ScriptEngine::new(Language::JavaScript)
            .format("function f( {", &FormatOptions::default())
            .is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(ScriptEngine::new(Language::TypeScript).name(), "typescript");
        assert_eq!(ScriptEngine::new(Language::JavaScript).name(), "javascript");
    }
}
