//! Reader for the brace-structured configuration file
//!
//! ```text
//! # comment, // comment, /* block comment */
//! general {
//!     colors = true
//!     interval = 5
//! }
//! order += "load"
//! order += "disk /"
//! disk "/" { format = "%free" }
//! ```
//!
//! The result is an untyped tree: option values become `serde_json::Value`s
//! that the configuration model deserializes into typed option structs.

use super::ConfigError;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// One `name [title] { ... }` block
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    /// Lowercased section name
    pub name: String,
    pub title: Option<String>,
    /// Line of the opening name
    pub line: usize,
    pub options: Map<String, Value>,
}

/// Parsed configuration file before any interpretation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawConfig {
    /// Options outside of any section (`order`)
    pub options: Map<String, Value>,
    /// Line each top-level option was last set on
    pub option_lines: HashMap<String, usize>,
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Quoted(String),
    OpenBrace,
    CloseBrace,
    Assign,
    Append,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Quoted(s) => format!("\"{}\"", s),
            Token::OpenBrace => "'{'".to_string(),
            Token::CloseBrace => "'}'".to_string(),
            Token::Assign => "'='".to_string(),
            Token::Append => "'+='".to_string(),
            Token::Comma => "','".to_string(),
        }
    }
}

fn syntax(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Syntax {
        line,
        message: message.into(),
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) -> Result<(), ConfigError> {
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some(c), _) if c.is_whitespace() || c == ';' => {
                    self.bump();
                }
                (Some('#'), _) | (Some('/'), Some('/')) => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.line;
                    self.pos += 2;
                    loop {
                        match (self.peek(0), self.peek(1)) {
                            (Some('*'), Some('/')) => {
                                self.pos += 2;
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => return Err(syntax(start, "unterminated comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, ConfigError> {
        let start = self.line;
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(syntax(start, "unterminated string")),
                Some(c) if c == quote => return Ok(text),
                // Single-quoted strings are taken literally
                Some('\\') if quote == '"' => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some(other) => text.push(other),
                    None => return Err(syntax(start, "unterminated string")),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn is_word_char(c: char) -> bool {
        !c.is_whitespace() && !matches!(c, '{' | '}' | '=' | ',' | '"' | '\'' | '#' | ';')
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek(0) {
            if !Self::is_word_char(c) || (c == '+' && self.peek(1) == Some('=')) {
                break;
            }
            word.push(c);
            self.pos += 1;
        }
        word
    }

    fn tokenize(mut self) -> Result<Vec<(Token, usize)>, ConfigError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let line = self.line;
            let token = match (self.peek(0), self.peek(1)) {
                (None, _) => return Ok(tokens),
                (Some('{'), _) => {
                    self.pos += 1;
                    Token::OpenBrace
                }
                (Some('}'), _) => {
                    self.pos += 1;
                    Token::CloseBrace
                }
                (Some('='), _) => {
                    self.pos += 1;
                    Token::Assign
                }
                (Some('+'), Some('=')) => {
                    self.pos += 2;
                    Token::Append
                }
                (Some(','), _) => {
                    self.pos += 1;
                    Token::Comma
                }
                (Some(quote @ ('"' | '\'')), _) => {
                    self.pos += 1;
                    Token::Quoted(self.quoted(quote)?)
                }
                (Some(_), _) => Token::Word(self.word()),
            };
            tokens.push((token, line));
        }
    }
}

/// Interpret an unquoted value: booleans, integers and floats are typed,
/// anything else stays a string
fn bare_value(word: &str) -> Value {
    match word.to_lowercase().as_str() {
        "true" | "yes" | "on" => return Value::Bool(true),
        "false" | "no" | "off" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = word.parse::<i64>() {
        return Value::Number(n.into());
    }
    if word.contains('.') {
        if let Some(n) = word.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }
    Value::String(word.to_string())
}

/// Apply `name += value`: the option becomes (or stays) a list
fn append(options: &mut Map<String, Value>, name: String, value: Value) {
    let entry = options.entry(name).or_insert_with(|| Value::Array(Vec::new()));
    match entry {
        Value::Array(items) => items.push(value),
        scalar => {
            let first = scalar.take();
            *scalar = Value::Array(vec![first, value]);
        }
    }
}

struct Parser {
    tokens: std::iter::Peekable<std::vec::IntoIter<(Token, usize)>>,
    last_line: usize,
}

impl Parser {
    fn next(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.next();
        if let Some((_, line)) = &next {
            self.last_line = *line;
        }
        next
    }

    fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek().map(|(token, _)| token)
    }

    fn value(&mut self) -> Result<Value, ConfigError> {
        match self.next() {
            Some((Token::Quoted(s), _)) => Ok(Value::String(s)),
            Some((Token::Word(w), _)) => Ok(bare_value(&w)),
            Some((Token::OpenBrace, _)) => self.list(),
            Some((other, line)) => Err(syntax(
                line,
                format!("expected a value, found {}", other.describe()),
            )),
            None => Err(syntax(self.last_line, "expected a value, found end of file")),
        }
    }

    fn list(&mut self) -> Result<Value, ConfigError> {
        let mut items = Vec::new();
        if self.peek() == Some(&Token::CloseBrace) {
            self.next();
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.value()?);
            match self.next() {
                Some((Token::Comma, _)) => {}
                Some((Token::CloseBrace, _)) => return Ok(Value::Array(items)),
                Some((other, line)) => {
                    return Err(syntax(
                        line,
                        format!("expected ',' or '}}' in list, found {}", other.describe()),
                    ))
                }
                None => return Err(syntax(self.last_line, "unterminated list")),
            }
        }
    }

    /// Options of a section body, up to and including the closing brace
    fn section_body(&mut self, open_line: usize) -> Result<Map<String, Value>, ConfigError> {
        let mut options = Map::new();
        loop {
            match self.next() {
                Some((Token::CloseBrace, _)) => return Ok(options),
                Some((Token::Word(name), line)) => {
                    let name = name.to_lowercase();
                    match self.next() {
                        Some((Token::Assign, _)) => {
                            let value = self.value()?;
                            options.insert(name, value);
                        }
                        Some((Token::Append, _)) => {
                            let value = self.value()?;
                            append(&mut options, name, value);
                        }
                        Some((Token::OpenBrace, _)) => {
                            return Err(syntax(line, "sections cannot be nested"))
                        }
                        Some((Token::Word(_) | Token::Quoted(_), _))
                            if self.peek() == Some(&Token::OpenBrace) =>
                        {
                            return Err(syntax(line, "sections cannot be nested"))
                        }
                        Some((other, line)) => {
                            return Err(syntax(
                                line,
                                format!("expected '=' after '{}', found {}", name, other.describe()),
                            ))
                        }
                        None => return Err(syntax(line, "unexpected end of file")),
                    }
                }
                Some((other, line)) => {
                    return Err(syntax(
                        line,
                        format!("expected an option name, found {}", other.describe()),
                    ))
                }
                None => return Err(syntax(open_line, "unterminated section")),
            }
        }
    }

    fn document(&mut self) -> Result<RawConfig, ConfigError> {
        let mut config = RawConfig::default();

        while let Some((token, line)) = self.next() {
            let name = match token {
                Token::Word(name) => name.to_lowercase(),
                other => {
                    return Err(syntax(
                        line,
                        format!(
                            "expected an option or section name, found {}",
                            other.describe()
                        ),
                    ))
                }
            };

            match self.next() {
                Some((Token::Assign, _)) => {
                    let value = self.value()?;
                    config.options.insert(name.clone(), value);
                    config.option_lines.insert(name, line);
                }
                Some((Token::Append, _)) => {
                    let value = self.value()?;
                    append(&mut config.options, name.clone(), value);
                    config.option_lines.insert(name, line);
                }
                Some((Token::OpenBrace, _)) => {
                    let options = self.section_body(line)?;
                    config.sections.push(RawSection {
                        name,
                        title: None,
                        line,
                        options,
                    });
                }
                Some((Token::Word(title), _)) | Some((Token::Quoted(title), _)) => {
                    match self.next() {
                        Some((Token::OpenBrace, _)) => {}
                        _ => {
                            return Err(syntax(
                                line,
                                format!("expected '{{' after section '{} {}'", name, title),
                            ))
                        }
                    }
                    let options = self.section_body(line)?;
                    config.sections.push(RawSection {
                        name,
                        title: Some(title),
                        line,
                        options,
                    });
                }
                Some((other, line)) => {
                    return Err(syntax(
                        line,
                        format!("unexpected {} after '{}'", other.describe(), name),
                    ))
                }
                None => return Err(syntax(line, "unexpected end of file")),
            }
        }

        Ok(config)
    }
}

/// Parse configuration text into its untyped tree
pub fn parse(source: &str) -> Result<RawConfig, ConfigError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser {
        tokens: tokens.into_iter().peekable(),
        last_line: 1,
    }
    .document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections_and_order() {
        let config = parse(
            r##"
# i3status configuration
general {
    colors = true
    interval = 5
    color_good = "#00FF00"
}

order += "ipv6"
order += "disk /"

disk "/" {
    format = "%free"
}
"##,
        )
        .unwrap();

        assert_eq!(config.options["order"], json!(["ipv6", "disk /"]));
        assert_eq!(config.option_lines["order"], 10);
        assert_eq!(config.sections.len(), 2);

        let general = &config.sections[0];
        assert_eq!(general.name, "general");
        assert_eq!(general.title, None);
        assert_eq!(general.line, 3);
        assert_eq!(general.options["colors"], json!(true));
        assert_eq!(general.options["interval"], json!(5));
        assert_eq!(general.options["color_good"], json!("#00FF00"));

        let disk = &config.sections[1];
        assert_eq!(disk.name, "disk");
        assert_eq!(disk.title.as_deref(), Some("/"));
        assert_eq!(disk.line, 12);
        assert_eq!(disk.options["format"], json!("%free"));
    }

    #[test]
    fn test_comment_styles() {
        let config = parse(
            "// line comment\n/* block\n comment */ load { format = \"%1min\" } # trailing\n",
        )
        .unwrap();
        assert_eq!(config.sections[0].name, "load");
        assert_eq!(config.sections[0].line, 3);
    }

    #[test]
    fn test_bare_words_and_titles() {
        let config = parse("battery 0 {\n last_full_capacity = yes\n low_threshold = 15\n}\nrun_watch DHCP { pidfile = /var/run/dhclient*.pid }").unwrap();

        let battery = &config.sections[0];
        assert_eq!(battery.title.as_deref(), Some("0"));
        assert_eq!(battery.options["last_full_capacity"], json!(true));
        assert_eq!(battery.options["low_threshold"], json!(15));

        let run_watch = &config.sections[1];
        assert_eq!(run_watch.title.as_deref(), Some("DHCP"));
        assert_eq!(
            run_watch.options["pidfile"],
            json!("/var/run/dhclient*.pid")
        );
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let config = parse("General { Colors = off }\nORDER += \"load\"").unwrap();
        assert_eq!(config.sections[0].name, "general");
        assert_eq!(config.sections[0].options["colors"], json!(false));
        assert_eq!(config.options["order"], json!(["load"]));
    }

    #[test]
    fn test_list_assignment() {
        let config = parse("order = {\"load\", \"time\"}\nempty = {}").unwrap();
        assert_eq!(config.options["order"], json!(["load", "time"]));
        assert_eq!(config.options["empty"], json!([]));
    }

    #[test]
    fn test_append_to_scalar() {
        let config = parse("order = \"load\"\norder += \"time\"").unwrap();
        assert_eq!(config.options["order"], json!(["load", "time"]));
    }

    #[test]
    fn test_string_escapes() {
        let config = parse(r#"time { format = "a\tb \"c\" \\ d" }"#).unwrap();
        assert_eq!(
            config.sections[0].options["format"],
            json!("a\tb \"c\" \\ d")
        );

        let config = parse(r"time { format = 'raw\t' }").unwrap();
        assert_eq!(config.sections[0].options["format"], json!("raw\\t"));
    }

    #[test]
    fn test_typed_bare_values() {
        assert_eq!(bare_value("On"), json!(true));
        assert_eq!(bare_value("no"), json!(false));
        assert_eq!(bare_value("-3"), json!(-3));
        assert_eq!(bare_value("2.5"), json!(2.5));
        assert_eq!(bare_value("Master"), json!("Master"));
        assert_eq!(bare_value("1.2.3"), json!("1.2.3"));
    }

    #[test]
    fn test_syntax_errors_carry_lines() {
        let err = parse("general {\n  colors = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 1, .. }), "{err}");

        let err = parse("general {\n  colors true\n}").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }), "{err}");

        let err = parse("time {\n format = \"%H\n}").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }), "{err}");

        let err = parse("/* never closed").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 1, .. }), "{err}");

        let err = parse("= 5").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_nested_sections_rejected() {
        let err = parse("general {\n inner { }\n}").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }), "{err}");

        let err = parse("general {\n disk \"/\" { }\n}").unwrap_err();
        assert!(err.to_string().contains("nested"), "{err}");
    }
}
