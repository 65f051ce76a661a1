//! Tokenizer and recursive-descent parser for KeyValues text.

use thiserror::Error;

use super::{Node, Section};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VdfError {
    #[error("line {line}: unterminated quoted string")]
    UnterminatedString { line: usize },
    #[error("line {line}: unexpected '{{' without a key")]
    UnexpectedOpen { line: usize },
    #[error("line {line}: unexpected '}}'")]
    UnexpectedClose { line: usize },
    #[error("line {line}: key {key:?} has no value")]
    MissingValue { key: String, line: usize },
    #[error("unexpected end of input: {open} section(s) left open")]
    UnclosedSection { open: usize },
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Str(String),
    Open,
    Close,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '/' {
                let mut ahead = self.chars.clone();
                ahead.next();
                if ahead.peek() != Some(&'/') {
                    return;
                }
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                return;
            }
        }
    }

    /// Next token with the line it started on.
    fn next_token(&mut self) -> Result<Option<(Token, usize)>, VdfError> {
        self.skip_trivia();
        let line = self.line;
        let Some(c) = self.bump() else {
            return Ok(None);
        };
        let tok = match c {
            '{' => Token::Open,
            '}' => Token::Close,
            '"' => Token::Str(self.quoted(line)?),
            other => Token::Str(self.bare(other)),
        };
        Ok(Some((tok, line)))
    }

    fn quoted(&mut self, start_line: usize) -> Result<String, VdfError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(VdfError::UnterminatedString { line: start_line }),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c @ ('\\' | '"')) => out.push(c),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return Err(VdfError::UnterminatedString { line: start_line }),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn bare(&mut self, first: char) -> String {
        let mut out = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == '{' || c == '}' || c == '"' {
                break;
            }
            if let Some(c) = self.bump() {
                out.push(c);
            }
        }
        out
    }
}

fn current<'a>(stack: &'a mut [(String, Section)], root: &'a mut Section) -> &'a mut Section {
    match stack.last_mut() {
        Some((_, section)) => section,
        None => root,
    }
}

/// Parse a KeyValues document into its top-level section.
pub fn parse(text: &str) -> Result<Section, VdfError> {
    let mut lexer = Lexer::new(text);
    let mut root = Section::default();
    // Sections still open, innermost last.
    let mut stack: Vec<(String, Section)> = Vec::new();

    while let Some((tok, line)) = lexer.next_token()? {
        match tok {
            Token::Open => return Err(VdfError::UnexpectedOpen { line }),
            Token::Close => {
                let Some((key, section)) = stack.pop() else {
                    return Err(VdfError::UnexpectedClose { line });
                };
                current(&mut stack, &mut root).push(key, Node::Section(section));
            }
            Token::Str(key) => match lexer.next_token()? {
                Some((Token::Str(value), _)) => {
                    current(&mut stack, &mut root).push(key, Node::Value(value));
                }
                Some((Token::Open, _)) => stack.push((key, Section::default())),
                Some((Token::Close, _)) | None => {
                    return Err(VdfError::MissingValue { key, line });
                }
            },
        }
    }

    if !stack.is_empty() {
        return Err(VdfError::UnclosedSection { open: stack.len() });
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_sections_and_comments() {
        let text = r#"
            // generated by steam
            "AppState"
            {
                "appid"     "570"
                "name"      "Dota 2"
                "InstalledDepots"
                {
                    "573" { "size" "1024" }
                }
            }
        "#;
        let root = parse(text).unwrap();
        let app = root.section("appstate").unwrap();
        assert_eq!(app.value("AppID"), Some("570"));
        assert_eq!(app.value("name"), Some("Dota 2"));
        let depot = app.section("InstalledDepots").unwrap().section("573").unwrap();
        assert_eq!(depot.value("size"), Some("1024"));
    }

    #[test]
    fn parse_escapes_and_bare_tokens() {
        let root = parse(r#""k" "a \"quoted\" \\ path" bare value"#).unwrap();
        assert_eq!(root.value("k"), Some(r#"a "quoted" \ path"#));
        assert_eq!(root.value("bare"), Some("value"));
    }

    #[test]
    fn bare_tokens_keep_every_character() {
        let root = parse("BytesDownloaded 1000 BytesToDownload 2000").unwrap();
        assert_eq!(root.value("BytesDownloaded"), Some("1000"));
        assert_eq!(root.value("BytesToDownload"), Some("2000"));
    }

    #[test]
    fn slash_inside_value_is_not_a_comment() {
        let root = parse(r#""dir" "common/Dota 2""#).unwrap();
        assert_eq!(root.value("dir"), Some("common/Dota 2"));
    }

    #[test]
    fn parse_errors_report_location() {
        assert_eq!(
            parse("\"a\" {\n\"b\" \"c\"\n"),
            Err(VdfError::UnclosedSection { open: 1 })
        );
        assert_eq!(
            parse("\"a\" \"b\"\n}"),
            Err(VdfError::UnexpectedClose { line: 2 })
        );
        assert_eq!(
            parse("\"a\" \"unterminated"),
            Err(VdfError::UnterminatedString { line: 1 })
        );
        assert!(matches!(
            parse("\"lonely\""),
            Err(VdfError::MissingValue { .. })
        ));
    }
}
