//! MIB lexer.
//!
//! Turns MIB module text into [`Token`]s one at a time. The parser drives
//! it directly and picks the maximum quoted-string length per call, since a
//! few clauses (ORGANIZATION, LAST-UPDATED, ...) are read with the short
//! limit.

use super::keyword::lookup_keyword;
use super::token::{Token, TokenKind};
use crate::config::{CommentTerm, MibOptions};

/// Longest label or short string kept, including the terminator slot.
pub const MAX_TOKEN: usize = 128;

/// Longest quoted string kept, including the terminator slot.
pub const MAX_QUOTE_STRING: usize = 4096;

/// Which literal alphabet a `'...'` body has used so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LiteralDigits {
    Binary,
    Hex,
    Other,
}

/// MIB lexer over one file's bytes.
pub struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    line: usize,
    comment_term: CommentTerm,
    label_underscore: bool,
    warnings: u8,
    pushed: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8], options: &MibOptions) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            comment_term: options.comment_term,
            label_underscore: options.parse_label_underscore,
            warnings: options.warnings,
            pushed: None,
        }
    }

    /// Current line number, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return a token to the stream; the next read yields it again.
    pub fn push_back(&mut self, token: Token) {
        self.pushed = Some(token);
    }

    /// Next token, keeping quoted strings up to [`MAX_QUOTE_STRING`].
    pub fn next_token(&mut self) -> Token {
        self.read_token(MAX_QUOTE_STRING)
    }

    /// Next token, keeping quoted strings up to [`MAX_TOKEN`].
    pub fn next_short_token(&mut self) -> Token {
        self.read_token(MAX_TOKEN)
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn is_label_char(&self, c: u8) -> bool {
        c.is_ascii_alphanumeric() || c == b'-' || (c == b'_' && self.label_underscore)
    }

    /// Skip whitespace, returning the first other byte.
    fn skip_space(&mut self) -> Option<u8> {
        loop {
            let c = self.advance()?;
            if c == b'\n' {
                self.line += 1;
            }
            if !is_space(c) {
                return Some(c);
            }
        }
    }

    fn read_token(&mut self, max_len: usize) -> Token {
        if let Some(token) = self.pushed.take() {
            return token;
        }

        loop {
            let Some(ch) = self.skip_space() else {
                return Token::eof();
            };

            return match ch {
                b'"' => self.quoted_string(max_len),
                b'\'' => self.quoted_literal(max_len),
                b'(' => Token::new(TokenKind::LeftParen, "("),
                b')' => Token::new(TokenKind::RightParen, ")"),
                b'{' => Token::new(TokenKind::LeftBracket, "{"),
                b'}' => Token::new(TokenKind::RightBracket, "}"),
                b'[' => Token::new(TokenKind::LeftSqBracket, "["),
                b']' => Token::new(TokenKind::RightSqBracket, "]"),
                b';' => Token::new(TokenKind::Semi, ";"),
                b',' => Token::new(TokenKind::Comma, ","),
                b'|' => Token::new(TokenKind::Bar, "|"),
                b'.' => {
                    if self.peek() == Some(b'.') {
                        self.advance();
                        Token::new(TokenKind::Range, "..")
                    } else {
                        Token::new(TokenKind::Label, ".")
                    }
                }
                b':' => {
                    if self.peek() != Some(b':') {
                        return Token::new(TokenKind::Label, ":");
                    }
                    self.advance();
                    if self.peek() == Some(b'=') {
                        self.advance();
                        Token::new(TokenKind::Equals, "::=")
                    } else {
                        Token::new(TokenKind::Label, ":")
                    }
                }
                b'-' if self.peek() == Some(b'-') => {
                    self.advance();
                    match self.skip_comment() {
                        Some(()) => continue,
                        None => Token::eof(),
                    }
                }
                c => self.word(c, max_len),
            };
        }
    }

    /// Skip the rest of a `--` comment. `None` means input ended.
    fn skip_comment(&mut self) -> Option<()> {
        let mut prev = b' ';
        loop {
            let c = self.advance()?;
            if c == b'\n' {
                self.line += 1;
                return Some(());
            }
            if self.comment_term == CommentTerm::DashPair && prev == b'-' && c == b'-' {
                return Some(());
            }
            prev = c;
        }
    }

    fn quoted_string(&mut self, max_len: usize) -> Token {
        let start_line = self.line;
        let mut body = Vec::new();
        let mut count = 0usize;
        let mut too_long = false;

        loop {
            let Some(c) = self.advance() else {
                return Token::eof();
            };
            match c {
                b'\r' => continue,
                b'"' => break,
                _ => {
                    if c == b'\n' {
                        self.line += 1;
                    }
                    count += 1;
                    if count < max_len {
                        body.push(c);
                    } else {
                        too_long = true;
                    }
                }
            }
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        if too_long {
            let preview: String = text.chars().take(50).collect();
            if self.warnings > 1 {
                tracing::warn!(target: "snmp_trapd::mib", { line = start_line, max = max_len - 1 }, "string too long, truncated: \"{}\"", preview);
            } else {
                tracing::debug!(target: "snmp_trapd::mib", { line = start_line, max = max_len - 1 }, "string too long, truncated: \"{}\"", preview);
            }
        }
        Token::new(TokenKind::QuoteString, text)
    }

    /// `'0101'B` and `'1F'H` literals become decimal numbers; anything else
    /// in quotes is a label that keeps its quotes.
    fn quoted_literal(&mut self, max_len: usize) -> Token {
        let mut body = Vec::new();
        let mut seen = LiteralDigits::Binary;

        loop {
            let Some(c) = self.advance() else {
                return Token::new(TokenKind::Label, quoted_label(&body, false));
            };
            if c == b'\'' {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            if seen == LiteralDigits::Binary && c != b'0' && c != b'1' {
                seen = LiteralDigits::Hex;
            }
            if seen == LiteralDigits::Hex && !c.is_ascii_hexdigit() {
                seen = LiteralDigits::Other;
            }
            if body.len() + 1 < max_len.saturating_sub(2) {
                body.push(c);
            }
        }

        let value: u64 = match self.peek() {
            None => return Token::eof(),
            Some(b'b' | b'B') => {
                self.advance();
                if seen > LiteralDigits::Binary {
                    return Token::new(TokenKind::Label, quoted_label(&body, true));
                }
                body.iter()
                    .fold(0u64, |acc, &d| acc.wrapping_mul(2).wrapping_add(u64::from(d - b'0')))
            }
            Some(b'h' | b'H') => {
                self.advance();
                if seen > LiteralDigits::Hex {
                    return Token::new(TokenKind::Label, quoted_label(&body, true));
                }
                body.iter().fold(0u64, |acc, &d| {
                    let digit = (d as char).to_digit(16).unwrap_or(0);
                    acc.wrapping_mul(16).wrapping_add(u64::from(digit))
                })
            }
            Some(_) => return Token::new(TokenKind::Label, quoted_label(&body, true)),
        };

        Token::new(TokenKind::Number, (value as i64).to_string())
    }

    fn word(&mut self, first: u8, max_len: usize) -> Token {
        if !self.is_label_char(first) {
            return Token::new(TokenKind::Label, (first as char).to_string());
        }

        let mut text = vec![first];
        let mut truncated = false;
        loop {
            while let Some(c) = self.peek() {
                if !self.is_label_char(c) {
                    break;
                }
                self.advance();
                if text.len() < max_len - 1 {
                    text.push(c);
                } else {
                    truncated = true;
                }
            }

            let word = String::from_utf8_lossy(&text).into_owned();
            match lookup_keyword(&word) {
                Some(TokenKind::Continue) => {
                    // OCTET STRING and BIT STRING are read as one word.
                    while let Some(c) = self.peek() {
                        if !is_space(c) {
                            break;
                        }
                        if c == b'\n' {
                            self.line += 1;
                        }
                        self.advance();
                    }
                    match self.peek() {
                        None => return Token::eof(),
                        Some(c) if c.is_ascii_alphanumeric() => {
                            self.advance();
                            text.push(c);
                        }
                        Some(_) => break,
                    }
                }
                Some(kind) => return Token::new(kind, word),
                None => break,
            }
        }

        if truncated {
            tracing::debug!(target: "snmp_trapd::mib", { line = self.line }, "label too long, truncated");
        }

        let word = String::from_utf8_lossy(&text).into_owned();
        let numeric = (text[0] == b'-' || text[0].is_ascii_digit())
            && text[1..].iter().all(u8::is_ascii_digit);
        let kind = if numeric {
            TokenKind::Number
        } else {
            TokenKind::Label
        };
        Token::new(kind, word)
    }
}

fn quoted_label(body: &[u8], closed: bool) -> String {
    let mut text = String::with_capacity(body.len() + 2);
    text.push('\'');
    text.push_str(&String::from_utf8_lossy(body));
    if closed {
        text.push('\'');
    }
    text
}

/// C `isspace`: includes vertical tab and form feed.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source.as_bytes(), &MibOptions::default());
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfFile {
                return out;
            }
            out.push(token.kind);
        }
    }

    fn texts(source: &str, options: &MibOptions) -> Vec<String> {
        let mut lexer = Lexer::new(source.as_bytes(), options);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::EndOfFile {
                return out;
            }
            out.push(token.text);
        }
    }

    #[test]
    fn test_module_header() {
        assert_eq!(
            kinds("FOO-MIB DEFINITIONS ::= BEGIN"),
            vec![
                TokenKind::Label,
                TokenKind::Definitions,
                TokenKind::Equals,
                TokenKind::Begin
            ]
        );
    }

    #[test]
    fn test_punctuation_and_range() {
        assert_eq!(
            kinds("( 0..255 | 7 ) { } [ ] ; ,"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::Range,
                TokenKind::Number,
                TokenKind::Bar,
                TokenKind::Number,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::LeftSqBracket,
                TokenKind::RightSqBracket,
                TokenKind::Semi,
                TokenKind::Comma,
            ]
        );
    }

    #[test]
    fn test_two_word_keywords() {
        assert_eq!(
            kinds("OCTET STRING BIT\n  STRING"),
            vec![TokenKind::OctetStr, TokenKind::BitString]
        );
    }

    #[test]
    fn test_continue_keyword_keeps_lookahead() {
        assert_eq!(
            kinds("OCTET }"),
            vec![TokenKind::Label, TokenKind::RightBracket]
        );
    }

    #[test]
    fn test_numbers_and_labels() {
        let mut lexer = Lexer::new(b"-5 42 4a ifIndex -", &MibOptions::default());
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "-5"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "42"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Label, "4a"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Label, "ifIndex"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "-"));
    }

    #[test]
    fn test_binary_and_hex_literals() {
        let mut lexer = Lexer::new(b"'0101'B 'ff'H 'zz'H 'abc'x", &MibOptions::default());
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "5"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Number, "255"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Label, "'zz'"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Label, "'abc'"));
        assert_eq!(lexer.next_token(), Token::new(TokenKind::Label, "x"));
    }

    #[test]
    fn test_comment_styles() {
        let source = "a -- note -- b\nc";
        assert_eq!(texts(source, &MibOptions::default()), vec!["a", "b", "c"]);

        let eol = MibOptions {
            comment_term: CommentTerm::EndOfLine,
            ..MibOptions::default()
        };
        assert_eq!(texts(source, &eol), vec!["a", "c"]);
    }

    #[test]
    fn test_quoted_string_lines_and_truncation() {
        let mut lexer = Lexer::new(b"\"two\r\nlines\" x", &MibOptions::default());
        assert_eq!(
            lexer.next_token(),
            Token::new(TokenKind::QuoteString, "two\nlines")
        );
        assert_eq!(lexer.line(), 2);

        let long = format!("\"{}\"", "a".repeat(200));
        let mut lexer = Lexer::new(long.as_bytes(), &MibOptions::default());
        let token = lexer.next_short_token();
        assert_eq!(token.kind, TokenKind::QuoteString);
        assert_eq!(token.text.len(), MAX_TOKEN - 1);
    }

    #[test]
    fn test_unterminated_string_is_eof() {
        let mut lexer = Lexer::new(b"\"open", &MibOptions::default());
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_underscore_option() {
        assert_eq!(
            texts("my_label", &MibOptions::default()),
            vec!["my", "_", "label"]
        );
        let options = MibOptions {
            parse_label_underscore: true,
            ..MibOptions::default()
        };
        assert_eq!(texts("my_label", &options), vec!["my_label"]);
    }

    #[test]
    fn test_push_back() {
        let mut lexer = Lexer::new(b"{ x", &MibOptions::default());
        let open = lexer.next_token();
        lexer.push_back(open.clone());
        assert_eq!(lexer.next_token(), open);
        assert_eq!(lexer.next_token().text, "x");
    }
}
