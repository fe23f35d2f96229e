use crate::error::{ErrorSink, ScanError};
use crate::token::{keyword, Literal, Token, TokenType};

/// Scan `source` in one pass, reporting lexical errors to `sink`.
pub fn scan_tokens(source: &str, sink: &mut impl ErrorSink) -> Vec<Token> {
    Scanner::new(source).scan_tokens(sink)
}

pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: u32,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Consumes the scanner; the returned list always ends with a single EOF token.
    pub fn scan_tokens(mut self, sink: &mut impl ErrorSink) -> Vec<Token> {
        while !self.is_end() {
            self.start = self.current;
            self.scan_token(sink);
        }

        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn scan_token(&mut self, sink: &mut impl ErrorSink) {
        match self.next_char() {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                if self.match_next('=') {
                    self.add_token(TokenType::BangEqual)
                } else {
                    self.add_token(TokenType::Bang)
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_token(TokenType::EqualEqual)
                } else {
                    self.add_token(TokenType::Equal)
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_token(TokenType::LessEqual)
                } else {
                    self.add_token(TokenType::Less)
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_token(TokenType::GreaterEqual)
                } else {
                    self.add_token(TokenType::Greater)
                }
            }
            '/' => {
                if self.match_next('/') {
                    // Comment runs to the end of the line; the newline is scanned normally.
                    while self.peek_char() != '\n' && !self.is_end() {
                        let _ = self.next_char();
                    }
                } else {
                    self.add_token(TokenType::Slash)
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(sink),
            '0'..='9' => self.number(sink),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
            _ => {
                let c = self.skip_unsupported();
                sink.report(self.line, ScanError::UnsupportedCharacter(c));
            }
        }
    }

    fn is_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn next_char(&mut self) -> char {
        self.current += 1;
        self.source.as_bytes()[self.current - 1] as char
    }

    fn peek_char(&self) -> char {
        if self.is_end() {
            return '\0';
        }
        self.source.as_bytes()[self.current] as char
    }

    fn peek_next_char(&self) -> char {
        if self.current + 1 >= self.source.len() {
            return '\0';
        }
        self.source.as_bytes()[self.current + 1] as char
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek_char() != expected || self.is_end() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Moves past the whole character at `start`, which may be several bytes of UTF-8.
    fn skip_unsupported(&mut self) -> char {
        match self.source[self.start..].chars().next() {
            Some(c) => {
                self.current = self.start + c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, t: TokenType) {
        self.add_literal_token(t, None);
    }

    fn add_literal_token(&mut self, t: TokenType, literal: Option<Literal>) {
        let token = Token::new(t, self.lexeme(), literal, self.line);
        self.tokens.push(token);
    }

    fn string(&mut self, sink: &mut impl ErrorSink) {
        // A multi-line string is reported on the line where it starts.
        let start_line = self.line;
        while self.peek_char() != '"' && !self.is_end() {
            if self.next_char() == '\n' {
                self.line += 1;
            }
        }

        if self.is_end() {
            sink.report(self.line, ScanError::UnterminatedString);
            return;
        }

        // Consume the closing quote.
        let _ = self.next_char();
        let text = &self.source[self.start + 1..self.current - 1];
        let token = Token::new(
            TokenType::String,
            self.lexeme(),
            Some(Literal::Str(String::from(text))),
            start_line,
        );
        self.tokens.push(token);
    }

    fn number(&mut self, sink: &mut impl ErrorSink) {
        while self.peek_char().is_ascii_digit() {
            let _ = self.next_char();
        }

        // A trailing '.' without a digit after it is left for the DOT token.
        if self.peek_char() == '.' && self.peek_next_char().is_ascii_digit() {
            let _ = self.next_char();

            while self.peek_char().is_ascii_digit() {
                let _ = self.next_char();
            }
        }

        match self.lexeme().parse::<f64>() {
            Ok(value) => self.add_literal_token(TokenType::Number, Some(Literal::Number(value))),
            Err(_) => sink.report(
                self.line,
                ScanError::MalformedNumber(String::from(self.lexeme())),
            ),
        }
    }

    fn identifier(&mut self) {
        while self.peek_char().is_ascii_alphanumeric() || self.peek_char() == '_' {
            let _ = self.next_char();
        }
        let t = keyword(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(t);
    }
}
