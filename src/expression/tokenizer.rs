use std::fmt;

use crate::expression::expressionerror::ExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` 與 `**` 皆為次方。
    Caret,
    Comma,
    Dot,
    LeftParen,
    RightParen
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {}", value),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    position: usize
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Token {
        Token { kind, position }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// 將公式字串切成 token。空白一律略過；任何不在文法中的字元
/// （`=`、`;`、引號、`[` 等）直接回報 `UnexpectedCharacter`。
pub fn tokenize(text: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit()));
        if starts_number {
            let (value, end) = scan_number(&chars, i)?;
            tokens.push(Token::new(TokenKind::Number(value), i));
            i = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            tokens.push(Token::new(TokenKind::Identifier(name), start));
            continue;
        }

        let kind = match c {
            'π' => TokenKind::Identifier("pi".to_owned()),
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::new(TokenKind::Caret, i));
                i += 2;
                continue;
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            _ => {
                return Err(ExpressionError::UnexpectedCharacter {
                    character: c,
                    position: i,
                })
            }
        };
        tokens.push(Token::new(kind, i));
        i += 1;
    }

    Ok(tokens)
}

/// 讀取 `12`、`1.5`、`.5`、`2.`、`1e-3` 形式的數字。
/// 指數符號後必須接數字，否則 `e` 留給下一個 token。
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), ExpressionError> {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let text: String = chars[start..i].iter().collect();
    text.parse::<f64>()
        .map(|value| (value, i))
        .map_err(|_| ExpressionError::MalformedNumber { text, position: start })
}
