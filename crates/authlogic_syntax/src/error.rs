//! Syntax Errors
//!
//! 词法与语法错误定义。错误都是数据：解析不会因错误中止，
//! 调用方拿到部分 AST 和完整的错误列表。

use crate::lexer::{Token, TokenKind};
use authlogic_diagnostics::{Diagnostic, Span, Suggestion};
use std::fmt;
use thiserror::Error;

/// 词法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// 无法识别的字符
    #[error("unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, span: Span },

    /// 没有闭合的块注释，位置指向 `/*`
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            Self::UnexpectedCharacter { span, .. } => span,
            Self::UnterminatedComment { span } => span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).span(self.span().clone());
        match self {
            // 其他语言的注释写法
            Self::UnexpectedCharacter { ch: '#', .. } => diag
                .with_label("not part of the language")
                .with_suggestion(
                    Suggestion::new("comments start with '//'").with_replacement("//"),
                ),
            Self::UnexpectedCharacter { .. } => diag.with_label("not part of the language"),
            Self::UnterminatedComment { .. } => diag
                .with_label("comment starts here")
                .suggest("close the comment with '*/'"),
        }
    }
}

/// 语法错误中"实际看到的东西"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token(Token),
    Eof,
}

impl Found {
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Found::Token(token) => token.kind(),
            Found::Eof => None,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{}", token),
            Found::Eof => write!(f, "end of input"),
        }
    }
}

/// 语法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// 需要某个确定的词法单元却没有看到
    #[error("expected {expected}, found {found}")]
    MissingExpected {
        expected: TokenKind,
        found: Found,
        span: Span,
    },

    /// 在分支点上没有任何一个产生式能接受当前词法单元
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: Found,
        expected: &'static str,
        span: Span,
    },
}

impl SyntaxError {
    pub fn span(&self) -> &Span {
        match self {
            Self::MissingExpected { span, .. } => span,
            Self::UnexpectedToken { span, .. } => span,
        }
    }

    pub fn found(&self) -> &Found {
        match self {
            Self::MissingExpected { found, .. } => found,
            Self::UnexpectedToken { found, .. } => found,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).span(self.span().clone());
        match self {
            Self::MissingExpected { expected, .. } => {
                let diag = diag.with_label(format!("expected {} here", expected));
                match expected.lexeme() {
                    Some(text) if !expected.is_keyword() => diag.with_suggestion(
                        Suggestion::new(format!("insert '{}'", text)).with_replacement(text),
                    ),
                    _ => diag,
                }
            }
            Self::UnexpectedToken { expected, .. } => {
                diag.with_label(format!("expected {}", expected))
            }
        }
    }
}

/// 统一的前端错误，按出现顺序排列
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            Self::Lex(err) => err.span(),
            Self::Syntax(err) => err.span(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Lex(err) => err.to_diagnostic(),
            Self::Syntax(err) => err.to_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SyntaxError::MissingExpected {
            expected: TokenKind::Dot,
            found: Found::Eof,
            span: 5..5,
        };
        assert_eq!(err.to_string(), "expected '.', found end of input");

        let err = SyntaxError::UnexpectedToken {
            found: Found::Token(Token::RParen),
            expected: "a program item",
            span: 0..1,
        };
        assert_eq!(err.to_string(), "unexpected ')', expected a program item");

        let err = LexError::UnexpectedCharacter { ch: '#', span: 3..4 };
        assert_eq!(err.to_string(), "unexpected character '#'");
    }

    #[test]
    fn test_to_diagnostic_suggests_insertion() {
        let err = SyntaxError::MissingExpected {
            expected: TokenKind::Dot,
            found: Found::Token(Token::Id("Bob".to_string())),
            span: 10..13,
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.span, Some(10..13));
        assert_eq!(diag.suggestions[0].message, "insert '.'");
        assert_eq!(diag.suggestions[0].replacement.as_deref(), Some("."));
    }

    #[test]
    fn test_hash_comment_suggests_line_comment() {
        let diag = LexError::UnexpectedCharacter { ch: '#', span: 0..1 }.to_diagnostic();
        assert_eq!(diag.suggestions[0].replacement.as_deref(), Some("//"));

        let diag = LexError::UnexpectedCharacter { ch: '@', span: 0..1 }.to_diagnostic();
        assert!(diag.suggestions.is_empty());
    }

    #[test]
    fn test_parse_error_ordering_by_span() {
        let errors = vec![
            ParseError::from(SyntaxError::MissingExpected {
                expected: TokenKind::Says,
                found: Found::Eof,
                span: 9..9,
            }),
            ParseError::from(LexError::UnterminatedComment { span: 2..4 }),
        ];
        let mut sorted = errors.clone();
        sorted.sort_by_key(|e| e.span().start);
        assert!(matches!(sorted[0], ParseError::Lex(_)));
        assert_eq!(sorted[1], errors[0]);
    }
}
