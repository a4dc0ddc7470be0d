//! Lexer - 词法分析器
//!
//! 基于 logos 的状态机，把源码切分为带字节范围的 [`SpannedToken`]。
//! 遇到无法识别的字符时记录 [`LexError`] 并从下一个字符继续，
//! 因此一次扫描可以报告多个词法错误。

use crate::error::LexError;
use authlogic_diagnostics::Span;
use logos::{FilterResult, Logos};
use serde::{Deserialize, Serialize};
use std::fmt;

/// logos 回调使用的错误种类，`tokenize` 会补上位置信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    UnexpectedCharacter,
    UnterminatedComment,
}

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // --- 关键字 (Keywords) ---
    #[token("query")]
    Query,
    #[token("says")]
    Says,
    #[token("canActAs")]
    CanActAs,
    #[token("canSay")]
    CanSay,
    #[token("exportTo")]
    ExportTo,
    #[token("import")]
    Import,
    #[token("BindPrivKey")]
    BindPrivKey,
    #[token("BindPubKey")]
    BindPubKey,

    // --- 符号 (Symbols) ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    // 单独的 `.` 优先于 ID；`C.` 仍按最长匹配成为 ID
    #[token(".", priority = 3)]
    Dot,
    #[token(":-")]
    Turnstile,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("!")]
    Neg,

    // 两侧引号各自可选，`"abc` 也是合法的 ID
    #[regex(r#""?[a-zA-Z0-9_%.]+"?"#, |lex| lex.slice().to_string())]
    Id(String),

    // 块注释回调总是跳过或报错，不会产出该变体
    #[doc(hidden)]
    #[token("/*", block_comment)]
    BlockComment,
}

/// 跳过到第一个 `*/`，不支持嵌套
fn block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

/// 不带负载的词法单元种类
///
/// `Display` 输出的是外部工具依赖的词汇表：`'.'`、`says`、`ID` 等。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Query,
    Says,
    CanActAs,
    CanSay,
    ExportTo,
    Import,
    BindPrivKey,
    BindPubKey,
    LParen,
    RParen,
    Comma,
    Dot,
    Turnstile,
    LBrace,
    RBrace,
    Eq,
    Question,
    Neg,
    Id,
}

impl TokenKind {
    /// 固定词法单元的字面文本，`ID` 没有固定文本
    pub fn lexeme(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Query => "query",
            TokenKind::Says => "says",
            TokenKind::CanActAs => "canActAs",
            TokenKind::CanSay => "canSay",
            TokenKind::ExportTo => "exportTo",
            TokenKind::Import => "import",
            TokenKind::BindPrivKey => "BindPrivKey",
            TokenKind::BindPubKey => "BindPubKey",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Turnstile => ":-",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Eq => "=",
            TokenKind::Question => "?",
            TokenKind::Neg => "!",
            TokenKind::Id => return None,
        })
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Query
                | TokenKind::Says
                | TokenKind::CanActAs
                | TokenKind::CanSay
                | TokenKind::ExportTo
                | TokenKind::Import
                | TokenKind::BindPrivKey
                | TokenKind::BindPubKey
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(text) if self.is_keyword() => write!(f, "{}", text),
            Some(text) => write!(f, "'{}'", text),
            None => write!(f, "ID"),
        }
    }
}

impl Token {
    /// 词法单元种类；块注释占位变体没有种类
    pub fn kind(&self) -> Option<TokenKind> {
        Some(match self {
            Token::Query => TokenKind::Query,
            Token::Says => TokenKind::Says,
            Token::CanActAs => TokenKind::CanActAs,
            Token::CanSay => TokenKind::CanSay,
            Token::ExportTo => TokenKind::ExportTo,
            Token::Import => TokenKind::Import,
            Token::BindPrivKey => TokenKind::BindPrivKey,
            Token::BindPubKey => TokenKind::BindPubKey,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Turnstile => TokenKind::Turnstile,
            Token::LBrace => TokenKind::LBrace,
            Token::RBrace => TokenKind::RBrace,
            Token::Eq => TokenKind::Eq,
            Token::Question => TokenKind::Question,
            Token::Neg => TokenKind::Neg,
            Token::Id(_) => TokenKind::Id,
            Token::BlockComment => return None,
        })
    }

    /// 词法单元在源码中的字面文本
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Id(text) => text,
            Token::BlockComment => "/*",
            other => other.kind().and_then(|k| k.lexeme()).unwrap_or_default(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Id(text) => write!(f, "ID `{}`", text),
            other => match other.kind() {
                Some(kind) => write!(f, "{}", kind),
                None => write!(f, "'{}'", other.lexeme()),
            },
        }
    }
}

/// 带位置的词法单元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// 词法分析结果
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<SpannedToken>,
    pub errors: Vec<LexError>,
}

/// 对整段源码做词法分析
pub fn tokenize(source: &str) -> LexOutput {
    let mut output = LexOutput::default();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => output.tokens.push(SpannedToken { token, span }),
            Err(LexErrorKind::UnterminatedComment) => {
                output.errors.push(LexError::UnterminatedComment {
                    span: span.start..span.start + 2,
                });
            }
            Err(LexErrorKind::UnexpectedCharacter) => {
                let ch = source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                output.errors.push(LexError::UnexpectedCharacter {
                    ch,
                    span: span.start..span.start + ch.len_utf8(),
                });
            }
        }
    }

    tracing::debug!(
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "lexed source"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.iter().filter_map(|t| t.token.kind()).collect()
    }

    #[test]
    fn test_lexer_basic() {
        let mut lexer = Token::lexer("Admin says p(a, b).");

        assert_eq!(lexer.next(), Some(Ok(Token::Id("Admin".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Says)));
        assert_eq!(lexer.next(), Some(Ok(Token::Id("p".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::LParen)));
        assert_eq!(lexer.next(), Some(Ok(Token::Id("a".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Comma)));
        assert_eq!(lexer.next(), Some(Ok(Token::Id("b".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::RParen)));
        assert_eq!(lexer.next(), Some(Ok(Token::Dot)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_punctuation() {
        use TokenKind::*;
        assert_eq!(
            kinds("( , ) . :- { } = ? !"),
            vec![LParen, Comma, RParen, Dot, Turnstile, LBrace, RBrace, Eq, Question, Neg]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let out = tokenize("says Says canActAs canactas BindPubKey");
        let tokens: Vec<_> = out.tokens.into_iter().map(|t| t.token).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Says,
                Token::Id("Says".to_string()),
                Token::CanActAs,
                Token::Id("canactas".to_string()),
                Token::BindPubKey,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let out = tokenize("sayso queryable");
        assert_eq!(out.tokens[0].token, Token::Id("sayso".to_string()));
        assert_eq!(out.tokens[1].token, Token::Id("queryable".to_string()));
    }

    #[test]
    fn test_identifier_characters() {
        let out = tokenize("user_1 50% file.json");
        let texts: Vec<_> = out.tokens.iter().map(|t| t.token.lexeme()).collect();
        assert_eq!(texts, vec!["user_1", "50%", "file.json"]);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_quoted_identifiers() {
        let out = tokenize(r#""jack" "abc abc" "says""#);
        let texts: Vec<_> = out.tokens.iter().map(|t| t.token.lexeme()).collect();
        // 单侧引号同样被接受
        assert_eq!(texts, vec![r#""jack""#, r#""abc"#, r#"abc""#, r#""says""#]);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_quoted_identifier_before_dot() {
        assert_eq!(kinds(r#""jack"."#), vec![TokenKind::Id, TokenKind::Dot]);
    }

    #[test]
    fn test_lone_dot_is_punctuation() {
        use TokenKind::*;
        assert_eq!(kinds("p(a) ."), vec![Id, LParen, Id, RParen, Dot]);
        assert_eq!(kinds("."), vec![Dot]);
        assert_eq!(kinds(".."), vec![Id]);
    }

    #[test]
    fn test_unquoted_identifier_absorbs_trailing_dot() {
        let out = tokenize("C.");
        assert_eq!(out.tokens.len(), 1);
        assert_eq!(out.tokens[0].token, Token::Id("C.".to_string()));
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = "// header\r\nAdmin /* inline\n comment */ says // trailing\n p(a).";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Id,
                TokenKind::Says,
                TokenKind::Id,
                TokenKind::LParen,
                TokenKind::Id,
                TokenKind::RParen,
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let out = tokenize("Admin says");
        assert_eq!(out.tokens[0].span, 0..5);
        assert_eq!(out.tokens[1].span, 6..10);
    }

    #[test]
    fn test_unexpected_character_recovers() {
        let out = tokenize("Admin # says @ p");
        assert_eq!(
            out.errors,
            vec![
                LexError::UnexpectedCharacter { ch: '#', span: 6..7 },
                LexError::UnexpectedCharacter { ch: '@', span: 13..14 },
            ]
        );
        assert_eq!(out.tokens.len(), 3);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let out = tokenize("Admin says /* never closed");
        assert_eq!(
            out.errors,
            vec![LexError::UnterminatedComment { span: 11..13 }]
        );
        assert_eq!(out.tokens.len(), 2);
    }

    #[test]
    fn test_comment_placeholder_has_no_kind() {
        assert_eq!(Token::BlockComment.kind(), None);
        assert_eq!(Token::BlockComment.lexeme(), "/*");
        assert_eq!(Token::BlockComment.to_string(), "'/*'");
        assert_eq!(Token::Says.kind(), Some(TokenKind::Says));
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let out = tokenize("Admin says p(a). // no newline");
        assert!(out.errors.is_empty());
        assert_eq!(out.tokens.len(), 7);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(TokenKind::Dot.to_string(), "'.'");
        assert_eq!(TokenKind::Says.to_string(), "says");
        assert_eq!(TokenKind::Id.to_string(), "ID");
        assert_eq!(Token::Id("p".to_string()).to_string(), "ID `p`");
        assert_eq!(Token::Turnstile.lexeme(), ":-");
    }
}
