//! Parser Helper Functions
//!
//! 游标、前瞻、期望与错误恢复

use crate::error::{Found, SyntaxError};
use crate::lexer::{SpannedToken, Token, TokenKind};
use authlogic_diagnostics::Span;

/// 错误已记录，调用方需要恢复
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Abort;

pub(crate) type PResult<T> = Result<T, Abort>;

/// 可以开始顶层条目的关键字，恢复时停在它们前面
pub(crate) const ITEM_KEYWORDS: &[TokenKind] = &[
    TokenKind::Import,
    TokenKind::BindPrivKey,
    TokenKind::BindPubKey,
];

/// 单次解析的全部状态
pub(crate) struct Parser<'t> {
    tokens: &'t [SpannedToken],
    pos: usize,
    eof: usize,
    errors: Vec<SyntaxError>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [SpannedToken], eof: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            errors: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<SyntaxError> {
        self.errors
    }

    // -- 前瞻 --------------------------------------------------

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// 向前看第 n 个词法单元（0 为当前）。文法只需要 n <= 1。
    pub(crate) fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        debug_assert!(n <= 1, "grammar needs at most two tokens of lookahead");
        self.tokens.get(self.pos + n).and_then(|t| t.token.kind())
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.nth_kind(0)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn nth_at(&self, n: usize, kind: TokenKind) -> bool {
        self.nth_kind(n) == Some(kind)
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        self.peek_kind().is_some_and(|k| kinds.contains(&k))
    }

    /// 当前位置；输入结束时是末尾的空范围
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span.clone())
            .unwrap_or(self.eof..self.eof)
    }

    pub(crate) fn found(&self) -> Found {
        match self.tokens.get(self.pos) {
            Some(t) => Found::Token(t.token.clone()),
            None => Found::Eof,
        }
    }

    // -- 消费 --------------------------------------------------

    pub(crate) fn bump(&mut self) -> Option<&'t SpannedToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// 必须出现的词法单元，缺失则中止当前产生式
    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Span> {
        if self.at(kind) {
            let span = self.current_span();
            self.pos += 1;
            Ok(span)
        } else {
            self.missing(kind);
            Err(Abort)
        }
    }

    /// 闭合符号：缺失时记录错误，但当作已经插入继续解析
    pub(crate) fn expect_closing(&mut self, kind: TokenKind) {
        if !self.eat(kind) {
            self.missing(kind);
        }
    }

    pub(crate) fn expect_id(&mut self) -> PResult<String> {
        match self.tokens.get(self.pos) {
            Some(SpannedToken {
                token: Token::Id(text),
                ..
            }) => {
                self.pos += 1;
                Ok(text.clone())
            }
            _ => {
                self.missing(TokenKind::Id);
                Err(Abort)
            }
        }
    }

    /// 解析子产生式后要求输入已经耗尽
    pub(crate) fn expect_end(&mut self) {
        if !self.at_end() {
            self.unexpected("end of input");
        }
    }

    // -- 错误与恢复 ---------------------------------------------

    pub(crate) fn missing(&mut self, expected: TokenKind) {
        let err = SyntaxError::MissingExpected {
            expected,
            found: self.found(),
            span: self.current_span(),
        };
        self.errors.push(err);
    }

    pub(crate) fn unexpected(&mut self, expected: &'static str) -> Abort {
        let err = SyntaxError::UnexpectedToken {
            found: self.found(),
            expected,
            span: self.current_span(),
        };
        self.errors.push(err);
        Abort
    }

    /// 跳过词法单元直到安全边界
    ///
    /// 遇到 `consume` 中的种类时把它吃掉后停下，遇到 `keep` 中的种类时停在它前面。
    pub(crate) fn synchronize(&mut self, consume: &[TokenKind], keep: &[TokenKind]) {
        let start = self.pos;
        while let Some(kind) = self.peek_kind() {
            if keep.contains(&kind) {
                break;
            }
            self.pos += 1;
            if consume.contains(&kind) {
                break;
            }
        }
        tracing::debug!(
            skipped = self.pos - start,
            resume_at = self.current_span().start,
            "recovered from syntax error"
        );
    }
}

/// 外部资源标识去掉引号: "Bob" => Bob
pub(crate) fn unquote(text: &str) -> String {
    text.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Bob\""), "Bob");
        assert_eq!(unquote("\"half"), "half");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_expect_closing_records_and_continues() {
        let lexed = tokenize("p");
        let mut parser = Parser::new(&lexed.tokens, 1);
        assert_eq!(parser.expect_id(), Ok("p".to_string()));
        parser.expect_closing(TokenKind::Dot);

        let errors = parser.finish();
        assert_eq!(
            errors,
            vec![SyntaxError::MissingExpected {
                expected: TokenKind::Dot,
                found: Found::Eof,
                span: 1..1,
            }]
        );
    }

    #[test]
    fn test_synchronize_consumes_dot() {
        let lexed = tokenize("( x y . Admin");
        let mut parser = Parser::new(&lexed.tokens, 13);
        parser.synchronize(&[TokenKind::Dot, TokenKind::RBrace], ITEM_KEYWORDS);
        assert!(parser.at(TokenKind::Id));
        assert_eq!(parser.current_span(), 8..13);
    }

    #[test]
    fn test_synchronize_keeps_keyword() {
        let lexed = tokenize(") ) BindPubKey A k");
        let mut parser = Parser::new(&lexed.tokens, 18);
        parser.synchronize(&[TokenKind::Dot], ITEM_KEYWORDS);
        assert!(parser.at(TokenKind::BindPubKey));
    }
}
