//! Assertion Parser
//!
//! 断言（简单事实 / Horn 子句）与 `says` 陈述

use super::helpers::{unquote, Abort, PResult, Parser};
use crate::ast::{Assertion, SaysAssertion};
use crate::lexer::TokenKind;

/// 花括号块内恢复时停在这些词法单元前面
const BLOCK_BOUNDARY: &[TokenKind] = &[
    TokenKind::RBrace,
    TokenKind::Import,
    TokenKind::BindPrivKey,
    TokenKind::BindPubKey,
];

impl Parser<'_> {
    /// assertion := fact '.' | fact ':-' flatFact (',' flatFact)* '.'
    pub(crate) fn assertion(&mut self) -> PResult<Assertion> {
        let head = self.fact()?;

        if self.eat(TokenKind::Turnstile) {
            let mut body = vec![self.flat_fact()?];
            while self.eat(TokenKind::Comma) {
                body.push(self.flat_fact()?);
            }
            self.expect_closing(TokenKind::Dot);
            return Ok(Assertion::HornClause { head, body });
        }

        self.expect_closing(TokenKind::Dot);
        Ok(Assertion::Simple(head))
    }

    /// saysAssertion := principal SAYS (assertion | '{' assertion+ '}') (EXPORT ID)? ['.']
    ///
    /// 以 `}` 或导出标识结尾时允许再跟一个 `.`。
    pub(crate) fn says_assertion(&mut self) -> PResult<SaysAssertion> {
        let speaker = self.principal()?;
        self.expect(TokenKind::Says)?;

        let braced = self.at(TokenKind::LBrace);
        let assertions = if braced {
            self.assertion_block()?
        } else {
            vec![self.assertion()?]
        };

        let export = if self.eat(TokenKind::ExportTo) {
            Some(unquote(&self.expect_id()?))
        } else {
            None
        };

        if braced || export.is_some() {
            self.eat(TokenKind::Dot);
        }

        Ok(SaysAssertion {
            speaker,
            assertions,
            export,
        })
    }

    /// '{' assertion+ '}'
    ///
    /// 单条断言出错只跳到下一个 `.`，块内其余断言照常解析。
    fn assertion_block(&mut self) -> PResult<Vec<Assertion>> {
        self.expect(TokenKind::LBrace)?;
        if self.at(TokenKind::RBrace) {
            return Err(self.unexpected("an assertion"));
        }

        let mut assertions = Vec::new();
        while !self.at_end() && !self.at_any(BLOCK_BOUNDARY) {
            match self.assertion() {
                Ok(assertion) => assertions.push(assertion),
                Err(Abort) => self.synchronize(&[TokenKind::Dot], BLOCK_BOUNDARY),
            }
        }

        // 全部失败：错误已记录，交给条目级恢复吃掉 `}`
        if assertions.is_empty() {
            return Err(Abort);
        }

        self.expect_closing(TokenKind::RBrace);
        Ok(assertions)
    }
}
