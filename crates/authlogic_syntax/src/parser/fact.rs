//! Fact Parser
//!
//! 主体、谓词、动词短语、平坦事实与 canSay 链

use super::helpers::{PResult, Parser};
use crate::ast::{Fact, FlatFact, Predicate, Principal, VerbPhrase};
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// principal := ID
    pub(crate) fn principal(&mut self) -> PResult<Principal> {
        self.expect_id().map(Principal::new)
    }

    /// predicate := [NEG] ID '(' ID (',' ID)* ')'
    pub(crate) fn predicate(&mut self) -> PResult<Predicate> {
        let negated = self.eat(TokenKind::Neg);
        let name = self.expect_id()?;
        self.expect(TokenKind::LParen)?;

        let mut args = vec![self.expect_id()?];
        while self.eat(TokenKind::Comma) {
            args.push(self.expect_id()?);
        }
        self.expect_closing(TokenKind::RParen);

        Ok(Predicate {
            negated,
            name,
            args,
        })
    }

    /// flatFact := principal verbphrase | predicate
    ///
    /// `!` 开头一定是裸谓词；否则看 ID 后面的词法单元：
    /// `canActAs` 或另一个谓词开头说明 ID 是主体，`(` 说明 ID 是谓词名。
    pub(crate) fn flat_fact(&mut self) -> PResult<FlatFact> {
        match self.peek_kind() {
            Some(TokenKind::Neg) => Ok(FlatFact::Predicate(self.predicate()?)),
            Some(TokenKind::Id) => match self.nth_kind(1) {
                Some(TokenKind::LParen) => Ok(FlatFact::Predicate(self.predicate()?)),
                Some(TokenKind::CanActAs) => {
                    let principal = self.principal()?;
                    self.bump();
                    let target = self.principal()?;
                    Ok(FlatFact::Principal {
                        principal,
                        phrase: VerbPhrase::ActsAs(target),
                    })
                }
                Some(TokenKind::Id) | Some(TokenKind::Neg) => {
                    let principal = self.principal()?;
                    let pred = self.predicate()?;
                    Ok(FlatFact::Principal {
                        principal,
                        phrase: VerbPhrase::Predicate(pred),
                    })
                }
                _ => {
                    self.bump();
                    Err(self.unexpected("'(', canActAs or a predicate"))
                }
            },
            _ => Err(self.unexpected("a principal or predicate")),
        }
    }

    /// fact := flatFact | principal CANSAY fact
    ///
    /// 先收集 `ID canSay` 前缀，再从内向外包装，嵌套深度不占用调用栈。
    pub(crate) fn fact(&mut self) -> PResult<Fact> {
        let mut delegates = Vec::new();
        while self.at(TokenKind::Id) && self.nth_at(1, TokenKind::CanSay) {
            delegates.push(self.principal()?);
            self.bump();
        }

        let leaf = self.flat_fact()?;
        Ok(Fact::chain(delegates, leaf))
    }
}
