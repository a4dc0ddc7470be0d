//! Program Item Parser
//!
//! 顶层条目：`says` 陈述、查询、密钥绑定、导入

use super::helpers::{unquote, Abort, PResult, Parser, ITEM_KEYWORDS};
use crate::ast::{ImportAssertion, Item, KeyBind, Program, Query};
use crate::lexer::TokenKind;

impl Parser<'_> {
    /// program := (saysAssertion | query | keyBind | importAssertion)+
    pub(crate) fn program(&mut self) -> Program {
        let mut program = Program::default();
        if self.at_end() {
            self.unexpected("a program item");
            return program;
        }

        while !self.at_end() {
            let start = self.position();
            match self.item() {
                Ok(item) => program.items.push(item),
                Err(Abort) => {
                    self.synchronize(&[TokenKind::Dot, TokenKind::RBrace], ITEM_KEYWORDS);
                    // 停在关键字前且一个词法单元都没消费时强制前进
                    if self.position() == start {
                        self.bump();
                    }
                }
            }
        }

        tracing::debug!(items = program.items.len(), "parsed program");
        program
    }

    fn item(&mut self) -> PResult<Item> {
        match self.peek_kind() {
            Some(TokenKind::Import) => self.import().map(Item::Import),
            Some(TokenKind::BindPrivKey | TokenKind::BindPubKey) => {
                self.key_bind().map(Item::KeyBind)
            }
            Some(TokenKind::Id) if self.nth_at(1, TokenKind::Eq) => self.query().map(Item::Query),
            Some(TokenKind::Id) => self.says_assertion().map(Item::Says),
            _ => Err(self.unexpected("a program item")),
        }
    }

    /// keyBind := (BINDPRIVKEY | BINDPUBKEY) principal ID
    fn key_bind(&mut self) -> PResult<KeyBind> {
        let is_pub = self.at(TokenKind::BindPubKey);
        self.bump();

        let principal = self.principal()?;
        let key_id = unquote(&self.expect_id()?);
        Ok(if is_pub {
            KeyBind::Pub { principal, key_id }
        } else {
            KeyBind::Priv { principal, key_id }
        })
    }

    /// query := ID '=' QUERY principal SAYS fact '?'
    fn query(&mut self) -> PResult<Query> {
        let id = self.expect_id()?;
        self.expect(TokenKind::Eq)?;
        self.expect(TokenKind::Query)?;
        let speaker = self.principal()?;
        self.expect(TokenKind::Says)?;
        let fact = self.fact()?;
        self.expect_closing(TokenKind::Question);

        Ok(Query { id, speaker, fact })
    }

    /// importAssertion := IMPORT principal SAYS ID
    fn import(&mut self) -> PResult<ImportAssertion> {
        self.expect(TokenKind::Import)?;
        let speaker = self.principal()?;
        self.expect(TokenKind::Says)?;
        let id = unquote(&self.expect_id()?);

        Ok(ImportAssertion { speaker, id })
    }
}
