//! Parser Module
//!
//! 手写递归下降解析器。每个分支点最多看两个词法单元，
//! 不回溯，所以耗时与词法单元数量成线性关系。
//!
//! 出错时记录 [`SyntaxError`] 并恢复：缺失的闭合符号（`.` `)` `}` `?`）
//! 视为已插入，其余错误放弃当前条目并跳到安全边界后继续。

mod assertion;
mod fact;
mod helpers;
mod item;

use crate::ast::{Assertion, Fact, Program};
use crate::error::{ParseError, SyntaxError};
use crate::lexer::{tokenize, SpannedToken};
use helpers::Parser;

/// 解析结果：AST（可能不完整）加上按位置排序的全部错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput<T> {
    pub ast: T,
    pub errors: Vec<ParseError>,
}

impl<T> ParseOutput<T> {
    /// 没有任何错误时才算成功
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<T, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.ast)
        } else {
            Err(self.errors)
        }
    }
}

/// 主入口：解析词法单元序列
///
/// 每次调用都使用独立的解析状态，可以并发解析互不相关的输入。
/// 输入结束位置取最后一个词法单元的末尾；末尾有注释或空白时，
/// 与 [`parse_program`] 报告的位置不同，需要一致时用 [`parse_with_eof`]。
pub fn parse(tokens: &[SpannedToken]) -> (Program, Vec<SyntaxError>) {
    let eof = tokens.last().map(|t| t.span.end).unwrap_or(0);
    parse_with_eof(tokens, eof)
}

/// 同 [`parse`]，但由调用方给出输入结束的字节偏移，通常是源码长度
pub fn parse_with_eof(tokens: &[SpannedToken], eof: usize) -> (Program, Vec<SyntaxError>) {
    let mut parser = Parser::new(tokens, eof);
    let program = parser.program();
    (program, parser.finish())
}

/// 从源码解析整个程序
pub fn parse_program(source: &str) -> ParseOutput<Program> {
    run(source, |parser| parser.program())
}

/// 解析单个事实，例如 `A canSay B canActAs C`
///
/// 事实解析成功但后面还有词法单元时报告多余输入。
pub fn parse_fact(source: &str) -> ParseOutput<Option<Fact>> {
    run(source, |parser| {
        let fact = parser.fact().ok();
        if fact.is_some() {
            parser.expect_end();
        }
        fact
    })
}

/// 解析单条断言，例如 `p(x) :- q(x), r(x).`
pub fn parse_assertion(source: &str) -> ParseOutput<Option<Assertion>> {
    run(source, |parser| {
        let assertion = parser.assertion().ok();
        if assertion.is_some() {
            parser.expect_end();
        }
        assertion
    })
}

fn run<T>(source: &str, production: impl FnOnce(&mut Parser<'_>) -> T) -> ParseOutput<T> {
    let lexed = tokenize(source);
    let mut parser = Parser::new(&lexed.tokens, source.len());
    let ast = production(&mut parser);
    let syntax_errors = parser.finish();

    let mut errors: Vec<ParseError> = lexed
        .errors
        .into_iter()
        .map(ParseError::from)
        .chain(syntax_errors.into_iter().map(ParseError::from))
        .collect();
    // 稳定排序：同一位置上词法错误排在前面
    errors.sort_by_key(|e| e.span().start);

    tracing::debug!(errors = errors.len(), "parsed source");
    ParseOutput { ast, errors }
}
