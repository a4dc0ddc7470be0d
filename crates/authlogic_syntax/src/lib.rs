//! Authlogic Syntax
//!
//! 授权逻辑语言的前端：词法分析、AST 与语法分析。
//!
//! # 流程
//!
//! 源码 -> [`tokenize`] -> [`SpannedToken`] 序列 -> [`parse`] -> [`ast::Program`]
//!
//! 两个阶段都不会在第一个错误处停止：返回尽力构造的 AST 以及按位置排序的错误列表。
//!
//! # 示例
//!
//! ```rust
//! use authlogic_syntax::parse_program;
//!
//! let out = parse_program("Admin says p(a, b).");
//! assert!(out.is_ok());
//! assert_eq!(out.ast.to_string(), "Admin says p(a, b).\n");
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{Found, LexError, ParseError, SyntaxError};
pub use lexer::{tokenize, LexOutput, SpannedToken, Token, TokenKind};
pub use parser::{
    parse, parse_assertion, parse_fact, parse_program, parse_with_eof, ParseOutput,
};
