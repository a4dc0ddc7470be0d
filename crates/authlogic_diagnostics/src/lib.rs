//! Authlogic Diagnostics
//!
//! 授权逻辑工具链共用的诊断数据与输出。解析器只产生 [`Diagnostic`] 数据，
//! 是否打印、打印成什么样由调用方通过 [`Emitter`] 决定。
//!
//! - 没有源码时输出 `error: ...` 加 `-->` 位置的简短摘要（`colored`）
//! - 有源码时用 `ariadne` 渲染带下划线的报告
//! - [`DiagnosticSink`] 跨文件汇总，[`Summary`] 给出错误与警告计数
//!
//! ```rust
//! use authlogic_diagnostics::{line_col, Diagnostic, DiagnosticSink, Emitter};
//!
//! let source = "p(x) :- q(x), r(x)";
//! let mut sink = DiagnosticSink::new();
//! sink.add(
//!     Diagnostic::error("expected '.', found end of input")
//!         .span(18..18)
//!         .suggest("insert '.'"),
//! );
//!
//! assert_eq!(line_col(source, 18), (1, 19));
//! assert_eq!(sink.summary().to_string(), "1 error, 0 warnings");
//!
//! let text = Emitter::without_colors().render_plain(&sink.diagnostics()[0], Some(source));
//! assert!(text.contains("--> <input>:1:19"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod level;
pub mod sink;
pub mod span;

pub use diagnostic::{Diagnostic, Suggestion};
pub use emitter::Emitter;
pub use level::DiagnosticLevel;
pub use sink::{DiagnosticSink, Summary};
pub use span::{line_col, Span};
