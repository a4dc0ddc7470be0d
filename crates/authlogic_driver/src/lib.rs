//! Authlogic Driver
//!
//! 前端驱动模块：读取源文件、解析、把错误转换为诊断，并合并多个文件的程序。

pub mod error;
pub mod lint;

pub use error::{DriverError, DriverResult};
pub use lint::lint_program;

use authlogic_diagnostics::{Diagnostic, DiagnosticSink, Emitter};
use authlogic_syntax::ast::Program;
use authlogic_syntax::{parse_program, ParseError};
use std::io;

/// 单个源文件的解析结果
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// 文件路径，直接传入的源码为 None
    pub path: Option<String>,
    pub source: String,
    /// 尽力构造的 AST，出错时可能不完整
    pub program: Program,
    pub errors: Vec<ParseError>,
    /// 不影响结果的提示，例如只有一侧引号的标识符
    pub warnings: Vec<Diagnostic>,
}

impl SourceUnit {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 显示用的名字
    pub fn name(&self) -> &str {
        self.path.as_deref().unwrap_or("<input>")
    }

    /// 先错误后警告，已附带文件名
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(ParseError::to_diagnostic)
            .chain(self.warnings.iter().cloned())
            .map(|diag| match &self.path {
                Some(path) => diag.with_file(path),
                None => diag,
            })
            .collect()
    }

    /// 收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink) {
        sink.extend(self.diagnostics());
    }

    /// 结合源码输出全部诊断
    pub fn emit(&self, emitter: &Emitter) -> io::Result<()> {
        for diag in self.diagnostics() {
            emitter.emit_with_source(&diag, &self.source)?;
        }
        Ok(())
    }
}

/// 解析内存中的源码
///
/// # Example
/// ```
/// use authlogic_driver::check_source;
///
/// let unit = check_source("Admin says p(a).", None);
/// assert!(!unit.has_errors());
/// assert_eq!(unit.program.items.len(), 1);
/// ```
pub fn check_source(source: impl Into<String>, path: Option<&str>) -> SourceUnit {
    let source = source.into();
    let output = parse_program(&source);
    let warnings = lint_program(&output.ast);
    tracing::debug!(
        file = path.unwrap_or("<input>"),
        items = output.ast.items.len(),
        errors = output.errors.len(),
        warnings = warnings.len(),
        "checked source"
    );

    SourceUnit {
        path: path.map(str::to_string),
        source,
        program: output.ast,
        errors: output.errors,
        warnings,
    }
}

/// 读取源文件，失败时带上路径
pub fn read_source(path: &str) -> DriverResult<String> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_string(),
        source,
    })
}

/// 读取并解析文件；只有读取失败才返回错误
pub fn check_file(path: &str) -> DriverResult<SourceUnit> {
    let source = read_source(path)?;
    Ok(check_source(source, Some(path)))
}

/// 依次解析多个文件，保持给定顺序
pub fn check_files<S: AsRef<str>>(paths: &[S]) -> DriverResult<Vec<SourceUnit>> {
    paths.iter().map(|p| check_file(p.as_ref())).collect()
}

/// 把所有单元合并为一个程序
///
/// 任何单元有错误时返回 [`DriverError::Invalid`]，调用方应先输出各单元的诊断。
pub fn merge_units(units: &[SourceUnit]) -> DriverResult<Program> {
    let failed: Vec<&SourceUnit> = units.iter().filter(|u| u.has_errors()).collect();
    if !failed.is_empty() {
        return Err(DriverError::Invalid {
            count: failed.iter().map(|u| u.errors.len()).sum(),
            files: failed.iter().map(|u| u.name().to_string()).collect(),
        });
    }

    let program = Program::merge(units.iter().map(|u| u.program.clone()));
    tracing::debug!(units = units.len(), items = program.items.len(), "merged programs");
    Ok(program)
}
