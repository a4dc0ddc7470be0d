//! DiagnosticSink - 诊断收集器
//!
//! 汇总一次检查（可能跨多个文件）产生的全部诊断

use crate::diagnostic::Diagnostic;
use crate::level::DiagnosticLevel;
use std::fmt;

#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level.is_error())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 某一级别的诊断数量
    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticLevel::Warning)
    }

    /// 输出用的摘要，例如 `2 errors, 1 warning`
    pub fn summary(&self) -> Summary {
        Summary {
            errors: self.error_count(),
            warnings: self.warning_count(),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// 错误与警告计数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: usize, word: &str) -> String {
            if n == 1 {
                format!("1 {}", word)
            } else {
                format!("{} {}s", n, word)
            }
        }
        write!(
            f,
            "{}, {}",
            plural(self.errors, "error"),
            plural(self.warnings, "warning")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(sink.is_empty());
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut sink = DiagnosticSink::new();
        sink.add(Diagnostic::warning("identifier `\"abc` has an unbalanced quote"));
        sink.add(Diagnostic::note("n1"));

        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 1);
        assert_eq!(sink.count(DiagnosticLevel::Note), 1);
    }

    #[test]
    fn test_summary() {
        let mut sink = DiagnosticSink::new();
        sink.add(Diagnostic::error("e1"));
        sink.add(Diagnostic::error("e2"));
        sink.add(Diagnostic::warning("w1"));
        assert_eq!(sink.summary().to_string(), "2 errors, 1 warning");
        assert!(sink.has_errors());
        assert_eq!(sink.len(), 3);
    }
}
