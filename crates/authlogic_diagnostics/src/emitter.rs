//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化输出。没有源码时输出简短摘要，
//! 有源码时用 ariadne 渲染带下划线的报告。

use crate::diagnostic::Diagnostic;
use crate::span::line_col;
use ariadne::{Color, Config, Label, Report, ReportBuilder, Source};
use colored::*;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::ops::Range;

/// 诊断输出器
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// 输出单个诊断
    pub fn emit(&self, diagnostic: &Diagnostic) {
        if self.use_colors {
            self.emit_colored(diagnostic);
        } else {
            eprint!("{}", self.render_plain(diagnostic, None));
        }
    }

    /// 输出所有诊断
    pub fn emit_all(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
            eprintln!();
        }
    }

    /// 结合源码输出诊断（ariadne 渲染）
    pub fn emit_with_source(&self, diagnostic: &Diagnostic, source: &str) -> io::Result<()> {
        self.write_report(diagnostic, source, io::stderr())
    }

    /// 把 ariadne 报告写入任意输出
    pub fn write_report<W: Write>(
        &self,
        diagnostic: &Diagnostic,
        source: &str,
        out: W,
    ) -> io::Result<()> {
        let id: &str = diagnostic.file.as_deref().unwrap_or("<input>");
        let offset = diagnostic
            .span
            .as_ref()
            .map(|s| s.start.min(source.len()))
            .unwrap_or(0);

        let mut builder: ReportBuilder<(&str, Range<usize>)> =
            Report::build(diagnostic.level.report_kind(), id, offset)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message);

        if let Some(span) = &diagnostic.span {
            let mut label = Label::new((id, Self::label_range(span, source.len())));
            if let Some(text) = &diagnostic.label {
                label = label.with_message(text);
            }
            if self.use_colors {
                label = label.with_color(Color::Red);
            }
            builder = builder.with_label(label);
        }

        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            match &suggestion.replacement {
                Some(replacement) => {
                    builder = builder
                        .with_help(format!("{} (try: {})", suggestion.message, replacement))
                }
                None => builder = builder.with_help(&suggestion.message),
            }
        }

        builder
            .finish()
            .write((id, Source::from(source.to_string())), out)
    }

    /// 空范围扩展为一个字符，位于输入末尾时退回到最后一个字符
    fn label_range(span: &Range<usize>, len: usize) -> Range<usize> {
        let start = span.start.min(len);
        let end = span.end.clamp(start, len);
        if start < end {
            start..end
        } else if start < len {
            start..start + 1
        } else {
            len.saturating_sub(1)..len
        }
    }

    /// 渲染纯文本诊断
    ///
    /// 提供源码时位置显示为 `file:line:col`，否则显示字节范围。
    pub fn render_plain(&self, diagnostic: &Diagnostic, source: Option<&str>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", diagnostic.level, diagnostic.message);

        if let Some(location) = Self::location(diagnostic, source) {
            let _ = writeln!(out, "  --> {}", location);
        }

        for note in &diagnostic.notes {
            let _ = writeln!(out, "  = note: {}", note);
        }

        for suggestion in &diagnostic.suggestions {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
            if let Some(replacement) = &suggestion.replacement {
                let _ = writeln!(out, "        try: {}", replacement);
            }
        }
        out
    }

    fn location(diagnostic: &Diagnostic, source: Option<&str>) -> Option<String> {
        let file = diagnostic.file.as_deref();
        match (&diagnostic.span, source) {
            (Some(span), Some(src)) => {
                let (line, col) = line_col(src, span.start);
                Some(format!("{}:{}:{}", file.unwrap_or("<input>"), line, col))
            }
            (Some(span), None) => Some(format!(
                "{}@{}..{}",
                file.unwrap_or("<input>"),
                span.start,
                span.end
            )),
            (None, _) => file.map(str::to_owned),
        }
    }

    /// 输出带颜色的诊断
    fn emit_colored(&self, diagnostic: &Diagnostic) {
        eprintln!(
            "{}: {}",
            diagnostic.level.colored_name(),
            diagnostic.message.bold()
        );

        if let Some(location) = Self::location(diagnostic, None) {
            eprintln!("  {} {}", "-->".blue().bold(), location);
        }

        for note in &diagnostic.notes {
            eprintln!(
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }

        for suggestion in &diagnostic.suggestions {
            eprintln!(
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", suggestion.message).green()
            );
            if let Some(replacement) = &suggestion.replacement {
                eprintln!("        try: {}", replacement.green().italic());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_creation() {
        assert!(Emitter::new().use_colors());
        assert!(!Emitter::without_colors().use_colors());
    }

    #[test]
    fn test_render_plain_with_source() {
        let emitter = Emitter::without_colors();
        let source = "Admin says p(a)\nBob says q(b).";
        let diag = Diagnostic::error("expected '.', found ID")
            .span(16..19)
            .with_file("policy.authlogic")
            .with_note("assertions end with '.'")
            .suggest("add '.'");

        let text = emitter.render_plain(&diag, Some(source));
        assert!(text.starts_with("error: expected '.', found ID\n"));
        assert!(text.contains("--> policy.authlogic:2:1"));
        assert!(text.contains("= note: assertions end with '.'"));
        assert!(text.contains("= help: add '.'"));
    }

    #[test]
    fn test_render_plain_without_source() {
        let emitter = Emitter::without_colors();
        let diag = Diagnostic::error("unterminated block comment").span(4..9);

        let text = emitter.render_plain(&diag, None);
        assert!(text.contains("--> <input>@4..9"));
    }

    #[test]
    fn test_write_report_mentions_message() {
        let emitter = Emitter::without_colors();
        let source = "Admin says p(a) Bob says q(b).";
        let diag = Diagnostic::error("expected '.', found ID")
            .span(16..19)
            .with_label("expected '.' before this");

        let mut buf = Vec::new();
        emitter.write_report(&diag, source, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("expected '.', found ID"));
    }

    #[test]
    fn test_label_range_at_end_of_input() {
        assert_eq!(Emitter::label_range(&(15..15), 15), 14..15);
        assert_eq!(Emitter::label_range(&(3..3), 15), 3..4);
        assert_eq!(Emitter::label_range(&(0..0), 0), 0..0);
    }

    #[test]
    fn test_emit_basic() {
        // 只确保不会 panic
        let emitter = Emitter::without_colors();
        emitter.emit(&Diagnostic::error("test error").span(0..1));
    }
}
