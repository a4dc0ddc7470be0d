//! Diagnostic - 诊断信息
//!
//! 一条诊断 = 级别 + 消息 + 可选的位置、文件、标签、注释和修复建议。
//! 全部字段公开，构造时使用链式方法。

use crate::level::DiagnosticLevel;
use crate::span::Span;

/// 修复建议，`replacement` 是可以直接插入源码的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub message: String,
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    pub fn with_replacement(self, replacement: impl Into<String>) -> Self {
        Self {
            replacement: Some(replacement.into()),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// 字节范围；空范围表示某个位置（例如输入末尾）
    pub span: Option<Span>,
    pub file: Option<String>,
    /// 显示在源码下划线旁的短文字
    pub label: Option<String>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: None,
            file: None,
            label: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Note, message)
    }

    pub fn span(self, span: Span) -> Self {
        Self {
            span: Some(span),
            ..self
        }
    }

    pub fn with_file(self, file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..self
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// 只有文字、没有替换文本的建议
    pub fn suggest(self, message: impl Into<String>) -> Self {
        self.with_suggestion(Suggestion::new(message))
    }
}
