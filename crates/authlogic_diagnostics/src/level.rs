//! DiagnosticLevel - 诊断级别

use colored::{Color, ColoredString, Colorize};
use std::fmt;

/// 诊断级别，按严重程度排序：`Note < Warning < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 补充说明
    Note,
    /// 可疑但合法的写法，例如只有一侧引号的标识符
    Warning,
    /// 源码无法被完整解析
    Error,
}

impl DiagnosticLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Note => Color::BrightBlack,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// 终端里带颜色的级别名
    pub fn colored_name(&self) -> ColoredString {
        self.name().color(self.color()).bold()
    }

    pub(crate) fn report_kind(&self) -> ariadne::ReportKind<'static> {
        match self {
            Self::Note => ariadne::ReportKind::Advice,
            Self::Warning => ariadne::ReportKind::Warning,
            Self::Error => ariadne::ReportKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::Error
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
