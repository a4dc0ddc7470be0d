//! Driver Errors
//!
//! 驱动层的错误类型，集成统一诊断系统

use authlogic_diagnostics::{Diagnostic, DiagnosticSink};
use thiserror::Error;

/// 驱动错误
#[derive(Debug, Error)]
pub enum DriverError {
    /// 源文件无法读取
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 源码存在词法或语法错误
    #[error("{} in {}", count_errors(.count), .files.join(", "))]
    Invalid { count: usize, files: Vec<String> },
}

impl DriverError {
    /// 转换为诊断并收集到 DiagnosticSink
    pub fn collect_to_sink(&self, sink: &mut DiagnosticSink) {
        match self {
            DriverError::Io { path, source } => {
                sink.add(Diagnostic::error(format!("cannot read file: {}", source)).with_file(path));
            }
            DriverError::Invalid { .. } => {
                sink.add(Diagnostic::error(format!("aborting due to {}", self)));
            }
        }
    }
}

fn count_errors(count: &usize) -> String {
    match count {
        1 => "1 error".to_string(),
        n => format!("{} errors", n),
    }
}

/// 驱动结果类型
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_pluralizes() {
        let one = DriverError::Invalid {
            count: 1,
            files: vec!["a.authlogic".to_string()],
        };
        assert_eq!(one.to_string(), "1 error in a.authlogic");

        let many = DriverError::Invalid {
            count: 3,
            files: vec!["a.authlogic".to_string(), "b.authlogic".to_string()],
        };
        assert_eq!(many.to_string(), "3 errors in a.authlogic, b.authlogic");
    }

    #[test]
    fn test_io_error_goes_to_sink_with_file() {
        let err = DriverError::Io {
            path: "missing.authlogic".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let mut sink = DiagnosticSink::new();
        err.collect_to_sink(&mut sink);

        assert!(sink.has_errors());
        assert_eq!(sink.diagnostics()[0].file.as_deref(), Some("missing.authlogic"));
    }
}
