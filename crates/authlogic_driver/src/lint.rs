//! Quote Lint
//!
//! 标识符两侧的引号各自可选，`"abc` 和 `abc"` 都能通过解析。
//! 这里把只有一侧引号的主体名和谓词参数报告为警告，不影响检查结果。

use authlogic_diagnostics::Diagnostic;
use authlogic_syntax::ast::{Predicate, Principal, Program, Visitor};

/// 只有一侧带引号
pub fn is_unbalanced(text: &str) -> bool {
    text.starts_with('"') != text.ends_with('"')
}

#[derive(Default)]
struct QuoteLint {
    seen: Vec<String>,
}

impl QuoteLint {
    fn check(&mut self, text: &str) {
        if is_unbalanced(text) && !self.seen.iter().any(|s| s == text) {
            self.seen.push(text.to_string());
        }
    }
}

impl Visitor for QuoteLint {
    fn visit_principal(&mut self, principal: &Principal) {
        self.check(&principal.name);
    }

    fn visit_predicate(&mut self, predicate: &Predicate) {
        for arg in &predicate.args {
            self.check(arg);
        }
    }
}

/// 每个可疑标识符报告一次，按首次出现顺序
pub fn lint_program(program: &Program) -> Vec<Diagnostic> {
    let mut lint = QuoteLint::default();
    lint.visit_program(program);

    lint.seen
        .into_iter()
        .map(|text| {
            let bare = text.trim_matches('"');
            Diagnostic::warning(format!("identifier `{}` has an unbalanced quote", text))
                .with_note("quotes are kept as part of the name")
                .suggest(format!("write \"{}\" or {}", bare, bare))
        })
        .collect()
}
