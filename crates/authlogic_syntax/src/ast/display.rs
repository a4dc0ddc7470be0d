//! 把 AST 打印回源码
//!
//! 输出是规范形式：逗号后一个空格，多条断言使用花括号块，
//! 导出目标和密钥等外部标识一律加引号。重新解析输出得到相等的 AST。

use super::*;
use std::fmt::{self, Display};

impl Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}

impl Display for VerbPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbPhrase::Predicate(pred) => write!(f, "{}", pred),
            VerbPhrase::ActsAs(principal) => write!(f, "canActAs {}", principal),
        }
    }
}

impl Display for FlatFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatFact::Principal { principal, phrase } => write!(f, "{} {}", principal, phrase),
            FlatFact::Predicate(pred) => write!(f, "{}", pred),
        }
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for delegate in self.delegates() {
            write!(f, "{} canSay ", delegate)?;
        }
        write!(f, "{}", self.leaf())
    }
}

impl Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Assertion::Simple(fact) => fact.to_string(),
            Assertion::HornClause { head, body } => {
                let body: Vec<String> = body.iter().map(ToString::to_string).collect();
                format!("{} :- {}", head, body.join(", "))
            }
        };
        // 未加引号的 ID 会吞掉紧跟的 '.'
        if text.ends_with('.') {
            write!(f, "{} .", text)
        } else {
            write!(f, "{}.", text)
        }
    }
}

impl Display for SaysAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.assertions.as_slice() {
            [single] => write!(f, "{} says {}", self.speaker, single)?,
            many => {
                writeln!(f, "{} says {{", self.speaker)?;
                for assertion in many {
                    writeln!(f, "    {}", assertion)?;
                }
                write!(f, "}}")?;
            }
        }
        if let Some(export) = &self.export {
            write!(f, " exportTo \"{}\"", export)?;
        }
        Ok(())
    }
}

impl Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_pub() { "BindPubKey" } else { "BindPrivKey" };
        write!(f, "{} {} \"{}\"", keyword, self.principal(), self.key_id())
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = query {} says {}?", self.id, self.speaker, self.fact)
    }
}

impl Display for ImportAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {} says \"{}\"", self.speaker, self.id)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Says(says) => write!(f, "{}", says),
            Item::Query(query) => write!(f, "{}", query),
            Item::KeyBind(bind) => write!(f, "{}", bind),
            Item::Import(import) => write!(f, "{}", import),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}
