pub mod assertion;
pub mod display;
pub mod fact;
pub mod visitor;

// 重新导出核心类型，方便外部直接使用 authlogic_syntax::ast::Fact 等
pub use assertion::{Assertion, ImportAssertion, KeyBind, Query, SaysAssertion};
pub use fact::{Fact, FlatFact, Predicate, Principal, VerbPhrase};
pub use visitor::{PrincipalCollector, Visitor};

use serde::{Deserialize, Serialize};

// 顶层条目，按源码顺序保存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Says(SaysAssertion),
    Query(Query),
    KeyBind(KeyBind),
    Import(ImportAssertion),
}

// 整个程序的数据结构，解析器只追加，下游只读
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// 按顺序拼接多个程序（多文件编译）
    pub fn merge(programs: impl IntoIterator<Item = Program>) -> Self {
        Self {
            items: programs.into_iter().flat_map(|p| p.items).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn says_assertions(&self) -> impl Iterator<Item = &SaysAssertion> {
        self.items.iter().filter_map(|item| match item {
            Item::Says(says) => Some(says),
            _ => None,
        })
    }

    pub fn queries(&self) -> impl Iterator<Item = &Query> {
        self.items.iter().filter_map(|item| match item {
            Item::Query(query) => Some(query),
            _ => None,
        })
    }

    pub fn key_binds(&self) -> impl Iterator<Item = &KeyBind> {
        self.items.iter().filter_map(|item| match item {
            Item::KeyBind(bind) => Some(bind),
            _ => None,
        })
    }

    pub fn priv_binds(&self) -> impl Iterator<Item = &KeyBind> {
        self.key_binds().filter(|bind| !bind.is_pub())
    }

    pub fn pub_binds(&self) -> impl Iterator<Item = &KeyBind> {
        self.key_binds().filter(|bind| bind.is_pub())
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportAssertion> {
        self.items.iter().filter_map(|item| match item {
            Item::Import(import) => Some(import),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn says(speaker: &str, pred: &str) -> Item {
        Item::Says(SaysAssertion {
            speaker: Principal::new(speaker),
            assertions: vec![Assertion::Simple(Fact::Flat(
                Predicate::new(pred, ["x"]).into(),
            ))],
            export: None,
        })
    }

    #[test]
    fn test_views_keep_source_order() {
        let program = Program::new(vec![
            Item::KeyBind(KeyBind::Pub {
                principal: Principal::new("A"),
                key_id: "a_pub".to_string(),
            }),
            says("A", "p"),
            Item::KeyBind(KeyBind::Priv {
                principal: Principal::new("B"),
                key_id: "b_priv".to_string(),
            }),
            says("B", "q"),
        ]);

        let speakers: Vec<_> = program
            .says_assertions()
            .map(|s| s.speaker.name.as_str())
            .collect();
        assert_eq!(speakers, vec!["A", "B"]);
        assert_eq!(program.key_binds().count(), 2);
        assert_eq!(program.pub_binds().next().map(|b| b.key_id()), Some("a_pub"));
        assert_eq!(program.priv_binds().next().map(|b| b.key_id()), Some("b_priv"));
        assert_eq!(program.queries().count(), 0);
        assert_eq!(program.imports().count(), 0);
    }

    #[test]
    fn test_merge() {
        let first = Program::new(vec![says("A", "p")]);
        let second = Program::new(vec![says("B", "q"), says("C", "r")]);

        let merged = Program::merge(vec![first, second]);
        let speakers: Vec<_> = merged
            .says_assertions()
            .map(|s| s.speaker.name.clone())
            .collect();
        assert_eq!(speakers, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_fact_depth_and_leaf() {
        let leaf: FlatFact = Predicate::new("p", ["x"]).into();
        let fact = Fact::can_say(
            Principal::new("A"),
            Fact::can_say(Principal::new("B"), Fact::Flat(leaf.clone())),
        );

        assert_eq!(fact.depth(), 2);
        assert_eq!(fact.leaf(), &leaf);
        let delegates: Vec<_> = fact.delegates().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(delegates, vec!["A", "B"]);
    }
}
