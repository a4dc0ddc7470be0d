use super::*;

// 默认实现只做遍历，覆盖需要的方法即可
// 下游的规则翻译在这里挂接
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_item(&mut self, item: &Item) {
        walk_item(self, item);
    }

    fn visit_assertion(&mut self, assertion: &Assertion) {
        walk_assertion(self, assertion);
    }

    fn visit_fact(&mut self, fact: &Fact) {
        walk_fact(self, fact);
    }

    fn visit_flat_fact(&mut self, flat: &FlatFact) {
        walk_flat_fact(self, flat);
    }

    fn visit_principal(&mut self, _principal: &Principal) {}

    fn visit_predicate(&mut self, _predicate: &Predicate) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for item in &program.items {
        visitor.visit_item(item);
    }
}

pub fn walk_item<V: Visitor + ?Sized>(visitor: &mut V, item: &Item) {
    match item {
        Item::Says(says) => {
            visitor.visit_principal(&says.speaker);
            for assertion in &says.assertions {
                visitor.visit_assertion(assertion);
            }
        }
        Item::Query(query) => {
            visitor.visit_principal(&query.speaker);
            visitor.visit_fact(&query.fact);
        }
        Item::KeyBind(bind) => visitor.visit_principal(bind.principal()),
        Item::Import(import) => visitor.visit_principal(&import.speaker),
    }
}

pub fn walk_assertion<V: Visitor + ?Sized>(visitor: &mut V, assertion: &Assertion) {
    match assertion {
        Assertion::Simple(fact) => visitor.visit_fact(fact),
        Assertion::HornClause { head, body } => {
            visitor.visit_fact(head);
            for flat in body {
                visitor.visit_flat_fact(flat);
            }
        }
    }
}

// canSay 链用循环展开，深度不受调用栈限制
pub fn walk_fact<V: Visitor + ?Sized>(visitor: &mut V, fact: &Fact) {
    for delegate in fact.delegates() {
        visitor.visit_principal(delegate);
    }
    visitor.visit_flat_fact(fact.leaf());
}

pub fn walk_flat_fact<V: Visitor + ?Sized>(visitor: &mut V, flat: &FlatFact) {
    match flat {
        FlatFact::Principal { principal, phrase } => {
            visitor.visit_principal(principal);
            match phrase {
                VerbPhrase::Predicate(pred) => visitor.visit_predicate(pred),
                VerbPhrase::ActsAs(other) => visitor.visit_principal(other),
            }
        }
        FlatFact::Predicate(pred) => visitor.visit_predicate(pred),
    }
}

/// 按首次出现顺序收集程序中提到的所有主体名
///
/// 下游用它决定需要哪些密钥和导入。
#[derive(Debug, Default)]
pub struct PrincipalCollector {
    names: Vec<String>,
}

impl PrincipalCollector {
    pub fn collect(program: &Program) -> Vec<String> {
        let mut collector = Self::default();
        collector.visit_program(program);
        collector.names
    }
}

impl Visitor for PrincipalCollector {
    fn visit_principal(&mut self, principal: &Principal) {
        if !self.names.iter().any(|n| n == &principal.name) {
            self.names.push(principal.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PredicateCounter {
        names: Vec<String>,
    }

    impl Visitor for PredicateCounter {
        fn visit_predicate(&mut self, predicate: &Predicate) {
            self.names.push(predicate.name.clone());
        }
    }

    fn sample() -> Program {
        Program::new(vec![
            Item::Says(SaysAssertion {
                speaker: Principal::new("Admin"),
                assertions: vec![
                    Assertion::Simple(Fact::can_say(
                        Principal::new("Bob"),
                        Fact::Flat(FlatFact::Principal {
                            principal: Principal::new("Carol"),
                            phrase: VerbPhrase::Predicate(Predicate::new("read", ["doc"])),
                        }),
                    )),
                    Assertion::HornClause {
                        head: Fact::Flat(Predicate::new("p", ["x"]).into()),
                        body: vec![FlatFact::Principal {
                            principal: Principal::new("Dave"),
                            phrase: VerbPhrase::ActsAs(Principal::new("Admin")),
                        }],
                    },
                ],
                export: None,
            }),
            Item::KeyBind(KeyBind::Pub {
                principal: Principal::new("Eve"),
                key_id: "eve".to_string(),
            }),
        ])
    }

    #[test]
    fn test_principal_collector() {
        let names = PrincipalCollector::collect(&sample());
        assert_eq!(names, vec!["Admin", "Bob", "Carol", "Dave", "Eve"]);
    }

    #[test]
    fn test_custom_visitor() {
        let mut counter = PredicateCounter::default();
        counter.visit_program(&sample());
        assert_eq!(counter.names, vec!["read", "p"]);
    }
}
