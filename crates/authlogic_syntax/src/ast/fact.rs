use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// 主体: Admin, "jack"
// 名字保留源码中的原样文本，包括引号
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub name: String,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// 谓词: p(a, b) 或 !p(a)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub negated: bool,
    pub name: String,
    pub args: Vec<String>, // 至少一个参数，顺序有意义
}

impl Predicate {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            negated: false,
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

// 对主体所说的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerbPhrase {
    // Admin p(x)
    Predicate(Predicate),
    // Admin canActAs Bob
    ActsAs(Principal),
}

// 不含 canSay 嵌套的事实
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatFact {
    // 主体 + 动词短语: Admin canActAs Bob
    Principal {
        principal: Principal,
        phrase: VerbPhrase,
    },
    // 裸谓词: p(x)
    Predicate(Predicate),
}

impl FlatFact {
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            FlatFact::Predicate(p) => Some(p),
            FlatFact::Principal {
                phrase: VerbPhrase::Predicate(p),
                ..
            } => Some(p),
            FlatFact::Principal { .. } => None,
        }
    }
}

// 事实: 可以被 canSay 任意层嵌套（右结合）
// A canSay B canSay p(x) => CanSay(A, CanSay(B, Flat(p(x))))
//
// Clone、PartialEq、Debug、Drop 与序列化都按层循环处理，嵌套深度不受栈大小限制。
// JSON 形式是扁平的 { "delegates": [...], "leaf": ... }。
#[derive(Eq, Deserialize)]
#[serde(from = "FactRepr")]
pub enum Fact {
    Flat(FlatFact),
    CanSay { delegate: Principal, fact: Box<Fact> },
}

impl Fact {
    pub fn can_say(delegate: Principal, fact: Fact) -> Self {
        Fact::CanSay {
            delegate,
            fact: Box::new(fact),
        }
    }

    /// 由外到内的委托主体和最内层事实构造嵌套链
    pub fn chain<I>(delegates: I, leaf: FlatFact) -> Self
    where
        I: IntoIterator<Item = Principal>,
        I::IntoIter: DoubleEndedIterator,
    {
        delegates
            .into_iter()
            .rev()
            .fold(Fact::Flat(leaf), |inner, delegate| Fact::can_say(delegate, inner))
    }

    /// canSay 嵌套层数
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Fact::CanSay { fact, .. } = current {
            depth += 1;
            current = fact.as_ref();
        }
        depth
    }

    /// 最内层的平坦事实
    pub fn leaf(&self) -> &FlatFact {
        let mut current = self;
        loop {
            match current {
                Fact::Flat(flat) => return flat,
                Fact::CanSay { fact, .. } => current = fact.as_ref(),
            }
        }
    }

    /// 从外到内的委托主体
    pub fn delegates(&self) -> Vec<&Principal> {
        let mut out = Vec::new();
        let mut current = self;
        while let Fact::CanSay { delegate, fact } = current {
            out.push(delegate);
            current = fact.as_ref();
        }
        out
    }

    // 不分配内存的占位值，用于拆链
    fn placeholder() -> Self {
        Fact::Flat(FlatFact::Predicate(Predicate {
            negated: false,
            name: String::new(),
            args: Vec::new(),
        }))
    }
}

impl Clone for Fact {
    fn clone(&self) -> Self {
        Fact::chain(
            self.delegates().into_iter().cloned().collect::<Vec<_>>(),
            self.leaf().clone(),
        )
    }
}

impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        self.delegates() == other.delegates() && self.leaf() == other.leaf()
    }
}

impl fmt::Debug for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Flat(flat) => f.debug_tuple("Flat").field(flat).finish(),
            Fact::CanSay { .. } => f
                .debug_struct("CanSay")
                .field("delegates", &self.delegates())
                .field("leaf", self.leaf())
                .finish(),
        }
    }
}

impl Drop for Fact {
    fn drop(&mut self) {
        let mut next = match self {
            Fact::CanSay { fact, .. } => std::mem::replace(fact.as_mut(), Fact::placeholder()),
            Fact::Flat(_) => return,
        };
        // 每次取出下一层后旧节点只剩占位叶子，释放时不再递归
        while let Fact::CanSay { fact, .. } = &mut next {
            let inner = std::mem::replace(fact.as_mut(), Fact::placeholder());
            next = inner;
        }
    }
}

#[derive(Serialize)]
struct FactRef<'a> {
    delegates: Vec<&'a Principal>,
    leaf: &'a FlatFact,
}

#[derive(Deserialize)]
struct FactRepr {
    delegates: Vec<Principal>,
    leaf: FlatFact,
}

impl From<FactRepr> for Fact {
    fn from(repr: FactRepr) -> Self {
        Fact::chain(repr.delegates, repr.leaf)
    }
}

impl Serialize for Fact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FactRef {
            delegates: self.delegates(),
            leaf: self.leaf(),
        }
        .serialize(serializer)
    }
}

impl From<FlatFact> for Fact {
    fn from(flat: FlatFact) -> Self {
        Fact::Flat(flat)
    }
}

impl From<Predicate> for FlatFact {
    fn from(pred: Predicate) -> Self {
        FlatFact::Predicate(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(depth: usize) -> Fact {
        Fact::chain(
            (0..depth).map(|i| Principal::new(format!("P{}", i))),
            Predicate::new("p", ["x"]).into(),
        )
    }

    #[test]
    fn test_chain_nests_right() {
        let fact = chain(2);
        let expected = Fact::can_say(
            Principal::new("P0"),
            Fact::can_say(Principal::new("P1"), Fact::Flat(Predicate::new("p", ["x"]).into())),
        );
        assert_eq!(fact, expected);
        assert_eq!(fact.depth(), 2);
    }

    #[test]
    fn test_deep_chain_clone_compare_drop() {
        let fact = chain(200_000);
        let copy = fact.clone();
        assert_eq!(copy.depth(), 200_000);
        assert!(copy == fact);
        assert!(copy != chain(199_999));
        let debug = format!("{:?}", copy);
        assert!(debug.starts_with("CanSay { delegates: [Principal { name: \"P0\" }"));
        assert!(debug.ends_with(r#"leaf: Predicate(Predicate { negated: false, name: "p", args: ["x"] }) }"#));
        drop(copy);
        drop(fact);
    }

    #[test]
    fn test_flat_json_form() {
        let json = serde_json::to_value(chain(1)).unwrap();
        assert_eq!(json["delegates"][0]["name"], "P0");
        assert_eq!(json["leaf"]["Predicate"]["name"], "p");

        let back: Fact = serde_json::from_value(json).unwrap();
        assert_eq!(back, chain(1));
    }
}
