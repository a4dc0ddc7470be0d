use super::fact::{Fact, FlatFact, Principal};
use serde::{Deserialize, Serialize};

// 一条断言: 简单事实 或 Horn 子句
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assertion {
    // p(x).
    Simple(Fact),
    // head :- body1, body2.  (body 至少一项)
    HornClause { head: Fact, body: Vec<FlatFact> },
}

impl Assertion {
    pub fn head(&self) -> &Fact {
        match self {
            Assertion::Simple(fact) => fact,
            Assertion::HornClause { head, .. } => head,
        }
    }
}

// 主体的陈述: Admin says p(x).  或  Admin says { ... } exportTo "file"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaysAssertion {
    pub speaker: Principal,
    pub assertions: Vec<Assertion>,
    pub export: Option<String>, // 去掉引号后的导出目标
}

// 密钥绑定: BindPrivKey Admin "key_file"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyBind {
    Priv { principal: Principal, key_id: String },
    Pub { principal: Principal, key_id: String },
}

impl KeyBind {
    pub fn principal(&self) -> &Principal {
        match self {
            KeyBind::Priv { principal, .. } | KeyBind::Pub { principal, .. } => principal,
        }
    }

    pub fn key_id(&self) -> &str {
        match self {
            KeyBind::Priv { key_id, .. } | KeyBind::Pub { key_id, .. } => key_id,
        }
    }

    pub fn is_pub(&self) -> bool {
        matches!(self, KeyBind::Pub { .. })
    }
}

// 命名查询: res = query Admin says p(a)?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub id: String,
    pub speaker: Principal,
    pub fact: Fact,
}

// 导入其他主体的陈述: import Admin says "admin_claims"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportAssertion {
    pub speaker: Principal,
    pub id: String,
}
