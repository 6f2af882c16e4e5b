//! Parse-time node records.
//!
//! A [`MibNode`] names its parent by label only. The tree builder consumes
//! these records and moves their data into the tree.

use super::token::TokenKind;

/// Module identifier. Negative values mean "no module" or, in lookups,
/// "any module".
pub type ModuleId = i32;

/// Matches any module in lookups.
pub const ANY_MODULE: ModuleId = -1;

/// Labels of synthesised intermediate nodes start with this.
pub const ANONYMOUS_PREFIX: &str = "anonymous#";

/// True when `label` names a synthesised placeholder.
pub fn is_anonymous(label: &str) -> bool {
    label.starts_with(ANONYMOUS_PREFIX)
}

/// One `label(value)` of an enumerated INTEGER or BITS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub label: String,
    pub value: i64,
}

/// One `low..high` alternative of a range or SIZE constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub low: i64,
    pub high: i64,
}

/// One component of an INDEX clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub label: String,
    pub implied: bool,
}

/// A definition read from a MIB file, not yet linked into the tree.
#[derive(Clone, Debug, Default)]
pub struct MibNode {
    pub label: String,
    pub parent: String,
    /// `None` for `name ::= { parent }`, which aliases the parent's position.
    pub subid: Option<u32>,
    pub modid: ModuleId,
    /// Syntax or definition token; translated to a tree type when linked.
    pub kind: Option<TokenKind>,
    pub tc_index: Option<usize>,
    pub enums: Vec<EnumValue>,
    pub ranges: Vec<Range>,
    pub indexes: Vec<IndexEntry>,
    pub augments: Option<String>,
    pub varbinds: Vec<String>,
    pub hint: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub default_value: Option<String>,
    pub access: Option<TokenKind>,
    pub status: Option<TokenKind>,
    pub line: usize,
}

impl MibNode {
    pub fn new(modid: ModuleId, line: usize) -> Self {
        Self {
            subid: Some(0),
            modid,
            line,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_labels() {
        assert!(is_anonymous("anonymous#3"));
        assert!(!is_anonymous("anonymous"));
        assert!(!is_anonymous("ifTable"));
    }

    #[test]
    fn test_new_node_defaults() {
        let node = MibNode::new(4, 12);
        assert_eq!(node.subid, Some(0));
        assert_eq!(node.modid, 4);
        assert_eq!(node.tc_index, None);
        assert!(node.kind.is_none());
    }
}
