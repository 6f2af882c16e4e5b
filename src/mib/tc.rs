//! Textual convention table.

use super::node::{ANY_MODULE, EnumValue, ModuleId, Range};
use super::token::TokenKind;

/// A `TEXTUAL-CONVENTION` or plain type assignment.
#[derive(Clone, Debug)]
pub struct TextualConvention {
    pub modid: ModuleId,
    pub descriptor: String,
    pub kind: TokenKind,
    pub hint: Option<String>,
    pub description: Option<String>,
    pub enums: Vec<EnumValue>,
    pub ranges: Vec<Range>,
}

/// Every textual convention seen so far, in definition order.
///
/// Indexes are stable; tree nodes refer to their TC by index.
#[derive(Clone, Debug, Default)]
pub struct TcTable {
    entries: Vec<TextualConvention>,
}

impl TcTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a convention and return its index.
    pub fn push(&mut self, tc: TextualConvention) -> usize {
        self.entries.push(tc);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&TextualConvention> {
        self.entries.get(index)
    }

    /// First convention named `descriptor` from `modid` (or any module for
    /// [`ANY_MODULE`]).
    pub fn find(&self, descriptor: &str, modid: ModuleId) -> Option<usize> {
        self.entries
            .iter()
            .position(|tc| tc.descriptor == descriptor && (modid == ANY_MODULE || tc.modid == modid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
