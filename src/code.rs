use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::{Error, Result};
use crate::tree::Node;

/// A prefix code: `len` bits of `bits`, bit index 0 being the first
/// root-to-leaf branch decision. The writer emits index 0 first, so the
/// wire preserves descent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    fn push(self, bit: u8) -> Code {
        let mut bits = self.bits;
        if bit != 0 {
            bits |= 1 << self.len;
        }
        Code {
            bits,
            len: self.len + 1,
        }
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len >= other.len {
            return false;
        }
        let mask = (1u64 << self.len) - 1;
        other.bits & mask == self.bits
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", (self.bits >> i) & 1)?;
        }
        Ok(())
    }
}

pub type CodeTable = BTreeMap<u8, Code>;

/// Derives the symbol -> code table from a coding tree: 0 on the left
/// edge, 1 on the right. The prefix-free post-condition is re-checked on
/// the finished table before it is returned.
pub fn generate(root: &Node) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    match lone_symbol(root) {
        Some((symbol, code)) => {
            table.insert(symbol, code);
        }
        None => walk(root, Code::default(), &mut table),
    }
    verify_prefix_free(&table)?;
    Ok(table)
}

/// A root with a filler child carries exactly one real symbol; its code is
/// the single bit pointing away from the filler, assigned without descent.
fn lone_symbol(root: &Node) -> Option<(u8, Code)> {
    let Node::Internal { left, right, .. } = root else {
        return None;
    };
    if left.is_filler() {
        if let Node::Leaf { symbol, .. } = **right {
            return Some((symbol, Code { bits: 1, len: 1 }));
        }
    } else if right.is_filler() {
        if let Node::Leaf { symbol, .. } = **left {
            return Some((symbol, Code { bits: 0, len: 1 }));
        }
    }
    None
}

fn walk(node: &Node, code: Code, table: &mut CodeTable) {
    match node {
        Node::Leaf { symbol, .. } => {
            table.insert(*symbol, code);
        }
        Node::Internal { left, right, .. } => {
            walk(left, code.push(0), table);
            walk(right, code.push(1), table);
        }
    }
}

pub fn verify_prefix_free(table: &CodeTable) -> Result<()> {
    for (&symbol, code) in table {
        if code.len == 0 {
            return Err(Error::EmptyCode(symbol));
        }
    }
    for (&a, code_a) in table {
        for (&b, code_b) in table.range(a..).skip(1) {
            if code_a.is_prefix_of(code_b) {
                return Err(Error::NotPrefixFree(a, b));
            }
            if code_b.is_prefix_of(code_a) {
                return Err(Error::NotPrefixFree(b, a));
            }
        }
    }
    Ok(())
}
