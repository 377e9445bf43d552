use crate::SyntaxKind;

const SIZE: usize = 4;

/// Compact bitset of `SyntaxKind`s, usable in `const` context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyntaxSet {
    bits: [u64; SIZE],
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn from_kind(kind: SyntaxKind) -> Self {
        let kind = kind as u16;

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < Self::EMPTY.bits.len(),
            "Index out of bounds. Increase the size of the bitset array."
        );

        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = mask;

        Self { bits }
    }

    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let bit_index = kind % Self::BITS_PER_SLOT;
        let mask = 1 << bit_index;

        self.bits[slot_index] & mask != 0
    }
}

/// Node kinds that declare a type.
pub const TYPE_DECLARATIONS: SyntaxSet =
    SyntaxSet::new([SyntaxKind::CLASS, SyntaxKind::INTERFACE, SyntaxKind::ENUM, SyntaxKind::RECORD]);

/// Node kinds that are statements.
pub const STATEMENTS: SyntaxSet = SyntaxSet::new([
    SyntaxKind::BLOCK,
    SyntaxKind::EMPTY_STATEMENT,
    SyntaxKind::EXPRESSION_STATEMENT,
    SyntaxKind::IF_STATEMENT,
    SyntaxKind::WHILE_STATEMENT,
    SyntaxKind::DO_STATEMENT,
    SyntaxKind::FOR_STATEMENT,
    SyntaxKind::FOREACH_STATEMENT,
    SyntaxKind::RETURN_STATEMENT,
    SyntaxKind::BREAK_STATEMENT,
    SyntaxKind::CONTINUE_STATEMENT,
    SyntaxKind::YIELD_STATEMENT,
    SyntaxKind::LABELED_STATEMENT,
    SyntaxKind::THROW_STATEMENT,
    SyntaxKind::TRY_STATEMENT,
    SyntaxKind::SWITCH_STATEMENT,
    SyntaxKind::SYNCHRONIZED_STATEMENT,
    SyntaxKind::ASSERT_STATEMENT,
    SyntaxKind::VARIABLE,
    SyntaxKind::CLASS,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_fits() {
        let last = SyntaxKind::SWITCH_EXPRESSION;
        let set = SyntaxSet::new([last]);
        assert!(set.contains(last));
        assert!(!set.contains(SyntaxKind::WHITESPACE));
    }

    #[test]
    fn union_keeps_both_sides() {
        let set = SyntaxSet::new([SyntaxKind::CLASS]).union(&SyntaxSet::new([SyntaxKind::ENUM]));
        assert!(set.contains(SyntaxKind::CLASS));
        assert!(set.contains(SyntaxKind::ENUM));
        assert!(!set.contains(SyntaxKind::RECORD));
        assert!(TYPE_DECLARATIONS.contains(SyntaxKind::RECORD));
    }
}
