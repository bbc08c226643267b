/// Merge stage recorded in the two stage bits of an entry's flags word
///
/// A non-zero stage marks which side of a three-way merge the entry belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictStage {
    /// The path is not conflicted
    #[default]
    None,
    /// The version from the merge base
    LowestCommonAncestor,
    /// The version from the current branch ("ours")
    Current,
    /// The version from the branch being merged ("theirs")
    Other,
}

impl ConflictStage {
    /// Build a stage from its 2-bit encoding; higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => ConflictStage::None,
            1 => ConflictStage::LowestCommonAncestor,
            2 => ConflictStage::Current,
            _ => ConflictStage::Other,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            ConflictStage::None => 0,
            ConflictStage::LowestCommonAncestor => 1,
            ConflictStage::Current => 2,
            ConflictStage::Other => 3,
        }
    }

    pub fn is_conflicted(self) -> bool {
        self != ConflictStage::None
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConflictStage::None => "no conflict",
            ConflictStage::LowestCommonAncestor => "lowest common ancestor",
            ConflictStage::Current => "current",
            ConflictStage::Other => "other",
        }
    }
}

impl std::fmt::Display for ConflictStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
