use std::fmt;

/// One-based counter of successfully applied actions in a match.
///
/// Two turns make a round: the odd turn opens it, the even turn closes
/// it, after which initiative is recomputed from the current active
/// units' speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnNumber(pub u32);

impl TurnNumber {
    /// The counter value a freshly created match starts at.
    pub const FIRST: Self = Self(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// True when this turn is the second action of its round.
    pub fn closes_round(self) -> bool {
        self.0 % 2 == 0
    }
}

impl fmt::Display for TurnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_turns_open_rounds_and_even_turns_close_them() {
        assert!(!TurnNumber::FIRST.closes_round());
        assert!(TurnNumber(2).closes_round());
        assert!(!TurnNumber(3).closes_round());
        assert!(TurnNumber(4).closes_round());
    }

    #[test]
    fn next_increments_by_exactly_one() {
        assert_eq!(TurnNumber::FIRST.next(), TurnNumber(2));
        assert_eq!(TurnNumber(7).next(), TurnNumber(8));
    }
}
