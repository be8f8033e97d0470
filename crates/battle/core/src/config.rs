/// Damage formula parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Divisor applied to the attacker's base attack before it is
    /// added to move power.
    pub attack_divisor: u32,
    /// Floor for the final damage value; a move always deals at least
    /// this much.
    pub minimum: u32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            attack_divisor: Self::DEFAULT_ATTACK_DIVISOR,
            minimum: Self::DEFAULT_MINIMUM,
        }
    }
}

impl DamageParams {
    pub const DEFAULT_ATTACK_DIVISOR: u32 = 2;
    pub const DEFAULT_MINIMUM: u32 = 1;
}

/// Tunable balance parameters for battle resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub damage: DamageParams,
}
