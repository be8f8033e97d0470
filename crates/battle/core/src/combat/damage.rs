//! Damage calculation and application.

use crate::config::DamageParams;

/// Calculate damage for one move use.
///
/// # Formula
///
/// ```text
/// damage = move_power + floor(base_attack / attack_divisor)
/// final  = max(damage, minimum)
/// ```
///
/// Integer-only and deterministic: there is no accuracy roll and no
/// variance, so a move always deals at least `minimum` damage.
pub fn calculate_damage(move_power: u32, base_attack: u32, params: &DamageParams) -> u32 {
    let damage = move_power + base_attack / params.attack_divisor.max(1);
    damage.max(params.minimum)
}

/// Apply damage to current HP, clamped at 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_power_plus_half_attack() {
        let params = DamageParams::default();
        assert_eq!(calculate_damage(40, 60, &params), 70);
        assert_eq!(apply_damage(100, 70), 30);
    }

    #[test]
    fn attack_contribution_rounds_down() {
        let params = DamageParams::default();
        assert_eq!(calculate_damage(10, 7, &params), 13);
    }

    #[test]
    fn damage_never_drops_below_the_minimum() {
        let params = DamageParams::default();
        assert_eq!(calculate_damage(0, 0, &params), 1);
        assert_eq!(calculate_damage(0, 1, &params), 1);
    }

    #[test]
    fn hp_is_floored_at_zero() {
        assert_eq!(apply_damage(5, 70), 0);
        assert_eq!(apply_damage(0, 1), 0);
    }
}
