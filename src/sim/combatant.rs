use crate::data::species::{get_species, SpeciesData};
use crate::error::BattleError;

/// Mutable battle-time snapshot of one creature, derived from a static
/// species template.
///
/// Invariant: `0 <= current_hp <= max_hp`. A combatant is fainted iff
/// `current_hp == 0`.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub species_key: String,
    pub name: String,
    pub type_label: String,
    pub pokedex_id: u16,
    pub level: u8,
    pub max_hp: u16,
    pub current_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
    pub moves: Vec<String>,
    /// Attack multiplier, 1.0 at battle start. Growl decays it by 0.75 per
    /// application with no lower bound; stacks compound multiplicatively.
    pub attack_modifier: f32,
}

impl Combatant {
    /// Build a fresh combatant from the starter roster.
    pub fn from_species(key: &str) -> Result<Self, BattleError> {
        let species = get_species(key).ok_or_else(|| BattleError::UnknownSpecies(key.to_string()))?;
        Ok(Self::from_template(key, species))
    }

    fn from_template(key: &str, species: &SpeciesData) -> Self {
        Self {
            species_key: key.to_string(),
            name: species.name.to_string(),
            type_label: species.type_label.to_string(),
            pokedex_id: species.pokedex_id,
            level: species.level,
            max_hp: species.max_hp,
            current_hp: species.max_hp,
            attack: species.attack,
            defense: species.defense,
            special_attack: species.special_attack,
            special_defense: species.special_defense,
            speed: species.speed,
            moves: species.moves.iter().map(|m| m.to_string()).collect(),
            attack_modifier: 1.0,
        }
    }

    /// Reduce HP by `amount`, clamped at zero. No-op on a fainted combatant.
    pub fn apply_damage(&mut self, amount: u16) {
        if self.is_fainted() {
            return;
        }
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Apply the named status effect. Only Growl is recognized; every other
    /// name is a silent no-op (documented scope limitation, not an error).
    pub fn apply_stat_change(&mut self, move_name: &str) {
        if move_name == "Growl" {
            self.attack_modifier *= 0.75;
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_species_copies_template_stats() {
        let combatant = Combatant::from_species("bulbasaur").expect("species exists");
        assert_eq!(combatant.name, "Bulbasaur");
        assert_eq!(combatant.current_hp, 45);
        assert_eq!(combatant.max_hp, 45);
        assert_eq!(combatant.attack_modifier, 1.0);
        assert_eq!(combatant.moves, vec!["tackle", "growl"]);
    }

    #[test]
    fn from_species_reports_unknown_key() {
        let err = Combatant::from_species("missingno").unwrap_err();
        assert_eq!(err, BattleError::UnknownSpecies("missingno".to_string()));
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut combatant = Combatant::from_species("charmander").expect("species exists");
        combatant.apply_damage(10_000);
        assert_eq!(combatant.current_hp, 0);
        assert!(combatant.is_fainted());
    }

    #[test]
    fn hp_stays_in_bounds_under_repeated_damage() {
        let mut combatant = Combatant::from_species("squirtle").expect("species exists");
        for amount in [0, 7, 7, 7, 7, 7, 7, 500] {
            combatant.apply_damage(amount);
            assert!(combatant.current_hp <= combatant.max_hp);
        }
        assert_eq!(combatant.current_hp, 0);
    }

    #[test]
    fn damage_is_a_noop_once_fainted() {
        let mut combatant = Combatant::from_species("charmander").expect("species exists");
        combatant.apply_damage(u16::MAX);
        combatant.apply_damage(5);
        assert_eq!(combatant.current_hp, 0);
    }

    #[test]
    fn growl_stacks_multiplicatively_without_floor() {
        let mut combatant = Combatant::from_species("bulbasaur").expect("species exists");
        combatant.apply_stat_change("Growl");
        assert_eq!(combatant.attack_modifier, 0.75);
        combatant.apply_stat_change("Growl");
        assert_eq!(combatant.attack_modifier, 0.75 * 0.75);
        for _ in 0..64 {
            combatant.apply_stat_change("Growl");
        }
        // No lower bound: the modifier keeps shrinking toward zero.
        assert!(combatant.attack_modifier < 0.75f32.powi(60));
        assert!(combatant.attack_modifier > 0.0);
    }

    #[test]
    fn unrecognized_stat_change_is_a_noop() {
        let mut combatant = Combatant::from_species("bulbasaur").expect("species exists");
        combatant.apply_stat_change("Tail Whip");
        combatant.apply_stat_change("Leer");
        assert_eq!(combatant.attack_modifier, 1.0);
    }
}
