use once_cell::sync::Lazy;
use phf::phf_map;
use serde::Serialize;

/// Static species template a [`Combatant`](crate::sim::combatant::Combatant)
/// is derived from.
#[derive(Clone, Copy, Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub type_label: &'static str,
    pub pokedex_id: u16,
    pub level: u8,
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
    pub moves: &'static [&'static str],
}

/// Gen 1 starter roster, keyed by lowercase species key.
pub static STARTERS: phf::Map<&'static str, SpeciesData> = phf_map! {
    "bulbasaur" => SpeciesData {
        name: "Bulbasaur",
        type_label: "Grass/Poison",
        pokedex_id: 1,
        level: 5,
        max_hp: 45,
        attack: 49,
        defense: 49,
        special_attack: 65,
        special_defense: 65,
        speed: 45,
        moves: &["tackle", "growl"],
    },
    "charmander" => SpeciesData {
        name: "Charmander",
        type_label: "Fire",
        pokedex_id: 4,
        level: 5,
        max_hp: 39,
        attack: 52,
        defense: 43,
        special_attack: 60,
        special_defense: 50,
        speed: 65,
        moves: &["tackle", "growl"],
    },
    "squirtle" => SpeciesData {
        name: "Squirtle",
        type_label: "Water",
        pokedex_id: 7,
        level: 5,
        max_hp: 44,
        attack: 48,
        defense: 65,
        special_attack: 50,
        special_defense: 64,
        speed: 43,
        moves: &["tackle", "growl"],
    },
};

/// Roster keys in a stable order, for uniform random enemy selection.
pub static STARTER_KEYS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut keys: Vec<&'static str> = STARTERS.keys().copied().collect();
    keys.sort_unstable();
    keys
});

/// Look up a species template by roster key.
pub fn get_species(key: &str) -> Option<&'static SpeciesData> {
    STARTERS.get(key)
}

/// One entry of the read-only roster listing served to the frontend.
#[derive(Clone, Debug, Serialize)]
pub struct RosterEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub pokedex_id: u16,
}

/// Roster listing in stable key order.
pub fn roster() -> Vec<RosterEntry> {
    let mut listing: Vec<RosterEntry> = STARTERS
        .entries()
        .map(|(&key, species)| RosterEntry {
            key,
            name: species.name,
            pokedex_id: species.pokedex_id,
        })
        .collect();
    listing.sort_unstable_by_key(|entry| entry.key);
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_contains_the_starter_trio() {
        let bulbasaur = get_species("bulbasaur").expect("species exists");
        assert_eq!(bulbasaur.pokedex_id, 1);
        assert_eq!(bulbasaur.max_hp, 45);
        assert_eq!(bulbasaur.speed, 45);

        let charmander = get_species("charmander").expect("species exists");
        assert_eq!(charmander.pokedex_id, 4);
        assert_eq!(charmander.speed, 65);

        let squirtle = get_species("squirtle").expect("species exists");
        assert_eq!(squirtle.pokedex_id, 7);
        assert_eq!(squirtle.defense, 65);
    }

    #[test]
    fn species_moves_resolve_against_the_move_catalog() {
        for (key, species) in STARTERS.entries() {
            for move_key in species.moves {
                assert!(
                    crate::data::moves::get_move(move_key).is_some(),
                    "{key} references unknown move {move_key}"
                );
            }
        }
    }

    #[test]
    fn roster_listing_is_stable_and_complete() {
        let listing = roster();
        let keys: Vec<&str> = listing.iter().map(|entry| entry.key).collect();
        assert_eq!(keys, vec!["bulbasaur", "charmander", "squirtle"]);
    }

    #[test]
    fn unknown_species_is_reported() {
        assert!(get_species("pikachu").is_none());
    }
}
