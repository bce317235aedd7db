use phf::phf_map;

/// Whether a move deals direct damage or applies an effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveCategory {
    Physical,
    Status,
}

/// Immutable move definition.
///
/// `power == 0` marks a non-damaging move; `accuracy` is a hit probability in
/// the 0–100 range.
#[derive(Clone, Copy, Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub move_type: &'static str,
    pub power: u16,
    pub accuracy: u8,
    pub category: MoveCategory,
}

/// Fixed move catalog, keyed by lowercase move id.
pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "tackle" => MoveData {
        name: "Tackle",
        move_type: "Normal",
        power: 40,
        accuracy: 100,
        category: MoveCategory::Physical,
    },
    "scratch" => MoveData {
        name: "Scratch",
        move_type: "Normal",
        power: 40,
        accuracy: 100,
        category: MoveCategory::Physical,
    },
    "takedown" => MoveData {
        name: "Take Down",
        move_type: "Normal",
        power: 90,
        accuracy: 85,
        category: MoveCategory::Physical,
    },
    "growl" => MoveData {
        name: "Growl",
        move_type: "Normal",
        power: 0,
        accuracy: 100,
        category: MoveCategory::Status,
    },
    // Stat handling only recognizes Growl for now; Tail Whip resolves as a
    // no-op status move.
    "tailwhip" => MoveData {
        name: "Tail Whip",
        move_type: "Normal",
        power: 0,
        accuracy: 100,
        category: MoveCategory::Status,
    },
};

/// Look up a move definition by catalog key.
pub fn get_move(key: &str) -> Option<&'static MoveData> {
    MOVES.get(key)
}
