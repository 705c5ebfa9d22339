/// Table configuration constants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of seats at the table.
    pub num_players: usize,
}

impl GameConfig {
    // ===== compile-time limits =====
    /// Maximum number of suits any variant uses.
    pub const MAX_SUITS: usize = 6;
    /// Maximum number of rank pips drawn on a card (1-5 plus START).
    pub const MAX_RANK_PIPS: usize = 6;
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_NUM_PLAYERS: usize = 2;

    pub fn new() -> Self {
        Self {
            num_players: Self::DEFAULT_NUM_PLAYERS,
        }
    }

    pub fn with_num_players(num_players: usize) -> Self {
        Self {
            num_players: num_players.clamp(Self::MIN_PLAYERS, Self::MAX_PLAYERS),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
