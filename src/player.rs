//! Player identities and their color binding

use crate::board::Stone;

/// A named player and the color they currently play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    stone: Stone,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stone(&self) -> Stone {
        self.stone
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// The two seats of a game, one per color.
///
/// Colors only change through [`Players::exchange_colors`], which the swap
/// options of a rule policy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    seats: [Player; 2],
}

impl Players {
    pub fn new(black: impl Into<String>, white: impl Into<String>) -> Self {
        Self {
            seats: [
                Player { name: black.into(), stone: Stone::Black },
                Player { name: white.into(), stone: Stone::White },
            ],
        }
    }

    /// Player currently holding `stone`.
    ///
    /// `Stone::Empty` has no seat; it maps to the Black seat holder.
    pub fn seated(&self, stone: Stone) -> &Player {
        self.seats
            .iter()
            .find(|p| p.stone == stone)
            .unwrap_or(&self.seats[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter()
    }

    /// Both players trade colors. Stones already on the board keep theirs.
    pub(crate) fn exchange_colors(&mut self) {
        for seat in &mut self.seats {
            seat.stone = seat.stone.opponent();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seating() {
        let players = Players::new("Doge", "Meow");
        assert_eq!(players.seated(Stone::Black).name(), "Doge");
        assert_eq!(players.seated(Stone::White).name(), "Meow");
        assert_eq!(players.seated(Stone::White).stone(), Stone::White);
    }

    #[test]
    fn test_exchange_colors() {
        let mut players = Players::new("Doge", "Meow");
        players.exchange_colors();
        assert_eq!(players.seated(Stone::Black).name(), "Meow");
        assert_eq!(players.seated(Stone::White).name(), "Doge");
        players.exchange_colors();
        assert_eq!(players, Players::new("Doge", "Meow"));
    }
}
