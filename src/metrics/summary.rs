use super::Player;
use std::fmt;

/// Statistics for one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub player: Player,
    pub max_divergence: f64,
    pub avg_divergence: f64,
    /// Wall count on the last row
    pub walls_placed: i64,
}

/// Summary printed after the figure is saved
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_turns: usize,
    /// Indexed by [`Player::index`]
    pub players: [PlayerSummary; 2],
}

impl Summary {
    pub fn player(&self, player: Player) -> &PlayerSummary {
        &self.players[player.index()]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Statistics ===")?;
        write!(f, "Total turns: {}", self.total_turns)?;
        for p in &self.players {
            write!(f, "\n\n{}:", p.player.label())?;
            write!(f, "\n  Max divergence: {:.1}", p.max_divergence)?;
            write!(f, "\n  Avg divergence: {:.1}", p.avg_divergence)?;
            write!(f, "\n  Walls placed: {}", p.walls_placed)?;
        }
        Ok(())
    }
}
