//! Per-turn metrics table and derived columns

mod summary;

pub use summary::{PlayerSummary, Summary};

/// Name of the x-axis column
pub const TURN_COLUMN: &str = "turn";

/// Optional column written by the game-side logger
pub const TERMINAL_COLUMN: &str = "is_terminal";

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Zero,
    One,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Zero, Player::One];

    pub fn index(self) -> usize {
        match self {
            Player::Zero => 0,
            Player::One => 1,
        }
    }

    /// Human-readable label, e.g. "Player 0"
    pub fn label(self) -> &'static str {
        match self {
            Player::Zero => "Player 0",
            Player::One => "Player 1",
        }
    }

    pub fn column(self, column: Column) -> &'static str {
        match (self, column) {
            (Player::Zero, Column::Manhattan) => "p0_manhattan",
            (Player::Zero, Column::ShortestPath) => "p0_shortest_path",
            (Player::Zero, Column::WallsPlaced) => "p0_walls_placed",
            (Player::Zero, Column::Divergence) => "p0_divergence",
            (Player::One, Column::Manhattan) => "p1_manhattan",
            (Player::One, Column::ShortestPath) => "p1_shortest_path",
            (Player::One, Column::WallsPlaced) => "p1_walls_placed",
            (Player::One, Column::Divergence) => "p1_divergence",
        }
    }
}

/// Per-player metric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Heuristic distance to goal
    Manhattan,
    /// BFS distance to goal
    ShortestPath,
    /// Cumulative walls placed
    WallsPlaced,
    /// Shortest path minus Manhattan (derived)
    Divergence,
}

impl Column {
    /// Columns that must be present in the input for each player
    pub const REQUIRED: [Column; 3] = [Column::Manhattan, Column::ShortestPath, Column::WallsPlaced];
}

/// Metrics for a single turn
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub turn: i64,
    /// Indexed by [`Player::index`]
    pub manhattan: [f64; 2],
    pub shortest_path: [f64; 2],
    pub walls_placed: [i64; 2],
    /// Whether the game had ended on this turn, if the input says so
    pub is_terminal: Option<bool>,
}

impl MetricsRow {
    pub fn divergence(&self, player: Player) -> f64 {
        let i = player.index();
        self.shortest_path[i] - self.manhattan[i]
    }

    /// Value of a per-player column as a float
    pub fn value(&self, player: Player, column: Column) -> f64 {
        let i = player.index();
        match column {
            Column::Manhattan => self.manhattan[i],
            Column::ShortestPath => self.shortest_path[i],
            Column::WallsPlaced => self.walls_placed[i] as f64,
            Column::Divergence => self.divergence(player),
        }
    }
}

/// Ordered metrics table, one row per turn in file order
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    rows: Vec<MetricsRow>,
    /// Empty until [`MetricsTable::derive_divergence`] runs
    divergence: [Vec<f64>; 2],
}

impl MetricsTable {
    /// Create a table from rows, keeping their order
    pub fn new(rows: Vec<MetricsRow>) -> Self {
        Self {
            rows,
            divergence: [Vec::new(), Vec::new()],
        }
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&MetricsRow> {
        self.rows.last()
    }

    /// Turn numbers in row order
    pub fn turns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.turn as f64).collect()
    }

    /// Append the `pN_divergence` columns (shortest path minus Manhattan)
    ///
    /// Recomputes from the rows, so calling it twice is harmless.
    pub fn derive_divergence(&mut self) {
        for player in Player::ALL {
            self.divergence[player.index()] =
                self.rows.iter().map(|r| r.divergence(player)).collect();
        }
    }

    pub fn is_derived(&self) -> bool {
        Player::ALL
            .iter()
            .all(|p| self.divergence[p.index()].len() == self.rows.len())
    }

    /// Derived divergence column; empty before derivation
    pub fn divergence(&self, player: Player) -> &[f64] {
        &self.divergence[player.index()]
    }

    /// `(turn, value)` pairs for a player's column, in row order
    pub fn series(&self, player: Player, column: Column) -> Vec<(f64, f64)> {
        match column {
            Column::Divergence if self.is_derived() => self
                .rows
                .iter()
                .zip(self.divergence(player))
                .map(|(r, d)| (r.turn as f64, *d))
                .collect(),
            _ => self
                .rows
                .iter()
                .map(|r| (r.turn as f64, r.value(player, column)))
                .collect(),
        }
    }

    /// Rows flagged as terminal by the input
    pub fn terminal_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.is_terminal == Some(true))
            .count()
    }

    /// Whether every turn is strictly greater than the previous one
    pub fn turns_increasing(&self) -> bool {
        self.rows.windows(2).all(|w| w[0].turn < w[1].turn)
    }

    /// Compute summary statistics
    ///
    /// Returns `None` for an empty table or before divergence is derived.
    pub fn summarize(&self) -> Option<Summary> {
        if self.is_empty() || !self.is_derived() {
            return None;
        }
        let last = self.last()?;

        let players = Player::ALL.map(|player| {
            let values = self.divergence(player);
            let max_divergence = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg_divergence = values.iter().sum::<f64>() / values.len() as f64;

            PlayerSummary {
                player,
                max_divergence,
                avg_divergence,
                walls_placed: last.walls_placed[player.index()],
            }
        });

        Some(Summary {
            total_turns: self.len(),
            players,
        })
    }
}
