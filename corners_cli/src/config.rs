use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Parameters for setting up a game.
///
/// Can be loaded from a JSON file. Fields missing from the file keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells in each row and column of the board.
    pub cell_count: usize,
    /// Height and width of a cell in the SVG output, in pixels.
    pub cell_dimension: u32,
    /// Whether to place the starting anchors of both players.
    pub seed_edges: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_count: 20,
            cell_dimension: 30,
            seed_edges: true,
        }
    }
}

/// The largest board a config may ask for.
pub const MAX_CELL_COUNT: usize = 1000;

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: GameConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cell_count == 0 {
            anyhow::bail!("cell_count must be at least 1");
        }
        if self.cell_count > MAX_CELL_COUNT {
            anyhow::bail!(
                "cell_count must be at most {}, got {}",
                MAX_CELL_COUNT,
                self.cell_count
            );
        }
        if self.cell_dimension == 0 {
            anyhow::bail!("cell_dimension must be at least 1");
        }
        Ok(())
    }
}
