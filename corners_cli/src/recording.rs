use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use corners::{Click, Player};
use serde::{Deserialize, Serialize};

use crate::GameConfig;

/// One click during a session, whether it was accepted or not.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Only set for accepted moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub move_number: Option<u32>,
    pub player: Player,
    pub click: Click,
    pub accepted: bool,
    /// Why the move was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub message: Option<String>,
}

/// Everything needed to replay a session: the setup of the game and its clicks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub config: GameConfig,
    pub moves: Vec<MoveRecord>,
}

impl Recording {
    /// The clicks in the order they were played, including rejected ones.
    pub fn clicks(&self) -> Vec<Click> {
        self.moves.iter().map(|record| record.click).collect()
    }

    /// Whether replaying on a game with this config gives the same board.
    ///
    /// The cell dimension only affects drawing, so it's not compared.
    pub fn matches(&self, config: &GameConfig) -> bool {
        self.config.cell_count == config.cell_count && self.config.seed_edges == config.seed_edges
    }
}

/// Collects the clicks of a session and writes them to a JSON file.
pub struct Recorder {
    path: PathBuf,
    recording: Recording,
}

impl Recorder {
    pub fn new(path: PathBuf, config: GameConfig) -> anyhow::Result<Self> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.is_dir() {
                anyhow::bail!("Directory '{}' does not exist", dir.display());
            }
        }
        Ok(Self {
            path,
            recording: Recording {
                config,
                moves: Vec::new(),
            },
        })
    }

    pub fn store(&mut self, record: MoveRecord) {
        self.recording.moves.push(record);
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.recording.moves
    }

    pub fn write_recording(&self) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &self.recording)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Reads a recording written by [`Recorder::write_recording()`].
pub fn load_recording(path: &Path) -> anyhow::Result<Recording> {
    let reader = BufReader::new(File::open(path)?);
    let recording = serde_json::from_reader(reader)?;
    Ok(recording)
}
