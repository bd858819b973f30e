//! Model persistence for the best-so-far checkpoint
//!
//! A checkpoint is two files next to each other:
//! - `<path>.mpk` - network weights written by the predictor
//! - `<path>.meta.json` - training metadata as JSON
//!
//! Every save overwrites the previous checkpoint.

use super::config::AgentConfig;
use super::predictor::Checkpoint;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata saved with the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Hyperparameters used during training
    pub agent_config: AgentConfig,

    /// Number of episodes played when the checkpoint was taken
    pub episodes_trained: usize,

    /// Score that triggered the checkpoint
    pub record: u32,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    pub fn new(agent_config: AgentConfig, episodes_trained: usize, record: u32) -> Self {
        Self {
            agent_config,
            episodes_trained,
            record,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// True if a checkpoint has been written at `path`
pub fn checkpoint_exists(path: &Path) -> bool {
    metadata_path(path).exists()
}

/// Save predictor weights and metadata
pub fn save_model<P: Checkpoint>(predictor: &P, metadata: &ModelMetadata, path: &Path) -> Result<()> {
    predictor.save(path)?;

    let meta_path = metadata_path(path);
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Read only the metadata of a checkpoint
pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    let meta_path = metadata_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;

    serde_json::from_str(&meta_json).context("Failed to deserialize metadata")
}

/// Load weights into `predictor` and return the stored metadata
pub fn load_model<P: Checkpoint>(predictor: &mut P, path: &Path) -> Result<ModelMetadata> {
    let metadata = load_metadata(path)?;
    predictor.load(path)?;

    Ok(metadata)
}
