//! Level save files: bincode encoded, lz4 compressed

use std::path::Path;

use anyhow::{Context, Result};
use glam::IVec2;
use sandfall_simulation::Pixel;
use serde::{Deserialize, Serialize};

use super::{PixelWorld, WorldError};
use crate::SimConfig;

/// Everything needed to restore a level's pixel grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSave {
    pub width: u32,
    pub height: u32,
    pub spawn_point: IVec2,
    /// Row-major, `width * height` entries
    pub pixels: Vec<Pixel>,
}

impl WorldSave {
    pub fn from_world(world: &PixelWorld, spawn_point: IVec2) -> Self {
        Self {
            width: world.width() as u32,
            height: world.height() as u32,
            spawn_point,
            pixels: world.pixels().to_vec(),
        }
    }

    /// Rebuild the grid, rejecting misaligned dimensions or a short pixel array
    ///
    /// Every chunk of the restored grid starts awake.
    pub fn into_world(self, config: SimConfig) -> Result<PixelWorld, WorldError> {
        PixelWorld::from_pixels_with_config(self.width, self.height, self.pixels, config)
    }

    /// Save to disk with compression
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let serialized = bincode_next::serde::encode_to_vec(self, bincode_next::config::standard())
            .context("Failed to serialize level")?;

        let compressed = lz4_flex::compress_prepend_size(&serialized);
        let compressed_size = compressed.len();

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, compressed).context("Failed to write level temp file")?;
        std::fs::rename(&temp_path, path).context("Failed to rename level file")?;

        log::info!(
            "[SAVE] {}x{} level saved to {:?} ({} bytes compressed)",
            self.width,
            self.height,
            path,
            compressed_size
        );
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let compressed = std::fs::read(path)
            .with_context(|| format!("Failed to read level file {:?}", path))?;
        log::debug!("Read {} bytes from {:?}", compressed.len(), path);

        let serialized = lz4_flex::decompress_size_prepended(&compressed)
            .context("Failed to decompress level")?;

        let (save, _): (WorldSave, _) =
            bincode_next::serde::decode_from_slice(&serialized, bincode_next::config::standard())
                .map_err(|e| anyhow::anyhow!("Failed to deserialize level: {:?}", e))?;

        log::info!("[LOAD] {}x{} level from {:?}", save.width, save.height, path);
        Ok(save)
    }
}
