//! PNG snapshots of the pixel grid

use std::path::Path;

use anyhow::Result;
use sandfall_core::world::PixelWorld;

/// Colour for empty cells
const BACKGROUND: [u8; 4] = [16, 16, 24, 255];

/// Tint blended over powered pixels, scaled by their charge
const POWER_TINT: [u8; 3] = [255, 240, 120];

/// Render the grid to an RGBA buffer, one texel per pixel
pub fn render(world: &PixelWorld) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(world.pixels().len() * 4);
    for pixel in world.pixels() {
        if pixel.is_empty() {
            buffer.extend_from_slice(&BACKGROUND);
            continue;
        }

        let mut rgba = pixel.rgba8();
        let max = pixel.properties().power_max;
        if pixel.power > 0 && max > 0 {
            let t = (pixel.power as f32 / max as f32).min(1.0) * 0.6;
            for (channel, tint) in rgba.iter_mut().zip(POWER_TINT) {
                *channel = (*channel as f32 * (1.0 - t) + tint as f32 * t).round() as u8;
            }
        }
        rgba[3] = 255;
        buffer.extend_from_slice(&rgba);
    }
    buffer
}

/// Save RGBA buffer of the grid as PNG
pub fn save_png(world: &PixelWorld, path: impl AsRef<Path>) -> Result<()> {
    use image::{ImageBuffer, Rgba};

    let img: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(world.width() as u32, world.height() as u32, render(world))
            .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;

    img.save(path.as_ref())?;
    log::info!("Snapshot saved to {:?}", path.as_ref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{IVec2, Vec4};
    use sandfall_core::{Pixel, PixelType};

    #[test]
    fn test_render_size_and_background() {
        let world = PixelWorld::new(64, 64).unwrap();
        let buffer = render(&world);
        assert_eq!(buffer.len(), 64 * 64 * 4);
        assert_eq!(&buffer[..4], &BACKGROUND);
    }

    #[test]
    fn test_render_uses_pixel_colour() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        world.set(
            IVec2::new(1, 0),
            Pixel {
                kind: PixelType::ROCK,
                colour: Vec4::new(1.0, 0.0, 0.0, 0.5),
                ..Pixel::air()
            },
        );

        let buffer = render(&world);
        assert_eq!(&buffer[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_powered_pixels_are_tinted() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        world.set(
            IVec2::ZERO,
            Pixel {
                kind: PixelType::SOLDER,
                colour: Vec4::new(0.0, 0.0, 0.0, 1.0),
                power: 24,
                ..Pixel::air()
            },
        );

        let buffer = render(&world);
        assert!(buffer[0] > 100);
    }

    #[test]
    fn test_save_png() {
        let world = PixelWorld::new(64, 64).unwrap();
        let path = std::env::temp_dir().join(format!("sandfall_snapshot_{}.png", std::process::id()));

        save_png(&world, &path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }
}
