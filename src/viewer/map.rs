//! Procedural terrain the viewer draws under the camera.

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};

use tile_camera::constants::*;
use tile_camera::AreaBox;

/// Terrain bands picked from the height value of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    DeepWater,
    Water,
    Sand,
    Grass,
    Forest,
    Rock,
    Snow,
}

impl Terrain {
    fn from_height(height: f32) -> Self {
        match height {
            h if h < -0.25 => Terrain::DeepWater,
            h if h < -0.05 => Terrain::Water,
            h if h < 0.02 => Terrain::Sand,
            h if h < 0.2 => Terrain::Grass,
            h if h < 0.35 => Terrain::Forest,
            h if h < 0.5 => Terrain::Rock,
            _ => Terrain::Snow,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            Terrain::DeepWater => Vec3::new(0.08, 0.16, 0.38),
            Terrain::Water => Vec3::new(0.14, 0.32, 0.58),
            Terrain::Sand => Vec3::new(0.78, 0.72, 0.5),
            Terrain::Grass => Vec3::new(0.32, 0.55, 0.25),
            Terrain::Forest => Vec3::new(0.17, 0.38, 0.18),
            Terrain::Rock => Vec3::new(0.45, 0.42, 0.4),
            Terrain::Snow => Vec3::new(0.92, 0.93, 0.95),
        }
    }
}

pub struct TileMap {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Terrain>,
    /// World units per tile
    tile_size: f32,
}

impl TileMap {
    /// Generate terrain from fractal Perlin noise.
    pub fn generate(width: usize, height: usize, tile_size: u16, seed: u32) -> Self {
        let perlin = Perlin::new(seed);
        let mut tiles = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let mut amplitude = 1.0;
                let mut frequency = MAP_NOISE_SCALE;
                let mut total = 0.0;
                let mut max_value = 0.0;

                for _ in 0..MAP_NOISE_OCTAVES {
                    let sample_x = x as f64 * frequency / width as f64;
                    let sample_y = y as f64 * frequency / height as f64;
                    total += perlin.get([sample_x, sample_y]) * amplitude;
                    max_value += amplitude;
                    amplitude *= MAP_NOISE_PERSISTENCE;
                    frequency *= MAP_NOISE_LACUNARITY;
                }

                tiles.push(Terrain::from_height((total / max_value) as f32));
            }
        }

        log::info!("Generated {}x{} map with seed {}", width, height, seed);

        Self {
            width,
            height,
            tiles,
            tile_size: f32::from(tile_size.max(1)),
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Terrain> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space extent of the map, used to bound the camera center.
    pub fn bounds(&self) -> AreaBox {
        AreaBox::new(
            Vec2::ZERO,
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = TileMap::generate(32, 24, 32, 9);
        let b = TileMap::generate(32, 24, 32, 9);
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.tiles.len(), 32 * 24);
    }

    #[test]
    fn test_out_of_range_tiles_are_none() {
        let map = TileMap::generate(8, 8, 32, 1);
        assert!(map.get(-1, 0).is_none());
        assert!(map.get(0, 8).is_none());
        assert!(map.get(7, 7).is_some());
    }

    #[test]
    fn test_bounds_cover_all_tiles() {
        let map = TileMap::generate(10, 5, 32, 3);
        let bounds = map.bounds();
        assert_eq!(bounds.size(), Vec2::new(320.0, 160.0));
        assert!(bounds.contains(Vec2::new(9.5, 4.5) * map.tile_size()));
    }
}
