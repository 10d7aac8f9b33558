//! Per-tick crowd flow field
//!
//! The arena is covered by a grid of tiles. Every tick each tile's `heat`
//! counts the enemies standing on it, and each tile's `guide_direction` is a
//! discrete negative gradient of the heat around it: a sum of the eight
//! neighbour heats pushing away from the neighbour they belong to. Cells off
//! the grid count as a hot wall, so the field also repels from the edges.
//!
//! Guides are always derived from the heat of the *previous* tick: the
//! whole grid is recomputed before any heat is cleared.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The eight compass neighbours and the unit vector pointing at each
const NEIGHBOURS: [((i32, i32), Vec2); 8] = [
    ((1, 0), Vec2::new(1.0, 0.0)),
    ((-1, 0), Vec2::new(-1.0, 0.0)),
    ((0, 1), Vec2::new(0.0, 1.0)),
    ((0, -1), Vec2::new(0.0, -1.0)),
    ((1, 1), Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
    ((1, -1), Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
    ((-1, 1), Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
    ((-1, -1), Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Enemies counted on this tile last tick (never negative)
    pub heat: f32,
    pub guide_direction: Vec2,
}

/// Row-major grid of tiles covering the arena
#[derive(Debug, Clone)]
pub struct FlowField {
    width: usize,
    height: usize,
    tile_size: f32,
    origin: Vec2,
    tiles: Vec<Tile>,
}

impl Default for FlowField {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT, TILE_SIZE, Vec2::ZERO)
    }
}

impl FlowField {
    pub fn new(width: usize, height: usize, tile_size: f32, origin: Vec2) -> Self {
        Self {
            width,
            height,
            tile_size,
            origin,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[y * self.width + x]
    }

    /// Cell under a world position, clamped onto the grid
    pub fn cell_at(&self, position: Vec2) -> (usize, usize) {
        let local = (position - self.origin) / self.tile_size;
        let x = (local.x.floor() as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = (local.y.floor() as i64).clamp(0, self.height as i64 - 1) as usize;
        (x, y)
    }

    pub fn tile_at(&self, position: Vec2) -> &Tile {
        let (x, y) = self.cell_at(position);
        self.tile(x, y)
    }

    /// Heat of a possibly off-grid cell
    fn heat_or_wall(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            BOUNDARY_HEAT
        } else {
            self.tiles[y as usize * self.width + x as usize].heat
        }
    }

    /// Rebuild every guide direction from the current heat snapshot
    ///
    /// Heat is only read here, so every guide sees the same snapshot.
    pub fn recompute_guides(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let mut guide = Vec2::ZERO;
                for ((dx, dy), unit) in NEIGHBOURS {
                    guide -= unit * self.heat_or_wall(x as i32 + dx, y as i32 + dy);
                }
                self.tiles[y * self.width + x].guide_direction = guide;
            }
        }
    }

    pub fn clear_heat(&mut self) {
        for tile in &mut self.tiles {
            tile.heat = 0.0;
        }
    }

    /// Count one occupant at `position`
    pub fn add_heat(&mut self, position: Vec2) {
        let (x, y) = self.cell_at(position);
        self.tiles[y * self.width + x].heat += 1.0;
    }

    /// Heat values row-major, for debug overlays
    pub fn heat_map(&self) -> Vec<f32> {
        self.tiles.iter().map(|t| t.heat).collect()
    }
}
