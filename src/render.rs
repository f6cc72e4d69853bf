//! pixel rendering of a world
//!
//! Rendering is a pure function of the world's read-only state; nothing here
//! feeds back into the engine. The colours come from a [`Palette`] handed to
//! the renderer at construction, so there is no process-global resource
//! table to load.
use crate::types::Position;
use crate::world::GridWorld;

/// the colour bundle a renderer paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// empty cells
    pub background: [u8; 3],
    /// fruit cells
    pub fruit: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            fruit: [255, 165, 0],
        }
    }
}

/// a raw row-major RGB8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// width in pixels
    pub width: usize,
    /// height in pixels
    pub height: usize,
    /// `width * height * 3` bytes, row major
    pub pixels: Vec<u8>,
}

impl Frame {
    /// the RGB triple at one pixel. Panics outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let at = (y * self.width + x) * 3;
        [self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]]
    }
}

/// Draws a world into a [`Frame`], one `scale`-sized square per grid cell.
/// With `gradation` on, body segments fade toward the tail so the newest
/// segment reads brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    /// the injected colour bundle
    pub palette: Palette,
    /// pixels per grid cell side
    pub scale: usize,
    /// fade bodies toward the tail
    pub gradation: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            scale: 8,
            gradation: true,
        }
    }
}

impl Renderer {
    /// renders the current state of a world
    pub fn render(&self, world: &GridWorld) -> Frame {
        let n = world.grid_size() as usize;
        let side = n * self.scale;
        let mut frame = Frame {
            width: side,
            height: side,
            pixels: Vec::new(),
        };
        frame.pixels = self
            .palette
            .background
            .iter()
            .copied()
            .cycle()
            .take(side * side * 3)
            .collect();

        for fruit in world.fruit() {
            self.paint_cell(&mut frame, *fruit, self.palette.fruit);
        }

        for snake in world.snakes() {
            // heads can sit outside the grid after a fatal move
            if !world.off_grid(snake.head) {
                self.paint_cell(&mut frame, snake.head, snake.colour.as_rgb());
            }
            let limbs: Vec<Position> = snake.body.iter().rev().copied().collect();
            for (i, limb) in limbs.iter().enumerate() {
                if world.off_grid(*limb) {
                    continue;
                }
                let alpha = if self.gradation {
                    1.0 - 0.5 * (i as f32 / limbs.len() as f32)
                } else {
                    1.0
                };
                self.paint_cell(&mut frame, *limb, shade(snake.colour.as_rgb(), alpha));
            }
        }

        frame
    }

    fn paint_cell(&self, frame: &mut Frame, cell: Position, rgb: [u8; 3]) {
        let x0 = cell.x as usize * self.scale;
        let y0 = cell.y as usize * self.scale;
        for y in y0..y0 + self.scale {
            for x in x0..x0 + self.scale {
                let at = (y * frame.width + x) * 3;
                frame.pixels[at..at + 3].copy_from_slice(&rgb);
            }
        }
    }
}

fn shade(rgb: [u8; 3], alpha: f32) -> [u8; 3] {
    [
        (rgb[0] as f32 * alpha) as u8,
        (rgb[1] as f32 * alpha) as u8,
        (rgb[2] as f32 * alpha) as u8,
    ]
}
