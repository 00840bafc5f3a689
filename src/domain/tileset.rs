use super::{Canvas, DecodedImage, RenderTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilesetError {
    EmptyGrid { rows: usize, columns: usize },
}

impl std::fmt::Display for TilesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGrid { rows, columns } => {
                write!(f, "tile grid of {} rows by {} columns is empty", rows, columns)
            }
        }
    }
}

impl std::error::Error for TilesetError {}

/// An image cut into a grid of equally sized tiles.
///
/// Rows divide the image width and columns divide its height, so `select_tile(row, column)`
/// moves right by `row` tiles and down by `column` tiles.
#[derive(Debug, Clone, Default)]
pub struct Tileset {
    canvas: Canvas,
    rows: usize,
    columns: usize,
    tile_width: usize,
    tile_height: usize,
    offset: usize,
}

impl Tileset {
    pub fn new(image: DecodedImage, rows: usize, columns: usize) -> Result<Self, TilesetError> {
        let mut tileset = Self::default();
        tileset.load_tileset(image, rows, columns)?;
        Ok(tileset)
    }

    /// Replaces the image and grid. On error the tileset is left unchanged.
    pub fn load_tileset(
        &mut self,
        image: DecodedImage,
        rows: usize,
        columns: usize,
    ) -> Result<(), TilesetError> {
        if rows == 0 || columns == 0 {
            return Err(TilesetError::EmptyGrid { rows, columns });
        }
        self.canvas.load_image(image);
        self.rows = rows;
        self.columns = columns;
        self.tile_width = self.canvas.width() / rows;
        self.tile_height = self.canvas.height() / columns;
        self.offset = 0;
        Ok(())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    pub fn select_tile(&mut self, row: usize, column: usize) {
        if row < self.rows && column < self.columns {
            let x = row * self.tile_width;
            let y = column * self.tile_height;
            self.offset = self.canvas.offset(0, x, y);
        }
    }

    pub fn draw_tile<T>(&self, x: usize, y: usize, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        for tile_x in 0..self.tile_width {
            for tile_y in 0..self.tile_height {
                let offset = self.canvas.offset(self.offset, tile_x, tile_y);
                self.canvas.draw_image_pixel(
                    offset,
                    x.saturating_add(tile_x),
                    y.saturating_add(tile_y),
                    target,
                );
            }
        }
    }
}
