// Frame atlas layout: a clip image split into an evenly sized grid of cells

/// A cell within a frame atlas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Grid of equally sized frames laid out left to right, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGrid {
    columns: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
}

impl FrameGrid {
    /// Split an atlas of the given pixel size into `columns` x `rows` cells
    ///
    /// Leftover pixels that don't fill a whole cell are ignored.
    pub fn new(atlas_width: u32, atlas_height: u32, columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);

        Self {
            columns,
            rows,
            cell_width: atlas_width / columns,
            cell_height: atlas_height / rows,
        }
    }

    /// Size of one frame cell
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Total number of cells, blank or not, saturating at `u32::MAX`
    pub fn cell_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows)
    }

    /// Region of the frame at `index`, counted row by row
    pub fn region(&self, index: u32) -> Option<FrameRegion> {
        if index >= self.cell_count() {
            return None;
        }

        Some(FrameRegion {
            x: self.cell_width * (index % self.columns),
            y: self.cell_height * (index / self.columns),
            width: self.cell_width,
            height: self.cell_height,
        })
    }
}
