use crate::grid::{Grid, OccupancyMask};
use crate::types::LayoutParams;

/// Fixed letterform bitmap. 1 = dot, 0 = negative space.
#[derive(Clone, Copy, Debug)]
pub struct Stencil {
    cells: &'static [&'static [u8]],
}

/// Block "M" rendered into the hero area of the full-page backdrop.
pub const HERO_M: Stencil = Stencil {
    cells: &[
        &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
        &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1],
        &[1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
    ],
};

/// Narrower "M" used by the standalone dot badge.
pub const BADGE_M: Stencil = Stencil {
    cells: &[
        &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1],
        &[1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1],
        &[1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1],
        &[1, 1, 0, 0, 1, 1, 1, 1, 1, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
        &[1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    ],
};

impl Stencil {
    pub fn rows(&self) -> i32 {
        self.cells.len() as i32
    }

    pub fn cols(&self) -> i32 {
        self.cells[0].len() as i32
    }

    pub fn is_set(&self, row: i32, col: i32) -> bool {
        row >= 0
            && col >= 0
            && row < self.rows()
            && col < self.cols()
            && self.cells[row as usize][col as usize] == 1
    }

    /// Anchor cell inside `grid`. Desktop layouts park the glyph at 80% of
    /// the width (nudged two cells left); narrow layouts center it. The row
    /// anchor tracks the initial viewport, not the whole document, so the
    /// glyph lands in the hero fold.
    pub fn anchor(&self, grid: &Grid, viewport_h: f32, params: &LayoutParams) -> StencilPlacement {
        let desktop = grid.surface_size().x > params.desktop_breakpoint;
        let col = if desktop {
            (grid.cols as f32 * 0.8) as i32 - self.cols() / 2 - 2
        } else {
            (grid.cols as f32 * 0.5) as i32 - self.cols() / 2
        };
        let row = ((viewport_h / params.pitch) * 0.5) as i32 - self.rows() / 2 + 2;
        StencilPlacement {
            stencil: *self,
            row,
            col,
            box_padding: params.glyph_box_padding,
        }
    }
}

/// A stencil anchored to a grid cell, with a padded reservation box around it.
#[derive(Clone, Copy, Debug)]
pub struct StencilPlacement {
    stencil: Stencil,
    pub row: i32,
    pub col: i32,
    box_padding: i32,
}

impl StencilPlacement {
    /// True for every cell of the padded bounding box, dot or void.
    pub fn in_padded_box(&self, row: i32, col: i32) -> bool {
        let r = row - self.row;
        let c = col - self.col;
        r >= -self.box_padding
            && r < self.stencil.rows() + self.box_padding
            && c >= -self.box_padding
            && c < self.stencil.cols() + self.box_padding
    }

    pub fn is_glyph_cell(&self, row: i32, col: i32) -> bool {
        self.stencil.is_set(row - self.row, col - self.col)
    }

    /// Claims the padded box so walkers can never thread through the glyph.
    pub fn reserve(&self, mask: &mut OccupancyMask) {
        for r in (self.row - self.box_padding)..(self.row + self.stencil.rows() + self.box_padding)
        {
            for c in
                (self.col - self.box_padding)..(self.col + self.stencil.cols() + self.box_padding)
            {
                mask.reserve(r, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LayoutParams {
        LayoutParams::default()
    }

    #[test]
    fn glyph_matrices_are_rectangular() {
        for stencil in [HERO_M, BADGE_M] {
            let cols = stencil.cols();
            assert!(stencil.cells.iter().all(|row| row.len() as i32 == cols));
        }
    }

    #[test]
    fn desktop_anchor_sits_right_of_center() {
        let grid = Grid::new(1500.0, 3000.0, 30.0, 0.0); // 50 cols
        let placement = HERO_M.anchor(&grid, 900.0, &params());
        assert_eq!(placement.col, 40 - 7 - 2);
        assert_eq!(placement.row, 15 - 5 + 2);
    }

    #[test]
    fn narrow_anchor_is_centered() {
        let grid = Grid::new(600.0, 2400.0, 30.0, 0.0); // 20 cols
        let placement = HERO_M.anchor(&grid, 800.0, &params());
        assert_eq!(placement.col, 10 - 7);
    }

    #[test]
    fn padded_box_extends_two_cells_past_the_glyph() {
        let grid = Grid::new(1500.0, 3000.0, 30.0, 0.0);
        let placement = HERO_M.anchor(&grid, 900.0, &params());
        assert!(placement.in_padded_box(placement.row - 2, placement.col - 2));
        assert!(!placement.in_padded_box(placement.row - 3, placement.col));
        assert!(placement.in_padded_box(placement.row + HERO_M.rows() + 1, placement.col));
        assert!(!placement.in_padded_box(placement.row + HERO_M.rows() + 2, placement.col));
    }

    #[test]
    fn reserve_marks_the_whole_box() {
        let grid = Grid::new(1500.0, 3000.0, 30.0, 0.0);
        let placement = HERO_M.anchor(&grid, 900.0, &params());
        let mut mask = OccupancyMask::new(&grid);
        placement.reserve(&mut mask);
        for r in (placement.row - 2)..(placement.row + HERO_M.rows() + 2) {
            for c in (placement.col - 2)..(placement.col + HERO_M.cols() + 2) {
                assert!(mask.is_reserved(r, c), "({r},{c}) should be reserved");
            }
        }
        assert!(mask.is_clear(placement.row - 3, placement.col));
    }

    #[test]
    fn void_cells_are_inside_box_but_not_glyph() {
        let grid = Grid::new(1500.0, 3000.0, 30.0, 0.0);
        let placement = HERO_M.anchor(&grid, 900.0, &params());
        // Middle of the bottom row of the M is negative space.
        let (r, c) = (placement.row + 10, placement.col + 7);
        assert!(placement.in_padded_box(r, c));
        assert!(!placement.is_glyph_cell(r, c));
        // Top-left corner of the M is a dot.
        assert!(placement.is_glyph_cell(placement.row, placement.col));
    }
}
