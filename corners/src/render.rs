use std::collections::BTreeMap;

use crate::{Board, Cell, Color, DirtyCells, Orientation};

/// Something that draws cells. The game logic never looks at what it does.
pub trait CellRenderer {
    fn render_cell(&mut self, cell: &Cell);
}

/// Redraws the cells that changed during a move.
pub fn render_dirty<R>(board: &Board, dirty: &DirtyCells, renderer: &mut R)
where
    R: CellRenderer + ?Sized,
{
    for (x, y) in dirty.iter() {
        if let Some(cell) = board.get(x, y) {
            renderer.render_cell(cell);
        }
    }
}

/// Draws every cell of the board.
pub fn render_all<R: CellRenderer + ?Sized>(board: &Board, renderer: &mut R) {
    for cell in board.iter() {
        renderer.render_cell(cell);
    }
}

pub const BACKGROUND_COLOR: &str = "white";
pub const BORDER_COLOR: &str = "grey";

// Distance of the border and of the corners from the edge of the cell, in pixels.
const BORDER_INSET: u32 = 4;
const CORNER_INSET: u32 = 5;

pub fn svg_color(color: Color) -> &'static str {
    match color {
        Color::Neutral => "grey",
        Color::Red => "red",
        Color::Green => "green",
    }
}

/// Draws cells as SVG paths: a bordered square with two quarter circles.
///
/// An unconnected cell shows its two corners on a white square. A connected
/// cell is filled with its color instead, and the quarter circles are moved to
/// the other two corners of the square and drawn in the background color, so
/// that the colored area runs along the cell's diagonal.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    cell_count: usize,
    cell_dimension: u32,
    /// The latest drawing of each cell, keyed by `(y, x)` to keep row-major order.
    elements: BTreeMap<(i32, i32), String>,
}

/// Which pair of opposite corners of the square the quarter circles are drawn in.
#[derive(Clone, Copy)]
enum Layout {
    TopLeft,
    BottomLeft,
}

impl SvgRenderer {
    pub fn new(cell_count: usize, cell_dimension: u32) -> Self {
        Self {
            cell_count,
            cell_dimension,
            elements: BTreeMap::new(),
        }
    }

    /// The width and height of the whole board, in pixels.
    pub fn board_dimension(&self) -> u64 {
        self.cell_count as u64 * self.cell_dimension as u64
    }

    /// The drawing of a single cell, if it was rendered already.
    pub fn element(&self, x: i32, y: i32) -> Option<&str> {
        self.elements.get(&(y, x)).map(String::as_str)
    }

    /// A complete SVG document with all rendered cells, in row-major order.
    pub fn document(&self) -> String {
        let dim = self.board_dimension();
        let mut result = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
            dim, dim
        );
        for element in self.elements.values() {
            result += element;
        }
        result += "</svg>\n";
        result
    }

    fn draw(&self, cell: &Cell) -> String {
        let (layout, background, left, right) = match (cell.orientation(), cell.connected()) {
            (Orientation::DiagonalDown, false) => (
                Layout::TopLeft,
                BACKGROUND_COLOR,
                svg_color(cell.left_color()),
                svg_color(cell.right_color()),
            ),
            (Orientation::DiagonalDown, true) => (
                Layout::BottomLeft,
                svg_color(cell.left_color()),
                BACKGROUND_COLOR,
                BACKGROUND_COLOR,
            ),
            (Orientation::DiagonalUp, false) => (
                Layout::BottomLeft,
                BACKGROUND_COLOR,
                svg_color(cell.left_color()),
                svg_color(cell.right_color()),
            ),
            (Orientation::DiagonalUp, true) => (
                Layout::TopLeft,
                svg_color(cell.left_color()),
                BACKGROUND_COLOR,
                BACKGROUND_COLOR,
            ),
        };

        let d = self.cell_dimension as f64;
        let (start, half, end) = (CORNER_INSET as f64, d / 2.0, d - CORNER_INSET as f64);
        // Each quarter circle: the corner point, the next point clockwise, the end of the arc
        let (left_path, right_path) = match layout {
            Layout::TopLeft => (
                self.corner_path(cell, [(start, start), (half, start), (start, half)]),
                self.corner_path(cell, [(end, end), (half, end), (end, half)]),
            ),
            Layout::BottomLeft => (
                self.corner_path(cell, [(start, end), (start, half), (half, end)]),
                self.corner_path(cell, [(end, start), (end, half), (half, start)]),
            ),
        };

        format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"{}\"/>\n\
             <path d=\"{}\" fill=\"{}\"/>\n\
             <path d=\"{}\" fill=\"{}\"/>\n",
            self.square_path(cell),
            BORDER_COLOR,
            background,
            left_path,
            left,
            right_path,
            right
        )
    }

    fn origin(&self, cell: &Cell) -> (f64, f64) {
        let d = self.cell_dimension as f64;
        (cell.x() as f64 * d, cell.y() as f64 * d)
    }

    fn square_path(&self, cell: &Cell) -> String {
        let (x, y) = self.origin(cell);
        let inset = BORDER_INSET as f64;
        let far = self.cell_dimension as f64 - inset;
        let (min_x, max_x, min_y, max_y) = (x + inset, x + far, y + inset, y + far);
        format!(
            "M {} {} L {} {} L {} {} L {} {} L {} {}",
            min_x, min_y, min_x, max_y, max_x, max_y, max_x, min_y, min_x, min_y
        )
    }

    fn corner_path(&self, cell: &Cell, points: [(f64, f64); 3]) -> String {
        let (x, y) = self.origin(cell);
        let radius = self.cell_dimension as f64 / 2.0;
        let [(corner_x, corner_y), (next_x, next_y), (end_x, end_y)] = points;
        format!(
            "M{} {} L{} {} A{} {} 1 0 1 {} {}",
            corner_x + x,
            corner_y + y,
            next_x + x,
            next_y + y,
            radius,
            radius,
            end_x + x,
            end_y + y
        )
    }
}

impl CellRenderer for SvgRenderer {
    fn render_cell(&mut self, cell: &Cell) {
        let element = self.draw(cell);
        self.elements.insert((cell.y(), cell.x()), element);
    }
}
