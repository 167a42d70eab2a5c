use crate::{Board, Cell, Color, Orientation};

/// The character for a corner: `.` for neutral, `R` for red, `G` for green.
pub fn corner_char(color: Color) -> char {
    match color {
        Color::Neutral => '.',
        Color::Red => 'R',
        Color::Green => 'G',
    }
}

/// Three characters for a cell: left corner, link, right corner.
///
/// The link is `\` or `/` (following the orientation) when the cell is
/// connected, and a space otherwise.
pub fn cell_glyph(cell: &Cell) -> [char; 3] {
    let link = match (cell.connected(), cell.orientation()) {
        (false, _) => ' ',
        (true, Orientation::DiagonalDown) => '\\',
        (true, Orientation::DiagonalUp) => '/',
    };
    [
        corner_char(cell.left_color()),
        link,
        corner_char(cell.right_color()),
    ]
}

pub fn visualize_board(board: &Board) -> String {
    let n = board.cell_count();

    // Draw the top of the box
    let mut result = String::from("      ");
    for x in 0..n {
        result += &format!("{:^3}", x);
    }
    result.truncate(result.trim_end().len());
    result += "\n     ╭";
    for _ in 0..n {
        result += "───";
    }
    result += "╮\n";

    for (y, row) in board.rows().enumerate() {
        result += &format!("{:>4} │", y);
        for cell in row {
            result.extend(cell_glyph(cell));
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "     ╰";
    for _ in 0..n {
        result += "───";
    }
    result += "╯";
    result
}
