use crossterm::style::Color;

/// One terminal cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
    };
}

/// A grid of cells drawn back to front; later writes win
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Writes a cell; anything off the grid is clipped
    pub fn put(&mut self, x: isize, y: isize, ch: char, fg: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Cell { ch, fg };
        }
    }

    pub fn text(&mut self, x: isize, y: isize, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as isize, y, ch, fg);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Draws a line between two cells using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, ch: char, fg: Color) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.put(x0, y0, ch, fg);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips_outside_grid() {
        let mut canvas = Canvas::new(4, 2);
        canvas.put(-1, 0, 'x', Color::White);
        canvas.put(4, 1, 'x', Color::White);
        canvas.put(1, 1, 'o', Color::White);
        assert_eq!(canvas.get(1, 1).map(|c| c.ch), Some('o'));
        assert_eq!(canvas.rows().flatten().filter(|c| c.ch != ' ').count(), 1);
    }

    #[test]
    fn diagonal_line_touches_both_ends() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_line(0.0, 0.0, 4.0, 4.0, '*', Color::White);
        for i in 0..5 {
            assert_eq!(canvas.get(i, i).map(|c| c.ch), Some('*'));
        }
        assert_eq!(canvas.get(4, 0), Some(Cell::BLANK));
    }

    #[test]
    fn text_is_clipped_at_right_edge() {
        let mut canvas = Canvas::new(3, 1);
        canvas.text(1, 0, "abc", Color::White);
        let row: String = canvas.rows().next().unwrap().iter().map(|c| c.ch).collect();
        assert_eq!(row, " ab");
    }
}
