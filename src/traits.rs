pub mod puzzle {
    use colored::{Color, Colorize};
    use crate::puzzle::Puzzle;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Palette {
        /// Yellow grid, red blank, blue tiles; used for boards along the path.
        Progress,
        /// Everything green; used for the solved board.
        Done,
        Plain,
    }

    impl Palette {
        fn frame(&self) -> Option<Color> {
            match self {
                Palette::Progress => Some(Color::Yellow),
                Palette::Done => Some(Color::Green),
                Palette::Plain => None,
            }
        }

        fn tile(&self, blank: bool) -> Option<Color> {
            match self {
                Palette::Progress if blank => Some(Color::Red),
                Palette::Progress => Some(Color::Blue),
                Palette::Done => Some(Color::Green),
                Palette::Plain => None,
            }
        }
    }

    fn paint(text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) => text.color(color).to_string(),
            None => text.to_string(),
        }
    }

    pub trait BoardPrintable {
        fn render(&self, palette: Palette) -> String;

        fn print_board(&self, palette: Palette) {
            print!("{}", self.render(palette));
        }
    }

    impl BoardPrintable for Puzzle {
        fn render(&self, palette: Palette) -> String {
            let frame = palette.frame();
            let size = self.size();
            let mut out = String::new();

            let border = |left: &str, join: &str, right: &str| {
                let mut line = String::from(left);
                for col in 0..size {
                    line.push_str("────");
                    if col < size - 1 {
                        line.push_str(join);
                    }
                }
                line.push_str(right);
                paint(&line, frame)
            };

            out.push_str(&border("┌", "┬", "┐"));
            out.push('\n');
            for (row_idx, row) in self.rows().enumerate() {
                out.push_str(&paint("│", frame));
                for tile in row {
                    out.push_str(&format!(" {} ", paint(&tile.to_string(), palette.tile(tile.is_blank()))));
                    out.push_str(&paint("│", frame));
                }
                out.push('\n');

                if row_idx < size - 1 {
                    out.push_str(&border("├", "┼", "┤"));
                    out.push('\n');
                }
            }
            out.push_str(&border("└", "┴", "┘"));
            out.push('\n');

            out
        }
    }


    /// Estimate of `f = g + h` for a board, where `g` is the board's cost so far.
    pub trait Heuristic {
        fn get_heuristic(&self, puzzle: &Puzzle) -> f64;
    }
}
