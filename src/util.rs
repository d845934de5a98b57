use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use log::warn;
use crate::puzzle::PuzzleError;

/// Parse `"1,2,3,0"` into tile values. Whitespace around tokens is ignored.
pub fn parse_tiles(str: &str) -> Result<Vec<u16>, PuzzleError> {
    str.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<u16>()
                .map_err(|_| PuzzleError::InvalidTile(token.to_string()))
        })
        .collect()
}

/// One comma separated board per line. Blank lines and lines starting with `#` are
/// skipped; a line that fails to parse is logged and skipped.
pub fn read_puzzles(path: impl AsRef<Path>) -> Result<Vec<Vec<u16>>, PuzzleError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut result: Vec<Vec<u16>> = vec![];

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_tiles(line) {
            Ok(tiles) => result.push(tiles),
            Err(e) => warn!("skipping line {}: {}", line_idx + 1, e),
        }
    }

    Ok(result)
}
