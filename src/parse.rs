//! Text format for boards: the dimension `n` on the first line, followed by
//! `n` lines of `n` whitespace-separated tiles.

use std::str::FromStr;

use crate::board::Board;
use crate::error::{Error, Result};

fn parse_tile(token: &str, line: usize) -> Result<u32> {
    token
        .parse()
        .map_err(|e| Error::parse(line, format!("invalid tile '{}': {}", token, e)))
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Board> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (first, header) = lines
            .next()
            .ok_or_else(|| Error::parse(1, "missing board dimension"))?;
        let size: usize = header
            .parse()
            .map_err(|e| Error::parse(first, format!("invalid dimension '{}': {}", header, e)))?;
        if size == 0 {
            return Err(Error::parse(first, "dimension must be positive"));
        }
        if Board::cell_count(size).is_none() {
            return Err(Error::parse(first, format!("dimension {} is too large", size)));
        }

        let mut rows = Vec::new();
        let mut last = first;
        for _ in 0..size {
            let (number, line) = lines.next().ok_or_else(|| {
                Error::parse(
                    last + 1,
                    format!("expected {} rows, found {}", size, rows.len()),
                )
            })?;
            let row = line
                .split_whitespace()
                .map(|token| parse_tile(token, number))
                .collect::<Result<Vec<u32>>>()?;
            if row.len() != size {
                return Err(Error::parse(
                    number,
                    format!("expected {} tiles, found {}", size, row.len()),
                ));
            }
            rows.push(row);
            last = number;
        }

        if let Some((number, _)) = lines.next() {
            return Err(Error::parse(number, "unexpected input after last row"));
        }

        Board::new(rows)
    }
}
