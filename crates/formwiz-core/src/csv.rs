//! Tokenizer for exported spreadsheet CSV.
//!
//! Spreadsheets export soft-wrapped cells as quoted fields containing line
//! breaks; the tokenizer folds those breaks into a single space so one cell
//! stays one cell. Every cell is trimmed.
//!
//! An unterminated quote does not fail: the rest of the input becomes part of
//! the last field.

/// One scan unit of the tokenizer: an ordered list of trimmed cells.
pub type Row = Vec<String>;

/// Parse CSV text into rows.
///
/// Never returns an empty vector: empty input yields one row holding a single
/// empty cell, and a trailing newline yields a trailing empty row.
pub fn parse_csv(text: &str) -> Vec<Row> {
    CsvRows::new(text).collect()
}

/// Single-pass iterator over the rows of a CSV document.
#[derive(Debug)]
pub struct CsvRows {
    chars: Vec<char>,
    pos: usize,
    finished: bool,
}

impl CsvRows {
    /// Prepare a scan over `text`, normalizing CRLF and lone CR to LF.
    pub fn new(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            chars: normalized.chars().collect(),
            pos: 0,
            finished: false,
        }
    }
}

impl Iterator for CsvRows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.finished {
            return None;
        }

        let mut row = Row::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            match c {
                '"' if in_quotes && self.chars.get(self.pos) == Some(&'"') => {
                    field.push('"');
                    self.pos += 1;
                }
                '"' => in_quotes = !in_quotes,
                '\n' if in_quotes => field.push(' '),
                '\n' => {
                    row.push(field.trim().to_string());
                    return Some(row);
                }
                ',' if !in_quotes => {
                    row.push(field.trim().to_string());
                    field.clear();
                }
                _ => field.push(c),
            }
        }

        // End of input always closes the last row, even when empty.
        self.finished = true;
        row.push(field.trim().to_string());
        Some(row)
    }
}
