//! Line scanning: chunked reads and comment-text isolation.

use std::io::{self, BufRead};

use crate::extract::find_chinese_spans;

/// Default character budget for one batch of lines.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Default comment marker.
pub const DEFAULT_MARKER: &str = "//";

/// Lazy batches of lines read from a `BufRead`.
///
/// Each batch holds whole lines, terminators included, and is closed as soon
/// as it reaches `budget` characters. A batch is never empty. The first read
/// error is yielded once and ends the sequence.
pub struct LineChunks<R> {
    reader: R,
    budget: usize,
    done: bool,
}

impl<R: BufRead> LineChunks<R> {
    pub fn new(reader: R, budget: usize) -> Self {
        Self {
            reader,
            budget: budget.max(1),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineChunks<R> {
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut batch = Vec::new();
        let mut size = 0;

        while size < self.budget {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    break;
                }
                Ok(_) => {
                    size += line.chars().count();
                    batch.push(line);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if batch.is_empty() { None } else { Some(Ok(batch)) }
    }
}

/// Returns the comment text of `line`: everything from the first `marker`
/// onward, after leading whitespace is stripped.
///
/// Lines without the marker have no comment text and are never translated.
pub fn comment_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    let trimmed = line.trim_start();
    trimmed.find(marker).map(|start| &trimmed[start..])
}

/// Chinese spans found in the comment text of `line`.
pub fn chinese_spans<'a>(line: &'a str, marker: &str) -> Vec<&'a str> {
    comment_text(line, marker).map_or_else(Vec::new, find_chinese_spans)
}
