//! Edit descriptors for incremental re-parsing
//!
//! An [`EditDescriptor`] describes one contiguous text mutation in both byte
//! offsets and (row, column) points. Compound edits must be split by the
//! caller into one descriptor per primitive change, applied in order.

use serde::Serialize;
use tree_sitter::InputEdit;

/// A (row, column) position; column counts bytes from the line start
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct TextPoint {
    pub row: usize,
    pub column: usize,
}

impl TextPoint {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<TextPoint> for tree_sitter::Point {
    fn from(p: TextPoint) -> Self {
        tree_sitter::Point {
            row: p.row,
            column: p.column,
        }
    }
}

/// One contiguous text change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditDescriptor {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
    pub start_point: TextPoint,
    pub old_end_point: TextPoint,
    pub new_end_point: TextPoint,
}

/// Convert a byte offset to a point (row, column in bytes)
pub fn byte_to_point(text: &str, byte_offset: usize) -> TextPoint {
    let mut row = 0usize;
    let mut col = 0usize;

    for &byte in text.as_bytes().iter().take(byte_offset) {
        if byte == b'\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    TextPoint { row, column: col }
}

/// Point reached after writing `inserted` starting at `start`
fn advance_point(start: TextPoint, inserted: &str) -> TextPoint {
    match inserted.rfind('\n') {
        Some(last_nl) => TextPoint {
            row: start.row + inserted.bytes().filter(|&b| b == b'\n').count(),
            column: inserted.len() - last_nl - 1,
        },
        None => TextPoint {
            row: start.row,
            column: start.column + inserted.len(),
        },
    }
}

impl EditDescriptor {
    /// Descriptor for inserting `inserted` at byte `at` of `old_text`
    pub fn insert(old_text: &str, at: usize, inserted: &str) -> Self {
        let start_point = byte_to_point(old_text, at);
        Self {
            start_byte: at,
            old_end_byte: at,
            new_end_byte: at + inserted.len(),
            start_point,
            old_end_point: start_point,
            new_end_point: advance_point(start_point, inserted),
        }
    }

    /// Descriptor for deleting `range` from `old_text`
    pub fn delete(old_text: &str, range: std::ops::Range<usize>) -> Self {
        let start_point = byte_to_point(old_text, range.start);
        Self {
            start_byte: range.start,
            old_end_byte: range.end,
            new_end_byte: range.start,
            start_point,
            old_end_point: byte_to_point(old_text, range.end),
            new_end_point: start_point,
        }
    }

    /// Derive the descriptor by diffing old and new source text.
    ///
    /// Assumes the change is contiguous: the common prefix and suffix are
    /// stripped and the remainder becomes the edit. Returns `None` if the
    /// sources are identical.
    pub fn from_texts(old_src: &str, new_src: &str) -> Option<Self> {
        if old_src == new_src {
            return None;
        }

        let old_bytes = old_src.as_bytes();
        let new_bytes = new_src.as_bytes();

        let mut start = 0;
        let max_start = old_bytes.len().min(new_bytes.len());
        while start < max_start && old_bytes[start] == new_bytes[start] {
            start += 1;
        }

        // Common suffix, not overlapping the prefix
        let mut old_end = old_bytes.len();
        let mut new_end = new_bytes.len();
        while old_end > start && new_end > start && old_bytes[old_end - 1] == new_bytes[new_end - 1]
        {
            old_end -= 1;
            new_end -= 1;
        }

        Some(Self {
            start_byte: start,
            old_end_byte: old_end,
            new_end_byte: new_end,
            start_point: byte_to_point(old_src, start),
            old_end_point: byte_to_point(old_src, old_end),
            new_end_point: byte_to_point(new_src, new_end),
        })
    }

    /// Reject descriptors that cannot describe any real change of `new_len` bytes
    pub fn validate(&self, new_len: usize) -> Result<(), String> {
        if self.start_byte > self.old_end_byte {
            return Err(format!(
                "start byte {} is past old end byte {}",
                self.start_byte, self.old_end_byte
            ));
        }
        if self.start_byte > self.new_end_byte {
            return Err(format!(
                "start byte {} is past new end byte {}",
                self.start_byte, self.new_end_byte
            ));
        }
        if self.new_end_byte > new_len {
            return Err(format!(
                "new end byte {} is past the end of the new text ({} bytes)",
                self.new_end_byte, new_len
            ));
        }
        if self.start_point > self.old_end_point || self.start_point > self.new_end_point {
            return Err("edit points are out of order".to_string());
        }
        Ok(())
    }

    /// Net change in document length
    pub fn delta(&self) -> isize {
        self.new_end_byte as isize - self.old_end_byte as isize
    }
}

impl From<&EditDescriptor> for InputEdit {
    fn from(edit: &EditDescriptor) -> Self {
        InputEdit {
            start_byte: edit.start_byte,
            old_end_byte: edit.old_end_byte,
            new_end_byte: edit.new_end_byte,
            start_position: edit.start_point.into(),
            old_end_position: edit.old_end_point.into(),
            new_end_position: edit.new_end_point.into(),
        }
    }
}
