use std::fmt;

/// Zero-based position; `character` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextPosition {
    pub line: u32,
    pub character: u32,
}

impl TextPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replaces the whole document.
    Full(String),
    /// Replaces `range`; an empty range inserts.
    Range { range: TextRange, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    Inverted { start: TextPosition, end: TextPosition },
    LineOutOfBounds { position: TextPosition, line_count: usize },
    CharacterOutOfBounds { position: TextPosition, line_length: u32 },
    SplitCharacter { position: TextPosition },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Inverted { start, end } => {
                write!(f, "range end {} precedes its start {}", end, start)
            }
            RangeError::LineOutOfBounds {
                position,
                line_count,
            } => {
                write!(f, "line {} is past the end of a {}-line document", position.line, line_count)
            }
            RangeError::CharacterOutOfBounds {
                position,
                line_length,
            } => {
                write!(
                    f,
                    "character {} is past the end of line {} ({} code units)",
                    position.character, position.line, line_length
                )
            }
            RangeError::SplitCharacter { position } => {
                write!(f, "position {} falls inside a surrogate pair", position)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Document content kept in sync with the editor through ordered edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Translates a line/UTF-16 position into a byte offset.
    pub fn offset_at(&self, position: TextPosition) -> Result<usize, RangeError> {
        let mut line_start = 0;
        for _ in 0..position.line {
            match self.text[line_start..].find('\n') {
                Some(idx) => line_start += idx + 1,
                None => {
                    return Err(RangeError::LineOutOfBounds {
                        position,
                        line_count: self.text.split('\n').count(),
                    });
                }
            }
        }

        let line_end = self.text[line_start..]
            .find('\n')
            .map_or(self.text.len(), |idx| line_start + idx);

        let mut units = 0u32;
        for (idx, ch) in self.text[line_start..line_end].char_indices() {
            if units == position.character {
                return Ok(line_start + idx);
            }
            units += ch.len_utf16() as u32;
            if units > position.character {
                return Err(RangeError::SplitCharacter { position });
            }
        }

        if units == position.character {
            Ok(line_end)
        } else {
            Err(RangeError::CharacterOutOfBounds {
                position,
                line_length: units,
            })
        }
    }

    /// Applies one edit. A malformed range leaves the buffer untouched.
    pub fn apply_edit(&mut self, edit: Edit) -> Result<(), RangeError> {
        match edit {
            Edit::Full(text) => self.text = text,
            Edit::Range { range, text } => {
                if range.end < range.start {
                    return Err(RangeError::Inverted {
                        start: range.start,
                        end: range.end,
                    });
                }
                let start = self.offset_at(range.start)?;
                let end = self.offset_at(range.end)?;
                self.text.replace_range(start..end, &text);
            }
        }
        Ok(())
    }

    /// Applies `edits` in order, each against the result of the previous one.
    ///
    /// Stops at the first malformed edit: everything before it stays applied,
    /// the malformed edit and everything after it are dropped.
    pub fn apply<I>(&mut self, edits: I) -> Result<&str, RangeError>
    where
        I: IntoIterator<Item = Edit>,
    {
        for edit in edits {
            self.apply_edit(edit)?;
        }
        Ok(&self.text)
    }
}
