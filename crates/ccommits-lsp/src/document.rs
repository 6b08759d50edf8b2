use crate::buffer::{Edit, RangeError, TextBuffer, TextPosition, TextRange};
use std::collections::HashMap;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

/// An open commit message buffer.
#[derive(Debug, Clone)]
pub struct Document {
    pub uri: Url,
    pub version: i32,
    buffer: TextBuffer,
}

impl Document {
    pub fn new(uri: Url, text: String, version: i32) -> Self {
        Self {
            uri,
            version,
            buffer: TextBuffer::new(text),
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }
}

/// Open documents keyed by uri.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, uri: Url, text: String, version: i32) {
        self.documents
            .insert(uri.clone(), Document::new(uri, text, version));
    }

    /// Applies an ordered batch of edits and returns the new content, or
    /// `None` when the document was never opened.
    ///
    /// On a [`RangeError`] the edits before the malformed one stay applied;
    /// the current content is still available through [`DocumentStore::get`].
    pub fn change(
        &mut self,
        uri: &Url,
        version: i32,
        edits: Vec<Edit>,
    ) -> Result<Option<String>, RangeError> {
        let Some(document) = self.documents.get_mut(uri) else {
            return Ok(None);
        };

        document.version = version;
        let text = document.buffer.apply(edits)?;
        Ok(Some(text.to_string()))
    }

    pub fn close(&mut self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri)
    }

    pub fn get(&self, uri: &Url) -> Option<&Document> {
        self.documents.get(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn to_text_position(position: Position) -> TextPosition {
    TextPosition::new(position.line, position.character)
}

impl From<TextDocumentContentChangeEvent> for Edit {
    fn from(change: TextDocumentContentChangeEvent) -> Self {
        match change.range {
            Some(range) => Edit::Range {
                range: TextRange::new(to_text_position(range.start), to_text_position(range.end)),
                text: change.text,
            },
            None => Edit::Full(change.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn uri(name: &str) -> Url {
        Url::parse(&format!("file:///repo/.git/{}", name)).unwrap()
    }

    fn change(range: Option<Range>, text: &str) -> Edit {
        Edit::from(TextDocumentContentChangeEvent {
            range,
            range_length: None,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_change_event_conversion() {
        assert_eq!(change(None, "feat: x"), Edit::Full("feat: x".to_string()));

        let range = Range::new(Position::new(0, 4), Position::new(0, 4));
        assert_eq!(
            change(Some(range), "!"),
            Edit::Range {
                range: TextRange::new(TextPosition::new(0, 4), TextPosition::new(0, 4)),
                text: "!".to_string(),
            }
        );
    }

    #[test]
    fn test_documents_are_independent() {
        let mut store = DocumentStore::new();
        store.open(uri("COMMIT_EDITMSG"), "feat: a".to_string(), 1);
        store.open(uri("MERGE_MSG"), "fix: b".to_string(), 1);

        let edits = vec![change(None, "docs: c")];
        let text = store.change(&uri("MERGE_MSG"), 2, edits).unwrap();

        assert_eq!(text.as_deref(), Some("docs: c"));
        assert_eq!(store.get(&uri("COMMIT_EDITMSG")).unwrap().text(), "feat: a");
        assert_eq!(store.get(&uri("MERGE_MSG")).unwrap().version, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_change_unknown_document() {
        let mut store = DocumentStore::new();
        let result = store.change(&uri("COMMIT_EDITMSG"), 1, vec![change(None, "x")]);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_failed_change_keeps_applied_edits() {
        let mut store = DocumentStore::new();
        store.open(uri("COMMIT_EDITMSG"), "feat".to_string(), 1);

        let edits = vec![
            change(Some(Range::new(Position::new(0, 4), Position::new(0, 4))), ": x"),
            change(Some(Range::new(Position::new(9, 0), Position::new(9, 0))), "y"),
        ];
        assert!(store.change(&uri("COMMIT_EDITMSG"), 2, edits).is_err());
        assert_eq!(store.get(&uri("COMMIT_EDITMSG")).unwrap().text(), "feat: x");
    }

    #[test]
    fn test_close_removes_document() {
        let mut store = DocumentStore::new();
        store.open(uri("COMMIT_EDITMSG"), "feat: a".to_string(), 1);

        assert!(store.close(&uri("COMMIT_EDITMSG")).is_some());
        assert!(store.get(&uri("COMMIT_EDITMSG")).is_none());
        assert!(store.is_empty());
    }
}
