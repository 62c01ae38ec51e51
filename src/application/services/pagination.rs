//! Pagination cursor carried inside the "Next page" button

use serde::{Deserialize, Serialize};
use crate::application::errors::CommandError;

/// Largest page a user may ask for
pub const MAX_PAGE_SIZE: usize = 100;

/// Where the next page starts and how long it is.
///
/// Serialized as `{"offset":N,"page_size":M}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCursor {
    pub offset: usize,
    pub page_size: usize,
}

impl ListCursor {
    pub fn new(offset: usize, page_size: usize) -> Self {
        Self { offset, page_size }
    }

    pub fn first_page(page_size: usize) -> Self {
        Self::new(0, page_size)
    }

    /// Cursor of the page right after this one
    pub fn next(self) -> Self {
        Self::new(self.offset.saturating_add(self.page_size), self.page_size)
    }

    pub fn encode(&self) -> Result<String, CommandError> {
        serde_json::to_string(self)
            .map_err(|e| CommandError::Internal(format!("cannot encode cursor: {}", e)))
    }

    pub fn decode(data: &str) -> Result<Self, CommandError> {
        let cursor: Self = serde_json::from_str(data)
            .map_err(|e| CommandError::MalformedPayload(format!("{:?}: {}", data, e)))?;
        if cursor.page_size == 0 || cursor.page_size > MAX_PAGE_SIZE {
            return Err(CommandError::MalformedPayload(format!(
                "{:?}: page size must be between 1 and {}",
                data, MAX_PAGE_SIZE
            )));
        }
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let cursor = ListCursor::new(6, 3);
        let encoded = cursor.encode().unwrap();
        assert_eq!(encoded, r#"{"offset":6,"page_size":3}"#);
        assert_eq!(ListCursor::decode(&encoded).unwrap(), cursor);
    }

    #[test]
    fn test_decode_accepts_largest_page() {
        let cursor = ListCursor::decode(r#"{"offset":0,"page_size":100}"#).unwrap();
        assert_eq!(cursor.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_next_advances_by_page_size() {
        let cursor = ListCursor::first_page(3);
        assert_eq!(cursor.next(), ListCursor::new(3, 3));
        assert_eq!(cursor.next().next(), ListCursor::new(6, 3));
        assert_eq!(ListCursor::new(usize::MAX, 3).next().offset, usize::MAX);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for data in ["", "not json", r#"{"offset":-1,"page_size":3}"#, r#"{"offset":1}"#, r#"{"offset":0,"page_size":0}"#, r#"{"offset":0,"page_size":101}"#] {
            assert!(
                matches!(ListCursor::decode(data), Err(CommandError::MalformedPayload(_))),
                "accepted {:?}",
                data
            );
        }
    }
}
