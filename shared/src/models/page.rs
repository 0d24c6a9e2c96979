//! Page envelope

use serde::{Deserialize, Serialize};

/// Fixed page size used by every list view
pub const PAGE_SIZE: u32 = 10;

/// Paged result: `{content, totalElements, totalPages, size, number}`
///
/// `number` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_spring_page() {
        let json = r#"{"content":[{"x":1}],"totalElements":11,"totalPages":2,"size":10,"number":1,"first":false,"last":true}"#;
        let page: Page<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.number, 1);
        assert_eq!(page.content.len(), 1);
    }
}
