//! 分页信封
//!
//! 所有列表接口都返回同一种分页结构，`content` 之外的字段描述页码与总量。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// 当前页码，从 0 开始
    pub number: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_elements: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
}

impl<T> Page<T> {
    /// `ceil(total / size)`，size 为 0 时为 0
    pub fn page_count(total_elements: u64, size: u32) -> u32 {
        if size == 0 {
            return 0;
        }
        total_elements.div_ceil(u64::from(size)) as u32
    }

    /// 分页信封的不变量：本页行数不超过 size，总页数与总数一致
    pub fn is_consistent(&self) -> bool {
        if self.size == 0 {
            return self.content.is_empty();
        }
        self.content.len() <= self.size as usize
            && self.total_pages == Self::page_count(self.total_elements, self.size)
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
        }
    }
}

impl<T: Clone> Page<T> {
    /// 从完整列表切出第 `number` 页
    pub fn from_slice(items: &[T], number: u32, size: u32) -> Self {
        let total_elements = items.len() as u64;
        let total_pages = Self::page_count(total_elements, size);
        let start = (number as usize).saturating_mul(size as usize);
        let content: Vec<T> = items
            .iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();
        let count = content.len() as u32;

        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: Some(number == 0),
            last: Some(number.saturating_add(1) >= total_pages),
            number_of_elements: Some(count),
            empty: Some(count == 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slices_respect_size() {
        let items: Vec<u32> = (0..23).collect();
        let page = Page::from_slice(&items, 2, 10);
        assert_eq!(page.content, vec![20, 21, 22]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.last, Some(true));
        assert!(page.is_consistent());
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_page_is_empty_but_consistent() {
        let items = vec!["a", "b"];
        let page = Page::from_slice(&items, 5, 10);
        assert!(page.content.is_empty());
        assert_eq!(page.empty, Some(true));
        assert!(page.is_consistent());
    }

    #[test]
    fn maximum_page_index_does_not_overflow() {
        let items = vec![1, 2, 3];
        let page = Page::from_slice(&items, u32::MAX, 10);
        assert!(page.content.is_empty());
        assert_eq!(page.last, Some(true));
        assert!(!page.has_next());

        let page: Page<u8> = serde_json::from_value(json!({
            "content": [],
            "totalElements": 0,
            "totalPages": 0,
            "number": 4294967295u64,
            "size": 10
        }))
        .unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn detects_inconsistent_envelope() {
        let page: Page<u8> = serde_json::from_value(json!({
            "content": [1, 2, 3],
            "totalElements": 3,
            "totalPages": 2,
            "number": 0,
            "size": 10
        }))
        .unwrap();
        assert!(!page.is_consistent());
    }

    #[test]
    fn ignores_pageable_metadata() {
        let page: Page<u8> = serde_json::from_value(json!({
            "content": [],
            "pageable": { "pageNumber": 0, "pageSize": 5 },
            "sort": { "sorted": true },
            "totalElements": 0,
            "totalPages": 0,
            "number": 0,
            "size": 5
        }))
        .unwrap();
        assert!(page.is_consistent());
    }
}
