// src/calc/pagination.rs

use serde::Serialize;

/// One page of an in-memory list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub page_items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices `items` into 1-based pages.
///
/// A page past the end yields no items. Page 0 is treated as page 1 and a page
/// size of 0 as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let page_items = if start >= total_items {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        page_items,
        page,
        page_size,
        total_pages,
        total_items,
    }
}
