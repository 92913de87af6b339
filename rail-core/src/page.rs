use crate::{CoreError, CoreResult};

/// One window over an already ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Slice out page `page_number` (1-based) of `page_size` items.
    ///
    /// A page past the end is empty with `has_more == false`.
    pub fn slice(records: Vec<T>, page_number: i64, page_size: i64) -> CoreResult<Self> {
        if page_number < 1 {
            return Err(CoreError::InvalidArgument(format!(
                "page must be >= 1, got {}",
                page_number
            )));
        }
        if page_size <= 0 {
            return Err(CoreError::InvalidArgument(format!(
                "page size must be > 0, got {}",
                page_size
            )));
        }

        let total = records.len();
        let start = usize::try_from((page_number - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
        let end = start.saturating_add(page_size as usize);

        if start >= total {
            return Ok(Page { items: Vec::new(), has_more: false });
        }

        let items = records
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();

        Ok(Page { items, has_more: end < total })
    }
}
