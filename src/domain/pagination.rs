use serde::Serialize;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page coordinates
///
/// # Invariants
/// - `size` is between 1 and `MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Example
    /// ```
    /// use team_roster_api::domain::pagination::PageRequest;
    ///
    /// let page = PageRequest::new(2, 10).expect("valid page");
    /// assert_eq!(page.offset(), 20);
    /// assert!(PageRequest::new(0, 0).is_err());
    /// ```
    pub fn new(number: u32, size: u32) -> Result<Self, String> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            ));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of entries preceding this page
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }
}

/// One page of an ordered collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Shapes a page from its entries and the size of the whole collection
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page_number: request.number(),
            page_size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size())),
        }
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page_number) + 1 >= self.total_pages
    }
}
