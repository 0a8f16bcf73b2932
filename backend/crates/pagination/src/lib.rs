//! Offset/limit pagination envelope primitives.
//!
//! Every paginated operation in the backend accepts a [`PageRequest`]
//! (zero-based element offset plus page size) and returns a [`Page`] carrying
//! the page content together with the total element count. The presentation
//! layer maps user-facing one-based page numbers onto offsets via
//! [`PageRequest::from_page_number`].

use serde::{Deserialize, Serialize};

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page size was zero.
    #[error("page size must be at least 1")]
    ZeroLimit,
    /// The one-based page number was zero.
    #[error("page number must be at least 1")]
    ZeroPageNumber,
}

/// A validated request for one page of a larger result set.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(40, 20)?;
/// assert_eq!(request.offset(), 40);
/// assert_eq!(request.limit(), 20);
/// # Ok::<(), pagination::PageRequestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: usize,
    limit: usize,
}

impl PageRequest {
    /// Construct a request from a zero-based element offset and a page size.
    pub fn new(offset: usize, limit: usize) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { offset, limit })
    }

    /// Construct a request from a one-based page number and a page size.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_page_number(3, 20)?;
    /// assert_eq!(request.offset(), 40);
    /// # Ok::<(), pagination::PageRequestError>(())
    /// ```
    pub fn from_page_number(page: usize, size: usize) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPageNumber);
        }
        Self::new((page - 1).saturating_mul(size), size)
    }

    /// Zero-based offset of the first element on the page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of elements on the page.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A bounded slice of an ordered result set plus the total element count.
///
/// # Examples
/// ```
/// use pagination::Page;
///
/// let page = Page::new(vec![1, 2, 3], 10);
/// assert_eq!(page.content().len(), 3);
/// assert_eq!(page.total(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    total: usize,
}

impl<T> Page<T> {
    /// Construct a page from its content and the total element count.
    pub fn new(content: Vec<T>, total: usize) -> Self {
        Self { content, total }
    }

    /// An empty page over an empty result set.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total: 0,
        }
    }

    /// Slice one page out of a complete, already-ordered collection.
    ///
    /// An offset at or past the end yields an empty page that still reports
    /// the collection's total size.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let items: Vec<u32> = (0..25).collect();
    /// let page = Page::from_complete(items, &PageRequest::new(20, 20)?);
    /// assert_eq!(page.content().len(), 5);
    /// assert_eq!(page.total(), 25);
    /// # Ok::<(), pagination::PageRequestError>(())
    /// ```
    pub fn from_complete(items: Vec<T>, request: &PageRequest) -> Self {
        let total = items.len();
        if request.offset() >= total {
            return Self {
                content: Vec::new(),
                total,
            };
        }
        let content = items
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self { content, total }
    }

    /// Elements on this page.
    pub fn content(&self) -> &[T] {
        self.content.as_slice()
    }

    /// Consume the page, yielding its content.
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Total number of elements across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether this page carries no elements.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Transform the page content while preserving the total count.
    ///
    /// # Examples
    /// ```
    /// use pagination::Page;
    ///
    /// let page = Page::new(vec![1, 2], 5).map(|n| n * 10);
    /// assert_eq!(page.content(), &[10, 20]);
    /// assert_eq!(page.total(), 5);
    /// ```
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
