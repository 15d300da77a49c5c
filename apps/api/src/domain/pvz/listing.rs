use chrono::{DateTime, Utc};

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: u32 = 30;
/// Page size used when the caller gives none
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Page selection for the PVZ listing
///
/// # Invariants
/// - `page >= 1`
/// - `1 <= limit <= 30`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Example
    /// ```
    /// use pvz_api::domain::pvz::PageRequest;
    ///
    /// let page = PageRequest::new(2, 10).expect("valid page");
    /// assert_eq!(page.offset(), 10);
    /// assert!(PageRequest::new(0, 10).is_err());
    /// assert!(PageRequest::new(1, 31).is_err());
    /// ```
    pub fn new(page: u32, limit: u32) -> Result<Self, String> {
        if page < 1 {
            return Err(format!("invalid page: {}", page));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(format!(
                "invalid limit: {} (must be 1-{})",
                limit, MAX_PAGE_LIMIT
            ));
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of PVZs skipped before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Closed interval of reception start times used to filter the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a window, rejecting `start > end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start > end {
            return Err("startDate must be before endDate".to_string());
        }
        Ok(Self { start, end })
    }

    /// Builds a window only when both bounds are present
    ///
    /// A single bound does not filter anything.
    pub fn from_bounds(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<Self>, String> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive on both ends
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}
