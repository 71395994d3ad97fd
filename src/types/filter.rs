//! Query filter and pagination types
//!
//! Raw query parameters (as an HTTP layer or the CLI would receive them) are
//! turned into a typed `QueryFilter` once, at the boundary. Empty strings are
//! treated as absent, matching how query-string parameters behave.

/// Which records a query selects, resolved in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Sender AND recipient both match
    SenderAndRecipient {
        /// Sender key
        sender: &'a str,
        /// Recipient key
        recipient: &'a str,
    },
    /// Sender matches
    Sender(&'a str),
    /// Recipient matches
    Recipient(&'a str),
    /// Numeric value strictly above the (unparsed) threshold
    AboveValue(&'a str),
    /// No filter
    All,
}

/// Offset/limit window applied after filtering
///
/// Construction is lenient: malformed or negative offsets become 0 and a
/// malformed or negative limit means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// Number of matched records to skip
    pub offset: usize,
    /// Maximum number of records to return (`None` = all remaining)
    pub limit: Option<usize>,
}

impl Pagination {
    /// Create a window from already-validated values
    pub fn new(offset: usize, limit: Option<usize>) -> Self {
        Self { offset, limit }
    }

    /// Build a window from raw query parameters
    ///
    /// # Arguments
    ///
    /// * `offset` - Raw offset; absent, malformed or negative values yield 0
    /// * `limit` - Raw limit; absent, malformed or negative values yield no limit
    pub fn from_params(offset: Option<&str>, limit: Option<&str>) -> Self {
        let offset = offset
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(|n| usize::try_from(n).unwrap_or(0))
            .unwrap_or(0);

        let limit = limit
            .and_then(|raw| raw.parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok());

        Self { offset, limit }
    }

    /// Half-open index range `[start, end)` of this window over `len` items
    ///
    /// `start >= len` yields an empty range.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        if self.offset >= len {
            return (len, len);
        }
        let end = match self.limit {
            Some(limit) => self.offset.saturating_add(limit).min(len),
            None => len,
        };
        (self.offset, end)
    }
}

/// Typed query request
///
/// Mirrors the `from`, `to`, `aboveValue`, `offset` and `limit` query
/// parameters one-to-one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFilter {
    /// Sender address filter
    pub sender: Option<String>,
    /// Recipient address filter
    pub recipient: Option<String>,
    /// Strict lower bound on value, kept raw until query time
    pub above_value: Option<String>,
    /// Window over the matched records
    pub pagination: Pagination,
}

impl QueryFilter {
    /// Build a filter from raw query parameters
    ///
    /// Empty strings are treated as absent.
    pub fn from_params(
        sender: Option<&str>,
        recipient: Option<&str>,
        above_value: Option<&str>,
        offset: Option<&str>,
        limit: Option<&str>,
    ) -> Self {
        Self {
            sender: non_empty(sender),
            recipient: non_empty(recipient),
            above_value: non_empty(above_value),
            pagination: Pagination::from_params(non_empty_str(offset), non_empty_str(limit)),
        }
    }

    /// Filter on sender only
    pub fn sender(sender: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            ..Self::default()
        }
    }

    /// Filter on recipient only
    pub fn recipient(recipient: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient.into()),
            ..Self::default()
        }
    }

    /// Filter on value threshold only
    pub fn above_value(threshold: impl Into<String>) -> Self {
        Self {
            above_value: Some(threshold.into()),
            ..Self::default()
        }
    }

    /// Replace the pagination window, builder style
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Resolve which predicate applies
    ///
    /// Priority: sender AND recipient, then sender, then recipient, then
    /// value threshold, then everything. Lower-priority filters are ignored
    /// when a higher one is present.
    pub fn selection(&self) -> Selection<'_> {
        match (
            self.sender.as_deref(),
            self.recipient.as_deref(),
            self.above_value.as_deref(),
        ) {
            (Some(sender), Some(recipient), _) => {
                Selection::SenderAndRecipient { sender, recipient }
            }
            (Some(sender), None, _) => Selection::Sender(sender),
            (None, Some(recipient), _) => Selection::Recipient(recipient),
            (None, None, Some(threshold)) => Selection::AboveValue(threshold),
            (None, None, None) => Selection::All,
        }
    }
}

fn non_empty_str(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    non_empty_str(raw).map(str::to_string)
}
