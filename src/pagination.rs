//! This module defines the common functionality for paging data.

use serde::Deserialize;

use crate::Error;

/// The optional pagination query parameters of a listing endpoint.
///
/// `page` is zero-based. Both parameters must be given together: a request
/// that sets only one of them is rejected so the caller cannot silently get
/// the full result set when they expected a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// The zero-based page number.
    pub page: Option<u64>,
    /// The number of items per page.
    pub size: Option<u64>,
}

impl PageParams {
    /// Convert the page parameters into an `(offset, limit)` pair, or `None`
    /// when no pagination was requested.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if only one of `page`
    /// and `size` is set, or if `size` is zero.
    pub fn to_offset_limit(self) -> Result<Option<(u64, u64)>, Error> {
        match (self.page, self.size) {
            (None, None) => Ok(None),
            (Some(_), None) | (None, Some(_)) => Err(Error::validation(
                "page",
                "Both page and size must be provided for pagination",
            )),
            (Some(_), Some(0)) => {
                Err(Error::validation("size", "Page size must be greater than 0"))
            }
            (Some(page), Some(size)) => Ok(Some((page * size, size))),
        }
    }
}
