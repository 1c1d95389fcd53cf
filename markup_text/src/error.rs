// Copyright 2025 the Markup Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for markup operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the attempted range and the
/// buffer length at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start offset of the caller-provided range.
    start: usize,

    /// The end offset (exclusive) of the caller-provided range.
    end: usize,

    /// The length in chars of the buffer at the time of failure.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start offset of the range provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end offset of the range provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in chars of the buffer at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            start,
            end,
            len,
        }
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidBounds => write!(
                f,
                "range {}..{} out of bounds for len {}",
                self.start, self.end, self.len
            ),
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Provided range offsets were out of bounds relative to the buffer length.
    InvalidBounds,

    /// The provided range had `start > end`.
    InvalidRange,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use alloc::format;

    #[test]
    fn display_messages() {
        let err = Error::invalid_bounds(2, 9, 6);
        assert_eq!(err.kind(), ErrorKind::InvalidBounds);
        assert_eq!(format!("{err}"), "range 2..9 out of bounds for len 6");

        let err = Error::invalid_range(4, 3, 6);
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!((err.start(), err.end(), err.len()), (4, 3, 6));
        assert_eq!(format!("{err}"), "invalid range 4..3: start > end");
    }
}
