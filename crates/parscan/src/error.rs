// We define separate error machinery in this crate and in
// `parscan_nostd_internal`: the internal crate reports contract violations
// as `&'static str` (it can't allocate, and its callers are expected to
// have validated everything anyway), while this crate wraps them in a
// proper error type for public consumption. The wrapping approach is more
// upfront work than sharing one type, but it keeps the internal crate's
// error story from leaking into the public API.

/// The error type returned by every fallible entry point in this crate.
///
/// There is deliberately no variant for a failing combine operation: a
/// combine op signals failure by panicking, and the panic propagates out of
/// the scan (aborting it with no partial-result recovery). Since the
/// operation is assumed pure and deterministic, retrying could not help.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when the input and output sequences disagree
    /// about their length
    ShapeMismatch(ShapeMismatchError),
    /// An error that occurs within `parscan_nostd_internal`
    Internal(InternalError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that the input and output sequences
    /// have different lengths
    pub(crate) fn shape_mismatch(input_len: usize, output_len: usize) -> Self {
        Error {
            kind: ErrorKind::ShapeMismatch(ShapeMismatchError {
                input_len,
                output_len,
            }),
        }
    }

    /// wraps a contract-violation string from the internal crate
    pub(crate) fn internal(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::Internal(InternalError(message)),
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::ShapeMismatch(ref err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Internal(ref err) => core::fmt::Display::fmt(err, f),
        }
    }
}

/// An error that occurs when the input and output sequences disagree about
/// their length
#[derive(Clone, Debug)]
struct ShapeMismatchError {
    input_len: usize,
    output_len: usize,
}

impl core::fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the input sequence holds {} elements but the output holds {}. \
             A scan requires them to have equal lengths",
            self.input_len, self.output_len
        )
    }
}

/// Wraps the string errors reported by `parscan_nostd_internal`
#[derive(Clone, Debug)]
struct InternalError(&'static str);

impl core::fmt::Display for InternalError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
