use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Reader errors (everything below [`Error::ModuleLoad`]) describe why a specific image could
/// not be decoded. The analysis entry points wrap them into [`Error::ModuleLoad`], so a caller
/// only ever has to match a single variant to learn that an input was rejected.
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// Description of the defect
        message: String,
        /// Source file that detected the defect
        file: &'static str,
        /// Source line that detected the defect
        line: u32,
    },

    /// A read would have gone past the end of the provided data
    #[error("Out of Bound read would have occurred! - {file}:{line}")]
    OutOfBounds {
        /// Source file that detected the condition
        file: &'static str,
        /// Source line that detected the condition
        line: u32,
    },

    /// This file type is not supported
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Errors reported by the PE parser
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Signature decoding went deeper than the allowed nesting level
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// The module could not be loaded; no model has been produced for it
    #[error("Failed to load module '{name}' - {source}")]
    ModuleLoad {
        /// Name of the module (file name, or the caller supplied label)
        name: String,
        /// The reader error that rejected the image
        #[source]
        source: Box<Error>,
    },

    /// The relationship extractor produced a model that breaks one of its own guarantees
    #[error("Invariant violated for '{type_name}' - {message}")]
    InvariantViolation {
        /// Qualified name of the offending type
        type_name: String,
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// Wraps a reader error into [`Error::ModuleLoad`], leaving already wrapped errors untouched.
    #[must_use]
    pub fn into_module_load(self, name: &str) -> Error {
        match self {
            Error::ModuleLoad { .. } => self,
            other => Error::ModuleLoad {
                name: name.to_string(),
                source: Box::new(other),
            },
        }
    }
}
