use core::fmt;

/// Result alias for `partition-fitness`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the fitness and modularity functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A summary was requested over an empty partition.
    EmptyInput,

    /// A community has no nodes in the graph, and the formula divides by its size.
    EmptyCommunity {
        /// Position of the community in the partition.
        index: usize,
    },

    /// A formula's denominator is zero.
    DivisionByZero {
        /// Metric being computed.
        metric: &'static str,
        /// The quantity that was zero.
        denominator: &'static str,
    },

    /// A logarithm or square root left its domain.
    Undefined {
        /// Metric being computed.
        metric: &'static str,
        /// What went out of range.
        reason: &'static str,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Generic error with message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty partition: min/max are undefined"),
            Error::EmptyCommunity { index } => {
                write!(f, "community {index} has no nodes in the graph")
            }
            Error::DivisionByZero {
                metric,
                denominator,
            } => write!(f, "{metric}: division by zero ({denominator} is zero)"),
            Error::Undefined { metric, reason } => write!(f, "{metric} is undefined: {reason}"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Other(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
