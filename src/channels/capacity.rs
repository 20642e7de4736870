use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Buffer size of a channel, fixed at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// Holds at most `n` items. `Bounded(0)` is a rendezvous channel: every
    /// send pairs with a receive and nothing is ever buffered.
    Bounded(usize),
    /// Never applies backpressure.
    #[default]
    Unbounded,
}

impl Capacity {
    pub const RENDEZVOUS: Capacity = Capacity::Bounded(0);

    /// The item limit, `None` when unbounded.
    #[inline]
    pub fn limit(self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n),
            Capacity::Unbounded => None,
        }
    }

    #[inline]
    pub fn is_rendezvous(self) -> bool {
        self == Capacity::RENDEZVOUS
    }

    /// Whether a buffer currently holding `len` items can take one more.
    #[inline]
    pub(crate) fn has_room(self, len: usize) -> bool {
        match self {
            Capacity::Bounded(n) => len < n,
            Capacity::Unbounded => true,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Bounded(0) => f.write_str("rendezvous"),
            Capacity::Bounded(n) => write!(f, "{n}"),
            Capacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid channel capacity {input:?}: expected \"unbounded\", \"rendezvous\" or a non-negative integer")]
pub struct ParseCapacityError {
    input: String,
    #[source]
    source: ParseIntError,
}

impl FromStr for Capacity {
    type Err = ParseCapacityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unbounded" => Ok(Capacity::Unbounded),
            "rendezvous" => Ok(Capacity::RENDEZVOUS),
            digits => digits
                .parse::<usize>()
                .map(Capacity::Bounded)
                .map_err(|e| ParseCapacityError {
                    input: s.to_owned(),
                    source: e,
                }),
        }
    }
}
