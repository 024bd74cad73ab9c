use camino::Utf8PathBuf;

/// A playlist entry which exists on disk, with its size in bytes.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub path: Utf8PathBuf,
    pub size: u64,
}

pub type CandidateList = Vec<Candidate>;

/// An accepted candidate. `destination` is relative to the target directory.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub source: Utf8PathBuf,
    pub destination: Utf8PathBuf,
    pub size: u64,
}

/// What is left to spend. `items` of `None` means there is no cap on the number of files.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    pub bytes: u64,
    pub items: Option<usize>,
}

/// How many consecutive candidates may be too big before we give up.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryLimit {
    Bounded(usize),
    Unbounded,
}

impl Default for RetryLimit {
    fn default() -> Self {
        RetryLimit::Bounded(0)
    }
}

impl RetryLimit {
    pub fn allows(&self, misses: usize) -> bool {
        match self {
            RetryLimit::Bounded(limit) => misses < *limit,
            RetryLimit::Unbounded => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    ItemLimit,
    CandidatesExhausted,
    BudgetExhausted,
}

/// Where the byte budget comes from. An explicit size always wins over free space.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteLimit {
    FreeSpace,
    Explicit(u64),
}

#[derive(Debug)]
pub struct Opts {
    pub verbose: bool,
    pub noop: bool,
}

#[derive(Debug)]
pub struct FillConfig {
    pub target: Utf8PathBuf,
    pub item_limit: Option<usize>,
    pub byte_limit: ByteLimit,
    pub depth: usize,
    pub retry: RetryLimit,
    pub opts: Opts,
}

#[derive(Debug)]
pub struct Report {
    pub selections: Vec<Selection>,
    pub bytes: u64,
    pub stop: StopReason,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_retry_limit_allows() {
        assert!(!RetryLimit::default().allows(0));
        assert!(RetryLimit::Bounded(2).allows(0));
        assert!(RetryLimit::Bounded(2).allows(1));
        assert!(!RetryLimit::Bounded(2).allows(2));
        assert!(!RetryLimit::Bounded(0).allows(0));
        assert!(RetryLimit::Unbounded.allows(usize::MAX));
    }
}
