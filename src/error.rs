// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the mining engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AprioriError>;

/// Failures of the collective transport. None of these are recoverable:
/// continuing after a failed exchange would leave workers holding different
/// count tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommError {
    /// The exchange lock was poisoned. A member that panics elsewhere is
    /// not detected and leaves the rest of the group blocked.
    #[error("worker group exchange poisoned")]
    Poisoned,

    /// A contribution didn't match the receive counts every worker agreed on.
    #[error("rank {rank} contributed {actual} values, expected {expected}")]
    CountMismatch {
        rank: usize,
        expected: usize,
        actual: usize,
    },

    /// A collective was called with receive counts for a different group size.
    #[error("receive counts cover {actual} ranks, group has {expected}")]
    Topology { expected: usize, actual: usize },
}

/// Errors that can occur while mining.
#[derive(Error, Debug)]
pub enum AprioriError {
    /// Invalid parameters, reported before any distributed work starts
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Collective transport failure
    #[error("Collective error: {0}")]
    Comm(#[from] CommError),

    /// A level's count table was expected but never computed
    #[error("k={0} itemsets not found")]
    MissingLevel(usize),

    /// An itemset that must be frequent has no aggregated count
    #[error("No support recorded for itemset {0}")]
    MissingSupport(String),

    /// The worker thread pool couldn't be started
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Malformed serialized data
    #[error("Parse error: {0}")]
    Parse(String),
}
