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

//! Collective transport for a fixed group of workers.
//!
//! Every collective is a group-wide barrier: all members must make the
//! matching call before any of them returns. There is no timeout, so a
//! worker that never arrives stalls the whole group.

use crate::error::{AprioriError, CommError, Result};
use crate::partition::offsets;
use log::debug;
use rayon::ThreadPoolBuilder;
use std::sync::{Arc, Barrier, Mutex};

pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;

    /// Every rank contributes one value; all ranks receive them in rank order.
    fn all_gather(&self, value: u32) -> std::result::Result<Vec<u32>, CommError>;

    /// Rank `r` contributes exactly `counts[r]` values; all ranks receive the
    /// concatenation in rank order.
    fn all_gather_varcount(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError>;

    /// Every rank contributes a vector of `sum(counts)` values. The vectors
    /// are summed element-wise and rank `r` receives the `counts[r]` sums
    /// of its own block.
    fn reduce_scatter_sum(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError>;
}

pub(crate) fn check_topology(counts: &[usize], size: usize) -> std::result::Result<(), CommError> {
    if counts.len() != size {
        return Err(CommError::Topology {
            expected: size,
            actual: counts.len(),
        });
    }
    Ok(())
}

/// A group with a single member.
#[derive(Copy, Clone, Debug, Default)]
pub struct Solo;

impl Communicator for Solo {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_gather(&self, value: u32) -> std::result::Result<Vec<u32>, CommError> {
        Ok(vec![value])
    }

    fn all_gather_varcount(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError> {
        check_topology(counts, 1)?;
        if send.len() != counts[0] {
            return Err(CommError::CountMismatch {
                rank: 0,
                expected: counts[0],
                actual: send.len(),
            });
        }
        Ok(send.to_vec())
    }

    fn reduce_scatter_sum(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError> {
        self.all_gather_varcount(send, counts)
    }
}

struct Exchange {
    slots: Mutex<Vec<Vec<u32>>>,
    barrier: Barrier,
}

impl Exchange {
    fn new(size: usize) -> Exchange {
        Exchange {
            slots: Mutex::new(vec![vec![]; size]),
            barrier: Barrier::new(size),
        }
    }
}

/// One member of an in-process worker group. Members share a slot table;
/// a collective deposits this rank's contribution, waits for the rest of
/// the group, snapshots every slot and waits again so no slot is
/// overwritten while someone is still reading it.
pub struct LocalGroup {
    rank: usize,
    size: usize,
    exchange: Arc<Exchange>,
}

impl LocalGroup {
    /// Creates the members of a group of `size` workers, in rank order.
    pub fn create(size: usize) -> Vec<LocalGroup> {
        let exchange = Arc::new(Exchange::new(size));
        (0..size)
            .map(|rank| LocalGroup {
                rank,
                size,
                exchange: exchange.clone(),
            })
            .collect()
    }

    fn exchange(&self, contribution: Vec<u32>) -> std::result::Result<Vec<Vec<u32>>, CommError> {
        {
            let mut slots = self
                .exchange
                .slots
                .lock()
                .map_err(|_| CommError::Poisoned)?;
            slots[self.rank] = contribution;
        }
        self.exchange.barrier.wait();
        let snapshot = self
            .exchange
            .slots
            .lock()
            .map_err(|_| CommError::Poisoned)?
            .clone();
        self.exchange.barrier.wait();
        Ok(snapshot)
    }
}

impl Communicator for LocalGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn all_gather(&self, value: u32) -> std::result::Result<Vec<u32>, CommError> {
        let counts = vec![1; self.size];
        self.all_gather_varcount(&[value], &counts)
    }

    fn all_gather_varcount(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError> {
        check_topology(counts, self.size)?;
        let contributions = self.exchange(send.to_vec())?;

        // Every rank checks the same snapshot, so all of them fail together.
        let mut received = Vec::with_capacity(counts.iter().sum());
        for (rank, contribution) in contributions.iter().enumerate() {
            if contribution.len() != counts[rank] {
                return Err(CommError::CountMismatch {
                    rank,
                    expected: counts[rank],
                    actual: contribution.len(),
                });
            }
            received.extend_from_slice(contribution);
        }
        Ok(received)
    }

    fn reduce_scatter_sum(
        &self,
        send: &[u32],
        counts: &[usize],
    ) -> std::result::Result<Vec<u32>, CommError> {
        check_topology(counts, self.size)?;
        let total: usize = counts.iter().sum();
        let contributions = self.exchange(send.to_vec())?;

        for (rank, contribution) in contributions.iter().enumerate() {
            if contribution.len() != total {
                return Err(CommError::CountMismatch {
                    rank,
                    expected: total,
                    actual: contribution.len(),
                });
            }
        }

        let first = offsets(counts)[self.rank];
        let block = first..first + counts[self.rank];
        Ok(block
            .map(|i| contributions.iter().map(|c| c[i]).sum())
            .collect())
    }
}

/// Runs `worker` once per rank of a group of `size` members, each on its
/// own thread, and returns the results in rank order.
pub fn run_group<R, F>(size: usize, worker: F) -> Result<Vec<R>>
where
    F: Fn(&LocalGroup) -> R + Sync,
    R: Send,
{
    if size == 0 {
        return Err(AprioriError::Config(String::from(
            "worker group needs at least one member",
        )));
    }
    // One thread per member: collectives block, so no two members may share
    // a thread.
    let pool = ThreadPoolBuilder::new()
        .num_threads(size)
        .thread_name(|index| format!("worker-{}", index))
        .build()?;
    let members = LocalGroup::create(size);

    debug!("Starting worker group of {}", size);
    Ok(pool.broadcast(|ctx| worker(&members[ctx.index()])))
}
