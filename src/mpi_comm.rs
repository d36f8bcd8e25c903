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

//! MPI backend: one worker per process of an `mpirun` launch.
//!
//! rsmpi aborts the job when MPI itself reports an error, so the only
//! failures returned here are the argument checks made before each call.

use crate::comm::{check_topology, Communicator};
use crate::error::CommError;
use crate::partition::offsets;
use mpi::collective::SystemOperation;
use mpi::datatype::PartitionMut;
use mpi::topology::SimpleCommunicator;
use mpi::traits::CommunicatorCollectives;
use mpi::Count;

fn to_counts(values: &[usize]) -> Vec<Count> {
    values.iter().map(|&value| value as Count).collect()
}

impl Communicator for SimpleCommunicator {
    fn rank(&self) -> usize {
        mpi::topology::Communicator::rank(self) as usize
    }

    fn size(&self) -> usize {
        mpi::topology::Communicator::size(self) as usize
    }

    fn all_gather(&self, value: u32) -> Result<Vec<u32>, CommError> {
        let mut received = vec![0u32; Communicator::size(self)];
        self.all_gather_into(&value, &mut received[..]);
        Ok(received)
    }

    fn all_gather_varcount(&self, send: &[u32], counts: &[usize]) -> Result<Vec<u32>, CommError> {
        let rank = Communicator::rank(self);
        check_topology(counts, Communicator::size(self))?;
        if send.len() != counts[rank] {
            return Err(CommError::CountMismatch {
                rank,
                expected: counts[rank],
                actual: send.len(),
            });
        }

        let mut received = vec![0u32; counts.iter().sum()];
        {
            let mut partition =
                PartitionMut::new(&mut received[..], to_counts(counts), to_counts(&offsets(counts)));
            self.all_gather_varcount_into(send, &mut partition);
        }
        Ok(received)
    }

    // Blocks are uneven, so the full vector is summed everywhere and each
    // rank keeps its own slice.
    fn reduce_scatter_sum(&self, send: &[u32], counts: &[usize]) -> Result<Vec<u32>, CommError> {
        let rank = Communicator::rank(self);
        check_topology(counts, Communicator::size(self))?;
        let total: usize = counts.iter().sum();
        if send.len() != total {
            return Err(CommError::CountMismatch {
                rank,
                expected: total,
                actual: send.len(),
            });
        }

        let mut summed = vec![0u32; total];
        self.all_reduce_into(send, &mut summed[..], SystemOperation::sum());
        let first = offsets(counts)[rank];
        Ok(summed[first..first + counts[rank]].to_vec())
    }
}
