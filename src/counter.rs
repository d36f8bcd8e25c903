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

use crate::itemset::{Itemset, ItemsetCounts};
use crate::partition::block_range;
use crate::transaction_store::TransactionStore;

/// Counts the candidates of size `k` over the block of transactions owned
/// by `rank` of `size` workers.
///
/// Every candidate gets an entry, zero or not, so that workers counting the
/// same candidate list end up with tables of identical shape.
pub fn count_partition(
    store: &TransactionStore,
    candidates: &[Itemset],
    k: usize,
    rank: usize,
    size: usize,
) -> ItemsetCounts {
    let mut hits = vec![0u32; candidates.len()];
    for index in block_range(rank, size, store.len()) {
        let transaction = store.get(index);
        if transaction.len() < k {
            // Transaction cannot contain any candidate.
            continue;
        }
        for (hit, candidate) in hits.iter_mut().zip(candidates) {
            if candidate.is_contained_in(transaction) {
                *hit += 1;
            }
        }
    }
    candidates.iter().cloned().zip(hits).collect()
}
