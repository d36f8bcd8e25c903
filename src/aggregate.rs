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

//! Turning per-worker partial counts into the global count table.
//!
//! Both protocols consume the worker's local table and hand back a new,
//! globally summed one. Every worker of the group receives an identical
//! table.

use crate::comm::Communicator;
use crate::error::Result;
use crate::item::Item;
use crate::itemset::{Itemset, ItemsetCounts};
use crate::partition::{block_sizes, offsets};
use log::debug;

/// Packs the non-zero entries of a level 1 table as (item id, count) pairs.
pub fn pack_item_counts(counts: &ItemsetCounts) -> Vec<u32> {
    let mut packed = Vec::with_capacity(counts.len() * 2);
    for (itemset, &count) in counts {
        if count == 0 {
            continue;
        }
        if let Some(item) = itemset.last() {
            debug_assert_eq!(itemset.len(), 1);
            packed.push(item.id());
            packed.push(count);
        }
    }
    packed
}

/// Sums (item id, count) pairs into `counts`.
pub fn unpack_item_counts(packed: &[u32], counts: &mut ItemsetCounts) {
    for pair in packed.chunks(2) {
        if let [id, count] = *pair {
            *counts
                .entry(Itemset::single(Item::with_id(id)))
                .or_insert(0) += count;
        }
    }
}

/// Level 1 protocol. Only the non-zero local counts travel: every worker
/// announces how many values it will send, then all of them exchange the
/// packed pairs and sum them per item.
pub fn gather_item_counts<C: Communicator>(comm: &C, local: ItemsetCounts) -> Result<ItemsetCounts> {
    debug!("Gather k=1 ...");
    let packed = pack_item_counts(&local);

    let sizes: Vec<usize> = comm
        .all_gather(packed.len() as u32)?
        .into_iter()
        .map(|size| size as usize)
        .collect();
    let gathered = comm.all_gather_varcount(&packed, &sizes)?;

    // Start from the local keys so items nobody saw keep a zero entry.
    let mut global: ItemsetCounts = local.into_iter().map(|(itemset, _)| (itemset, 0)).collect();
    unpack_item_counts(&gathered, &mut global);
    debug!("Gathered {} values for {} items", gathered.len(), global.len());
    Ok(global)
}

/// Level k>1 protocol. Every worker holds a table with the same keys, so
/// the counts are summed positionally: a reduce-scatter leaves each worker
/// with the sums of its own block, then an all-gather assembles the blocks.
pub fn gather_itemset_counts<C: Communicator>(
    comm: &C,
    mut local: ItemsetCounts,
) -> Result<ItemsetCounts> {
    let local_counts: Vec<u32> = local.values().cloned().collect();
    let sizes = block_sizes(local_counts.len(), comm.size());
    debug!(
        "Reduce-scatter {} counts, block of rank {} is {} at offset {}",
        local_counts.len(),
        comm.rank(),
        sizes[comm.rank()],
        offsets(&sizes)[comm.rank()]
    );

    let block = comm.reduce_scatter_sum(&local_counts, &sizes)?;
    let global_counts = comm.all_gather_varcount(&block, &sizes)?;

    for (count, global) in local.values_mut().zip(global_counts) {
        *count = global;
    }
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::{gather_item_counts, gather_itemset_counts, pack_item_counts, unpack_item_counts};
    use crate::comm::{run_group, Communicator, Solo};
    use crate::item::Item;
    use crate::itemset::{Itemset, ItemsetCounts};
    use maplit::btreemap;

    fn itemset(ids: &[u32]) -> Itemset {
        Itemset::from_items(ids.iter().map(|&id| Item::with_id(id)).collect())
    }

    #[test]
    fn test_pack_skips_zero_counts() {
        let counts = btreemap! {
            itemset(&[0]) => 4,
            itemset(&[1]) => 0,
            itemset(&[5]) => 2,
        };
        let packed = pack_item_counts(&counts);
        assert_eq!(packed, vec![0, 4, 5, 2]);

        let mut merged = ItemsetCounts::new();
        unpack_item_counts(&packed, &mut merged);
        unpack_item_counts(&[5, 1], &mut merged);
        assert_eq!(merged, btreemap! { itemset(&[0]) => 4, itemset(&[5]) => 3 });
    }

    #[test]
    fn test_solo_gathers_are_identity() {
        let items = btreemap! { itemset(&[0]) => 2, itemset(&[1]) => 0 };
        assert_eq!(gather_item_counts(&Solo, items.clone()).unwrap(), items);

        let pairs = btreemap! { itemset(&[0, 1]) => 2, itemset(&[0, 2]) => 7 };
        assert_eq!(gather_itemset_counts(&Solo, pairs.clone()).unwrap(), pairs);
    }

    #[test]
    fn test_gather_item_counts_sums_sparse_tables() {
        // Rank r saw item r twice and item 0 once; item 9 was never seen.
        let results = run_group(3, |comm| {
            let rank = comm.rank() as u32;
            let mut local: ItemsetCounts = (0..3).chain(Some(9)).map(|i| (itemset(&[i]), 0)).collect();
            *local.get_mut(&itemset(&[rank])).unwrap() += 2;
            *local.get_mut(&itemset(&[0])).unwrap() += 1;
            gather_item_counts(comm, local)
        })
        .unwrap();

        let expected = btreemap! {
            itemset(&[0]) => 5,
            itemset(&[1]) => 2,
            itemset(&[2]) => 2,
            itemset(&[9]) => 0,
        };
        for result in results {
            assert_eq!(result.unwrap(), expected);
        }
    }

    #[test]
    fn test_gather_itemset_counts_sums_positionally() {
        let keys = vec![
            itemset(&[0, 1]),
            itemset(&[0, 2]),
            itemset(&[1, 2]),
            itemset(&[1, 3]),
            itemset(&[2, 3]),
        ];
        for size in 1..5 {
            let results = run_group(size, |comm| {
                let local: ItemsetCounts = keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), (i * (comm.rank() + 1)) as u32))
                    .collect();
                gather_itemset_counts(comm, local)
            })
            .unwrap();

            // Sum over ranks of i * (rank + 1).
            let factor: usize = (1..=size).sum();
            let expected: ItemsetCounts = keys
                .iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), (i * factor) as u32))
                .collect();
            for result in results {
                assert_eq!(result.unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_gather_itemset_counts_more_workers_than_entries() {
        let results = run_group(4, |comm| {
            let local = btreemap! { itemset(&[3, 4]) => 1 + comm.rank() as u32 };
            gather_itemset_counts(comm, local)
        })
        .unwrap();
        for result in results {
            assert_eq!(result.unwrap(), btreemap! { itemset(&[3, 4]) => 10 });
        }
    }

    #[test]
    fn test_mismatched_tables_fail() {
        let results = run_group(2, |comm| {
            let local: ItemsetCounts = (0..(2 + comm.rank() as u32))
                .map(|i| (itemset(&[i, 10]), 1))
                .collect();
            gather_itemset_counts(comm, local)
        })
        .unwrap();
        assert!(results.iter().all(|result| result.is_err()));
    }
}
