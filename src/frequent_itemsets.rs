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

use crate::itemizer::Itemizer;
use crate::itemset::{Itemset, ItemsetCounts};
use std::collections::BTreeMap;

fn support(count: u32, num_transactions: usize) -> f64 {
    if num_transactions == 0 {
        return 0.0;
    }
    count as f64 / num_transactions as f64
}

/// The result of mining: the dictionary, the number of transactions, and
/// for each level k the aggregated counts of the k-itemsets that survived
/// pruning. The complete level 1 table, infrequent items included, is kept
/// in `item_counts`.
#[derive(Clone, Debug, Default)]
pub struct FrequentItemsets {
    pub itemizer: Itemizer,
    pub num_transactions: usize,
    pub levels: BTreeMap<usize, ItemsetCounts>,
    pub item_counts: ItemsetCounts,
}

impl FrequentItemsets {
    pub fn new(itemizer: Itemizer, num_transactions: usize) -> FrequentItemsets {
        FrequentItemsets {
            itemizer,
            num_transactions,
            levels: BTreeMap::new(),
            item_counts: ItemsetCounts::new(),
        }
    }

    pub fn support_of_count(&self, count: u32) -> f64 {
        support(count, self.num_transactions)
    }

    pub fn count(&self, itemset: &Itemset) -> Option<u32> {
        let level = self
            .levels
            .get(&itemset.len())
            .and_then(|counts| counts.get(itemset));
        match level {
            Some(&count) => Some(count),
            None if itemset.len() == 1 => self.item_counts.get(itemset).cloned(),
            None => None,
        }
    }

    /// Fraction of all transactions containing `itemset`, if it was counted.
    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset).map(|count| self.support_of_count(count))
    }

    /// Installs the aggregated counts of level `k`, replacing any earlier
    /// table for that level.
    pub fn set_level(&mut self, k: usize, counts: ItemsetCounts) {
        if k == 1 {
            self.item_counts = counts.clone();
        }
        self.levels.insert(k, counts);
    }

    /// Removes the candidates whose support is below `min_support` from the
    /// level `k` table and returns the rest in their input order. Support
    /// equal to the threshold is kept.
    pub fn prune(&mut self, candidates: Vec<Itemset>, k: usize, min_support: f64) -> Vec<Itemset> {
        let num_transactions = self.num_transactions;
        let counts = self.levels.entry(k).or_insert_with(ItemsetCounts::new);
        let mut frequent = Vec::with_capacity(candidates.len());
        for itemset in candidates {
            let count = counts.get(&itemset).cloned().unwrap_or(0);
            if support(count, num_transactions) < min_support {
                counts.remove(&itemset);
            } else {
                counts.insert(itemset.clone(), count);
                frequent.push(itemset);
            }
        }
        frequent
    }

    /// The highest level with a count table.
    pub fn max_level(&self) -> usize {
        self.levels.keys().next_back().cloned().unwrap_or(0)
    }

    pub fn num_frequent(&self) -> usize {
        self.levels.values().map(|counts| counts.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::FrequentItemsets;
    use crate::item::Item;
    use crate::itemizer::Itemizer;
    use crate::itemset::Itemset;
    use maplit::btreemap;

    fn itemset(ids: &[u32]) -> Itemset {
        Itemset::from_items(ids.iter().map(|&id| Item::with_id(id)).collect())
    }

    #[test]
    fn test_prune_threshold_is_inclusive() {
        let mut fsets = FrequentItemsets::new(Itemizer::new(), 4);
        fsets.set_level(
            2,
            btreemap! {
                itemset(&[0, 1]) => 1,
                itemset(&[0, 2]) => 2,
                itemset(&[1, 2]) => 3,
            },
        );
        let frequent = fsets.prune(
            vec![itemset(&[1, 2]), itemset(&[0, 1]), itemset(&[0, 2])],
            2,
            0.5,
        );
        assert_eq!(frequent, vec![itemset(&[1, 2]), itemset(&[0, 2])]);
        assert_eq!(
            fsets.levels[&2],
            btreemap! { itemset(&[0, 2]) => 2, itemset(&[1, 2]) => 3 }
        );
        assert_eq!(fsets.max_level(), 2);
        assert_eq!(fsets.num_frequent(), 2);
    }

    #[test]
    fn test_full_item_table_is_kept() {
        let mut fsets = FrequentItemsets::new(Itemizer::new(), 10);
        fsets.set_level(1, btreemap! { itemset(&[0]) => 9, itemset(&[1]) => 1 });
        let frequent = fsets.prune(vec![itemset(&[0]), itemset(&[1])], 1, 0.5);

        assert_eq!(frequent, vec![itemset(&[0])]);
        assert_eq!(fsets.levels[&1].len(), 1);
        assert_eq!(fsets.support(&itemset(&[1])), Some(0.1));
        assert_eq!(fsets.support(&itemset(&[0])), Some(0.9));
        assert_eq!(fsets.support(&itemset(&[7])), None);
        assert_eq!(fsets.support(&itemset(&[0, 1])), None);
    }

    #[test]
    fn test_no_transactions() {
        let mut fsets = FrequentItemsets::new(Itemizer::new(), 0);
        fsets.set_level(1, btreemap! { itemset(&[0]) => 0 });
        assert_eq!(fsets.support(&itemset(&[0])), Some(0.0));
        assert!(fsets.prune(vec![itemset(&[0])], 1, 0.1).is_empty());
        assert_eq!(fsets.prune(vec![itemset(&[0])], 1, 0.0), vec![itemset(&[0])]);
    }
}
