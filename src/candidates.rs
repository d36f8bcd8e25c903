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

/// Level 1 candidates: every item in the dictionary, in id order.
pub fn level_one(itemizer: &Itemizer) -> Vec<Itemset> {
    itemizer.items().map(Itemset::single).collect()
}

/// Joins the frequent (k-1)-itemsets in `frequent` into k-itemset
/// candidates. `frequent` must be in itemset order; `counts` is the
/// aggregated (k-1) table used for the subset check.
pub fn generate(frequent: &[Itemset], counts: &ItemsetCounts) -> Vec<Itemset> {
    debug_assert!(frequent.windows(2).all(|w| w[0] < w[1]));
    let mut candidates = vec![];
    for (i, lhs) in frequent.iter().enumerate() {
        // Itemsets sharing lhs's prefix follow it contiguously.
        for rhs in frequent[i + 1..]
            .iter()
            .take_while(|rhs| rhs.len() == lhs.len() && rhs.prefix() == lhs.prefix())
        {
            let last = match rhs.last() {
                Some(last) => last,
                None => continue,
            };
            let candidate = lhs.extended(last);
            if candidate
                .subsets()
                .iter()
                .all(|subset| counts.contains_key(subset))
            {
                candidates.push(candidate);
            }
        }
    }
    candidates
}
