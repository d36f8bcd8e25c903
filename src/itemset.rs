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

use crate::error::AprioriError;
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::vec_sets::{difference, is_strictly_ascending, is_subset};
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Count table for the itemsets of one level. Iteration order is the
/// itemset order, so every worker holding the same keys walks them in the
/// same sequence; the positional reduce in `aggregate` relies on that.
pub type ItemsetCounts = BTreeMap<Itemset, u32>;

/// A set of items, stored as a strictly ascending vector of ids.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct Itemset {
    items: Vec<Item>,
}

impl Itemset {
    pub fn single(item: Item) -> Itemset {
        Itemset { items: vec![item] }
    }

    /// Builds an itemset from ids in any order; duplicates are dropped.
    pub fn from_items(mut items: Vec<Item>) -> Itemset {
        items.sort();
        items.dedup();
        Itemset { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn last(&self) -> Option<Item> {
        self.items.last().cloned()
    }

    /// Everything but the last item.
    pub fn prefix(&self) -> &[Item] {
        match self.items.split_last() {
            Some((_, prefix)) => prefix,
            None => &[],
        }
    }

    /// Appends `item`, which must sort after every item already present.
    pub fn extended(&self, item: Item) -> Itemset {
        debug_assert!(self.last().map_or(true, |last| last < item));
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(item);
        Itemset { items }
    }

    /// The (len-1)-subsets formed by leaving out one position at a time,
    /// starting with the first position.
    pub fn subsets(&self) -> Vec<Itemset> {
        (0..self.items.len())
            .map(|leave_out| {
                let mut items = Vec::with_capacity(self.items.len() - 1);
                items.extend_from_slice(&self.items[..leave_out]);
                items.extend_from_slice(&self.items[leave_out + 1..]);
                Itemset { items }
            })
            .collect()
    }

    pub fn difference(&self, other: &Itemset) -> Itemset {
        Itemset {
            items: difference(&self.items, &other.items),
        }
    }

    /// True if every item of the itemset appears in `transaction`, which
    /// must be sorted.
    pub fn is_contained_in(&self, transaction: &[Item]) -> bool {
        is_subset(&self.items, transaction)
    }

    /// Appends the item ids to a flat wire buffer.
    pub fn write_wire(&self, out: &mut Vec<u32>) {
        out.extend(self.items.iter().map(|item| item.id()));
    }

    /// Rebuilds an itemset from ids produced by `write_wire`.
    pub fn from_wire(ids: &[u32]) -> Result<Itemset, AprioriError> {
        if !is_strictly_ascending(ids) {
            return Err(AprioriError::Parse(format!(
                "itemset ids out of order: {:?}",
                ids
            )));
        }
        Ok(Itemset {
            items: ids.iter().map(|&id| Item::with_id(id)).collect(),
        })
    }

    /// `item_0|item_1|...` form of the ids.
    pub fn encode(&self) -> String {
        self.items.iter().map(|item| item.id()).join("|")
    }

    pub fn to_names(&self, itemizer: &Itemizer, delim: &str) -> String {
        self.items
            .iter()
            .map(|&item| itemizer.str_of(item).unwrap_or("MISSING"))
            .join(delim)
    }
}

impl Ord for Itemset {
    // Shorter itemsets sort first, equal lengths compare by id.
    fn cmp(&self, other: &Itemset) -> Ordering {
        self.items
            .len()
            .cmp(&other.items.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Itemset) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Itemset {
    type Err = AprioriError;

    fn from_str(s: &str) -> Result<Itemset, AprioriError> {
        if s.is_empty() {
            return Ok(Itemset::default());
        }
        let ids = s
            .split('|')
            .map(|token| {
                token
                    .trim()
                    .parse::<u32>()
                    .map_err(|err| AprioriError::Parse(format!("{:?}: {}", token, err)))
            })
            .collect::<Result<Vec<u32>, AprioriError>>()?;
        Itemset::from_wire(&ids)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.items.is_empty() {
            return Ok(());
        }
        write!(f, "<{}>", self.items.iter().join(","))
    }
}
