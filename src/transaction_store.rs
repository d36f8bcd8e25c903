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

use crate::item::Item;
use crate::itemizer::Itemizer;

/// The dataset as item ids, one sorted, duplicate-free vector per
/// transaction. Every worker holds the whole store; only the range each
/// worker scans differs.
#[derive(Clone, Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Vec<Item>>,
}

impl TransactionStore {
    /// Translates raw rows into ids, allocating ids in `itemizer` in the
    /// order tokens are first seen.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], itemizer: &mut Itemizer) -> TransactionStore {
        let transactions = rows
            .iter()
            .map(|row| {
                let mut transaction: Vec<Item> =
                    row.iter().map(|token| itemizer.id_of(token.as_ref())).collect();
                // Some input files have transactions with duplicate items.
                transaction.sort();
                transaction.dedup();
                transaction
            })
            .collect();
        TransactionStore { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> &[Item] {
        &self.transactions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionStore;
    use crate::item::Item;
    use crate::itemizer::Itemizer;

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec!["milk", "cheese", "milk"],
            vec![],
            vec!["bread", "cheese"],
        ];
        let mut itemizer = Itemizer::new();
        let store = TransactionStore::from_rows(&rows, &mut itemizer);

        assert_eq!(store.len(), 3);
        assert_eq!(itemizer.len(), 3);
        assert_eq!(store.get(0), &[Item::with_id(0), Item::with_id(1)][..]);
        assert!(store.get(1).is_empty());
        assert_eq!(store.get(2), &[Item::with_id(1), Item::with_id(2)][..]);
    }
}
