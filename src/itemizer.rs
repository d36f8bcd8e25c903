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
use fnv::FnvHashMap;

// Bidirectional mapping between raw item tokens and dense ids.
//
// Every worker builds its own Itemizer from the same input, and the counts
// exchanged between workers are keyed by id only. Two workers fed the same
// rows in the same order always agree on every id.
#[derive(Clone, Debug, Default)]
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer {
            item_str_to_id: FnvHashMap::default(),
            item_id_to_str: vec![],
        }
    }

    /// Returns the id of `item`, allocating the next sequential id if the
    /// token hasn't been seen before.
    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(id) = self.item_str_to_id.get(item) {
            return *id;
        }
        let id = Item::with_id(self.item_id_to_str.len() as u32);
        self.item_str_to_id.insert(String::from(item), id);
        self.item_id_to_str.push(String::from(item));
        debug_assert_eq!(self.str_of(id), Some(item));
        id
    }

    pub fn str_of(&self, id: Item) -> Option<&str> {
        self.item_id_to_str.get(id.as_index()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }

    /// All allocated ids, in id order.
    pub fn items(&self) -> impl Iterator<Item = Item> {
        (0..self.item_id_to_str.len() as u32).map(Item::with_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;
    use crate::item::Item;

    #[test]
    fn test_ids_in_first_seen_order() {
        let mut itemizer = Itemizer::new();
        assert!(itemizer.is_empty());
        assert_eq!(itemizer.id_of("milk"), Item::with_id(0));
        assert_eq!(itemizer.id_of("cheese"), Item::with_id(1));
        assert_eq!(itemizer.id_of("milk"), Item::with_id(0));
        assert_eq!(itemizer.id_of("oats"), Item::with_id(2));
        assert_eq!(itemizer.len(), 3);

        assert_eq!(itemizer.str_of(Item::with_id(1)), Some("cheese"));
        assert_eq!(itemizer.str_of(Item::with_id(7)), None);
        assert_eq!(
            itemizer.items().collect::<Vec<Item>>(),
            vec![Item::with_id(0), Item::with_id(1), Item::with_id(2)]
        );
    }

    #[test]
    fn test_identical_input_gives_identical_dictionary() {
        let rows = [vec!["b", "a"], vec!["c", "a", "d"]];
        let build = || {
            let mut itemizer = Itemizer::new();
            for row in rows.iter() {
                for token in row {
                    itemizer.id_of(token);
                }
            }
            itemizer
        };
        let (x, y) = (build(), build());
        for token in &["a", "b", "c", "d"] {
            let id = x.clone().id_of(token);
            assert_eq!(y.clone().id_of(token), id);
        }
    }
}
