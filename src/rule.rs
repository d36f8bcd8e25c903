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

use crate::error::{AprioriError, Result};
use crate::frequent_itemsets::FrequentItemsets;
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub confidence: f64,
    pub lift: f64,
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

fn support_of(itemset: &Itemset, fsets: &FrequentItemsets) -> Result<f64> {
    fsets
        .support(itemset)
        .ok_or_else(|| AprioriError::MissingSupport(itemset.to_string()))
}

impl Rule {
    /// Creates the rule `antecedent => itemset - antecedent`, with
    /// confidence and lift computed from the aggregated tables.
    pub fn make(antecedent: Itemset, itemset: &Itemset, fsets: &FrequentItemsets) -> Result<Rule> {
        let confidence = support_of(itemset, fsets)? / support_of(&antecedent, fsets)?;
        let consequent = itemset.difference(&antecedent);
        let lift = confidence / support_of(&consequent, fsets)?;
        Ok(Rule {
            antecedent,
            consequent,
            confidence,
            lift,
        })
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        [
            self.antecedent.to_names(itemizer, " "),
            " => ".to_owned(),
            self.consequent.to_names(itemizer, " "),
        ]
        .join("")
    }

    /// Appends `[len_a, a.., len_c, c..]` to a flat wire buffer.
    pub fn write_wire(&self, out: &mut Vec<u32>) {
        out.push(self.antecedent.len() as u32);
        self.antecedent.write_wire(out);
        out.push(self.consequent.len() as u32);
        self.consequent.write_wire(out);
    }

    /// Splits a buffer of `write_wire` records into (antecedent, consequent)
    /// pairs.
    pub fn read_wire(mut wire: &[u32]) -> Result<Vec<(Itemset, Itemset)>> {
        fn take<'a>(wire: &mut &'a [u32]) -> Result<Itemset> {
            let len = match wire.first() {
                Some(&len) => len as usize,
                None => return Err(AprioriError::Parse(String::from("truncated rule"))),
            };
            if wire.len() < len + 1 {
                return Err(AprioriError::Parse(String::from("truncated rule")));
            }
            let itemset = Itemset::from_wire(&wire[1..len + 1])?;
            *wire = &wire[len + 1..];
            Ok(itemset)
        }

        let mut pairs = vec![];
        while !wire.is_empty() {
            let antecedent = take(&mut wire)?;
            let consequent = take(&mut wire)?;
            pairs.push((antecedent, consequent));
        }
        Ok(pairs)
    }
}
