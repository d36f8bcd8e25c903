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

use crate::comm::Communicator;
use crate::config::{Config, RuleScope};
use crate::error::{AprioriError, Result};
use crate::frequent_itemsets::FrequentItemsets;
use crate::itemset::Itemset;
use crate::partition::block_range;
use crate::rule::Rule;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Derives the rules of one frequent itemset.
///
/// Antecedents are explored from the itemset downwards, one item at a time.
/// Only the subsets of an antecedent that reached `min_confidence` are
/// explored further: shrinking an antecedent can only lower confidence.
pub fn rules_for_itemset(
    itemset: &Itemset,
    fsets: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<Rule>> {
    let mut rules = vec![];
    // Several frontiers share subsets; each antecedent is judged once.
    let mut visited: BTreeSet<Itemset> = BTreeSet::new();
    let mut frontier: Vec<Itemset> = vec![itemset.clone()];

    while let Some(rhs) = frontier.pop() {
        for antecedent in rhs.subsets() {
            if !visited.insert(antecedent.clone()) {
                continue;
            }
            let rule = Rule::make(antecedent, itemset, fsets)?;
            if rule.confidence >= min_confidence {
                if rule.antecedent.len() > 1 {
                    frontier.push(rule.antecedent.clone());
                }
                rules.push(rule);
            }
        }
    }
    Ok(rules)
}

/// Generates the rules of the level 2 and higher itemsets owned by this
/// worker. With `RuleScope::Global` the workers' rules are then gathered so
/// every worker returns the complete list, in rank order.
pub fn generate_rules<C: Communicator>(
    fsets: &FrequentItemsets,
    config: &Config,
    comm: &C,
) -> Result<Vec<Rule>> {
    info!("GenerateRules ...");
    let max_level = fsets.max_level();
    if max_level < 2 {
        warn!("Rules can't be generated from single item itemsets (k=1)!");
        return Ok(vec![]);
    }

    let mut rules: Vec<Rule> = vec![];
    for k in 2..=max_level {
        let itemsets = fsets.levels.get(&k).ok_or(AprioriError::MissingLevel(k))?;
        let range = block_range(comm.rank(), comm.size(), itemsets.len());
        debug!(
            "k={} rank {} owns itemsets {:?} of {}",
            k,
            comm.rank(),
            range,
            itemsets.len()
        );
        for itemset in itemsets.keys().skip(range.start).take(range.len()) {
            rules.extend(rules_for_itemset(itemset, fsets, config.min_confidence)?);
        }
    }
    info!("Rank {} generated {} rules", comm.rank(), rules.len());

    match config.rule_scope {
        RuleScope::Local => Ok(rules),
        RuleScope::Global => gather_rules(comm, fsets, &rules),
    }
}

/// Exchanges every worker's rules. Only antecedents and consequents travel;
/// confidence and lift are recomputed from the local copy of the tables,
/// which is identical on every worker.
fn gather_rules<C: Communicator>(comm: &C, fsets: &FrequentItemsets, local: &[Rule]) -> Result<Vec<Rule>> {
    let mut packed = vec![];
    for rule in local {
        rule.write_wire(&mut packed);
    }
    let sizes: Vec<usize> = comm
        .all_gather(packed.len() as u32)?
        .into_iter()
        .map(|size| size as usize)
        .collect();
    let gathered = comm.all_gather_varcount(&packed, &sizes)?;

    let rules = Rule::read_wire(&gathered)?
        .into_iter()
        .map(|(antecedent, consequent)| {
            let mut items = antecedent.items().to_vec();
            items.extend_from_slice(consequent.items());
            Rule::make(antecedent, &Itemset::from_items(items), fsets)
        })
        .collect::<Result<Vec<Rule>>>()?;
    debug!("Gathered {} rules", rules.len());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::{generate_rules, rules_for_itemset};
    use crate::comm::{run_group, Solo};
    use crate::config::{Config, RuleScope};
    use crate::frequent_itemsets::FrequentItemsets;
    use crate::item::Item;
    use crate::itemizer::Itemizer;
    use crate::itemset::Itemset;
    use crate::rule::Rule;
    use maplit::btreemap;
    use std::collections::HashSet;

    fn itemset(ids: &[u32]) -> Itemset {
        Itemset::from_items(ids.iter().map(|&id| Item::with_id(id)).collect())
    }

    // Counts over 20 transactions; every subset of a frequent itemset is
    // present.
    fn fsets() -> FrequentItemsets {
        let mut itemizer = Itemizer::new();
        for token in &["a", "b", "c", "d"] {
            itemizer.id_of(token);
        }
        let mut fsets = FrequentItemsets::new(itemizer, 20);
        fsets.set_level(
            1,
            btreemap! {
                itemset(&[0]) => 9,
                itemset(&[1]) => 8,
                itemset(&[2]) => 12,
                itemset(&[3]) => 13,
            },
        );
        fsets.set_level(
            2,
            btreemap! {
                itemset(&[0, 1]) => 4,
                itemset(&[0, 2]) => 5,
                itemset(&[0, 3]) => 6,
                itemset(&[1, 2]) => 3,
                itemset(&[1, 3]) => 5,
                itemset(&[2, 3]) => 3,
            },
        );
        fsets.set_level(
            3,
            btreemap! {
                itemset(&[0, 1, 2]) => 3,
                itemset(&[0, 1, 3]) => 3,
                itemset(&[0, 2, 3]) => 3,
                itemset(&[1, 2, 3]) => 3,
            },
        );
        fsets.set_level(4, btreemap! { itemset(&[0, 1, 2, 3]) => 2 });
        fsets
    }

    fn keys(rules: &[Rule]) -> HashSet<(Itemset, Itemset)> {
        rules
            .iter()
            .map(|r| (r.antecedent.clone(), r.consequent.clone()))
            .collect()
    }

    // Every (antecedent, consequent) split of every itemset of size >= 2
    // reaching min_confidence, found by brute force.
    fn brute_force(fsets: &FrequentItemsets, min_confidence: f64) -> HashSet<(Itemset, Itemset)> {
        let mut expected = HashSet::new();
        for k in 2..=fsets.max_level() {
            for full in fsets.levels[&k].keys() {
                let items = full.items();
                for mask in 1..(1u32 << items.len()) - 1 {
                    let antecedent = Itemset::from_items(
                        (0..items.len())
                            .filter(|i| mask & (1 << i) != 0)
                            .map(|i| items[i])
                            .collect(),
                    );
                    let rule = Rule::make(antecedent, full, fsets).unwrap();
                    if rule.confidence >= min_confidence {
                        expected.insert((rule.antecedent, rule.consequent));
                    }
                }
            }
        }
        expected
    }

    #[test]
    fn test_rules_for_pair() {
        let fsets = fsets();
        let rules = rules_for_itemset(&itemset(&[0, 3]), &fsets, 0.5).unwrap();
        // {a,d}: d => a is 6/13, a => d is 6/9.
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].antecedent, itemset(&[0]));
        assert_eq!(rules[0].consequent, itemset(&[3]));
        assert!((rules[0].confidence - 6.0 / 9.0).abs() < 1e-12);
        assert!((rules[0].lift - (6.0 / 9.0) / (13.0 / 20.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rules_are_distinct_and_above_floor() {
        let fsets = fsets();
        for &min_confidence in &[0.0, 0.3, 0.5, 0.8, 1.0] {
            let rules = rules_for_itemset(&itemset(&[0, 1, 2, 3]), &fsets, min_confidence).unwrap();
            assert_eq!(keys(&rules).len(), rules.len());
            for rule in &rules {
                assert!(rule.confidence >= min_confidence);
                assert_eq!(
                    Itemset::from_items(
                        rule.antecedent
                            .items()
                            .iter()
                            .chain(rule.consequent.items())
                            .cloned()
                            .collect()
                    ),
                    itemset(&[0, 1, 2, 3])
                );
            }
        }
    }

    #[test]
    fn test_matches_brute_force() {
        let fsets = fsets();
        for &min_confidence in &[0.0, 0.3, 0.5, 0.8] {
            let config = Config {
                min_confidence,
                ..Config::default()
            };
            let rules = generate_rules(&fsets, &config, &Solo).unwrap();
            assert_eq!(keys(&rules), brute_force(&fsets, min_confidence));
        }
    }

    #[test]
    fn test_single_level_has_no_rules() {
        let mut fsets = FrequentItemsets::new(Itemizer::new(), 1);
        fsets.set_level(1, btreemap! { itemset(&[0]) => 1 });
        assert!(generate_rules(&fsets, &Config::default(), &Solo).unwrap().is_empty());
    }

    #[test]
    fn test_missing_level_is_an_error() {
        let mut fsets = fsets();
        fsets.levels.remove(&3);
        assert!(generate_rules(&fsets, &Config::default(), &Solo).is_err());
    }

    #[test]
    fn test_local_scope_shards_rules() {
        let fsets = fsets();
        let config = Config {
            min_confidence: 0.3,
            rule_scope: RuleScope::Local,
            ..Config::default()
        };
        let all = generate_rules(&fsets, &config, &Solo).unwrap();
        for size in 1..5 {
            let shards = run_group(size, |comm| generate_rules(&fsets, &config, comm).unwrap()).unwrap();
            let mut union = HashSet::new();
            for shard in &shards {
                for key in keys(shard) {
                    // Shards never overlap.
                    assert!(union.insert(key));
                }
            }
            assert_eq!(union, keys(&all));
        }
    }

    #[test]
    fn test_global_scope_gathers_rules() {
        let fsets = fsets();
        let config = Config {
            min_confidence: 0.3,
            rule_scope: RuleScope::Global,
            ..Config::default()
        };
        let all = generate_rules(&fsets, &config, &Solo).unwrap();
        for size in 1..5 {
            let results = run_group(size, |comm| generate_rules(&fsets, &config, comm).unwrap()).unwrap();
            for rules in &results {
                assert_eq!(rules, &results[0]);
                assert_eq!(keys(rules), keys(&all));
                for rule in rules {
                    let expected = all.iter().find(|r| *r == rule).unwrap();
                    assert_eq!(rule.confidence, expected.confidence);
                    assert_eq!(rule.lift, expected.lift);
                }
            }
        }
    }
}
