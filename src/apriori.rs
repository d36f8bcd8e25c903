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

use crate::aggregate::{gather_item_counts, gather_itemset_counts};
use crate::candidates::{generate, level_one};
use crate::comm::{run_group, Communicator};
use crate::config::Config;
use crate::counter::count_partition;
use crate::error::{AprioriError, Result};
use crate::frequent_itemsets::FrequentItemsets;
use crate::generate_rules::generate_rules;
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;
use crate::rule::Rule;
use crate::transaction_store::TransactionStore;
use itertools::Itertools;
use log::{debug, info, log_enabled};
use std::time::Instant;

fn log_itemsets(label: &str, k: usize, itemsets: &[Itemset]) {
    if log_enabled!(log::Level::Debug) {
        debug!("k={} {} itemsets: {}", k, label, itemsets.iter().join(" "));
    }
}

/// Runs the level-wise Apriori search on one worker of `comm`'s group.
///
/// Every worker must be handed the same rows: the dictionary, and with it
/// every count table position, is derived from them locally. Only the
/// counting is split, each worker scanning its own block of transactions.
pub fn mine_itemsets<C, S>(rows: &[Vec<S>], config: &Config, comm: &C) -> Result<FrequentItemsets>
where
    C: Communicator,
    S: AsRef<str>,
{
    config.validate()?;

    let mut itemizer = Itemizer::new();
    let store = TransactionStore::from_rows(rows, &mut itemizer);
    info!("Transactions: {}", store.len());
    let mut fsets = FrequentItemsets::new(itemizer, store.len());

    let timer = Instant::now();
    let candidates = level_one(&fsets.itemizer);
    let local = count_partition(&store, &candidates, 1, comm.rank(), comm.size());
    fsets.set_level(1, gather_item_counts(comm, local)?);
    let mut frequent = fsets.prune(candidates, 1, config.min_support);
    log_itemsets("frequent", 1, &frequent);
    info!(
        "k=1: {} of {} items frequent, took {} ms",
        frequent.len(),
        fsets.itemizer.len(),
        timer.elapsed().as_millis()
    );

    let limit = config.level_limit();
    let mut k = 2;
    while !frequent.is_empty() {
        if limit.map_or(false, |max_k| k > max_k) {
            break;
        }
        let timer = Instant::now();
        let candidates = {
            let previous = fsets
                .levels
                .get(&(k - 1))
                .ok_or(AprioriError::MissingLevel(k - 1))?;
            generate(&frequent, previous)
        };
        log_itemsets("candidate", k, &candidates);

        let local = count_partition(&store, &candidates, k, comm.rank(), comm.size());
        fsets.set_level(k, gather_itemset_counts(comm, local)?);
        frequent = fsets.prune(candidates, k, config.min_support);
        log_itemsets("pruned", k, &frequent);
        info!(
            "k={}: {} frequent itemsets, took {} ms",
            k,
            frequent.len(),
            timer.elapsed().as_millis()
        );
        k += 1;
    }
    debug!("Done building frequent itemsets. k={} max_k={}", k, config.max_k);

    Ok(fsets)
}

/// What one worker holds at the end of a run.
#[derive(Clone, Debug)]
pub struct Mined {
    pub itemsets: FrequentItemsets,
    pub rules: Vec<Rule>,
}

/// Mines frequent itemsets, then rules, on one worker.
pub fn mine<C, S>(rows: &[Vec<S>], config: &Config, comm: &C) -> Result<Mined>
where
    C: Communicator,
    S: AsRef<str>,
{
    let itemsets = mine_itemsets(rows, config, comm)?;
    let timer = Instant::now();
    let rules = generate_rules(&itemsets, config, comm)?;
    info!(
        "Generated {} rules in {} ms",
        rules.len(),
        timer.elapsed().as_millis()
    );
    Ok(Mined { itemsets, rules })
}

/// Runs `mine` on an in-process group of `workers` and returns each
/// worker's result in rank order. Fails if any worker failed.
pub fn mine_with_workers<S>(rows: &[Vec<S>], config: &Config, workers: usize) -> Result<Vec<Mined>>
where
    S: AsRef<str> + Sync,
{
    // Reject bad parameters before spawning anyone.
    config.validate()?;
    info!("Mining with {} workers", workers);
    run_group(workers, |comm| mine(rows, config, comm))?
        .into_iter()
        .collect()
}
