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

//! Apriori frequent itemset and association rule mining, with the counting
//! and rule derivation split across a group of workers that agree on every
//! count through collective operations.

pub mod aggregate;
pub mod apriori;
pub mod candidates;
pub mod comm;
pub mod config;
pub mod counter;
pub mod error;
pub mod frequent_itemsets;
pub mod generate_rules;
pub mod item;
pub mod itemizer;
pub mod itemset;
#[cfg(feature = "mpi")]
pub mod mpi_comm;
pub mod partition;
pub mod report;
pub mod rule;
pub mod transaction_reader;
pub mod transaction_store;
mod vec_sets;

pub use crate::apriori::{mine, mine_itemsets, mine_with_workers, Mined};
pub use crate::comm::{run_group, Communicator, LocalGroup, Solo};
pub use crate::config::{Config, RuleScope};
pub use crate::error::{AprioriError, CommError, Result};
pub use crate::frequent_itemsets::FrequentItemsets;
pub use crate::generate_rules::generate_rules;
pub use crate::itemizer::Itemizer;
pub use crate::itemset::{Itemset, ItemsetCounts};
pub use crate::rule::Rule;
