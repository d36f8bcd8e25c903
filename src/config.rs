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

/// Which rules a worker ends up holding after rule generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleScope {
    /// Only the rules derived from the itemsets this worker owns.
    Local,
    /// Every worker's rules, gathered so all workers hold the same list.
    Global,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Largest itemset size to mine; zero or negative means no limit.
    pub max_k: i64,
    pub min_support: f64,
    pub min_confidence: f64,
    pub rule_scope: RuleScope,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_k: 2,
            min_support: 0.05,
            min_confidence: 0.8,
            rule_scope: RuleScope::Global,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_support) {
            return Err(AprioriError::Config(format!(
                "minimum itemset support must be in range [0,1], got {}",
                self.min_support
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(AprioriError::Config(format!(
                "minimum rule confidence must be in range [0,1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }

    pub fn level_limit(&self) -> Option<usize> {
        if self.max_k > 0 {
            Some(self.max_k as usize)
        } else {
            None
        }
    }
}
