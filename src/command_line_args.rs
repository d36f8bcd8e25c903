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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

use arm_mpi::{Config, RuleScope};

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: Option<String>,
    pub output_itemsets_path: Option<String>,
    pub max_k: i64,
    pub min_support: f64,
    pub min_confidence: f64,
    pub workers: usize,
    pub local_rules: bool,
}

impl Arguments {
    pub fn config(&self) -> Config {
        Config {
            max_k: self.max_k,
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            rule_scope: if self.local_rules {
                RuleScope::Local
            } else {
                RuleScope::Global
            },
        }
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let defaults = Config::default();
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_rules_path: None,
        output_itemsets_path: None,
        max_k: defaults.max_k,
        min_support: defaults.min_support,
        min_confidence: defaults.min_confidence,
        workers: 1,
        local_rules: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Parallel Apriori frequent itemset and association rule miner.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(&["--input"], Store, "Input dataset in CSV format.")
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output-rules"],
                StoreOption,
                "File path in which to store output rules. \
                 Format: antecedent, consequent, confidence, lift.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.output_itemsets_path)
            .add_option(
                &["--output-itemsets"],
                StoreOption,
                "File path in which to store frequent itemsets. \
                 Format: itemset, support.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.max_k)
            .add_option(
                &["--max-k"],
                Store,
                "Largest itemset size to mine; 0 or less for no limit. Default 2.",
            )
            .metavar("k");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range [0,1]. Default 0.05.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.min_confidence)
            .add_option(
                &["--min-confidence"],
                Store,
                "Minimum rule confidence threshold, in range [0,1]. Default 0.8.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.workers)
            .add_option(
                &["--workers"],
                Store,
                "Number of workers splitting the counting and rule mining. Default 1.",
            )
            .metavar("n");

        parser.refer(&mut args.local_rules).add_option(
            &["--local-rules"],
            StoreTrue,
            "Keep each worker's rules on that worker instead of gathering them.",
        );

        if env::args().count() == 1 {
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    if let Err(err) = args.config().validate() {
        eprintln!("{}", err);
        process::exit(1);
    }

    if args.workers == 0 {
        eprintln!("Number of workers must be at least 1");
        process::exit(1);
    }

    args
}
