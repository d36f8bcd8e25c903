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

use crate::frequent_itemsets::FrequentItemsets;
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;
use crate::rule::Rule;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn bracketed(itemset: &Itemset, itemizer: &Itemizer) -> String {
    format!("<{}>", itemset.to_names(itemizer, ","))
}

/// Rules by descending confidence, ties by descending lift. Equal rules keep
/// their generation order.
pub fn sorted_rules(rules: &[Rule]) -> Vec<&Rule> {
    let mut sorted: Vec<&Rule> = rules.iter().collect();
    sorted.sort_by_key(|rule| {
        (
            Reverse(OrderedFloat(rule.confidence)),
            Reverse(OrderedFloat(rule.lift)),
        )
    });
    sorted
}

pub fn print_itemsets<W: Write>(out: &mut W, fsets: &FrequentItemsets) -> io::Result<()> {
    writeln!(out, "Num transactions: {}", fsets.num_transactions)?;
    writeln!(out, "Frequent itemsets:")?;
    for counts in fsets.levels.values() {
        for (itemset, &count) in counts {
            writeln!(
                out,
                "{:<20} {:.5}",
                bracketed(itemset, &fsets.itemizer),
                fsets.support_of_count(count)
            )?;
        }
    }
    Ok(())
}

pub fn print_rules<W: Write>(out: &mut W, rules: &[Rule], itemizer: &Itemizer) -> io::Result<()> {
    writeln!(out, "Rule | Confidence | Lift")?;
    for rule in sorted_rules(rules) {
        writeln!(
            out,
            "{:<20} => {:<20} | {:<10.5} | {:<10.5}",
            bracketed(&rule.antecedent, itemizer),
            bracketed(&rule.consequent, itemizer),
            rule.confidence,
            rule.lift
        )?;
    }
    Ok(())
}

/// Writes every frequent itemset with its support. Items are joined by `:`
/// so that the file stays two columns wide.
pub fn write_itemsets_csv<P: AsRef<Path>>(path: P, fsets: &FrequentItemsets) -> io::Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    writeln!(output, "Itemset,Support")?;
    for counts in fsets.levels.values() {
        for (itemset, &count) in counts {
            writeln!(
                output,
                "{},{}",
                itemset.to_names(&fsets.itemizer, ":"),
                fsets.support_of_count(count)
            )?;
        }
    }
    output.flush()
}

pub fn write_rules_csv<P: AsRef<Path>>(path: P, rules: &[Rule], itemizer: &Itemizer) -> io::Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    writeln!(output, "Antecedent,Consequent,Confidence,Lift")?;
    for rule in sorted_rules(rules) {
        writeln!(
            output,
            "{},{},{},{}",
            rule.antecedent.to_names(itemizer, ":"),
            rule.consequent.to_names(itemizer, ":"),
            rule.confidence,
            rule.lift
        )?;
    }
    output.flush()
}
