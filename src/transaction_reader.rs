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

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

/// Reads comma separated transactions, one per line. Tokens are trimmed and
/// empty tokens dropped; a line with no tokens is still a transaction.
pub struct TransactionReader<R> {
    reader: R,
}

impl TransactionReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<TransactionReader<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> TransactionReader<R> {
        TransactionReader { reader }
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = io::Result<Vec<String>>;
    fn next(&mut self) -> Option<io::Result<Vec<String>>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(split_line(&line))),
            Err(err) => Some(Err(err)),
        }
    }
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Reads every transaction of the file at `path`.
pub fn read_transactions<P: AsRef<Path>>(path: P) -> io::Result<Vec<Vec<String>>> {
    TransactionReader::open(path)?.collect()
}
