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

mod command_line_args;

use arm_mpi::report::{print_itemsets, print_rules, write_itemsets_csv, write_rules_csv};
use arm_mpi::transaction_reader::read_transactions;
use arm_mpi::{AprioriError, Config, Mined};
use command_line_args::{parse_args_or_exit, Arguments};
use log::info;

use std::io::{self, Write};
use std::process;
use std::time::Instant;

/// Mines with one worker per `mpirun` process. Returns rank 0's result.
#[cfg(feature = "mpi")]
fn run_workers(rows: &[Vec<String>], config: &Config, args: &Arguments) -> Result<Option<Mined>, AprioriError> {
    use arm_mpi::{mine, Communicator};

    if args.workers != 1 {
        return Err(AprioriError::Config(String::from(
            "--workers is not available with MPI, set the group size with mpirun -n",
        )));
    }
    let universe = mpi::initialize()
        .ok_or_else(|| AprioriError::Config(String::from("MPI is already initialized")))?;
    let world = universe.world();
    info!("MPI initialized rank={}/{}", world.rank(), world.size());

    let mined = mine(rows, config, &world)?;
    Ok(if world.rank() == 0 { Some(mined) } else { None })
}

/// Mines with `--workers` threads in this process. Returns rank 0's result.
#[cfg(not(feature = "mpi"))]
fn run_workers(rows: &[Vec<String>], config: &Config, args: &Arguments) -> Result<Option<Mined>, AprioriError> {
    let mut results = arm_mpi::mine_with_workers(rows, config, args.workers)?;
    if results.is_empty() {
        return Ok(None);
    }
    Ok(Some(results.swap_remove(0)))
}

fn mine_apriori(args: &Arguments) -> Result<(), AprioriError> {
    let config = args.config();
    info!(
        "Params (input={} max_k={} min_sup={} min_conf={} workers={})",
        args.input_file_path, config.max_k, config.min_support, config.min_confidence, args.workers
    );

    let start = Instant::now();
    let rows = read_transactions(&args.input_file_path).map_err(|err| {
        AprioriError::Config(format!(
            "failed to read input data from {}: {}",
            args.input_file_path, err
        ))
    })?;
    info!("Reading input took {} ms", start.elapsed().as_millis());

    // Every worker holds the same itemsets; rank 0 reports.
    let mined = match run_workers(&rows, &config, args)? {
        Some(mined) => mined,
        None => return Ok(()),
    };
    let itemizer = &mined.itemsets.itemizer;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_itemsets(&mut out, &mined.itemsets)?;
    writeln!(out)?;
    print_rules(&mut out, &mined.rules, itemizer)?;

    if let Some(ref path) = args.output_itemsets_path {
        write_itemsets_csv(path, &mined.itemsets)?;
        info!("Wrote frequent itemsets to {}", path);
    }
    if let Some(ref path) = args.output_rules_path {
        write_rules_csv(path, &mined.rules, itemizer)?;
        info!("Wrote rules to {}", path);
    }

    info!("Total runtime: {} ms", start.elapsed().as_millis());
    Ok(())
}

fn main() {
    env_logger::init();
    let arguments = parse_args_or_exit();

    if let Err(err) = mine_apriori(&arguments) {
        println!("Error: {}", err);
        process::exit(1);
    }
}
