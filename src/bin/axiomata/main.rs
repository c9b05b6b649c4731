/*
    MIT License

    Copyright (c) 2020 Lars Krueger <lars_e_krueger@gmx.de>

    Permission is hereby granted, free of charge, to any person obtaining a copy
    of this software and associated documentation files (the "Software"), to deal
    in the Software without restriction, including without limitation the rights
    to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
    copies of the Software, and to permit persons to whom the Software is
    furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in all
    copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
    OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
    SOFTWARE.
*/

#[macro_use]
extern crate log;
extern crate flexi_logger;

use std::path::PathBuf;
use std::rc::Rc;

use structopt::StructOpt;

use axiomata::corpus::Corpus;
use axiomata::definition::Definition;
use axiomata::driver::{derive, find_target, run_bucket, run_step, Derivation};
use axiomata::schema::round_robin;
use axiomata::system::{FormalSystem, Mode};
use axiomata::theorem::Theorem;

mod printer;
use printer::{
    axiom_check_line, bucket_line, derivation_banner, derivation_line, mode_banner, not_found_line, step_line,
    trace_line,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "axiomata", about = "Enumerate and derive theorems of a GEB-style formal system")]
struct CommandLine {
    /// Path to the formal-system definition (YAML).
    #[structopt(parse(from_os_str))]
    file: PathBuf,

    /// Derive the named theorem.
    #[structopt(short = "d", long = "derive")]
    derive: Option<String>,

    /// Iterate axiom schemas only, printing the theorems they denote.
    #[structopt(short = "s", long = "schema")]
    schema: bool,

    /// Check whether the named theorem matches any axiom schema.
    #[structopt(short = "a", long = "axiom")]
    axiom: Option<String>,

    /// Bound on step count / bucket turns / schema instances.
    #[structopt(short = "i", long = "iter", default_value = "10")]
    iter: usize,

    /// Suppress the per-production trace.
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,
}

fn main() {
    let _ = std::env::var("AXIOMATA_LOG").and_then(|log| {
        let _ = flexi_logger::Logger::with_str(log)
            .format(flexi_logger::with_thread)
            .log_to_file()
            .start();
        info!("Logging is ready");
        Ok(())
    });

    let cmd_line = CommandLine::from_args();
    debug!("{:?}", cmd_line);

    let definition = match Definition::load(&cmd_line.file) {
        Ok(definition) => definition,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let system = match FormalSystem::compile(&definition) {
        Ok(system) => system,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if cmd_line.schema {
        run_schema_only(&system, cmd_line.iter);
        return;
    }

    if let Some(target) = &cmd_line.axiom {
        run_axiom_check(&system, target);
        return;
    }

    println!("{}", mode_banner(system.mode()));
    match system.mode() {
        Mode::Step => run_step_mode(&system, &cmd_line),
        Mode::Bucket => run_bucket_mode(&system, &cmd_line),
    }
}

fn run_schema_only(system: &FormalSystem, iter: usize) {
    for (_, ground) in round_robin(&system.axioms).take(iter) {
        trace!("schema ground: {}", ground);
        println!("{}", ground);
    }
}

fn run_axiom_check(system: &FormalSystem, target: &str) {
    for schema in &system.axioms {
        let witness = schema.check(target);
        println!("{}", axiom_check_line(target, &schema.name, witness.as_ref()));
    }
}

fn run_step_mode(system: &FormalSystem, cmd_line: &CommandLine) {
    let turns = run_step(system, cmd_line.iter);
    for turn in &turns {
        println!("{}", step_line(turn));
        if !cmd_line.quiet {
            for event in &turn.trace {
                trace!("{}", trace_line(event));
                println!("{}", trace_line(event));
            }
        }
    }

    if let Some(target) = &cmd_line.derive {
        let corpora: Vec<&Corpus> = turns.iter().map(|turn| &turn.corpus).collect();
        print_derivation(target, find_target(target, corpora.into_iter()));
    }
}

fn run_bucket_mode(system: &FormalSystem, cmd_line: &CommandLine) {
    let turns = run_bucket(system, Some(cmd_line.iter), None);
    for turn in &turns {
        println!("{}", bucket_line(turn));
        if !cmd_line.quiet {
            for event in &turn.trace {
                trace!("{}", trace_line(event));
                println!("{}", trace_line(event));
            }
        }
    }

    if let Some(target) = &cmd_line.derive {
        let corpora: Vec<&Corpus> = turns.iter().map(|turn| &turn.bucket).collect();
        print_derivation(target, find_target(target, corpora.into_iter()));
    }
}

fn print_derivation(target: &str, found: Option<Rc<Theorem>>) {
    println!("{}", derivation_banner(target));
    match derive(found) {
        Derivation::Found(report) => {
            for step in &report {
                println!("{}", derivation_line(step));
            }
        }
        Derivation::NotFound => println!("{}", not_found_line(target)),
    }
}
