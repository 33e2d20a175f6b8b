// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use locsexpr::{parse_with_settings, parse_file, Error, SExpr};
use locsexpr::buffer::Source;
use locsexpr::settings::{Settings, LENIENT, STRICT};
use clap::Parser as ClapParser;
use std::fs::File;
use std::path::PathBuf;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Print the parsed data, one top-level item per line
    #[clap(long, value_parser)]
    print: bool,
    /// Print the parsed data indented (implies --print)
    #[clap(long, value_parser)]
    pretty: bool,
    /// Reject unknown escapes and limit nesting depth
    #[clap(long, value_parser)]
    strict: bool,
    /// Maximum list nesting depth
    #[clap(long, value_parser)]
    max_depth: Option<u32>,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn count_items(v: &SExpr) -> (usize, usize) {
    // (lists, atoms), without recursing
    let mut counts = (0, 0);
    let mut todo = vec![v];
    while let Some(v) = todo.pop() {
        match v.as_list() {
            Some(items) => {
                counts.0 += 1;
                todo.extend(items);
            }
            None => counts.1 += 1,
        }
    }
    counts
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings: Settings = if args.strict { STRICT } else { LENIENT };
    if args.max_depth.is_some() {
        settings.max_depth = args.max_depth;
    }

    let result =
        if settings == LENIENT {
            parse_file(&args.input_path)
        } else {
            let fh = File::open(&args.input_path)?;
            let file_name = args.input_path.to_string_lossy();
            parse_with_settings(Source::reader(fh), Some(&*file_name), &settings)
        };
    let v = match result {
        Ok(v) => v,
        Err(Error::Parse(e)) => {
            // Already carries the location; show it as is
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if args.pretty || args.print {
        for item in v.as_list().unwrap_or_default() {
            if args.pretty {
                println!("{}", item.pretty());
            } else {
                println!("{}", item);
            }
        }
    }
    let (lists, atoms) = count_items(&v);
    // The top-level list is implicit
    println!(";; count_lists = {}, count_atoms = {}", lists - 1, atoms);
    Ok(())
}
