use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use itertools::Itertools;
use serde_json::json;
use structopt::StructOpt;

use cmpv::{ComparePolicy, CompareError, Options, SymbolTable, UnknownSymbols, Val, ValueBuffer, ValueComparator};

#[derive(StructOpt, Debug)]
#[structopt(name = "cmpv", about = "Compare dynamically typed values the way the cmpv kernel does.")]
struct Opt {
    /// JSON file with an array of [left, right] pairs, or of plain values
    /// with --sort. Reads stdin if omitted.
    #[structopt(name = "FILE", parse(from_os_str))]
    input: Option<PathBuf>,

    /// matching-type, sort-nulls-first or sort-nulls-last
    #[structopt(long, default_value = "matching-type")]
    policy: ComparePolicy,

    /// Undecided byte lanes at which the kernel switches to scalar compares
    #[structopt(long, default_value = "4")]
    threshold: usize,

    /// What to do with symbol ids missing from the symbol table: incomparable or fail
    #[structopt(long, default_value = "incomparable")]
    unknown_symbols: UnknownSymbols,

    /// Sort the input values instead of comparing pairs
    #[structopt(long)]
    sort: bool,

    /// Sort in descending order
    #[structopt(long)]
    descending: bool,

    /// Print one JSON object per result
    #[structopt(long)]
    json: bool,

    /// Print the encoded buffers
    #[structopt(long)]
    dump: bool,

    /// Print perf counters after the run
    #[structopt(long)]
    stats: bool,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();
    if let Err(err) = run(&opt) {
        eprintln!("cmpv: {}", err);
        process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    let input = match &opt.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    let json: serde_json::Value = serde_json::from_str(&input)?;
    let comparator = ValueComparator::new(Options {
        scalar_lane_threshold: opt.threshold,
        unknown_symbols: opt.unknown_symbols,
        ..Options::default()
    });
    let mut symbols = SymbolTable::new();

    if opt.sort {
        let values = parse_values(&json)?;
        let buffer = encode(&values, &mut symbols);
        if opt.dump {
            println!("{:?}", buffer);
        }
        let order = comparator.sort_indices(&buffer, opt.policy, &symbols, opt.descending)?;
        if opt.json {
            for &row in &order {
                println!("{}", json!({ "row": row, "value": &values[row] }));
            }
        } else {
            println!("{}", order.iter().map(|&row| &values[row]).join("\n"));
        }
    } else {
        let (left, right): (Vec<Val>, Vec<Val>) = parse_pairs(&json)?.into_iter().unzip();
        let left_buffer = encode(&left, &mut symbols);
        let right_buffer = encode(&right, &mut symbols);
        if opt.dump {
            println!("left:  {:?}", left_buffer);
            println!("right: {:?}", right_buffer);
        }
        let comparison = comparator.compare_columns(&left_buffer, &right_buffer, opt.policy, &symbols)?;
        for (row, (l, r)) in left.iter().zip(&right).enumerate() {
            let result = comparison.get(row);
            if opt.json {
                println!("{}", json!({ "left": l, "right": r, "result": result }));
            } else {
                let relation = match result {
                    Some(-1) => "<",
                    Some(0) => "==",
                    Some(_) => ">",
                    None => "<>",
                };
                println!("{} {} {}", l, relation, r);
            }
        }
    }

    if opt.stats {
        eprintln!("{}", comparator.perf_counter());
    }
    Ok(())
}

fn encode(values: &[Val], symbols: &mut SymbolTable) -> ValueBuffer {
    let mut buffer = ValueBuffer::new();
    for value in values {
        buffer.push(value, symbols);
    }
    buffer
}

fn parse_values(json: &serde_json::Value) -> Result<Vec<Val>, CompareError> {
    match json {
        serde_json::Value::Array(values) => values.iter().map(Val::from_json).collect(),
        _ => Err(CompareError::InvalidArgument("expected an array of values".to_string())),
    }
}

fn parse_pairs(json: &serde_json::Value) -> Result<Vec<(Val, Val)>, CompareError> {
    let invalid = || CompareError::InvalidArgument("expected an array of [left, right] pairs".to_string());
    let pairs = json.as_array().ok_or_else(invalid)?;
    pairs
        .iter()
        .map(|pair| match pair.as_array().map(|p| p.as_slice()) {
            Some([left, right]) => Ok((Val::from_json(left)?, Val::from_json(right)?)),
            _ => Err(invalid()),
        })
        .collect()
}
