use clap::Parser;
use color_eyre::eyre::bail;

use threshold_rs::config::SolverConfig;
use threshold_rs::isop::isop;
use threshold_rs::simplex::ExactSolver;
use threshold_rs::threshold::{identify_threshold_with, Identification};
use threshold_rs::truth_table::TruthTable;
use threshold_rs::unate::{normalize, Normalization};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Truth table, most significant bit first (hex unless `--binary`).
    #[arg(value_name = "TABLE")]
    table: String,

    /// Parse the table as a binary string.
    #[clap(long)]
    binary: bool,

    /// Number of variables (inferred from the table length by default).
    #[clap(long, value_name = "INT")]
    vars: Option<usize>,

    /// Branch-and-bound node budget.
    #[clap(long, value_name = "INT")]
    max_nodes: Option<usize>,

    /// Enable debug logging.
    #[clap(long)]
    verbose: bool,
}

/// Infers the arity from the number of digits: `2^n` bits.
fn infer_num_vars(digits: usize, bits_per_digit: usize) -> color_eyre::Result<usize> {
    let bits = digits * bits_per_digit;
    if bits == 4 && bits_per_digit == 4 {
        // A single hex digit also covers functions of 0 and 1 inputs.
        return Ok(2);
    }
    if !bits.is_power_of_two() {
        bail!("cannot infer arity from {} digits, pass --vars", digits);
    }
    Ok(bits.trailing_zeros() as usize)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let digits = args.table.strip_prefix("0x").unwrap_or(&args.table);
    let tt = if args.binary {
        let n = match args.vars {
            Some(n) => n,
            None => infer_num_vars(digits.len(), 1)?,
        };
        TruthTable::from_binary_str(n, digits)?
    } else {
        let n = match args.vars {
            Some(n) => n,
            None => infer_num_vars(digits.len(), 4)?,
        };
        TruthTable::from_hex_str(n, digits)?
    };
    println!("f = {:?}", tt);
    println!("minterms: {} of {}", tt.count_ones(), tt.num_bits());

    match normalize(&tt) {
        Normalization::Binate { var } => println!("x{} is binate", var),
        Normalization::Unate(pu) => {
            let classes: Vec<String> = pu.classes.iter().map(|c| c.to_string()).collect();
            println!("unateness: [{}]", classes.join(" "));
            println!("flipped: {:?}", pu.flipped);
            for (name, table) in [("on", &pu.table), ("off", &!&pu.table)] {
                let cubes: Vec<String> = isop(table)
                    .iter()
                    .map(|c| c.to_string_with(tt.num_vars()))
                    .collect();
                println!("{}-set cover ({} cubes): {}", name, cubes.len(), cubes.join(" "));
            }
        }
    }

    let mut config = SolverConfig::default();
    if let Some(max_nodes) = args.max_nodes {
        config = config.with_max_nodes(max_nodes);
    }
    let mut solver = ExactSolver::new(config);

    let time_identify = std::time::Instant::now();
    let result = identify_threshold_with(&tt, &mut solver)?;
    let time_identify = time_identify.elapsed();

    match result {
        Identification::Threshold(form) => {
            println!("threshold function: {}", form);
            if !form.realizes(&tt) {
                bail!("linear form {} does not realize {:?}", form, tt);
            }
        }
        Identification::NotThreshold => println!("not a threshold function"),
    }

    println!("identification done in {:.3} ms", time_identify.as_secs_f64() * 1000.0);
    println!("total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
