//! RV64 assembler cross-check fixture CLI.
//!
//! This binary drives the fixture generator. It provides:
//! 1. **Run:** Generate, assemble, extract, check, and write the fixture artifacts.
//! 2. **Generate:** Print the generated assembly (or paired encoder calls) without a toolchain.
//! 3. **Families:** List the catalog groups and how many words each emits.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rvasmtest_core::config::{Config, Extraction};
use rvasmtest_core::driver;
use rvasmtest_core::fixture::listing;
use rvasmtest_core::toolchain::GnuToolchain;
use rvasmtest_core::{Catalog, Result};

#[derive(Parser, Debug)]
#[command(
    name = "asmtest",
    author,
    version,
    about = "Randomized RV64 encoder test vectors, checked against the GNU assembler",
    long_about = "Generate random RV64G instructions in two notations (encoder calls and assembly), \
assemble the assembly with a RISC-V cross toolchain, and pair every call with the word the \
assembler produced.\n\nExamples:\n  asmtest run --seed 42 --out-dir target/fixture\n  \
asmtest run --family ArithOp --family AtomOp --prefix riscv64-linux-gnu-\n  \
asmtest generate --seed 7 --api"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every generating subcommand.
#[derive(Args, Debug)]
struct GenerationArgs {
    /// JSON configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; a fresh one is drawn and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Restrict generation to a family (repeatable).
    #[arg(long = "family", value_name = "FAMILY")]
    families: Vec<String>,

    /// Instances generated per mnemonic.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Text placed before every encoder call, e.g. "__ ".
    #[arg(long)]
    call_prefix: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline and write the .s, .o, .txt and .json artifacts.
    Run {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Directory the artifacts are written to.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// File stem of the artifacts.
        #[arg(long)]
        name: Option<String>,

        /// Toolchain binary prefix, e.g. riscv64-linux-gnu-.
        #[arg(long)]
        prefix: Option<String>,

        /// Code extraction method: elf or objcopy.
        #[arg(long)]
        extraction: Option<Extraction>,

        /// Leave the disassembly out of the listing.
        #[arg(long)]
        no_disassembly: bool,
    },

    /// Print the generated instructions without invoking a toolchain.
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Print encoder calls next to the assembly instead of the bare source.
        #[arg(long)]
        api: bool,
    },

    /// List the catalog families.
    Families,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            generation,
            out_dir,
            name,
            prefix,
            extraction,
            no_disassembly,
        } => load_config(&generation).and_then(|mut config| {
            if let Some(dir) = out_dir {
                config.general.output_dir = dir;
            }
            if let Some(name) = name {
                config.general.base_name = name;
            }
            if prefix.is_some() {
                config.toolchain.prefix = prefix;
            }
            if let Some(extraction) = extraction {
                config.toolchain.extraction = extraction;
            }
            if no_disassembly {
                config.general.include_disassembly = false;
            }
            cmd_run(&config)
        }),
        Commands::Generate { generation, api } => {
            load_config(&generation).and_then(|config| cmd_generate(&config, api))
        }
        Commands::Families => cmd_families(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the configuration file, if any, and applies the shared flags.
fn load_config(args: &GenerationArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if args.seed.is_some() {
        config.general.seed = args.seed;
    }
    if !args.families.is_empty() {
        config.general.families.clone_from(&args.families);
    }
    if let Some(count) = args.count {
        config.general.instances_per_mnemonic = count;
    }
    if let Some(prefix) = &args.call_prefix {
        config.api.call_prefix.clone_from(prefix);
    }
    Ok(config)
}

/// Runs the full pipeline against the discovered GNU toolchain.
fn cmd_run(config: &Config) -> Result<()> {
    let catalog = driver::select_catalog(&config.general)?;
    let toolchain = GnuToolchain::discover(&config.toolchain)?;
    info!(assembler = %toolchain.assembler().display(), "discovered toolchain");
    let outcome = driver::run(config, &catalog, &toolchain)?;

    println!(
        "[*] {} instructions checked (seed {})",
        outcome.fixture.entries.len(),
        outcome.fixture.seed
    );
    println!("    source:  {}", outcome.artifacts.source.display());
    println!("    listing: {}", outcome.artifacts.listing.display());
    println!("    fixture: {}", outcome.artifacts.fixture.display());
    Ok(())
}

/// Prints the generated instructions.
fn cmd_generate(config: &Config, api: bool) -> Result<()> {
    let catalog = driver::select_catalog(&config.general)?;
    let (emission, _) = driver::generate(config, &catalog);

    if api {
        println!("// seed {}", emission.seed());
        for insn in emission.instructions() {
            println!("    {:<50} //\t{}", insn.api, insn.assembly);
        }
    } else {
        print!("{}", listing::assembly_source(&emission));
    }
    Ok(())
}

/// Prints each catalog group with its entry and word counts.
fn cmd_families() -> Result<()> {
    let catalog = Catalog::rv64g()?;
    for group in catalog.groups() {
        let words: usize = group
            .entries()
            .iter()
            .map(|e| e.format().forms_count())
            .sum();
        println!(
            "{:<16} {:>3} mnemonics  {:>3} words",
            group.family().name(),
            group.entries().len(),
            words
        );
    }
    println!("total: {} words per instance", catalog.expected_words(1));
    Ok(())
}
