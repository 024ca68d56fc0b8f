use anyhow::{Context, Result};
use clap::Parser;
use mrcfg::{build_grammar, Csa, StabberKind};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use std::{fs, process};

/// Build a maximal-repeat context-free grammar from a byte file.
#[derive(Parser)]
#[command(name = "mrcfg", version)]
struct Args {
    /// Stabbing structure: OPTIMAL, ONLINE, or FAST
    algorithm: String,
    /// Input file
    input: PathBuf,
    /// Re-expand the grammar to standard error for verification
    #[arg(long)]
    verify: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let kind: StabberKind = args.algorithm.parse()?;

    println!("loading file");
    let timer = Instant::now();
    let text = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!("\t{:.2?}", timer.elapsed());

    println!("building CSA");
    let timer = Instant::now();
    let csa = Csa::new(text);
    println!("\tcsa size: {}", csa.size());
    println!("\talphabet: {}", csa.sigma());
    println!("\t{:.2?}", timer.elapsed());

    println!("computing CFG");
    let timer = Instant::now();
    let grammar = build_grammar(&csa, kind);
    let stats = grammar.stats(&csa);
    println!("\tnumber of rules: {}", stats.num_rules);
    println!("\tstart rule size: {}", stats.start_len);
    println!(
        "\ttotal non-start size: {}",
        stats.total_size - stats.start_len
    );
    println!("\ttotal size: {}", stats.total_size);
    println!("\tcompression ratio: {:.2}%", stats.compression_ratio());
    println!("\t{:.2?}", timer.elapsed());

    if args.verify {
        println!("printing CFG");
        let timer = Instant::now();
        let stderr = io::stderr();
        let mut out = BufWriter::new(stderr.lock());
        grammar.write_expansion(&csa, &mut out)?;
        out.flush()?;
        println!("\t{:.2?}", timer.elapsed());
    }

    Ok(())
}
