//! lzhuff-cli - Command-line interface for the lzhuff codec
//!
//! A command-line tool for compressing and decompressing files into the
//! lzhuff container format.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use lzhuff::{
    compress_bytes, decompress_bytes, read_header, CompressOptions, DEFAULT_MAX_CHAIN,
    DEFAULT_WINDOW_SIZE,
};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lzhuff-cli")]
#[command(about = "A CLI tool for LZ77 + Huffman compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// LZ77 window size in bytes (1..=32768)
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: u32,

        /// Hash-chain candidates probed per position
        #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_CHAIN)]
        max_chain: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an lzhuff container
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the header of a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            window,
            max_chain,
            force,
        } => match CompressOptions::new(window, max_chain) {
            Ok(options) => compress_file(&input, &output, &options, force, cli.quiet),
            Err(e) => Err(e.into()),
        },
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A second logger (e.g. under test) is not an error worth reporting
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

fn progress_bar(input_size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || input_size <= 1024 * 1024 {
        return None;
    }
    let pb = ProgressBar::new(2);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    pb.inc(1);
    Some(pb)
}

fn compress_file(
    input: &Path,
    output: &Path,
    options: &CompressOptions,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;
    log::info!(
        "Compressing '{}' to '{}' (window {}, max chain {})",
        input.display(),
        output.display(),
        options.window_size,
        options.max_chain
    );

    let start_time = Instant::now();
    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    let progress = progress_bar(input_size, quiet, "Compressing...");
    let compressed_data =
        compress_bytes(&input_data, options).map_err(|e| format!("Compression failed: {}", e))?;
    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let elapsed = start_time.elapsed();
    let output_size = compressed_data.len();
    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if input_size > 0 {
            println!(
                "  Ratio:  {:.1}%",
                (output_size as f64 / input_size as f64) * 100.0
            );
        }
        println!("  Time:   {:.2?}", elapsed);
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;
    log::info!(
        "Decompressing '{}' to '{}'",
        input.display(),
        output.display()
    );

    let start_time = Instant::now();
    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    let progress = progress_bar(input_size, quiet, "Decompressing...");
    let decompressed_data =
        decompress_bytes(&compressed_data).map_err(|e| format!("Decompression failed: {}", e))?;
    if let Some(pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    // Only reached when the whole container decoded and verified
    fs::write(output, &decompressed_data)?;

    let elapsed = start_time.elapsed();
    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", decompressed_data.len());
        println!("  Time:   {:.2?}", elapsed);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let header = read_header(&data)?;
    let litlen_entries = header.litlen_freqs.iter().filter(|&&f| f > 0).count();
    let distance_entries = header.distance_freqs.iter().filter(|&&f| f > 0).count();

    println!("lzhuff File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Format Version: {}", header.version);
    println!("  Window Size: {} bytes", header.window_size);
    println!("  Original Size: {} bytes", header.original_size);
    println!("  Literal/Length Symbols: {}", litlen_entries);
    println!("  Distance Symbols: {}", distance_entries);
    println!("  Header Size: {} bytes", header.encoded_len());

    if verbose {
        println!("  Header bytes: {:02x?}", &data[..data.len().min(18)]);
    }

    match decompress_bytes(&data) {
        Ok(decompressed) => {
            println!("  Decompressed Size: {} bytes", decompressed.len());
            println!("  Status: ✓ Valid lzhuff file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted lzhuff file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
