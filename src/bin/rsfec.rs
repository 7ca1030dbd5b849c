//! rsfec - Reed-Solomon encode and decode from the command line
//!
//! Input comes from a file (`--input`) or a hex string (`--hex`). Output is
//! written raw to `--output`, or as hex on stdout.

use anyhow::{Context, Result};
use rsfec::{CodecConfig, CodecError, ReedSolomonCodec, StandardField};
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = rsfec::parse_args();

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some(("fields", _)) => handle_fields(),
        Some((cmd, _)) => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'rsfec --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn build_codec(matches: &clap::ArgMatches) -> Result<ReedSolomonCodec> {
    let config = CodecConfig::from_args(matches);
    if config.parallel {
        config.configure_thread_pool();
    }
    ReedSolomonCodec::new(config).context("Invalid codec settings")
}

fn read_input(matches: &clap::ArgMatches) -> Result<Vec<u8>> {
    if let Some(path) = matches.get_one::<String>("input") {
        return fs::read(path).with_context(|| format!("Failed to read {}", path));
    }
    let text = matches
        .get_one::<String>("hex")
        .context("No input given")?;
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).context("Input is not valid hex")
}

fn write_output(matches: &clap::ArgMatches, bytes: &[u8]) -> Result<()> {
    match matches.get_one::<String>("output") {
        Some(path) => fs::write(Path::new(path), bytes)
            .with_context(|| format!("Failed to write {}", path)),
        None => {
            println!("{}", hex::encode(bytes));
            Ok(())
        }
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let codec = build_codec(matches)?;
    let input = read_input(matches)?;
    let encoded = codec
        .encode_blocks(&input)
        .context("Failed to encode input")?;
    write_output(matches, &encoded)
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let codec = build_codec(matches)?;
    let input = read_input(matches)?;

    let summary = match codec.decode_blocks(&input) {
        Ok(summary) => summary,
        Err(CodecError::Decode { block, source }) if source.is_uncorrectable() => {
            eprintln!("Block {} cannot be corrected: {}", block, source);
            eprintln!("\nRepair is not possible.");
            std::process::exit(2);
        }
        Err(err) => return Err(err).context("Failed to decode input"),
    };

    if summary.errors_corrected > 0 {
        eprintln!(
            "Corrected {} errors in {} of {} blocks",
            summary.errors_corrected,
            summary.repaired_blocks.len(),
            summary.blocks
        );
    }
    write_output(matches, &summary.data)
}

fn handle_fields() -> Result<()> {
    for field in StandardField::ALL {
        let usable = if field.size() <= 256 { "" } else { " (algebra only)" };
        println!(
            "{:<16} GF({}) primitive {:#x}{}",
            field.name(),
            field.size(),
            field.primitive(),
            usable
        );
    }
    Ok(())
}
