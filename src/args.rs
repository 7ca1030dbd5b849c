use crate::reed_solomon::StandardField;
use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

/// Options shared by `encode` and `decode`
fn codec_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("parity")
                .short('p')
                .long("parity")
                .help("Parity bytes per block (default: 10)")
                .value_name("BYTES")
                .value_parser(value_parser!(u16).range(1..)),
        )
        .arg(
            Arg::new("field")
                .short('f')
                .long("field")
                .help("Galois field to compute in (default: qr-code-256)")
                .value_name("NAME")
                .value_parser(|name: &str| name.parse::<StandardField>()),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of threads to use (0 = auto-detect)")
                .value_name("COUNT"),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .help("Process blocks sequentially")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Read input bytes from a file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("hex")
                .short('x')
                .long("hex")
                .help("Take input bytes as a hex string")
                .value_name("HEX"),
        )
        .group(
            ArgGroup::new("source")
                .args(["input", "hex"])
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write raw output bytes to a file instead of hex to stdout")
                .value_name("FILE"),
        )
}

pub fn build_cli() -> Command {
    Command::new("rsfec")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon forward error correction over small Galois fields")
        .arg_required_else_help(true)
        .subcommand(codec_args(
            Command::new("encode")
                .visible_alias("e")
                .about("Append Reed-Solomon parity to every block of the input"),
        ))
        .subcommand(codec_args(
            Command::new("decode")
                .visible_alias("d")
                .about("Correct errors in encoded input and strip the parity"),
        ))
        .subcommand(Command::new("fields").about("List the built-in Galois fields"))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
