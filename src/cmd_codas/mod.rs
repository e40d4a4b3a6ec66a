//! Subcommand modules for the `codas` binary.

pub mod classify;
pub mod means;
pub mod segment;
pub mod tree;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use codas::libs::coda::SearchParams;

/// Search arguments shared by `segment` and `tree`
pub fn search_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("limit")
            .long("limit")
            .short('l')
            .num_args(1)
            .default_value("3")
            .value_parser(value_parser!(usize))
            .help("Candidates kept at each window"),
    )
    .arg(
        Arg::new("threshold")
            .long("threshold")
            .short('t')
            .num_args(1)
            .default_value("0.1")
            .value_parser(value_parser!(f64))
            .help("Largest admissible distance"),
    )
    .arg(
        Arg::new("all_boundaries")
            .long("all-boundaries")
            .action(ArgAction::SetTrue)
            .help("Also score windows that do not end with the template"),
    )
    .arg(
        Arg::new("window")
            .long("window")
            .short('w')
            .num_args(1)
            .default_value("9")
            .value_parser(value_parser!(usize))
            .help("Widest match window, in intervals"),
    )
    .arg(
        Arg::new("extra")
            .long("extra")
            .num_args(1)
            .default_value("0.05")
            .value_parser(value_parser!(f64))
            .help("Score of each noise segment"),
    )
    .arg(
        Arg::new("max_nodes")
            .long("max-nodes")
            .num_args(1)
            .default_value("1000000")
            .value_parser(value_parser!(usize))
            .help("Give up on a sequence whose search tree grows beyond this"),
    )
}

pub fn search_params(args: &ArgMatches) -> SearchParams {
    SearchParams::new()
        .with_limit(*args.get_one::<usize>("limit").unwrap())
        .with_threshold(*args.get_one::<f64>("threshold").unwrap())
        .with_only_equal(!args.get_flag("all_boundaries"))
        .with_max_window(*args.get_one::<usize>("window").unwrap())
        .with_extra_value(*args.get_one::<f64>("extra").unwrap())
        .with_max_nodes(*args.get_one::<usize>("max_nodes").unwrap())
}
