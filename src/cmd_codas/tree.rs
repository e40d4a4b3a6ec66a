use clap::*;
use codas::libs::coda::tree::{build, path};
use codas::libs::coda::Templates;
use codas::libs::table::format_float;
use itertools::Itertools;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("tree")
        .about("Show the search tree of one sequence")
        .after_help(
            r###"
Prints the tree of candidate segmentations explored for one sequence of
intervals, four spaces per level, followed by every complete path and the best
one.

Node labels:
* root                    - nothing consumed yet
* CODE (DISTANCE) [S, E)  - a template match consuming intervals S..E
* noise [S, E)            - a skipped interval

Examples:
1. One coda followed by a noisy interval:
   codas tree coda-means.json 0.21 0.2 0.19 0.8 0.05

2. Looser matching:
   codas tree coda-means.json 0.3 0.1 0.1 0.1 --threshold 0.3

"###,
        )
        .arg(
            Arg::new("templates")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Template file (JSON) produced by `codas means`"),
        )
        .arg(
            Arg::new("intervals")
                .required(true)
                .num_args(1..)
                .index(2)
                .value_parser(value_parser!(f64))
                .help("Inter-click intervals"),
        );

    super::search_args(cmd).arg(
        Arg::new("outfile")
            .long("outfile")
            .short('o')
            .num_args(1)
            .default_value("stdout")
            .help("Output filename. [stdout] for screen"),
    )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let templates = Templates::from_path(args.get_one::<String>("templates").unwrap())?;
    let seq: Vec<f64> = args.get_many::<f64>("intervals").unwrap().copied().collect();
    let params = super::search_params(args);

    let tree = build::build(&seq, &templates, &params)?;

    let mut writer = codas::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("{}", tree))?;
    writer.write_fmt(format_args!("\n"))?;

    for p in path::leaf_paths(&tree, params.extra_value) {
        if p.end() == seq.len() {
            writer.write_fmt(format_args!(
                "path\t{}\t{}\n",
                format_float(p.score),
                format_triples(&p.triples())
            ))?;
        }
    }

    match path::best_path(&tree, params.extra_value)? {
        Some(best) => writer.write_fmt(format_args!(
            "best\t{}\t{}\n",
            format_float(best.score),
            format_triples(&best.triples())
        ))?,
        None => writer.write_fmt(format_args!("best\t.\tunsegmented\n"))?,
    }

    Ok(())
}

fn format_triples(triples: &[(i32, usize, usize)]) -> String {
    triples
        .iter()
        .map(|(coda, start, end)| format!("{}:{}-{}", coda, start, end))
        .join(" ")
}
