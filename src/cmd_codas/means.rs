use clap::*;
use codas::libs::coda::template::{self, LabeledRow};
use codas::libs::table::Table;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("means")
        .about("Build coda templates from annotated codas")
        .after_help(
            r###"
Builds one template per coda type from a table of annotated codas.

Input columns:
* CodaType    - rhythm label, e.g. 1+1+3, 4R2, 5R1
* ICI1..ICIn  - inter-click intervals, zero-padded

Notes:
* Labels are mapped to coda-type codes; *-NOISE and unknown labels are dropped.
* Each row contributes its first k intervals, k being the fewest non-zero
  intervals seen for that coda type.
* A template is the mean cumulative fraction of the coda duration after each
  interval.
* Output is JSON: {"code": [fractions...], ...}

Examples:
1. Build templates:
   codas means DominicaCodas.csv -o coda-means.json

2. From gzipped input to screen:
   codas means DominicaCodas.csv.gz

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Annotated codas (CSV). [stdin] for standard input"),
        )
        .arg(
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
    let infile = args.get_one::<String>("infile").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let table = Table::from_path(infile)?;
    let rows = LabeledRow::from_table(&table)?;
    let templates = template::build(&rows);
    log::info!(
        "{} templates from {} annotated codas",
        templates.len(),
        rows.len()
    );

    let mut writer = codas::writer(outfile)?;
    writer.write_all((templates.to_json()? + "\n").as_ref())?;

    Ok(())
}
