use clap::*;
use codas::libs::coda::{distance, rhythm, Templates};
use codas::libs::table::{self, Table};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("classify")
        .about("Nearest template of each row")
        .after_help(
            r###"
Compares every row's intervals, taken as one whole coda, with all templates and
reports the closest one.

Output columns (tab-separated):
* row      - 1-based row number
* label    - the row's CodaType code, or `.` when the column is absent
* coda     - code of the nearest template, -1 when none is admissible
* distance - Manhattan distance of the normalized profiles

Notes:
* By default a template is admitted only when it ends exactly where the row
  ends; --all-boundaries also admits longer rows cut at the template's span.

Examples:
1. Check templates against their own training data:
   codas classify coda-means.json DominicaCodas.csv

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
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Table with ICI1..ICIn columns. [stdin] for standard input"),
        )
        .arg(
            Arg::new("all_boundaries")
                .long("all-boundaries")
                .action(ArgAction::SetTrue)
                .help("Also score rows longer than the template"),
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
    let templates = Templates::from_path(args.get_one::<String>("templates").unwrap())?;
    let table = Table::from_path(args.get_one::<String>("infile").unwrap())?;
    let only_equal = !args.get_flag("all_boundaries");

    let ici_cols = table.numbered_columns("ICI");
    if ici_cols.is_empty() {
        anyhow::bail!("no ICI columns in the input table");
    }
    let label_col = table.column("CodaType");

    let mut writer = codas::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("row\tlabel\tcoda\tdistance\n"))?;

    for (i, row) in table.rows.iter().enumerate() {
        let label = match label_col {
            Some(col) => rhythm::code_of(&row[col]).to_string(),
            None => ".".to_string(),
        };

        let nearest = table
            .check_row(i)
            .and_then(|_| table::parse_intervals(row, &ici_cols))
            .map(|values| table::strip_padding(&values))
            .map(|seq| distance::best_match(&seq, &templates, only_equal));

        match nearest {
            Ok(Some((coda, dist))) => {
                writer.write_fmt(format_args!("{}\t{}\t{}\t{:.6}\n", i + 1, label, coda, dist))?
            }
            Ok(None) => writer.write_fmt(format_args!(
                "{}\t{}\t{}\t.\n",
                i + 1,
                label,
                rhythm::UNCLASSIFIED
            ))?,
            Err(err) => {
                log::warn!("Row {}: {:#}", i + 1, err);
                writer.write_fmt(format_args!(
                    "{}\t{}\t{}\t.\n",
                    i + 1,
                    label,
                    rhythm::UNCLASSIFIED
                ))?
            }
        }
    }

    Ok(())
}
