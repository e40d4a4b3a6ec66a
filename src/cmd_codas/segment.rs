use clap::*;
use codas::libs::coda::record::{self, SegmentRecord, PADDED_WIDTH};
use codas::libs::coda::{segment, SearchParams, Templates, NOISE};
use codas::libs::table::{self, format_float, Table};
use itertools::Itertools;
use rayon::prelude::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("segment")
        .about("Split detected click trains into codas and noise")
        .after_help(
            r###"
Splits every row's sequence of inter-click intervals into known codas and
one-interval noise segments, choosing the lowest-scoring complete segmentation.

Input columns:
* ICI1..ICIn  - raw intervals; zeros and empty fields at the end are padding
* TsTo        - optional, time of the first click
* anything else is passed through unchanged

Output, one row per segment:
* the passed-through columns
* TsTo        - time of the segment's first click
* Coda        - coda-type code, 100 for noise, -1 for an unsegmented row
* Duration    - sum of the segment's intervals
* ICI1..ICIn  - the segment's intervals, zero-padded to the longest
                template match, at least 9 columns

Search:
* A match consumes the template's intervals plus the following gap.
* At each position windows of --window down to 1 intervals are tried; the
  --limit closest templates within --threshold become branches.
* When a window matches nothing, the first interval may be skipped as noise.
* A path's score is the sum of its template distances plus --extra per noise
  segment.

Examples:
1. Segment with default settings:
   codas segment coda-means.json dialogues.csv -o codas.csv

2. Looser matching on 4 threads:
   codas segment coda-means.json dialogues.csv --threshold 0.2 --limit 5 -p 4

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
                .help("Detections (CSV). [stdin] for standard input"),
        );

    super::search_args(cmd)
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
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
    //----------------------------
    // Args
    //----------------------------
    let templates = Templates::from_path(args.get_one::<String>("templates").unwrap())?;
    let table = Table::from_path(args.get_one::<String>("infile").unwrap())?;
    let params = super::search_params(args);
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    if templates.is_empty() {
        anyhow::bail!("the template file holds no templates");
    }

    let ici_cols = table.numbered_columns("ICI");
    if ici_cols.is_empty() {
        anyhow::bail!("no ICI columns in the input table");
    }
    let ts_col = table.column("TsTo");
    let meta_cols: Vec<usize> = (0..table.header().len())
        .filter(|col| !ici_cols.contains(col) && Some(*col) != ts_col)
        .collect();

    //----------------------------
    // Segment
    //----------------------------
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build()?;

    let results: Vec<Vec<SegmentRecord>> = pool.install(|| {
        table
            .rows
            .par_iter()
            .enumerate()
            .map(|(i, _)| segment_row(&table, i, &ici_cols, ts_col, &templates, &params))
            .collect()
    });

    let unsegmented = results
        .iter()
        .filter(|records| records.iter().any(|r| r.is_unsegmented()))
        .count();
    let n_noise = results
        .iter()
        .flatten()
        .filter(|r| r.coda == NOISE)
        .count();
    log::info!(
        "{} rows: {} unsegmented, {} segments, {} noise",
        results.len(),
        unsegmented,
        results.iter().map(|r| r.len()).sum::<usize>(),
        n_noise
    );

    //----------------------------
    // Output
    //----------------------------
    // a segment never outgrows the longest template
    let width = templates.max_length().max(PADDED_WIDTH);

    let mut writer = codas::writer(args.get_one::<String>("outfile").unwrap())?;

    let header = meta_cols
        .iter()
        .map(|&col| table.header()[col].clone())
        .chain(["TsTo", "Coda", "Duration"].iter().map(|s| s.to_string()))
        .chain((1..=width).map(|i| format!("ICI{}", i)))
        .join(",");
    writer.write_fmt(format_args!("{}\n", header))?;

    for (row, records) in table.rows.iter().zip(&results) {
        for r in records {
            let line = meta_cols
                .iter()
                .map(|&col| row[col].clone())
                .chain([
                    format_float(r.start_time),
                    r.coda.to_string(),
                    format_float(r.duration),
                ])
                .chain(r.padded(width).into_iter().map(format_float))
                .join(",");
            writer.write_fmt(format_args!("{}\n", line))?;
        }
    }

    Ok(())
}

/// Segment one table row. Failures are confined to the row: it is reported as a
/// single unsegmented record and the batch goes on.
fn segment_row(
    table: &Table,
    index: usize,
    ici_cols: &[usize],
    ts_col: Option<usize>,
    templates: &Templates,
    params: &SearchParams,
) -> Vec<SegmentRecord> {
    let line = index + 1;
    let row = &table.rows[index];
    let base_time = match ts_col.map(|col| row[col].as_str()) {
        None | Some("") => 0.0,
        Some(field) => match field.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Row {}: invalid TsTo `{}`, using 0", line, field);
                0.0
            }
        },
    };

    let seq = match table
        .check_row(index)
        .and_then(|_| table::parse_intervals(row, ici_cols))
    {
        Ok(values) => table::strip_padding(&values),
        Err(err) => {
            log::warn!("Row {}: {:#}", line, err);
            return vec![record::unsegmented(&[], base_time)];
        }
    };

    match segment(&seq, templates, params) {
        Ok(Some(best)) => {
            log::debug!("Row {}: {:?} score {:.4}", line, best.triples(), best.score);
            record::records(&seq, base_time, &best)
        }
        Ok(None) => {
            log::warn!("Row {}: no segmentation of {} intervals", line, seq.len());
            vec![record::unsegmented(&seq, base_time)]
        }
        Err(err) => {
            log::warn!("Row {}: {}", line, err);
            vec![record::unsegmented(&seq, base_time)]
        }
    }
}
