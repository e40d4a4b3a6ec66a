extern crate clap;
use clap::*;

mod cmd_codas;

fn main() -> anyhow::Result<()> {
    let app = Command::new("codas")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`codas` - Coda templates and segmentation of click trains")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress to stderr; repeat for more detail"),
        )
        .subcommand(cmd_codas::means::make_subcommand())
        .subcommand(cmd_codas::classify::make_subcommand())
        .subcommand(cmd_codas::segment::make_subcommand())
        .subcommand(cmd_codas::tree::make_subcommand())
        .after_help(
            r###"Subcommands:

* Templates:
    * means    - Build coda templates from annotated codas
    * classify - Nearest template of each row

* Segmentation:
    * segment  - Split detected click trains into codas and noise
    * tree     - Show the search tree of one sequence

Logging honours RUST_LOG; -v and -vv raise the default level.

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("means", sub_matches)) => cmd_codas::means::execute(sub_matches),
        Some(("classify", sub_matches)) => cmd_codas::classify::execute(sub_matches),
        Some(("segment", sub_matches)) => cmd_codas::segment::execute(sub_matches),
        Some(("tree", sub_matches)) => cmd_codas::tree::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
