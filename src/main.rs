use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use hako::{
    api::{self, Outcome, RunOptions},
    OverwritePolicy, ScaffoldOptions,
};

fn run_args() -> [Arg; 4] {
    [
        Arg::new("destination")
            .help("The destination directory where the project will be created"),
        Arg::new("dry-run")
            .long("dry-run")
            .help("Show what would be created without writing anything")
            .action(ArgAction::SetTrue),
        Arg::new("no-overwrite")
            .long("no-overwrite")
            .help("Fail before writing anything if a target file already exists")
            .action(ArgAction::SetTrue),
        Arg::new("interactive")
            .short('i')
            .long("interactive")
            .help("Ask for the destination and confirm after the preview")
            .action(ArgAction::SetTrue),
    ]
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("new")
                .about("Creates a project from a built-in template")
                .arg(Arg::new("template").help("template name").required(true))
                .args(run_args()),
        )
        .subcommand(
            Command::new("apply")
                .about("Creates a project from a TOML manifest of files")
                .arg(
                    Arg::new("manifest")
                        .help("path to a manifest with [[files]] entries")
                        .required(true),
                )
                .args(run_args()),
        )
        .subcommand(Command::new("list").about("list built-in templates"))
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("new", args)) => handle_new(args),
        Some(("apply", args)) => handle_apply(args),
        Some(("list", _)) => {
            handle_list();
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn init_logger(is_verbose: bool) {
    let level = if is_verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    log::debug!("executing in verbose mode");
}

fn run_options(args: &ArgMatches) -> RunOptions {
    let overwrite = if args.get_flag("no-overwrite") {
        OverwritePolicy::FailIfExists
    } else {
        OverwritePolicy::Overwrite
    };

    RunOptions {
        scaffold: ScaffoldOptions { overwrite },
        dry_run: args.get_flag("dry-run"),
        interactive: args.get_flag("interactive"),
    }
}

fn handle_new(args: &ArgMatches) -> miette::Result<()> {
    // clap enforces `required(true)`
    let template = args
        .get_one::<String>("template")
        .map(String::as_str)
        .unwrap_or_default();
    let destination = args.get_one::<String>("destination").map(String::as_str);

    let outcome = api::new_project(template, destination, run_options(args))?;

    report_outcome(&outcome);

    Ok(())
}

fn handle_apply(args: &ArgMatches) -> miette::Result<()> {
    let manifest = args
        .get_one::<String>("manifest")
        .map(String::as_str)
        .unwrap_or_default();
    let destination = args.get_one::<String>("destination").map(String::as_str);

    let outcome = api::apply_manifest(manifest, destination, run_options(args))?;

    report_outcome(&outcome);

    Ok(())
}

fn report_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Scaffolded(_) => {}
        Outcome::Previewed { destination } => {
            println!(
                "{} nothing written to '{}'",
                "dry run:".yellow(),
                destination.display()
            );
        }
        Outcome::Canceled => {
            println!("{} nothing written", "canceled:".yellow());
        }
    }
}

fn handle_list() {
    for (name, description) in api::list_templates() {
        println!("{} {}", name.green(), description);
    }
}
