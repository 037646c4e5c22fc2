//! `formdesk`: render and decide submitted process requests from the terminal

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use formdesk_render::{paint_json, paint_text, ExpansionTracker, Renderer};
use formdesk_review::{RequestId, RequestStatus, ReviewConfig, ReviewSession};
use formdesk_value::{FormSubmission, NodePath};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod load;
mod output;

use load::{board_snapshot, load_board, load_render_input, RenderInput};

fn cli() -> Command {
    Command::new("formdesk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Review submitted process requests in the terminal")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("render")
                .about("Render a request or bare form data as a collapsible outline")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON or YAML file"),
                )
                .arg(
                    Arg::new("expand")
                        .long("expand")
                        .short('e')
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(NodePath))
                        .help("Open a section, e.g. items[1].tags"),
                )
                .arg(
                    Arg::new("expand-all")
                        .long("expand-all")
                        .action(ArgAction::SetTrue)
                        .help("Open every section"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("text")
                        .value_parser(["text", "json"])
                        .help("Output format"),
                ),
        )
        .subcommand(
            Command::new("board")
                .about("List requests with a status")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON request array, or object keyed by status"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("pending")
                        .value_parser(["pending", "approved", "rejected"])
                        .help("Which tab to list"),
                ),
        )
        .subcommand(
            Command::new("decide")
                .about("Approve or reject a pending request and print the updated board")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON request array, or object keyed by status"),
                )
                .arg(
                    Arg::new("approve")
                        .long("approve")
                        .value_name("ID")
                        .conflicts_with("reject")
                        .required_unless_present("reject")
                        .help("Request to approve"),
                )
                .arg(
                    Arg::new("reject")
                        .long("reject")
                        .value_name("ID")
                        .requires("comment")
                        .help("Request to reject"),
                )
                .arg(
                    Arg::new("comment")
                        .long("comment")
                        .help("Rejection reason"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<ReviewConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => ReviewConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ReviewConfig::default()),
    }
}

/// Sections opened by `--expand-all` and `--expand`; `--expand` never closes
fn expansion(args: &ArgMatches, form: &FormSubmission) -> ExpansionTracker {
    let mut tracker = ExpansionTracker::new();
    if args.get_flag("expand-all") {
        tracker.expand_all(form);
    }
    for path in args.get_many::<NodePath>("expand").into_iter().flatten() {
        tracker.open(path);
    }
    tracker
}

fn run_render(args: &ArgMatches, config: &ReviewConfig) -> Result<()> {
    let file = args
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let input = load_render_input(file)?;
    tracing::debug!(file = %file.display(), fields = input.form_data().len(), "input loaded");
    let renderer = Renderer::new(config.render.clone());
    let json = args.get_one::<String>("format").is_some_and(|f| f == "json");

    let tracker = expansion(args, input.form_data());

    match input {
        RenderInput::Request(request) => {
            let session = ReviewSession::open(*request, renderer).with_tracker(tracker);
            let view = session.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", output::paint_view(&view, session.request(), &config.render));
            }
        }
        RenderInput::Form(form) => {
            let body = renderer.render(&form, &tracker);
            if json {
                println!("{}", paint_json(&body)?);
            } else {
                print!("{}", paint_text(&body, &config.render));
            }
        }
    }
    Ok(())
}

fn run_board(args: &ArgMatches, config: &ReviewConfig) -> Result<()> {
    let file = args
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let status: RequestStatus = args
        .get_one::<String>("status")
        .map_or("pending", String::as_str)
        .parse()?;
    let board = load_board(file, &config.validator)?;

    println!("{} REQUESTS", status.as_str().to_uppercase());
    print!("{}", output::paint_table(board.requests(status)));
    Ok(())
}

fn run_decide(args: &ArgMatches, config: &ReviewConfig) -> Result<()> {
    let file = args
        .get_one::<PathBuf>("file")
        .context("missing input file")?;
    let mut board = load_board(file, &config.validator)?;

    let (id, comment) = match (
        args.get_one::<String>("approve"),
        args.get_one::<String>("reject"),
    ) {
        (Some(id), None) => (RequestId::from(id.as_str()), None),
        (None, Some(id)) => (
            RequestId::from(id.as_str()),
            Some(args.get_one::<String>("comment").cloned().unwrap_or_default()),
        ),
        _ => bail!("pass exactly one of --approve or --reject"),
    };

    let request = board
        .find(&id)
        .cloned()
        .with_context(|| format!("request not found: {id}"))?;
    let mut session = ReviewSession::open(request, Renderer::new(config.render.clone()));
    match comment {
        Some(comment) => session.reject(&mut board, &comment)?,
        None => session.approve(&mut board)?,
    }

    println!("{}", serde_json::to_string_pretty(&board_snapshot(&board)?)?);
    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"));

    let Some((name, args)) = matches.subcommand() else {
        cli().print_help()?;
        return Ok(());
    };
    let config = load_config(args)?;
    tracing::debug!(command = name, validator = %config.validator, "configuration loaded");

    match name {
        "render" => run_render(args, &config),
        "board" => run_board(args, &config),
        "decide" => run_decide(args, &config),
        other => bail!("unknown command: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn expand_accepts_canonical_paths() {
        let matches = cli()
            .try_get_matches_from(["formdesk", "render", "req.json", "-e", "items[1].tags", "-e", "contact"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let paths: Vec<String> = args
            .get_many::<NodePath>("expand")
            .unwrap()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, vec!["items[1].tags", "contact"]);
    }

    fn expansion_from(argv: &[&str], form: &FormSubmission) -> ExpansionTracker {
        let matches = cli().try_get_matches_from(argv).unwrap();
        let (_, args) = matches.subcommand().unwrap();
        expansion(args, form)
    }

    #[test]
    fn expand_only_ever_opens() {
        let form = formdesk_test_utils::nested_submission();
        let address = NodePath::key("address");

        let repeated = expansion_from(&["formdesk", "render", "f.json", "-e", "address", "-e", "address"], &form);
        assert!(repeated.is_open(&address));
        assert_eq!(repeated.open_count(), 1);

        let with_all = expansion_from(&["formdesk", "render", "f.json", "--expand-all", "-e", "address"], &form);
        assert!(with_all.is_open(&address));
        assert!(with_all.is_open(&NodePath::key("items").child_index(1)));
    }

    #[test]
    fn malformed_path_is_a_usage_error() {
        let result = cli().try_get_matches_from(["formdesk", "render", "req.json", "--expand", "a..b"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_needs_comment() {
        let result = cli().try_get_matches_from(["formdesk", "decide", "board.json", "--reject", "REQ-1"]);
        assert!(result.is_err());
    }
}
