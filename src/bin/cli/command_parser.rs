use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

fn html_arg() -> Arg {
    Arg::new("html")
        .long("html")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Also write the page as HTML to PATH (\"-\" for stdout)")
}

fn search_commands() -> Vec<Command> {
    vec![
        Command::new("search")
            .about("Search books by title or topic")
            .arg(
                Arg::new("query")
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .help("Words to search for"),
            )
            .arg(html_arg()),
        Command::new("genre")
            .about("List books in a genre")
            .arg(Arg::new("genre").required(true).help("Genre tag, e.g. \"fantasy\""))
            .arg(html_arg()),
        Command::new("details")
            .about("Show the selected book")
            .arg(html_arg()),
        Command::new("clear").about("Forget the selected book"),
    ]
}

pub fn arg_parser_cli() -> Command {
    let interactive = Arg::new("no-interactive")
        .long("no-interactive")
        .action(ArgAction::SetTrue)
        .help("Print the first page and exit instead of prompting");
    Command::new("bookfinder")
        .about("Search books and look at their details")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(search_commands().into_iter().map(|cmd| {
            if matches!(cmd.get_name(), "search" | "genre") {
                cmd.arg(interactive.clone())
            } else {
                cmd
            }
        }))
        .subcommand(Command::new("repl").about("Launch a read eval print loop"))
        .subcommand(Command::new("config").about("Print the default configuration"))
}

pub fn arg_parser_repl() -> Command {
    Command::new("bookfinder")
        .multicall(true)
        .subcommand_required(true)
        .subcommands(search_commands())
        .subcommand(Command::new("more").about("Load more results"))
        .subcommand(
            Command::new("open")
                .about("Open a result in the details view")
                .arg(
                    Arg::new("position")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Position shown next to the result"),
                ),
        )
        .subcommand(Command::new("exit").about("Leave the repl"))
}

pub fn generate_completions() -> Vec<String> {
    let mut subcmds = arg_parser_repl()
        .get_subcommands()
        .map(|cmd| cmd.get_name().to_string())
        .collect::<Vec<_>>();
    subcmds.sort();
    subcmds
}
