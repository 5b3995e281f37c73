use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use crossterm::tty::IsTty;
use dotenvy::dotenv;
use reedline::Signal;
use tracing::{debug, trace, warn};

mod command_parser;
mod interact;
mod prompt;
mod repl;

use bookfinder::{
    api::BigBookClient,
    config::Config,
    details::{DetailsController, DetailsPage},
    html,
    list::{ListController, ListSettings, Status},
    render,
    session::SessionStore,
    traits::DisplayTerminal,
};
use interact::Choice;

struct App {
    config: Config,
    client: BigBookClient,
    store:  SessionStore,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = BigBookClient::from_config(&config);
        let store = SessionStore::new(config.session_path()?);
        if config.api_key.is_empty() {
            warn!("No API key configured, set BOOKFINDER_API_KEY or api_key in bookfinder.toml");
        }
        Ok(Self {
            config,
            client,
            store,
        })
    }

    fn list_controller(&self) -> ListController<BigBookClient> {
        let loading = self.config.output_status.clone();
        ListController::new(
            self.client.clone(),
            self.store.clone(),
            ListSettings::from(&self.config),
        )
        .with_status_hook(move |status| {
            if let Status::Loading = status {
                eprintln!("{}", loading.format_str(status));
            }
        })
    }

    async fn show_details(&self, html_path: Option<&PathBuf>) -> Result<()> {
        let page = DetailsController::new(self.client.clone(), self.store.clone())
            .load()
            .await;
        match &page {
            DetailsPage::Book(_) => {
                let view = page
                    .view()
                    .ok_or_else(|| anyhow!("Details page without a book"))?;
                println!("{}", view.fmt_to_string(&self.config)?);
                if let Some(path) = html_path {
                    write_html(path, &html::render_details_page(&view))?;
                }
            }
            DetailsPage::Error(message) => {
                println!("{}", render::render_error(message, &self.config));
                println!("Run `bookfinder search <query>` to pick a book.");
                if let Some(path) = html_path {
                    write_html(path, &html::render_error_page(message))?;
                }
            }
        }
        Ok(())
    }
}

fn write_html(path: &Path, content: &str) -> Result<()> {
    if path == Path::new("-") {
        print!("{content}");
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Couldn't write {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

fn query_words(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("query")
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Runs `search`/`genre` from the command line: prints the first page, then
/// lets the user load more or open a result until they quit.
async fn run_search(app: &App, name: &str, matches: &ArgMatches) -> Result<()> {
    let mut list = app.list_controller();
    match name {
        "genre" => {
            let genre = matches
                .get_one::<String>("genre")
                .ok_or_else(|| anyhow!("Missing genre"))?;
            list.fetch_by_genre(genre).await;
        }
        _ => list.search_by_query(&query_words(matches)).await,
    }
    print!("{}", render::render_list(&list.view(), &app.config)?);

    let interactive = !matches.get_flag("no-interactive") && std::io::stdin().is_tty();
    let mut opened = false;
    if interactive && !list.visible().is_empty() {
        let mut cursor = 0;
        loop {
            match interact::user_choose(&list.view(), cursor)? {
                Choice::Book { index, .. } => {
                    list.select(index)?;
                    opened = true;
                    break;
                }
                Choice::LoadMore { displayed, .. } => {
                    let new = list.load_more();
                    cursor = displayed;
                    print!(
                        "{}",
                        render::render_cards(&list.view(), new, &app.config)?
                    );
                    println!("{}", list.status().fmt_to_string(&app.config)?);
                }
                Choice::Quit => break,
            }
        }
    }

    if let Some(path) = matches.get_one::<PathBuf>("html") {
        write_html(path, &html::render_results_page(&list.view()))?;
    }
    if opened {
        app.show_details(None).await?;
    }
    Ok(())
}

enum Flow {
    Continue,
    Exit,
}

async fn handle_command(
    command: &str,
    app: &App,
    list: &mut ListController<BigBookClient>,
) -> Result<Flow> {
    let args = command_parser::arg_parser_repl();
    let command = shlex::split(command).ok_or_else(|| anyhow!("Invalid command"))?;
    if command.is_empty() {
        return Ok(Flow::Continue);
    }
    let matches = args.try_get_matches_from(command)?;
    match matches.subcommand() {
        Some(("search", matches)) => {
            list.search_by_query(&query_words(matches)).await;
            print!("{}", render::render_list(&list.view(), &app.config)?);
            if let Some(path) = matches.get_one::<PathBuf>("html") {
                write_html(path, &html::render_results_page(&list.view()))?;
            }
        }
        Some(("genre", matches)) => {
            let genre = matches
                .get_one::<String>("genre")
                .ok_or_else(|| anyhow!("Missing genre"))?;
            list.fetch_by_genre(genre).await;
            print!("{}", render::render_list(&list.view(), &app.config)?);
            if let Some(path) = matches.get_one::<PathBuf>("html") {
                write_html(path, &html::render_results_page(&list.view()))?;
            }
        }
        Some(("more", _)) => {
            if !list.has_more() {
                anyhow::bail!("Nothing more to load");
            }
            let new = list.load_more();
            print!("{}", render::render_cards(&list.view(), new, &app.config)?);
            println!("{}", list.status().fmt_to_string(&app.config)?);
        }
        Some(("open", matches)) => {
            let position = *matches
                .get_one::<usize>("position")
                .ok_or_else(|| anyhow!("Missing position"))?;
            if position == 0 {
                anyhow::bail!("Positions start at 1");
            }
            list.select(position - 1)?;
            app.show_details(None).await?;
        }
        Some(("details", matches)) => {
            app.show_details(matches.get_one::<PathBuf>("html")).await?;
        }
        Some(("clear", _)) => {
            app.store.clear()?;
            println!("Selection cleared.");
        }
        Some(("exit", _)) => return Ok(Flow::Exit),
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }
    Ok(Flow::Continue)
}

async fn run_repl(app: &App) -> Result<()> {
    let history = app.store.path().with_file_name("history.txt");
    if let Some(parent) = history.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut repl = repl::Repl::new(command_parser::generate_completions(), history)?;
    let mut list = app.list_controller();
    println!("{}", list.status().fmt_to_string(&app.config)?);
    loop {
        repl.set_category(list.current_category().map(ToString::to_string));
        match repl.read_line() {
            Ok(Signal::Success(buffer)) => match handle_command(&buffer, app, &mut list).await {
                Ok(Flow::Continue) => (),
                Ok(Flow::Exit) => break,
                Err(e) => println!("Error: {}", e),
            },
            Ok(_) => {
                println!("\nAborted!");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args_parsed = command_parser::arg_parser_cli().get_matches_from(env::args_os());

    if let Some(("config", _)) = args_parsed.subcommand() {
        println!("{}", Config::default_as_string()?);
        return Ok(());
    }

    let env_file = dotenv();
    let config = Config::read_config()?;
    init_tracing(&config)?;
    match env_file {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => trace!("No .env loaded: {}", e),
    }
    let app = App::new(config)?;

    match args_parsed.subcommand() {
        Some(("repl", _)) => run_repl(&app).await?,
        Some((name @ ("search" | "genre"), matches)) => run_search(&app, name, matches).await?,
        Some(("details", matches)) => app.show_details(matches.get_one::<PathBuf>("html")).await?,
        Some(("clear", _)) => app.store.clear()?,
        Some((name, _)) => unimplemented!("{}", name),
        None => unreachable!("subcommand required"),
    }

    Ok(())
}
