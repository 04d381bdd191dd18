//! Terminal gallery browser driving the result-set paginator over the sample catalog.
//!
//! Commands, one per line:
//! `search q=nature&category=animals`, `page 3`, `next`, `prev`, `more`,
//! `state`, `quit`.

use std::env;
use std::io::{self, BufRead, Write};

use dotenvy::dotenv;

use image_search::domain::types::Platform;
use image_search::forms::search::{SearchParams, SearchPayload};
use image_search::models::config::ServerConfig;
use image_search::pagination::PageControls;
use image_search::paginator::{Completion, FetchTicket, RenderMode, ResultSetPaginator};
use image_search::repository::InMemoryRepository;

#[derive(Debug, PartialEq)]
enum Command {
    Search(SearchPayload),
    Page(usize),
    Next,
    Prev,
    More,
    State,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match verb {
        "search" => {
            let params: SearchParams =
                serde_html_form::from_str(rest).map_err(|e| format!("bad search: {e}"))?;
            SearchPayload::try_from(params)
                .map(Command::Search)
                .map_err(|e| format!("bad search: {e}"))
        }
        "page" => rest
            .parse()
            .map(Command::Page)
            .map_err(|_| format!("bad page number: {rest}")),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "more" => Ok(Command::More),
        "state" => Ok(Command::State),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other}")),
    }
}

/// `‹ Previous 1 … 4 [5] 6 … 10 Next ›`, with disabled controls in parentheses.
fn render_controls(controls: &PageControls) -> String {
    let mut parts = Vec::new();
    parts.push(match controls.previous {
        Some(_) => "‹ Previous".to_string(),
        None => "(‹ Previous)".to_string(),
    });
    for page in &controls.pages {
        parts.push(match page {
            Some(page) if *page == controls.page => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        });
    }
    parts.push(match controls.next {
        Some(_) => "Next ›".to_string(),
        None => "(Next ›)".to_string(),
    });
    parts.join(" ")
}

fn resolve(
    paginator: &mut ResultSetPaginator,
    repo: &InMemoryRepository,
    ticket: FetchTicket,
    out: &mut impl Write,
) -> io::Result<()> {
    let seq = ticket.seq();
    match paginator.fetch_with(repo, ticket) {
        Ok(Completion::Applied(update)) => {
            if update.mode == RenderMode::Replace {
                let search = paginator.search_text();
                if search.is_empty() {
                    writeln!(out, "Trending Images")?;
                } else {
                    writeln!(out, "Results for \"{search}\"")?;
                }
                writeln!(out, "{} results found", update.result.total)?;
            }
            for image in &update.result.items {
                writeln!(
                    out,
                    "  #{:<4} {} ({}, {}, {})",
                    image.id.get(),
                    image.title,
                    image.category,
                    image.orientation,
                    image.size
                )?;
            }
            let controls = paginator.controls();
            if controls.is_visible() {
                writeln!(out, "{}", render_controls(&controls))?;
            }
        }
        Ok(Completion::Stale) => log::debug!("Request #{seq} was superseded"),
        Err(err) => {
            log::error!("{err}");
            writeln!(out, "Failed to load page. Please try again.")?;
        }
    }
    Ok(())
}

/// `None` is a disabled control.
fn go_to(
    paginator: &mut ResultSetPaginator,
    page: Option<usize>,
    out: &mut impl Write,
) -> io::Result<Option<FetchTicket>> {
    let Some(page) = page else {
        return Ok(None);
    };
    match paginator.go_to_page(page) {
        Ok(ticket) => Ok(ticket),
        Err(err) => {
            writeln!(out, "{err}")?;
            Ok(None)
        }
    }
}

fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            std::process::exit(1);
        }
    };

    let platform = match env::args().nth(1).map(|arg| arg.parse::<Platform>()) {
        Some(Ok(platform)) => platform,
        Some(Err(err)) => {
            log::error!("{err}");
            std::process::exit(2);
        }
        None => Platform::Desktop,
    };

    let repo = match InMemoryRepository::with_sample_catalog(server_config.catalog_size) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build catalog: {err}");
            std::process::exit(1);
        }
    };

    let mut paginator =
        ResultSetPaginator::new(server_config.page_sizes().for_platform(platform));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ticket = paginator.search("", Default::default());
    resolve(&mut paginator, &repo, ticket, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let ticket = match parse_command(&line) {
            Ok(Command::Search(payload)) => {
                Some(paginator.search(payload.search, payload.filters))
            }
            Ok(Command::Page(page)) => go_to(&mut paginator, Some(page), &mut out)?,
            Ok(Command::Next) => {
                let next = paginator.controls().next;
                go_to(&mut paginator, next, &mut out)?
            }
            Ok(Command::Prev) => {
                let previous = paginator.controls().previous;
                go_to(&mut paginator, previous, &mut out)?
            }
            Ok(Command::More) => {
                let ticket = paginator.load_more();
                if ticket.is_none() {
                    writeln!(out, "No more results.")?;
                }
                ticket
            }
            Ok(Command::State) => {
                let state = paginator.state();
                writeln!(
                    out,
                    "page {}/{} loaded {:?}",
                    state.current_page, state.total_pages, state.loaded_pages
                )?;
                None
            }
            Ok(Command::Quit) => break,
            Err(err) => {
                writeln!(out, "{err}")?;
                None
            }
        };

        if let Some(ticket) = ticket {
            resolve(&mut paginator, &repo, ticket, &mut out)?;
        }
    }

    Ok(())
}
