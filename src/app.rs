//! Interactive menu loop for ghpeek
//!
//! Reads commands line by line, dispatches them to the session or to the
//! persisted-cache searches, and keeps going after any failure until the user
//! chooses to exit.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::cache::PersistenceProvider;
use crate::github::RemoteSource;
use crate::search;
use crate::session::{Session, SessionState};
use crate::ui;

/// A top-level menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Fetch and display a user
    Fetch,
    /// Look up a persisted user by exact name
    SearchUsers,
    /// Look up persisted repositories by name substring
    SearchRepositories,
    /// Print everything that is persisted
    ShowAll,
    /// Leave the program
    Exit,
}

impl MenuChoice {
    /// Parses a menu selection by number or keyword
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "fetch" => Some(MenuChoice::Fetch),
            "2" | "user" | "users" => Some(MenuChoice::SearchUsers),
            "3" | "repo" | "repos" => Some(MenuChoice::SearchRepositories),
            "4" | "all" => Some(MenuChoice::ShowAll),
            "5" | "exit" | "quit" | "q" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Interprets the answer to the purge prompt; empty input means yes
pub fn wants_purge(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// Main application struct tying the session to the console
pub struct App<R, P> {
    session: Session<R, P>,
    token: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
}

impl<R: RemoteSource, P: PersistenceProvider> App<R, P> {
    /// Creates a new App around a session
    pub fn new(session: Session<R, P>, token: Option<String>) -> Self {
        Self {
            session,
            token,
            should_quit: false,
        }
    }

    /// The session driving fetches
    pub fn session(&self) -> &Session<R, P> {
        &self.session
    }

    /// Runs the menu until the user exits or input ends
    pub async fn run<I: BufRead, O: Write>(&mut self, input: &mut I, out: &mut O) -> io::Result<()> {
        writeln!(out, "{}", ui::paint("ghpeek - GitHub user lookup".bold()))?;

        while !self.should_quit {
            print_menu(out)?;
            let Some(line) = prompt(input, out, "Choose an option: ")? else {
                info!("input closed, leaving without purge");
                break;
            };

            match MenuChoice::parse(&line) {
                Some(choice) => self.handle_choice(choice, input, out).await?,
                None if line.trim().is_empty() => {}
                None => writeln!(out, "Unknown option '{}'", line.trim())?,
            }
        }

        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    async fn handle_choice<I: BufRead, O: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut I,
        out: &mut O,
    ) -> io::Result<()> {
        match choice {
            MenuChoice::Fetch => {
                let Some(username) = read_required(input, out, "GitHub username: ")? else {
                    return Ok(());
                };
                self.fetch_and_display(&username, out).await
            }
            MenuChoice::SearchUsers => {
                let Some(username) = read_required(input, out, "Username to find: ")? else {
                    return Ok(());
                };
                match search::find_user(self.session.repository().store(), &username) {
                    Ok(found) => ui::render_user_search(out, &username, found.as_ref()),
                    Err(e) => ui::render_error(out, &e.to_string()),
                }
            }
            MenuChoice::SearchRepositories => {
                let Some(query) = read_required(input, out, "Repository name contains: ")? else {
                    return Ok(());
                };
                match search::find_repositories(self.session.repository().store(), &query) {
                    Ok(matches) => ui::render_repository_search(out, &query, &matches),
                    Err(e) => ui::render_error(out, &e.to_string()),
                }
            }
            MenuChoice::ShowAll => match search::snapshot(self.session.repository().store()) {
                Ok(snapshot) => ui::render_snapshot(out, &snapshot),
                Err(e) => ui::render_error(out, &e.to_string()),
            },
            MenuChoice::Exit => {
                let answer = prompt(input, out, "Purge cached data before exiting? [Y/n] ")?;
                if wants_purge(answer.as_deref().unwrap_or("")) {
                    match self.session.repository().purge() {
                        Ok(()) => writeln!(out, "Cache purged")?,
                        Err(e) => {
                            warn!(error = %e, "purge failed");
                            ui::render_error(out, &e.to_string())?;
                        }
                    }
                }
                self.should_quit = true;
                Ok(())
            }
        }
    }

    /// Fetches a user through the session and renders the outcome
    pub async fn fetch_and_display<O: Write>(&mut self, username: &str, out: &mut O) -> io::Result<()> {
        writeln!(out, "Fetching information for user: {}", username)?;
        ui::render_state(out, &SessionState::Loading)?;
        out.flush()?;

        let state = self
            .session
            .fetch_user_data(username, self.token.as_deref())
            .await;
        ui::render_state(out, &state)
    }
}

fn print_menu<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "1. Fetch a user")?;
    writeln!(out, "2. Search cached users")?;
    writeln!(out, "3. Search cached repositories")?;
    writeln!(out, "4. Show all cached data")?;
    writeln!(out, "5. Exit")
}

/// Prints `label` and reads one line; `None` at end of input
fn prompt<I: BufRead, O: Write>(input: &mut I, out: &mut O, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`prompt`], but reports and skips blank answers
fn read_required<I: BufRead, O: Write>(
    input: &mut I,
    out: &mut O,
    label: &str,
) -> io::Result<Option<String>> {
    match prompt(input, out, label)? {
        Some(value) if !value.is_empty() => Ok(Some(value)),
        Some(_) => {
            writeln!(out, "Input cannot be empty")?;
            Ok(None)
        }
        None => Ok(None),
    }
}
