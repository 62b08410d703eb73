//! Interactive browser for smellbook.
//!
//! Each input line is one event: it is dispatched by [`Browser::handle_line`]
//! against the session and produces the text to print. The rustyline loop in
//! [`Browser::run`] only reads lines and prints results.

use rand::Rng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::catalog::Catalog;
use crate::cli::list::format_groups;
use crate::cli::lookup;
use crate::cli::show::format_detail;
use crate::cli::stats::{format_stats, StatsOutput};
use crate::cli::tip::random_tip;
use crate::cli::welcome::WELCOME_TEXT;
use crate::core::deep_link::share_link;
use crate::core::{AppSession, Tab};
use crate::error::{Result, SmellbookError};
use crate::storage::{welcome_dismissed, KeyValueStore};

const HELP_TEXT: &str = "\
Commands:
  tab <general|lambda|workshop>  switch tab (clears the search)
  search <text>                  filter the list by name
  clear                          clear the search
  list                           show the list
  show [name | #link]            show a smell, or the current one
  random [tab]                   pick a smell at random
  learn [name]                   mark the current (or named) smell learned
  unlearn [name]                 clear the learned mark
  toggle                         flip the learned mark of the current smell
  stats                          progress for the current tab
  reset yes                      forget all learned progress
  tip                            a refactoring tip
  link [name]                    share link for the current (or named) smell
  help                           this text
  quit                           leave the browser";

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Print the text and read the next line.
    Continue(String),
    /// Leave the browser.
    Quit,
}

/// Start-up options for the browser.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    /// Tab selected at start.
    pub tab: Tab,
    /// Fragment to open at start.
    pub link: Option<String>,
    /// Print the onboarding notice unless dismissed.
    pub show_welcome: bool,
    /// Print a refactoring tip at start.
    pub show_tip: bool,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            tab: Tab::General,
            link: None,
            show_welcome: true,
            show_tip: true,
        }
    }
}

/// Interactive browsing session.
pub struct Browser<'c, S: KeyValueStore> {
    session: AppSession<'c, Catalog, S>,
    base_url: String,
}

impl<'c, S: KeyValueStore> Browser<'c, S> {
    /// Create a browser on `tab`, loading progress from `store`.
    pub fn new(catalog: &'c Catalog, store: S, tab: Tab, base_url: impl Into<String>) -> Self {
        Self {
            session: AppSession::new(catalog, store, tab),
            base_url: base_url.into(),
        }
    }

    pub fn session(&self) -> &AppSession<'c, Catalog, S> {
        &self.session
    }

    /// Text printed before the first prompt.
    ///
    /// A start-up link that does not resolve is reported and otherwise
    /// ignored.
    pub fn start<R: Rng>(&mut self, options: &BrowseOptions, rng: &mut R) -> String {
        let mut parts = Vec::new();

        if options.show_welcome && !welcome_dismissed(self.session.progress().store()) {
            parts.push(WELCOME_TEXT.to_string());
        }

        if options.show_tip {
            if let Some(tip) = random_tip(self.session.catalog().tips(), rng) {
                parts.push(format!("Tip: {}", tip));
            }
        }

        parts.push(self.listing());

        if let Some(link) = &options.link {
            match self.session.open_deep_link(link) {
                Ok(_) => parts.push(self.detail()),
                Err(_) => parts.push(format!("No smell matches link '{}'.", link)),
            }
        }

        parts.join("\n\n")
    }

    /// Prompt showing the tab and any active search.
    pub fn prompt(&self) -> String {
        let selection = self.session.selection();
        if selection.search_term.is_empty() {
            format!("{}> ", selection.active_tab)
        } else {
            format!("{}/{}> ", selection.active_tab, selection.search_term)
        }
    }

    /// Dispatch one input line.
    pub fn handle_line<R: Rng>(&mut self, line: &str, rng: &mut R) -> LineOutcome {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let text = match command.to_lowercase().as_str() {
            "" => String::new(),
            "quit" | "exit" | "q" => return LineOutcome::Quit,
            "help" | "?" => HELP_TEXT.to_string(),
            "tab" => match arg.parse::<Tab>() {
                Ok(tab) => {
                    self.session.set_tab(tab);
                    self.listing()
                }
                Err(e) => e,
            },
            "search" => {
                self.session.set_search_term(arg);
                self.listing()
            }
            "clear" => {
                self.session.set_search_term("");
                self.listing()
            }
            "list" | "ls" => self.listing(),
            "show" => self.show(arg),
            "random" => self.random(arg, rng),
            "learn" => self.mark(arg, true),
            "unlearn" => self.mark(arg, false),
            "toggle" => match self.session.toggle_current_learned() {
                Ok(true) => format!("Marked '{}' as learned.", self.current_name()),
                Ok(false) => format!("Marked '{}' as not learned.", self.current_name()),
                Err(e) => report(e),
            },
            "stats" => format_stats(&StatsOutput::success(self.session.stats()))
                .trim_end()
                .to_string(),
            "tip" => match random_tip(self.session.catalog().tips(), rng) {
                Some(tip) => format!("Tip: {}", tip),
                None => "No tips available.".to_string(),
            },
            "link" => self.link(arg),
            "reset" => self.reset(arg),
            other => format!("Unknown command '{}'. Type 'help' for commands.", other),
        };

        LineOutcome::Continue(text)
    }

    /// Read lines until `quit` or end of input.
    pub fn run<R: Rng>(&mut self, options: &BrowseOptions, rng: &mut R) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| SmellbookError::terminal(format!("could not start line editor: {}", e)))?;

        println!("{}", self.start(options, rng).trim_end());

        loop {
            match editor.readline(&self.prompt()) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    match self.handle_line(&line, rng) {
                        LineOutcome::Continue(text) => {
                            if !text.is_empty() {
                                println!("{}", text.trim_end());
                            }
                        }
                        LineOutcome::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(SmellbookError::terminal(err.to_string())),
            }
        }

        tracing::debug!(learned = self.session.progress().count(), "browser closed");
        Ok(())
    }

    fn listing(&self) -> String {
        let view = self.session.sidebar();
        format_groups(view.tab, &view.search_term, &view.groups)
            .trim_end()
            .to_string()
    }

    fn detail(&self) -> String {
        match self.session.current_detail() {
            Some(detail) => format_detail(&detail).trim_end().to_string(),
            None => "Nothing selected. Use 'show <name>' or 'random'.".to_string(),
        }
    }

    fn current_name(&self) -> String {
        self.session
            .current()
            .map(|smell| smell.name.clone())
            .unwrap_or_default()
    }

    /// Select by name, falling back to link syntax (`#long-method`).
    fn select(&mut self, target: &str) -> Result<()> {
        let catalog = self.session.catalog();
        match lookup(catalog, target) {
            Some(smell) => self.session.pick(&smell.name).map(|_| ()),
            None => self
                .session
                .open_deep_link(target)
                .map(|_| ())
                .map_err(|_| SmellbookError::smell_not_found(target)),
        }
    }

    fn show(&mut self, arg: &str) -> String {
        if !arg.is_empty() {
            if let Err(e) = self.select(arg) {
                return report(e);
            }
        }
        self.detail()
    }

    fn random<R: Rng>(&mut self, arg: &str, rng: &mut R) -> String {
        let picked = if arg.is_empty() {
            self.session.pick_random(rng)
        } else {
            match arg.parse::<Tab>() {
                Ok(tab) => self.session.pick_random_from(tab, rng),
                Err(e) => return e,
            }
        };
        match picked {
            Ok(_) => self.detail(),
            Err(e) => report(e),
        }
    }

    fn mark(&mut self, arg: &str, learned: bool) -> String {
        if !arg.is_empty() {
            if let Err(e) = self.select(arg) {
                return report(e);
            }
        }
        match self.session.set_current_learned(learned) {
            Ok(smell) if learned => format!(
                "Marked '{}' as learned ({} learned).",
                smell.name,
                self.session.progress().count()
            ),
            Ok(smell) => format!(
                "Marked '{}' as not learned ({} learned).",
                smell.name,
                self.session.progress().count()
            ),
            Err(e) => report(e),
        }
    }

    fn link(&self, arg: &str) -> String {
        let smell = if arg.is_empty() {
            self.session.current()
        } else {
            lookup(self.session.catalog(), arg)
        };
        match smell {
            Some(smell) => share_link(&self.base_url, &smell.name),
            None if arg.is_empty() => report(SmellbookError::NothingSelected),
            None => report(SmellbookError::smell_not_found(arg)),
        }
    }

    /// Clear progress once confirmed with `reset yes`; the selection is kept.
    fn reset(&mut self, arg: &str) -> String {
        if !arg.eq_ignore_ascii_case("yes") {
            return format!(
                "This forgets {} learned smell(s). Type 'reset yes' to confirm.",
                self.session.progress().count()
            );
        }
        let cleared = self.session.progress().count();
        self.session.reset_progress();
        format!("Progress reset ({} cleared).\n{}", cleared, self.listing())
    }
}

fn report(err: SmellbookError) -> String {
    match err {
        SmellbookError::NothingSelected => {
            "No smell is selected. Use 'show <name>' or 'random' first.".to_string()
        }
        other => format!("Error: {}", other),
    }
}
