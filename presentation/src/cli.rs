use crate::commands::{parse_command, ChatCommand, HELP};
use application::session_manager::SessionManager;
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use domain::error::ChatError;
use domain::session::{Role, Turn};
use infrastructure::config::{BackendKind, Config};
use infrastructure::provider::connect_backend;
use shared::confirmation::ask_confirmation;
use shared::types::Result;
use shared::utils::short_id;
use tracing::debug;

fn parse_backend(raw: &str) -> std::result::Result<BackendKind, String> {
    raw.parse::<BackendKind>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "chat_cli")]
#[command(about = "Multi-turn chat with a local Ollama model or an OpenAI-compatible API")]
pub struct Cli {
    /// Enter interactive chat mode (keeps per-session history)
    #[arg(long)]
    pub chat: bool,

    /// Session id to start with in chat mode (generated when omitted)
    #[arg(long)]
    pub session: Option<String>,

    /// Model backend: ollama or openai (overrides CHAT_BACKEND)
    #[arg(long, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    /// Model name for the selected backend
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL for the selected backend
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// One-shot question (asked interactively when empty)
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

/// Whether the chat loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct CliApp {
    manager: SessionManager,
    current: String,
    confirm_reset: bool,
}

impl CliApp {
    /// Load configuration and connect the backend. Errors returned here are
    /// fatal; the caller is expected to stop the process.
    pub async fn connect(cli: &Cli) -> Result<Self> {
        let config = Config::load()?.with_overrides(cli.backend, cli.model.clone(), cli.base_url.clone());
        debug!(backend = %config.backend, model = %config.active_model(), "configuration loaded");
        let backend = connect_backend(&config, true).await?;
        let manager = SessionManager::new(backend);
        Ok(Self::with_manager(manager, cli.session.as_deref()).await)
    }

    pub async fn with_manager(manager: SessionManager, session: Option<&str>) -> Self {
        let current = manager.create_session(session).await;
        Self {
            manager,
            current,
            confirm_reset: true,
        }
    }

    pub fn without_confirmation(mut self) -> Self {
        self.confirm_reset = false;
        self
    }

    pub fn current_session(&self) -> &str {
        &self.current
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        if cli.chat {
            self.handle_chat().await
        } else {
            self.handle_query(&cli.args.join(" ")).await
        }
    }

    async fn handle_query(&self, query: &str) -> Result<()> {
        let question = if query.trim().is_empty() {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Your question")
                .interact_text()?
        } else {
            query.to_string()
        };

        eprintln!("{}", "Thinking...".dimmed());
        match self.manager.ask_once(&question).await {
            Ok(answer) => {
                println!("{}", "Answer:".green().bold());
                println!("{}", answer);
            }
            Err(err) => report(&err),
        }
        Ok(())
    }

    async fn handle_chat(&mut self) -> Result<()> {
        println!(
            "{} {}  {} {}",
            "Session:".green().bold(),
            short_id(&self.current),
            "Backend:".green().bold(),
            self.manager.backend_name()
        );
        println!("{}", "Type /help for commands, 'exit' to quit.".dimmed());

        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()?;
            if self.execute(parse_command(&input)).await? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Apply one chat command. Chat errors are printed, never returned; only
    /// terminal I/O failures propagate.
    pub async fn execute(&mut self, command: ChatCommand) -> Result<Flow> {
        match command {
            ChatCommand::Empty => {}
            ChatCommand::Exit => return Ok(Flow::Exit),
            ChatCommand::Help => println!("{}", HELP),
            ChatCommand::Invalid(msg) => println!("{}", msg.yellow()),
            ChatCommand::Message(text) => {
                eprintln!("{}", "Thinking...".dimmed());
                match self.manager.submit(&self.current, &text).await {
                    Ok(turn) => println!("{} {}", "Assistant:".cyan().bold(), turn.content()),
                    Err(err) => report(&err),
                }
            }
            ChatCommand::NewSession => {
                self.current = self.manager.create_session(None).await;
                println!("{} {}", "New session:".green(), short_id(&self.current));
            }
            ChatCommand::UseSession(id) => {
                self.current = self.manager.create_session(Some(id.as_str())).await;
                let turns = self.history_or_report().await;
                println!(
                    "{} {} ({} turns)",
                    "Using session:".green(),
                    short_id(&self.current),
                    turns.len()
                );
            }
            ChatCommand::Reset => {
                if self.confirm_reset && !ask_confirmation("Clear this session's history?", false)? {
                    println!("{}", "Reset cancelled.".yellow());
                    return Ok(Flow::Continue);
                }
                match self.manager.reset_session(&self.current).await {
                    Ok(()) => println!("{}", "History cleared.".green()),
                    Err(err) => report(&err),
                }
            }
            ChatCommand::History => {
                let turns = self.history_or_report().await;
                if turns.is_empty() {
                    println!("{}", "(no turns yet)".dimmed());
                }
                for turn in &turns {
                    println!("{}", render_turn(turn));
                }
            }
            ChatCommand::Sessions => {
                for id in self.manager.list_sessions().await {
                    let marker = if id == self.current { "*" } else { " " };
                    println!("{} {}", marker, id);
                }
            }
        }
        Ok(Flow::Continue)
    }

    async fn history_or_report(&self) -> Vec<Turn> {
        match self.manager.get_history(&self.current).await {
            Ok(turns) => turns,
            Err(err) => {
                report(&err);
                Vec::new()
            }
        }
    }
}

pub fn render_turn(turn: &Turn) -> String {
    let label = match turn.role() {
        Role::User => "You".blue().bold(),
        Role::Assistant => "Assistant".cyan().bold(),
    };
    format!("[{}] {}: {}", turn.sequence(), label, turn.content())
}

fn report(err: &ChatError) {
    match err {
        ChatError::Validation(_) => println!("{}", err.to_string().yellow()),
        ChatError::Backend(_) => println!(
            "{} {}",
            "Model call failed:".red().bold(),
            err.to_string().red()
        ),
        _ => println!("{}", err.to_string().red()),
    }
}
