//! Line-oriented front-end: reads commands from stdin and drives the
//! orchestrator while its requests complete.

use counsel_chat::Orchestrator;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{self, Renderer};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: send it to the active session.
    Send(String),
    /// `/new [title]`
    New(Option<String>),
    Sessions,
    /// `/select <n>`, 1-based position in the session list.
    Select(usize),
    More,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command /{0} (try /help)")]
    Unknown(String),

    #[error("usage: /select <n>")]
    MissingPosition,

    #[error("not a session number: {0}")]
    BadPosition(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Ok(Self::Send(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest.trim(), ""),
        };

        match name {
            "new" => Ok(Self::New((!arg.is_empty()).then(|| arg.to_string()))),
            "sessions" => Ok(Self::Sessions),
            "select" => {
                if arg.is_empty() {
                    return Err(CommandError::MissingPosition);
                }
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Self::Select(n)),
                    _ => Err(CommandError::BadPosition(arg.to_string())),
                }
            }
            "more" => Ok(Self::More),
            "reload" => Ok(Self::Reload),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Run until `/quit` or end of input.
pub async fn run(mut orch: Orchestrator, default_title: String) -> std::io::Result<()> {
    let mut events = orch.subscribe();
    let mut renderer = Renderer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    render::print_help();
    orch.load_sessions();

    loop {
        renderer.drain(&mut events, orch.state());

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => execute(&mut orch, command, &default_title),
                    Err(e) => println!("{e}"),
                }
            }
            _ = orch.step(), if orch.state().in_flight() > 0 => {}
        }
    }

    tracing::info!("leaving chat");
    Ok(())
}

fn execute(orch: &mut Orchestrator, command: Command, default_title: &str) {
    match command {
        Command::Send(text) => {
            orch.set_input(text);
            if !orch.send() && orch.state().active_session().is_none() {
                println!("No active session. Use /new to start one.");
            }
        }
        Command::New(title) => {
            orch.create_session(title.as_deref().unwrap_or(default_title));
        }
        Command::Sessions => render::print_sessions(orch.state()),
        Command::Select(position) => {
            let id = orch.state().sessions().get(position - 1).map(|s| s.id);
            match id {
                Some(id) => {
                    if !orch.select_session(id) {
                        render::print_window(orch.state());
                    }
                }
                None => println!("No session {position}. Use /sessions to list them."),
            }
        }
        Command::More => {
            if !orch.advance_page() {
                println!("No older messages.");
            }
        }
        Command::Reload => orch.reload(),
        Command::Help => render::print_help(),
        Command::Quit => {}
    }
}
