//! Interactive chat loop.
//!
//! Reads lines, dispatches slash commands, and forwards everything else to
//! the session. Every error below a missing credential is converted to a
//! printed message here; the loop itself never crashes on one.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use evo_ai::{
    answer_from_document, send_with_retry, ChatError, GeminiClient, RetryPolicy, Session,
    SessionStore,
};
use evo_common::{EvoError, PersistenceError, Result};
use evo_config::{mode_instruction, mode_names, Settings};

use crate::audit::AuditLog;
use crate::commands::{parse, Command};
use crate::tools::{calc, convert, password};

/// Guardrail: longest chat input forwarded to the model.
const MAX_INPUT_CHARS: usize = 700;

pub struct LoadedDoc {
    pub name: String,
    pub text: String,
}

pub struct App {
    pub settings: Settings,
    /// Explicit settings path from `--config`; `None` means the platform
    /// default.
    pub settings_path: Option<PathBuf>,
    pub session: Session,
    pub client: GeminiClient,
    pub store: SessionStore,
    pub audit: AuditLog,
    pub retry: RetryPolicy,
    pub loaded_doc: Option<LoadedDoc>,
    pub streaming: bool,
}

pub async fn run(mut app: App) -> Result<()> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| EvoError::Other(format!("line editor init failed: {e}")))?;

    println!(
        "Evo running. Model: {}. Type /help for commands.",
        app.session.model()
    );
    println!("Logging to: {}", app.audit.path().display());
    app.audit.system("app started");
    app.audit.system(app.session.instruction());

    loop {
        let line = match rl.readline("You: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Bye!");
                app.audit.system("session ended");
                break;
            }
            Err(e) => {
                println!("Input error: {e}");
                break;
            }
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse(&line) {
            Command::Help => print_help(),
            Command::Clear => {
                app.session.reset();
                app.audit.system("memory cleared");
                println!("Cleared memory.");
            }
            Command::Role(None) => println!("Current role:\n{}", app.session.instruction()),
            Command::Role(Some(role)) => app.apply_role(role),
            Command::Mode(None) => {
                println!("Usage: /mode <name>. Modes: {}", mode_names().join(", "));
            }
            Command::Mode(Some(name)) => app.apply_mode(name),
            Command::Exit => {
                println!("Bye!");
                app.audit.system("session ended");
                break;
            }
            Command::Save(arg) => {
                match arg.map(str::to_string).or_else(|| prompt(&mut rl, "Session name: ")) {
                    Some(name) => app.save_session(&name),
                    None => println!("Save cancelled."),
                }
            }
            Command::Load(arg) => {
                match arg.map(str::to_string).or_else(|| prompt(&mut rl, "Session name: ")) {
                    Some(name) => app.load_session(&name),
                    None => println!("Load cancelled."),
                }
            }
            Command::List => app.list_sessions(),
            Command::LoadFile(arg) => {
                match arg
                    .map(str::to_string)
                    .or_else(|| prompt(&mut rl, "Path to .txt file: "))
                {
                    Some(path) => app.load_file(&path),
                    None => println!("Load cancelled."),
                }
            }
            Command::UnloadFile => {
                app.loaded_doc = None;
                println!("Unloaded file.");
            }
            Command::Calc(arg) => {
                match arg.map(str::to_string).or_else(|| prompt(&mut rl, "Expression: ")) {
                    Some(expr) => println!("{}", calc_reply(&expr)),
                    None => println!("Type something."),
                }
            }
            Command::Convert(arg) => println!("{}", convert_reply(arg.unwrap_or(""))),
            Command::Pw(arg) => {
                match arg
                    .map(str::to_string)
                    .or_else(|| prompt(&mut rl, "Password to check: "))
                {
                    Some(pw) => println!("{}", pw_reply(&pw)),
                    None => println!("Type something."),
                }
            }
            Command::Unknown(word) => {
                println!("Unknown command: {word}. Type /help for commands.");
            }
            Command::Chat(text) => app.chat_turn(text).await,
        }
    }

    Ok(())
}

impl App {
    /// Write settings through; failures are surfaced in the log, never to
    /// the loop.
    fn persist(&self) {
        let result = match &self.settings_path {
            Some(path) => self.settings.save_to_path(path),
            None => evo_config::save_settings(&self.settings),
        };
        if let Err(e) = result {
            tracing::warn!("failed to persist settings: {e}");
        }
    }

    fn apply_role(&mut self, role: &str) {
        self.session.replace_instruction(role);
        self.settings.role = self.session.instruction().to_string();
        self.persist();
        self.audit.system("role updated");
        println!("Role applied. Memory reset.");
    }

    fn apply_mode(&mut self, name: &str) {
        match mode_instruction(name) {
            Ok(instruction) => {
                self.session.replace_instruction(instruction);
                self.settings.role = instruction.to_string();
                self.persist();
                self.audit.system(&format!("mode set: {name}"));
                println!("Mode set to: {name}. Memory reset.");
            }
            Err(_) => {
                println!("Unknown mode. Modes: {}", mode_names().join(", "));
            }
        }
    }

    fn save_session(&self, name: &str) {
        match self.store.save(name, self.session.turns()) {
            Ok(path) => println!("Saved: {}", path.display()),
            Err(e) => println!("Save failed: {e}"),
        }
    }

    /// Replace the transcript only after the file validated; a failed load
    /// leaves the current conversation untouched.
    fn load_session(&mut self, name: &str) {
        match self.store.load(name) {
            Ok(turns) => {
                self.session.restore(turns);
                self.audit.system(&format!("session loaded: {name}"));
                println!("Loaded: {name}");
            }
            Err(PersistenceError::NotFound(path)) => {
                println!("No such session: {}", path.display());
            }
            Err(PersistenceError::InvalidFormat(_)) => println!("Invalid session file."),
            Err(e) => println!("Load failed: {e}"),
        }
    }

    fn list_sessions(&self) {
        match self.store.list() {
            Ok(names) if names.is_empty() => println!("No saved sessions."),
            Ok(names) => {
                for name in names {
                    println!("  {name}");
                }
            }
            Err(e) => println!("List failed: {e}"),
        }
    }

    fn load_file(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let name = std::path::Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                println!("Loaded file: {name}");
                self.audit.system(&format!("file loaded: {name}"));
                self.loaded_doc = Some(LoadedDoc { name, text });
            }
            Err(_) => println!("File not found."),
        }
    }

    async fn chat_turn(&mut self, text: &str) {
        if text.is_empty() {
            println!("Type something.");
            return;
        }
        if text.chars().count() > MAX_INPUT_CHARS {
            println!("Too long. Keep under {MAX_INPUT_CHARS} characters.");
            return;
        }

        self.audit.you(text);

        let result = if let Some(doc) = &self.loaded_doc {
            // Document answers bypass the running transcript entirely.
            let result = answer_from_document(&self.client, &doc.name, &doc.text, text).await;
            if let Ok(reply) = &result {
                println!("AI: {reply}");
            }
            result
        } else if self.streaming {
            self.stream_turn(text).await
        } else {
            let result = send_with_retry(&mut self.session, &self.client, text, &self.retry).await;
            if let Ok(reply) = &result {
                println!("AI: {reply}");
            }
            result
        };

        match result {
            Ok(reply) => self.audit.ai(&reply),
            Err(e) => {
                self.audit.error(&e.to_string());
                match e {
                    ChatError::RateLimited => {
                        println!("Rate limit hit. Wait a bit and try again.");
                    }
                    other => println!("AI error: {other}"),
                }
            }
        }
    }

    async fn stream_turn(&mut self, text: &str) -> std::result::Result<String, ChatError> {
        print!("AI: ");
        let _ = std::io::stdout().flush();

        let printed = Arc::new(AtomicBool::new(false));
        let printed_in_chunk = Arc::clone(&printed);
        let result = self
            .session
            .send_streaming(
                &self.client,
                text,
                Box::new(move |chunk| {
                    printed_in_chunk.store(true, Ordering::Relaxed);
                    print!("{chunk}");
                    let _ = std::io::stdout().flush();
                }),
            )
            .await;

        match &result {
            // No chunks arrived, so the placeholder reply was never shown.
            Ok(reply) if !printed.load(Ordering::Relaxed) => println!("{reply}"),
            _ => println!(),
        }
        result
    }
}

fn prompt(rl: &mut DefaultEditor, message: &str) -> Option<String> {
    match rl.readline(message) {
        Ok(line) => {
            let line = line.trim().to_string();
            if line.is_empty() {
                None
            } else {
                Some(line)
            }
        }
        Err(_) => None,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /help                      show this help");
    println!("  /clear                     reset conversation memory");
    println!("  /role [text]               show or replace the role (resets memory)");
    println!("  /mode <name>               switch role preset (resets memory)");
    println!("  /save [name] /load [name]  save or resume a session");
    println!("  /list                      list saved sessions");
    println!("  /loadfile <path>           answer questions from a text file");
    println!("  /unloadfile                back to normal chat");
    println!("  /calc <expr>               calculator");
    println!("  /convert <kind> <value>    unit converter");
    println!("  /pw <text>                 password strength check");
    println!("  /exit                      quit");
    println!("Modes: {}", mode_names().join(", "));
}

fn calc_reply(expr: &str) -> String {
    match calc::evaluate(expr) {
        Ok(value) => format!("Calc: {value}"),
        Err(e) => format!("Calc: {e}"),
    }
}

fn convert_reply(args: &str) -> String {
    let mut parts = args.split_whitespace();
    let (Some(kind), Some(value)) = (parts.next(), parts.next()) else {
        return format!(
            "Usage: /convert <kind> <value>. Kinds: {}",
            convert::KINDS.join(" ")
        );
    };
    let Ok(value) = value.parse::<f64>() else {
        return "Value must be a number.".to_string();
    };
    match convert::convert(kind, value) {
        Some(out) => format!("Result: {out}"),
        None => "Unknown conversion type.".to_string(),
    }
}

fn pw_reply(pw: &str) -> String {
    let report = password::score(pw);
    let mut out = format!("Strength score (0-5): {}", report.score);
    if report.tips.is_empty() {
        out.push_str("\nSolid password.");
    } else {
        out.push_str("\nTips:");
        for tip in report.tips {
            out.push_str("\n  ");
            out.push_str(tip);
        }
    }
    out
}
