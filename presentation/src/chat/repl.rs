//! REPL (Read-Eval-Print Loop) for chatting about a diagram

use super::transcript::Transcript;
use crate::config::ReplConfig;
use crate::intake::load_diagram;
use crate::output::{ConsoleFormatter, messages};
use crate::progress::ProgressReporter;
use colored::Colorize;
use pid_application::{AnalysisSessionManager, SessionError};
use pid_domain::{ExchangeKind, Role, SessionState, preview};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Load(&'a str),
    Reset,
    History,
    Status,
    Help,
    Quit,
    /// `/load` without a path
    MissingPath,
    Unknown(&'a str),
}

impl<'a> ReplCommand<'a> {
    /// Parse a line starting with `/`; other lines are questions.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        Some(match name {
            "/load" | "/l" if arg.is_empty() => ReplCommand::MissingPath,
            "/load" | "/l" => ReplCommand::Load(arg),
            "/reset" | "/r" => ReplCommand::Reset,
            "/history" => ReplCommand::History,
            "/status" => ReplCommand::Status,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    manager: Arc<AnalysisSessionManager>,
    config: ReplConfig,
    transcript: Transcript,
    /// File behind the live session
    diagram: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(manager: Arc<AnalysisSessionManager>, config: ReplConfig) -> Self {
        Self {
            manager,
            config,
            transcript: Transcript::new(),
            diagram: None,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the interactive REPL, optionally analyzing `initial` first
    pub async fn run(&mut self, initial: Option<PathBuf>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(path) = initial {
            self.load(&path).await;
        }

        loop {
            let prompt = match self.manager.state() {
                SessionState::Active => "pid> ",
                SessionState::Idle => "pid (no diagram)> ",
            };

            match rl.readline(prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.trim());
                    if self.handle_line(&line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle one input line. Returns true if the REPL should exit.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        let Some(command) = ReplCommand::parse(line) else {
            self.ask(line).await;
            return false;
        };

        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Load(path) => self.load(Path::new(path)).await,
            ReplCommand::MissingPath => println!("Usage: /load <path-to-image>"),
            ReplCommand::Reset => self.reset(),
            ReplCommand::History => self.print_history(),
            ReplCommand::Status => self.print_status(),
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    /// Validate and analyze a new diagram, replacing the current session.
    async fn load(&mut self, path: &Path) {
        // A rejected file leaves the current session untouched
        let image = match load_diagram(path) {
            Ok(image) => image,
            Err(e) => {
                println!("{} {}", "Error:".red().bold(), e);
                return;
            }
        };

        self.transcript.clear();
        self.diagram = None;

        let progress = ProgressReporter::start(ExchangeKind::Seeding, self.config.show_progress);
        let result = self.manager.begin_analysis(image).await;
        progress.finish(result.is_ok());

        match result {
            Ok(analysis) => {
                self.diagram = Some(path.to_path_buf());
                println!();
                println!("{}", ConsoleFormatter::render_markdown(&analysis));
                println!();
                self.transcript.push(Role::Model, analysis);
            }
            Err(e) => {
                debug!("Analysis failed: {}", e);
                println!(
                    "{} {}",
                    "Analysis Failed:".red().bold(),
                    messages::analysis_failure(&e)
                );
                println!("Load another diagram with /load <path>");
            }
        }
    }

    async fn ask(&mut self, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }
        if !self.manager.state().is_active() {
            println!("No diagram loaded. Use /load <path> to analyze one first.");
            return;
        }

        self.transcript.push(Role::User, question);

        let progress = ProgressReporter::start(ExchangeKind::FollowUp, self.config.show_progress);
        let result = self.manager.ask_follow_up(question).await;
        progress.finish(result.is_ok());

        let answer = match result {
            Ok(answer) => answer,
            Err(SessionError::Superseded) => return,
            Err(SessionError::NoActiveSession) => {
                println!("No diagram loaded. Use /load <path> to analyze one first.");
                return;
            }
            Err(e) => {
                debug!("Follow-up failed: {}", e);
                messages::FOLLOW_UP_FAILED.to_string()
            }
        };

        println!();
        println!("{}", ConsoleFormatter::render_markdown(&answer));
        println!();
        self.transcript.push(Role::Model, answer);
    }

    fn reset(&mut self) {
        self.manager.reset();
        self.transcript.clear();
        self.diagram = None;
        println!("Session cleared. Load a new diagram with /load <path>");
    }

    fn print_history(&self) {
        if self.transcript.is_empty() {
            println!("No messages yet.");
            return;
        }
        println!();
        for message in self.transcript.messages() {
            let who = match message.role {
                Role::User => "You".green().bold(),
                Role::Model => "Gemini".cyan().bold(),
            };
            println!(
                "[{}] {} {}",
                message.timestamp.format("%H:%M:%S"),
                who,
                preview(&message.text, 120)
            );
        }
        println!();
    }

    fn print_status(&self) {
        println!();
        println!("Model:    {}", self.manager.model());
        println!("Session:  {}", self.manager.state());
        match &self.diagram {
            Some(path) => println!("Diagram:  {}", path.display()),
            None => println!("Diagram:  (none)"),
        }
        println!("Messages: {}", self.transcript.len());
        println!();
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          P&ID Insight - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model: {}", self.manager.model());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /load <path>     - Analyze a new diagram (replaces the session)");
        println!("  /reset           - Clear the session and transcript");
        println!("  /history         - Show the transcript");
        println!("  /status          - Show model, session and diagram");
        println!("  /help, /h, /?    - Show this help");
        println!("  /quit, /exit, /q - Exit chat");
        println!("Anything else is asked as a question about the loaded diagram.");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pid_application::{GatewayError, LlmGateway, LlmSession};
    use pid_domain::{MessagePart, Model};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Reply = Result<Option<String>, GatewayError>;

    /// Gateway whose sessions pop replies from one shared queue.
    struct QueueGateway {
        replies: Arc<Mutex<VecDeque<Reply>>>,
        sent: Arc<Mutex<Vec<Vec<MessagePart>>>>,
    }

    struct QueueSession {
        model: Model,
        replies: Arc<Mutex<VecDeque<Reply>>>,
        sent: Arc<Mutex<Vec<Vec<MessagePart>>>>,
    }

    #[async_trait]
    impl LlmGateway for QueueGateway {
        async fn create_session_with_system_prompt(
            &self,
            model: &Model,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(QueueSession {
                model: model.clone(),
                replies: Arc::clone(&self.replies),
                sent: Arc::clone(&self.sent),
            }))
        }
    }

    #[async_trait]
    impl LlmSession for QueueSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send_parts(&self, parts: Vec<MessagePart>) -> Reply {
            self.sent.lock().unwrap().push(parts);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Some("unscripted".to_string())))
        }
    }

    struct Harness {
        repl: ChatRepl,
        sent: Arc<Mutex<Vec<Vec<MessagePart>>>>,
        dir: tempfile::TempDir,
    }

    fn harness(replies: Vec<Reply>) -> Harness {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let gateway = QueueGateway {
            replies: Arc::new(Mutex::new(replies.into())),
            sent: Arc::clone(&sent),
        };
        let manager = Arc::new(AnalysisSessionManager::new(
            Arc::new(gateway),
            Model::default(),
        ));
        let config = ReplConfig {
            show_progress: false,
            history_file: None,
        };
        Harness {
            repl: ChatRepl::new(manager, config),
            sent,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    impl Harness {
        fn diagram(&self, name: &str) -> String {
            let path = self.dir.path().join(name);
            std::fs::write(&path, b"\x89PNG\r\n\x1a\nrest").unwrap();
            path.display().to_string()
        }

        fn texts(&self) -> Vec<(Role, String)> {
            self.repl
                .transcript()
                .messages()
                .iter()
                .map(|m| (m.role, m.text.clone()))
                .collect()
        }
    }

    fn ok(text: &str) -> Reply {
        Ok(Some(text.to_string()))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("what is P-101?"), None);
        assert_eq!(
            ReplCommand::parse("/load  plant a.png "),
            Some(ReplCommand::Load("plant a.png"))
        );
        assert_eq!(ReplCommand::parse("/load"), Some(ReplCommand::MissingPath));
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(
            ReplCommand::parse("/frobnicate"),
            Some(ReplCommand::Unknown("/frobnicate"))
        );
    }

    #[tokio::test]
    async fn test_load_then_ask() {
        let mut h = harness(vec![ok("**P-101** feeds **E-201**"), ok("V-203 isolates P-101.")]);
        let path = h.diagram("plant.png");

        assert!(!h.repl.handle_line(&format!("/load {}", path)).await);
        assert!(!h.repl.handle_line("What does V-203 do?").await);

        assert_eq!(
            h.texts(),
            vec![
                (Role::Model, "**P-101** feeds **E-201**".to_string()),
                (Role::User, "What does V-203 do?".to_string()),
                (Role::Model, "V-203 isolates P-101.".to_string()),
            ]
        );
        let sent = h.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], vec![MessagePart::text("What does V-203 do?")]);
    }

    #[tokio::test]
    async fn test_question_without_diagram_is_not_sent() {
        let mut h = harness(vec![]);

        h.repl.handle_line("What is this?").await;

        assert!(h.repl.transcript().is_empty());
        assert!(h.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_failure_shows_fallback_and_keeps_session() {
        let mut h = harness(vec![
            ok("analysis"),
            Err(GatewayError::Timeout),
            ok("second answer"),
        ]);
        let path = h.diagram("plant.png");

        h.repl.handle_line(&format!("/load {}", path)).await;
        h.repl.handle_line("first").await;
        h.repl.handle_line("second").await;

        let texts = h.texts();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[2], (Role::Model, messages::FOLLOW_UP_FAILED.to_string()));
        assert_eq!(texts[4], (Role::Model, "second answer".to_string()));
    }

    #[tokio::test]
    async fn test_failed_analysis_leaves_no_session() {
        let mut h = harness(vec![Err(GatewayError::Authentication("bad key".to_string()))]);
        let path = h.diagram("plant.png");

        h.repl.handle_line(&format!("/load {}", path)).await;

        assert!(h.repl.transcript().is_empty());
        assert!(h.repl.diagram.is_none());
        assert!(!h.repl.manager.state().is_active());
    }

    #[tokio::test]
    async fn test_invalid_file_keeps_current_session() {
        let mut h = harness(vec![ok("analysis")]);
        let path = h.diagram("plant.png");
        let notes = h.dir.path().join("notes.txt");
        std::fs::write(&notes, b"not an image").unwrap();

        h.repl.handle_line(&format!("/load {}", path)).await;
        h.repl.handle_line(&format!("/load {}", notes.display())).await;

        assert!(h.repl.manager.state().is_active());
        assert_eq!(h.repl.transcript().len(), 1);
        assert_eq!(h.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut h = harness(vec![ok("analysis")]);
        let path = h.diagram("plant.png");

        h.repl.handle_line(&format!("/load {}", path)).await;
        h.repl.handle_line("/reset").await;

        assert!(h.repl.transcript().is_empty());
        assert!(h.repl.diagram.is_none());
        assert_eq!(h.repl.manager.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_new_diagram_replaces_transcript() {
        let mut h = harness(vec![ok("first analysis"), ok("q1 answer"), ok("second analysis")]);
        let first = h.diagram("a.png");
        let second = h.diagram("b.png");

        h.repl.handle_line(&format!("/load {}", first)).await;
        h.repl.handle_line("q1").await;
        h.repl.handle_line(&format!("/load {}", second)).await;

        assert_eq!(
            h.texts(),
            vec![(Role::Model, "second analysis".to_string())]
        );
        assert_eq!(h.repl.diagram, Some(PathBuf::from(second)));
    }

    #[tokio::test]
    async fn test_quit() {
        let mut h = harness(vec![]);
        assert!(h.repl.handle_line("/quit").await);
    }
}
