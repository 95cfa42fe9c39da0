use crate::command::{Command, TerminalCommand};
use crate::effects::Effects;
use crate::logging::{init_file_logging, LoggingError};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stderr, stdout, Stderr, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Output target for the terminal UI.
///
/// Switch to [`Stderr`](OutputTarget::Stderr) when stdout is piped so the UI
/// still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log file requested in [`ProgramOptions::log_file`] could not be set up.
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Configuration options for a [`Program`].
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("signup".into()),
///     log_file: Some("signup.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Target frames per second (default: 60, max: 120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Report mouse clicks (default: true). Without it the click bus stays
    /// silent and overlays only close from the keyboard.
    pub mouse_capture: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Enable focus reporting.
    pub focus_reporting: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Quit on Ctrl+C signals (default: true).
    pub handle_signals: bool,
    /// Install file logging via [`init_file_logging`] at startup.
    pub log_file: Option<std::path::PathBuf>,
    /// Output target: stdout (default) or stderr.
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            focus_reporting: false,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            output: OutputTarget::default(),
        }
    }
}

/// A cloneable handle to a running [`Program`] for external control.
#[derive(Clone)]
pub struct ProgramHandle<Msg: Send + 'static> {
    msg_tx: mpsc::UnboundedSender<Msg>,
    killed: Arc<AtomicBool>,
}

impl<Msg: Send + 'static> ProgramHandle<Msg> {
    /// Send a message to the running program. Silently dropped after exit.
    pub fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Make the event loop exit at its next iteration.
    pub fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
    }
}

/// The program runtime. Manages terminal setup, the event loop, and the
/// full [`Model`] lifecycle.
///
/// Every message is handled as one *dispatch*: the model's `update` runs,
/// then every message it produced with [`Command::message`], then the
/// continuations scheduled with [`Command::defer`] in rounds, and only then
/// are subscriptions reconciled and a redraw requested.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let model = Program::<Signup>::new(())?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Output>>,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscription_manager: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
    killed: Arc<AtomicBool>,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_file_logging(path)?;
        }

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let terminal = init_terminal(&options)?;
        let subscription_manager = SubscriptionManager::new(msg_tx.clone());

        let mut program = Self {
            model,
            terminal,
            msg_tx,
            msg_rx,
            subscription_manager,
            options,
            needs_redraw: true,
            should_quit: false,
            killed: Arc::new(AtomicBool::new(false)),
        };

        tracing::info!("program initialized");
        program.dispatch(None, init_cmd);

        Ok(program)
    }

    /// Get a handle for external control (send messages, force-kill).
    pub fn handle(&self) -> ProgramHandle<M::Message> {
        ProgramHandle {
            msg_tx: self.msg_tx.clone(),
            killed: self.killed.clone(),
        }
    }

    /// Run the program until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;

        tracing::info!("shutting down");
        self.subscription_manager.shutdown();
        restore_terminal(&self.options)?;

        result.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;

        loop {
            if self.killed.load(Ordering::SeqCst) {
                return Ok(());
            }

            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received ctrl+c");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.dispatch(Some(msg), Command::none());

                    // Micro-batch: drain what arrived within 100us, at most 100 messages.
                    let deadline = Instant::now() + Duration::from_micros(100);
                    let mut batch_count = 0u32;
                    while Instant::now() < deadline && batch_count < 100 {
                        match self.msg_rx.try_recv() {
                            Ok(msg) => {
                                self.dispatch(Some(msg), Command::none());
                                batch_count += 1;
                            }
                            Err(_) => break,
                        }
                    }

                    if self.should_quit || self.killed.load(Ordering::SeqCst) {
                        return Ok(());
                    }
                }

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, msg: Option<M::Message>, cmd: Command<M::Message>) {
        let mut effects = Effects::new();
        effects.absorb(cmd);
        if let Some(msg) = msg {
            effects.push(msg);
        }

        let model = &mut self.model;
        effects.settle(|msg| model.update(msg));

        for fut in effects.futures.drain(..) {
            let tx = self.msg_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(fut.await);
            });
        }
        for tcmd in effects.terminal.drain(..) {
            self.execute_terminal_command(tcmd);
        }
        if effects.quit {
            self.should_quit = true;
        }

        let subs = self.model.subscriptions();
        self.subscription_manager.reconcile(subs);
        self.needs_redraw = true;
    }

    fn execute_terminal_command(&mut self, cmd: TerminalCommand) {
        let mut writer = Output::new(self.options.output);
        let result = match cmd {
            TerminalCommand::EnableMouseCapture => execute!(writer, EnableMouseCapture),
            TerminalCommand::DisableMouseCapture => execute!(writer, DisableMouseCapture),
            TerminalCommand::ShowCursor => execute!(writer, cursor::Show),
            TerminalCommand::HideCursor => execute!(writer, cursor::Hide),
            TerminalCommand::SetTitle(title) => execute!(writer, SetTitle(title)),
            TerminalCommand::ClearScreen => execute!(
                writer,
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
            ),
        };
        if let Err(err) = result {
            tracing::warn!(%err, "terminal command failed");
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Output>>, ProgramError> {
    // Install once so repeated programs do not stack hooks.
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        let output_target = options.output;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen, output_target);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = Output::new(options.output);

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(writer, EnableMouseCapture)?;
    }
    if options.focus_reporting {
        execute!(writer, EnableFocusChange)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen, options.output)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool, output_target: OutputTarget) -> Result<(), std::io::Error> {
    // Best effort: keep going so as much state as possible is restored.
    let raw = disable_raw_mode();
    let mut writer = Output::new(output_target);
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, DisableFocusChange).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_capture_mouse() {
        let opts = ProgramOptions::default();
        assert!(opts.mouse_capture);
        assert_eq!(opts.fps, 60);
        assert!(opts.log_file.is_none());
    }

    #[test]
    fn logging_error_converts() {
        let err: ProgramError = LoggingError::AlreadyInstalled.into();
        assert!(err.to_string().contains("logging setup failed"));
    }
}
