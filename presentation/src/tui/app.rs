//! TUI application — main loop with Actor pattern
//!
//! Architecture:
//! ```text
//! ChatApp (select! loop)                controller_task (tokio::spawn)
//!   ├─ crossterm EventStream             └─ cmd_rx.recv()
//!   ├─ update_rx (UiUpdate)                   └─ controller.send()
//!   └─ tick_interval (loader animation)            │
//!        └── cmd_tx ─────────────>─────────────────┘
//! ```
//!
//! The controller task owns the `ChatController` (and with it the
//! conversation store); store changes flow back as `UiUpdate::Conversation`
//! snapshots so the view is a pure projection of controller state.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use murmur_application::{AnswerGateway, ChatController};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::event::{UiCommand, UiUpdate};
use super::state::UiState;
use super::view;

/// Loader animation cadence.
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// One resolved iteration of the event loop.
enum Step {
    Terminal(Event),
    Update(UiUpdate),
    Tick,
    Closed,
}

/// Main TUI application
pub struct ChatApp {
    cmd_tx: mpsc::UnboundedSender<UiCommand>,
    update_rx: mpsc::UnboundedReceiver<UiUpdate>,
    state: UiState,
    cancel: CancellationToken,
    _controller_handle: tokio::task::JoinHandle<()>,
}

impl ChatApp {
    /// Create the TUI wired to a controller, which moves into its own task.
    pub fn new<G: AnswerGateway + 'static>(
        mut controller: ChatController<G>,
        show_sender_labels: bool,
        max_input_len: usize,
        cancel: CancellationToken,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
        let (update_tx, update_rx) = mpsc::unbounded_channel::<UiUpdate>();

        // Every store mutation refreshes the display and re-pins the view
        // to the bottom of the conversation.
        let store_tx = update_tx.clone();
        controller.store_mut().subscribe(move |records, _change| {
            let _ = store_tx.send(UiUpdate::Conversation(records.to_vec()));
            let _ = store_tx.send(UiUpdate::ScrollToBottom);
        });

        let controller_handle =
            tokio::spawn(controller_task(controller, cmd_rx, update_tx, cancel.clone()));

        Self {
            cmd_tx,
            update_rx,
            state: UiState::new(show_sender_labels, max_input_len),
            cancel,
            _controller_handle: controller_handle,
        }
    }

    /// Run the TUI until the user quits.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK_INTERVAL);

        loop {
            terminal.draw(|frame| view::render(frame, &mut self.state))?;

            // Resolve the select into a plain value first so the branch
            // futures are dropped before any state mutation.
            let step = tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => Step::Terminal(event),
                    Some(Err(e)) => return Err(e),
                    None => Step::Closed,
                },

                maybe_update = self.update_rx.recv() => match maybe_update {
                    Some(update) => Step::Update(update),
                    None => Step::Closed,
                },

                _ = tick.tick() => Step::Tick,
            };

            match step {
                Step::Terminal(event) => self.handle_terminal_event(event),
                Step::Update(update) => self.state.apply(update),
                Step::Tick => self.state.tick(),
                Step::Closed => break,
            }

            if self.state.should_quit {
                break;
            }
        }

        // Tears down an in-flight exchange and stops the controller task.
        self.cancel.cancel();
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Release {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.state.should_quit = true,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.state.should_quit = true,

            (KeyCode::Enter, _) => self.submit(),

            // -- Scrolling (always available) --
            (KeyCode::Up, _) => self.state.scroll_up(1),
            (KeyCode::Down, _) => self.state.scroll_down(1),
            (KeyCode::PageUp, _) => self.state.page_up(),
            (KeyCode::PageDown, _) => self.state.page_down(),
            (KeyCode::End, _) => self.state.scroll_to_bottom(),

            // -- Input editing (ignored while streaming) --
            (KeyCode::Backspace, _) if !self.state.streaming => self.state.delete_char(),
            (KeyCode::Left, _) if !self.state.streaming => self.state.move_cursor_left(),
            (KeyCode::Right, _) if !self.state.streaming => self.state.move_cursor_right(),
            (KeyCode::Char(c), modifiers)
                if !self.state.streaming && !modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.state.insert_char(c)
            }

            _ => {}
        }
    }

    fn submit(&mut self) {
        if !self.state.can_submit() {
            return;
        }
        // Lock immediately; StreamEnded from the controller unlocks.
        self.state.streaming = true;
        let text = self.state.take_input();
        let _ = self.cmd_tx.send(UiCommand::Submit(text));
    }
}

/// Actor loop owning the controller; processes one exchange at a time so
/// chunks are folded into the store strictly in arrival order.
async fn controller_task<G: AnswerGateway + 'static>(
    mut controller: ChatController<G>,
    mut cmd_rx: mpsc::UnboundedReceiver<UiCommand>,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
    cancel: CancellationToken,
) {
    while let Some(command) = cmd_rx.recv().await {
        match command {
            UiCommand::Submit(text) => {
                let _ = update_tx.send(UiUpdate::StreamStarted);
                if let Err(e) = controller.send(&text, &cancel).await {
                    // The UI guards submissions, so this only fires if the
                    // two get out of sync.
                    warn!(error = %e, "submission rejected");
                }
                let _ = update_tx.send(UiUpdate::StreamEnded);
                if cancel.is_cancelled() {
                    break;
                }
            }
        }
    }
}
