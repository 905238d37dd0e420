use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use view::{Command, Message, Pager, TransactionSource, ViewState};

use api_types::transaction::{Transaction, TransactionId};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    store::TransactionStore,
    ui::{self, keymap::AppAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    EditLabel,
    SwitchUser,
}

#[derive(Debug)]
pub struct AppState {
    pub view: ViewState,
    pub mode: Mode,
    /// Row index inside the visible window.
    pub selected: usize,
    /// Row the label editor was opened on, kept by id so refreshes that
    /// shift the window do not move the edit to another transaction.
    pub editing: Option<TransactionId>,
    /// Label being edited, or the user id being typed.
    pub input: String,
    pub prompt_error: Option<String>,
    pub base_url: String,
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Nothing,
    Quit,
    Dispatch(Message),
}

impl AppState {
    pub fn new(pager: Pager, base_url: String) -> Self {
        Self {
            view: ViewState::new(pager),
            mode: Mode::Browse,
            selected: 0,
            editing: None,
            input: String::new(),
            prompt_error: None,
            base_url,
        }
    }

    pub fn selected_row(&self) -> Option<&Transaction> {
        self.view.render_model().rows.get(self.selected)
    }

    pub fn is_text_entry(&self) -> bool {
        self.mode != Mode::Browse
    }

    pub fn open_user_prompt(&mut self) {
        self.mode = Mode::SwitchUser;
        self.input.clear();
        self.prompt_error = None;
    }

    pub fn on_action(&mut self, action: AppAction) -> Outcome {
        if action == AppAction::Quit {
            return Outcome::Quit;
        }
        match self.mode {
            Mode::Browse => self.on_browse(action),
            Mode::EditLabel => self.on_edit(action),
            Mode::SwitchUser => self.on_prompt(action),
        }
    }

    /// Keeps the selection inside the visible window.
    pub fn clamp_selection(&mut self) {
        let len = self.view.render_model().rows.len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn on_browse(&mut self, action: AppAction) -> Outcome {
        let model = self.view.render_model();
        let (page, can_go_previous, can_go_next) =
            (model.page, model.can_go_previous, model.can_go_next);
        let visible = model.rows.len();

        match action {
            AppAction::Up | AppAction::Input('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppAction::Down | AppAction::Input('j') => {
                if visible > 0 {
                    self.selected = (self.selected + 1).min(visible - 1);
                }
            }
            AppAction::Left | AppAction::Input('p') if can_go_previous => {
                self.selected = 0;
                return Outcome::Dispatch(Message::Paginate(page - 1));
            }
            AppAction::Right | AppAction::Input('n') if can_go_next => {
                self.selected = 0;
                return Outcome::Dispatch(Message::Paginate(page + 1));
            }
            AppAction::Submit | AppAction::Input('e') => {
                if let Some(tx) = self.selected_row() {
                    let (id, label) = (tx.id, tx.label.clone());
                    self.editing = Some(id);
                    self.input = label.unwrap_or_default();
                    self.mode = Mode::EditLabel;
                }
            }
            AppAction::Input('r') => return Outcome::Dispatch(Message::Refresh),
            AppAction::Input('u') => self.open_user_prompt(),
            AppAction::Cancel if self.view.edit_failure().is_some() => {
                return Outcome::Dispatch(Message::DismissEditFailure);
            }
            _ => {}
        }
        Outcome::Nothing
    }

    fn on_edit(&mut self, action: AppAction) -> Outcome {
        match action {
            AppAction::Input(ch) => self.input.push(ch),
            AppAction::Backspace => {
                self.input.pop();
            }
            AppAction::Cancel => {
                self.mode = Mode::Browse;
                self.editing = None;
                self.input.clear();
            }
            AppAction::Submit => {
                self.mode = Mode::Browse;
                let label = std::mem::take(&mut self.input);
                if let Some(transaction_id) = self.editing.take() {
                    return Outcome::Dispatch(Message::LabelEdited {
                        transaction_id,
                        label,
                    });
                }
            }
            _ => {}
        }
        Outcome::Nothing
    }

    fn on_prompt(&mut self, action: AppAction) -> Outcome {
        match action {
            AppAction::Input(ch) if ch.is_ascii_digit() => {
                self.input.push(ch);
                self.prompt_error = None;
            }
            AppAction::Input(_) => {
                self.prompt_error = Some("Digits only.".to_string());
            }
            AppAction::Backspace => {
                self.input.pop();
            }
            AppAction::Cancel => {
                self.mode = Mode::Browse;
                self.input.clear();
                self.prompt_error = None;
            }
            AppAction::Submit => match self.input.trim().parse::<u64>() {
                Ok(user) => {
                    self.mode = Mode::Browse;
                    self.input.clear();
                    self.selected = 0;
                    return Outcome::Dispatch(Message::UserChanged(user));
                }
                Err(_) => {
                    self.prompt_error = Some("Enter a numeric user id.".to_string());
                }
            },
            _ => {}
        }
        Outcome::Nothing
    }
}

pub struct App {
    client: Client,
    store: TransactionStore,
    events: UnboundedSender<Message>,
    inbox: UnboundedReceiver<Message>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let (events, inbox) = mpsc::unbounded_channel();
        let store = TransactionStore::new(client.clone(), events.clone());
        let state = AppState::new(Pager::new(config.page_size), config.base_url.clone());

        let mut app = Self {
            client,
            store,
            events,
            inbox,
            state,
            should_quit: false,
        };

        match config.user_id {
            Some(user) => app.dispatch(Message::UserChanged(user)),
            None => app.state.open_user_prompt(),
        }

        Ok(app)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.drain_inbox();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }

        Ok(())
    }

    fn drain_inbox(&mut self) {
        while let Ok(message) = self.inbox.try_recv() {
            self.dispatch(message);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let action = ui::keymap::map_key(key, self.state.is_text_entry());
        match self.state.on_action(action) {
            Outcome::Quit => self.should_quit = true,
            Outcome::Dispatch(message) => self.dispatch(message),
            Outcome::Nothing => {}
        }
    }

    fn dispatch(&mut self, message: Message) {
        for command in self.state.view.update(message, &self.store) {
            self.run_command(command);
        }
        self.state.clamp_selection();
    }

    fn run_command(&self, command: Command) {
        match command {
            Command::Fetch { user } => self.store.fetch(user),
            Command::UpdateLabel {
                generation,
                transaction_id,
                label,
            } => {
                let client = self.client.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let message = view::save_label(&client, generation, transaction_id, label).await;
                    if events.send(message).is_err() {
                        tracing::debug!(transaction_id, "view is gone, dropping label result");
                    }
                });
            }
        }
    }
}
