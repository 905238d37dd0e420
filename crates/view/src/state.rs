use api_types::{
    UserId,
    transaction::{Transaction, TransactionId},
};

use crate::{
    TransactionSource,
    pager::Pager,
    projector::{self, EMPTY_MESSAGE, Projection},
    reconciler::{self, EditFailure},
};

/// Everything that can happen to the view.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// The displayed user identity changed (or was set on mount).
    UserChanged(UserId),
    /// The source has new content for `user`.
    DataChanged(UserId),
    /// Re-request the current user's transactions.
    Refresh,
    Paginate(i64),
    /// The user committed a new label for a row.
    LabelEdited {
        transaction_id: TransactionId,
        label: String,
    },
    /// A label update finished remotely.
    LabelSaved {
        generation: u64,
        transaction_id: TransactionId,
        label: String,
        outcome: Result<(), String>,
    },
    DismissEditFailure,
}

/// Side effects requested by [`ViewState::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Fetch {
        user: UserId,
    },
    UpdateLabel {
        generation: u64,
        transaction_id: TransactionId,
        label: String,
    },
}

#[derive(Debug)]
pub struct ViewState {
    user: Option<UserId>,
    generation: u64,
    rows: Vec<Transaction>,
    is_loading: bool,
    error_message: Option<String>,
    pager: Pager,
    edit_failure: Option<EditFailure>,
}

/// What the rendering surface needs for one frame.
#[derive(Debug)]
pub struct RenderModel<'a> {
    pub user: Option<UserId>,
    /// Rows of the visible window.
    pub rows: &'a [Transaction],
    pub total: usize,
    pub page: i64,
    pub is_loading: bool,
    pub error_message: Option<&'a str>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub edit_failure: Option<&'a EditFailure>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Pager::default())
    }
}

impl ViewState {
    pub fn new(pager: Pager) -> Self {
        Self {
            user: None,
            generation: 0,
            rows: Vec::new(),
            is_loading: true,
            error_message: None,
            pager,
            edit_failure: None,
        }
    }

    pub fn user(&self) -> Option<UserId> {
        self.user
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All rows, newest first.
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn edit_failure(&self) -> Option<&EditFailure> {
        self.edit_failure.as_ref()
    }

    pub fn render_model(&self) -> RenderModel<'_> {
        let window = self.pager.window(&self.rows);
        RenderModel {
            user: self.user,
            rows: window.items,
            total: self.rows.len(),
            page: window.index,
            is_loading: self.is_loading,
            error_message: self.error_message(),
            can_go_previous: window.can_go_previous,
            can_go_next: window.can_go_next,
            edit_failure: self.edit_failure(),
        }
    }

    /// Applies `message` and returns the side effects to run.
    ///
    /// The source is only read, to project whatever it currently holds for
    /// the current user.
    pub fn update<S>(&mut self, message: Message, source: &S) -> Vec<Command>
    where
        S: TransactionSource + ?Sized,
    {
        match message {
            Message::UserChanged(user) => self.change_user(user, source),
            Message::DataChanged(user) => {
                if self.user == Some(user) {
                    self.project(source);
                } else {
                    tracing::debug!(user, current = ?self.user, "ignoring data for another user");
                }
                Vec::new()
            }
            Message::Refresh => self
                .user
                .map(|user| vec![Command::Fetch { user }])
                .unwrap_or_default(),
            Message::Paginate(index) => {
                self.pager.set_page(index);
                Vec::new()
            }
            Message::LabelEdited {
                transaction_id,
                label,
            } => {
                self.edit_failure = None;
                vec![Command::UpdateLabel {
                    generation: self.generation,
                    transaction_id,
                    label,
                }]
            }
            Message::LabelSaved {
                generation,
                transaction_id,
                label,
                outcome,
            } => {
                self.label_saved(generation, transaction_id, label, outcome);
                Vec::new()
            }
            Message::DismissEditFailure => {
                self.edit_failure = None;
                Vec::new()
            }
        }
    }

    fn change_user<S>(&mut self, user: UserId, source: &S) -> Vec<Command>
    where
        S: TransactionSource + ?Sized,
    {
        if self.user == Some(user) {
            return Vec::new();
        }

        // the page index survives user switches
        self.user = Some(user);
        self.generation += 1;
        self.rows.clear();
        self.is_loading = true;
        self.error_message = None;
        self.edit_failure = None;
        tracing::info!(user, generation = self.generation, "showing transactions");

        self.project(source);
        vec![Command::Fetch { user }]
    }

    fn project<S>(&mut self, source: &S)
    where
        S: TransactionSource + ?Sized,
    {
        let Some(user) = self.user else {
            return;
        };
        let candidate = source.observe(user);
        match projector::project(candidate.as_deref()) {
            Projection::Pending => {}
            Projection::Empty => {
                self.rows.clear();
                self.error_message = Some(EMPTY_MESSAGE.to_string());
                self.is_loading = false;
            }
            Projection::Sorted(rows) => {
                tracing::debug!(user, rows = rows.len(), "projected transactions");
                self.rows = rows;
                self.error_message = None;
                self.is_loading = false;
            }
        }
    }

    fn label_saved(
        &mut self,
        generation: u64,
        transaction_id: TransactionId,
        label: String,
        outcome: Result<(), String>,
    ) {
        if generation != self.generation {
            tracing::debug!(
                transaction_id,
                generation,
                current = self.generation,
                "discarding stale label update"
            );
            return;
        }

        match outcome {
            Ok(()) => {
                if !reconciler::apply_label(&mut self.rows, transaction_id, &label) {
                    tracing::debug!(transaction_id, "label saved for a row not on screen");
                }
                self.edit_failure = None;
            }
            Err(message) => {
                tracing::warn!(transaction_id, "error updating label: {message}");
                self.edit_failure = Some(EditFailure {
                    transaction_id,
                    message,
                });
            }
        }
    }
}
