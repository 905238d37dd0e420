use api_types::transaction::TransactionId;

use crate::{Command, LabelService, Message, TransactionSource, ViewState};

/// Calls the label service and wraps the outcome as a [`Message::LabelSaved`].
pub async fn save_label<L>(
    labels: &L,
    generation: u64,
    transaction_id: TransactionId,
    label: String,
) -> Message
where
    L: LabelService,
{
    let outcome = labels
        .set_label(transaction_id, &label)
        .await
        .map_err(|err| err.to_string());
    Message::LabelSaved {
        generation,
        transaction_id,
        label,
        outcome,
    }
}

/// Runs one command. Fetches report back through the source, label
/// updates return their completion message.
pub async fn execute<S, L>(command: Command, source: &S, labels: &L) -> Option<Message>
where
    S: TransactionSource + ?Sized,
    L: LabelService,
{
    match command {
        Command::Fetch { user } => {
            source.fetch(user);
            None
        }
        Command::UpdateLabel {
            generation,
            transaction_id,
            label,
        } => Some(save_label(labels, generation, transaction_id, label).await),
    }
}

/// Feeds `message` through the state and runs the resulting commands in
/// order until nothing is left.
///
/// Each command is awaited before the next one starts, so this is meant for
/// embedders without their own runtime loop.
pub async fn dispatch<S, L>(state: &mut ViewState, message: Message, source: &S, labels: &L)
where
    S: TransactionSource + ?Sized,
    L: LabelService,
{
    let mut pending = vec![message];
    while let Some(message) = pending.pop() {
        for command in state.update(message, source) {
            if let Some(next) = execute(command, source, labels).await {
                pending.push(next);
            }
        }
    }
}
