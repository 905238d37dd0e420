//! Presentation state for a single user's transaction list.
//!
//! The view is driven by [`Message`]s and answers with [`Command`]s:
//!
//! - [`Message::UserChanged`] asks for a fetch and projects anything the
//!   [`TransactionSource`] already holds.
//! - [`Message::DataChanged`] re-projects the source's entry for the current
//!   user into newest-first rows (see [`projector`]).
//! - [`Message::LabelEdited`] requests a remote update; rows only change
//!   when the matching [`Message::LabelSaved`] reports success
//!   (see [`reconciler`]).
//! - [`Message::Paginate`] moves the [`Pager`] window.
//!
//! Every user switch bumps a generation counter; label results from an older
//! generation are dropped.

mod execute;
pub mod pager;
pub mod projector;
pub mod reconciler;
mod source;
mod state;

pub use execute::{dispatch, execute, save_label};
pub use pager::{PAGE_SIZE, Pager, Window};
pub use reconciler::EditFailure;
pub use source::{LabelService, TransactionSource};
pub use state::{Command, Message, RenderModel, ViewState};
