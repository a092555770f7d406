//! In-memory stand-ins for the page regions the handlers write to

pub mod deal_board;
pub mod modal;

pub use deal_board::DealBoard;
pub use modal::{ClickTarget, ModalKind, ModalSet};
