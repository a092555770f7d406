pub mod forms;
pub mod help;
pub mod modal;
pub mod pricing;
pub mod show;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::pricing_service::Calculator;
use crate::ui::{DealBoard, ModalSet};
use crate::utils::{SiteError, SiteResult};

/// Everything the interaction handlers read or write
///
/// The deal board is shared with the ticker; the calculator and modals
/// belong to the event loop alone.
pub struct SiteContext {
    pub board: Arc<DealBoard>,
    pub calculator: Calculator,
    pub modals: ModalSet,
}

impl SiteContext {
    pub fn new(board: Arc<DealBoard>, calculator: Calculator) -> Self {
        Self {
            board,
            calculator,
            modals: ModalSet::new(),
        }
    }
}

/// Route one interaction event to its handler
///
/// Returns `None` for blank lines and unknown commands.
pub fn dispatch(ctx: &mut SiteContext, line: &str) -> Option<SiteResult<String>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (&command, args) = parts.split_first()?;

    let result = match command {
        "$open" => modal::open(ctx, args),
        "$close" => modal::close(ctx, args),
        "$click" => modal::click(ctx, args),
        "$key" => modal::key(ctx, args),
        "$switch" => modal::switch(ctx, args),
        "$plan" | "$buy_plan" => pricing::select_plan(ctx, args),
        "$period" => pricing::card_period(ctx, args),
        "$summary_period" | "$sp" => pricing::summary_period(ctx, args),
        "$buy" | "$purchase" => pricing::purchase(ctx, args),
        "$subscribe" | "$cta" => forms::subscribe(args),
        "$try" | "$try_free" => forms::try_free(ctx, args),
        "$login" => forms::login(ctx, args),
        "$register" => forms::register(ctx, args),
        "$show" | "$page" => show::execute(ctx, args),
        "$help" => Ok(help::execute()),
        _ => {
            debug!("Ignoring unknown command {}", command);
            return None;
        }
    };

    Some(result)
}

/// Dispatch a line and turn the outcome into what the visitor sees
pub fn handle_event(ctx: &mut SiteContext, line: &str) -> Option<String> {
    let command = line.split_whitespace().next().unwrap_or_default().to_string();

    match dispatch(ctx, line)? {
        Ok(output) => Some(output),
        Err(e) => {
            if !e.is_validation() {
                warn!("Command {} failed: {}", command, e);
            }
            Some(user_message(&e))
        }
    }
}

/// Blocking notification text for a failed action
fn user_message(e: &SiteError) -> String {
    match e {
        SiteError::Feed(_) => "⚠️ Prices are temporarily unavailable. Please try again.".to_string(),
        other => format!("❌ {}", other),
    }
}
