//! Two-state modal windows
//!
//! Every modal is either closed or open. Opening is always explicit; closing
//! happens through the close button, a backdrop click, or Escape.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::utils::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    MobileMenu,
    Login,
    Register,
    Purchase,
}

impl ModalKind {
    pub const ALL: [ModalKind; 4] = [
        ModalKind::MobileMenu,
        ModalKind::Login,
        ModalKind::Register,
        ModalKind::Purchase,
    ];

    /// Whether any way of closing this modal clears its form fields
    ///
    /// The purchase form is only cleared by a confirmed purchase, see
    /// `Calculator::submit_purchase`.
    pub fn clears_form_on_close(&self) -> bool {
        matches!(self, ModalKind::Login | ModalKind::Register)
    }
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModalKind::MobileMenu => "menu",
            ModalKind::Login => "login",
            ModalKind::Register => "register",
            ModalKind::Purchase => "purchase",
        };
        f.write_str(name)
    }
}

impl FromStr for ModalKind {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "menu" | "mobile" => Ok(ModalKind::MobileMenu),
            "login" => Ok(ModalKind::Login),
            "register" => Ok(ModalKind::Register),
            "purchase" | "summary" => Ok(ModalKind::Purchase),
            _ => Err(SiteError::UnknownModal(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Where a click inside a modal container landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

impl FromStr for ClickTarget {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backdrop" | "outside" => Ok(ClickTarget::Backdrop),
            "content" | "inside" => Ok(ClickTarget::Content),
            _ => Err(SiteError::Usage("$click <modal> backdrop|content")),
        }
    }
}

/// Result of a close request
///
/// Credentials are passed with each `$login`/`$register` command and are
/// never stored, so `form_reset` only reports what the page would clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed {
    pub kind: ModalKind,
    pub form_reset: bool,
}

/// All modals on the page
#[derive(Debug, Clone)]
pub struct ModalSet {
    states: [(ModalKind, ModalState); 4],
}

impl ModalSet {
    pub fn new() -> Self {
        Self {
            states: ModalKind::ALL.map(|kind| (kind, ModalState::Closed)),
        }
    }

    pub fn state(&self, kind: ModalKind) -> ModalState {
        self.states
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, state)| *state)
            .unwrap_or(ModalState::Closed)
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.state(kind) == ModalState::Open
    }

    /// Page scrolling is locked while any modal is open
    pub fn scroll_locked(&self) -> bool {
        self.states.iter().any(|(_, state)| *state == ModalState::Open)
    }

    pub fn open_modals(&self) -> Vec<ModalKind> {
        self.states
            .iter()
            .filter(|(_, state)| *state == ModalState::Open)
            .map(|(kind, _)| *kind)
            .collect()
    }

    fn set(&mut self, kind: ModalKind, state: ModalState) {
        if let Some(entry) = self.states.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = state;
        }
    }

    pub fn open(&mut self, kind: ModalKind) {
        debug!("Opening {} modal", kind);
        self.set(kind, ModalState::Open);
    }

    /// Close a modal; returns `None` if it was already closed
    pub fn close(&mut self, kind: ModalKind) -> Option<Closed> {
        if !self.is_open(kind) {
            return None;
        }
        debug!("Closing {} modal", kind);
        self.set(kind, ModalState::Closed);
        Some(Closed {
            kind,
            form_reset: kind.clears_form_on_close(),
        })
    }

    /// Backdrop clicks close, clicks on the content never do
    pub fn click(&mut self, kind: ModalKind, target: ClickTarget) -> Option<Closed> {
        match target {
            ClickTarget::Backdrop => self.close(kind),
            ClickTarget::Content => None,
        }
    }

    /// Escape closes every open modal
    pub fn escape(&mut self) -> Vec<Closed> {
        ModalKind::ALL
            .into_iter()
            .filter_map(|kind| self.close(kind))
            .collect()
    }

    /// Close whatever is open and show `kind` instead
    ///
    /// Used by the login/register switch links and the mobile menu buttons.
    pub fn switch_to(&mut self, kind: ModalKind) -> Vec<Closed> {
        let closed = ModalKind::ALL
            .into_iter()
            .filter(|k| *k != kind)
            .filter_map(|k| self.close(k))
            .collect();
        self.open(kind);
        closed
    }
}

impl Default for ModalSet {
    fn default() -> Self {
        Self::new()
    }
}
