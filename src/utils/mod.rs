pub mod table;
pub mod errors;
pub mod validation;

pub use table::Table;
pub use errors::{SiteError, SiteResult};
pub use validation::is_valid_email;

/// Format a whole-dollar amount the way price labels show it
pub fn format_usd(amount: u32) -> String {
    format!("${}", amount)
}
