pub mod display;
pub mod history;
pub mod interchange;
pub mod sentinel;

pub use display::to_display_tsv;
pub use history::{to_history_record, HISTORY_RECORD_COLUMNS};
pub use interchange::{from_json, to_json};
