pub mod guard;
pub mod header;
pub mod history;
pub mod login;
pub mod results;
pub mod stats;
pub mod upload_section;
pub mod utils;
