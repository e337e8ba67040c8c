pub mod address;
pub mod errors;
pub mod page;
pub mod rpc_ratelimit;
pub mod table;
pub mod units;

pub use errors::extract_clean_error;
pub use page::Page;
pub use table::Table;
