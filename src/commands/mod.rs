pub mod fetch;
pub mod search;
pub mod summary;
pub mod utils;
pub mod version;
