pub mod display;
pub mod error;
pub mod page;
pub mod select;
pub mod types;

pub use error::{Error, LoadError};
pub use select::select;
pub use types::{Article, Query, SortOrder, SourceMode};

pub type Result<T> = std::result::Result<T, Error>;
