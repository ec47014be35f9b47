pub mod consts;
pub mod files;
pub mod merge;

// re-exports
pub use files::*;
pub use merge::*;
