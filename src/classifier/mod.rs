pub mod line;

pub use self::line::{classify, separator_count};
