//! Line rendering. There is exactly one on-disk layout, so this is a pair of
//! functions rather than a template engine.

mod line;

pub use line::{HEADER_LEN, MIN_CAPACITY, TIMESTAMP_FORMAT, render_line, render_str};
