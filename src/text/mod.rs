mod format;
mod normalizer;

pub use format::quoted_list;
pub use normalizer::{Normalized, Normalizer};
