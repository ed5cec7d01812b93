mod dense_block;

pub use dense_block::*;
