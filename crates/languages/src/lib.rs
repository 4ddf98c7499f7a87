/// the token categories shared by all highlighters
pub mod token;
pub use token::{Category, Token};

/// the python tokenizer
pub mod python;

/// safe markup rendering of token streams
pub mod markup;
pub use markup::{escape, highlight, to_markup};
