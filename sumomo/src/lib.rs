//! # Sumomo
//!
//! Sumomo is a Viterbi-based morphological analyzer for Japanese text,
//! working with dictionaries in the IPADIC format.
//!
//! ```
//! use sumomo::{SystemDictionaryBuilder, Tokenizer};
//!
//! let lexicon_csv = "京都,1,1,2135,名詞,固有名詞\n東京,1,1,3003,名詞,固有名詞";
//! let matrix_def = "2 2\n0 0 0\n0 1 0\n1 0 0\n1 1 100";
//! let char_def = "DEFAULT 0 1 0";
//! let unk_def = "DEFAULT,1,1,5000,記号,一般";
//!
//! let dict = SystemDictionaryBuilder::from_readers(
//!     lexicon_csv.as_bytes(),
//!     matrix_def.as_bytes(),
//!     char_def.as_bytes(),
//!     unk_def.as_bytes(),
//! )?;
//!
//! let tokenizer = Tokenizer::new(dict);
//! let tokens = tokenizer.tokenize("東京京都")?;
//! let surfaces: Vec<_> = tokens.iter().map(|t| t.surface_form.as_str()).collect();
//! assert_eq!(surfaces, ["東京", "京都"]);
//! # Ok::<(), sumomo::errors::SumomoError>(())
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod common;
pub mod dictionary;
pub mod errors;
pub mod ipadic;
mod sentence;
pub mod token;
pub mod tokenizer;
mod utils;


pub use dictionary::{Dictionary, SystemDictionaryBuilder};
pub use ipadic::IpadicToken;
pub use tokenizer::Tokenizer;
