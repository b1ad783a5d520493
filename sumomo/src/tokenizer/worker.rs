//! Provider of a routine for tokenization.
use crate::errors::Result;
use crate::sentence::Sentence;
use crate::token::{Token, TokenIter};
use crate::tokenizer::lattice::{Lattice, NodeRef};
use crate::tokenizer::Tokenizer;

/// Provider of a routine for tokenization.
///
/// It holds the internal data structures used in tokenization,
/// which can be reused to avoid unnecessary memory reallocation.
/// Create one worker per thread and share the [`Tokenizer`].
pub struct Worker<'t> {
    pub(crate) tokenizer: &'t Tokenizer,
    pub(crate) sent: Sentence,
    pub(crate) lattice: Lattice,
    pub(crate) top_nodes: Vec<NodeRef>,
}

impl<'t> Worker<'t> {
    /// Creates a new instance.
    pub(crate) fn new(tokenizer: &'t Tokenizer) -> Self {
        Self {
            tokenizer,
            sent: Sentence::new(),
            lattice: Lattice::new(),
            top_nodes: vec![],
        }
    }

    /// Resets the input sentence to be tokenized.
    pub fn reset_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.sent.set_sentence(input);
        self.sent.compile(self.tokenizer.dictionary().char_prop());
        self.top_nodes.clear();
    }

    /// Resets the input sentence given as UTF-16 code units.
    /// A lone surrogate is read as U+FFFD.
    pub fn reset_sentence_utf16(&mut self, input: &[u16]) {
        self.sent.set_sentence_utf16(input);
        self.sent.compile(self.tokenizer.dictionary().char_prop());
        self.top_nodes.clear();
    }

    /// Builds the lattice of the input sentence without searching it.
    pub fn build_lattice(&mut self) {
        self.tokenizer.build_lattice_inner(&self.sent, &mut self.lattice);
        self.top_nodes.clear();
    }

    /// Tokenizes the input sentence set in the state,
    /// and store the resultant tokens into the internal state.
    ///
    /// # Errors
    ///
    /// [`SumomoError`](crate::errors::SumomoError) is returned when a connection id
    /// is out of the matrix.
    pub fn tokenize(&mut self) -> Result<()> {
        self.build_lattice();
        self.top_nodes = self.tokenizer.search(&mut self.lattice)?;
        Ok(())
    }

    /// Gets the number of resultant tokens.
    #[inline(always)]
    pub fn num_tokens(&self) -> usize {
        self.top_nodes.len()
    }

    /// Gets the `i`-th resultant token.
    #[inline(always)]
    pub fn token<'w>(&'w self, i: usize) -> Token<'w> {
        Token::new(self, i)
    }

    /// Creates an iterator of resultant tokens.
    #[inline(always)]
    pub fn token_iter<'w>(&'w self) -> TokenIter<'w> {
        TokenIter::new(self, 0)
    }

    /// Gets the lattice built last.
    #[inline(always)]
    pub const fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}
