//! Viterbi-based tokenizer.
pub mod lattice;
pub(crate) mod viterbi;
pub mod worker;

use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::ipadic::IpadicToken;
use crate::sentence::Sentence;
use crate::tokenizer::lattice::{Lattice, Node, NodeRef};
use crate::tokenizer::worker::Worker;

/// Tokenizer.
pub struct Tokenizer {
    dict: Dictionary,
    max_grouping_len: Option<usize>,
}

impl Tokenizer {
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `dict`: Dictionary to be used.
    pub const fn new(dict: Dictionary) -> Self {
        Self {
            dict,
            max_grouping_len: None,
        }
    }

    /// Specifies the maximum grouping length for unknown words.
    /// By default, the length is infinity.
    ///
    /// This option is for compatibility with MeCab.
    /// Specifies the argument with `24` if you want to obtain the same results as MeCab.
    ///
    /// # Arguments
    ///
    ///  - `max_grouping_len`: The maximum grouping length for unknown words.
    ///    The default value is 0, indicating the infinity length.
    pub const fn max_grouping_len(mut self, max_grouping_len: usize) -> Self {
        if max_grouping_len != 0 {
            self.max_grouping_len = Some(max_grouping_len);
        } else {
            self.max_grouping_len = None;
        }
        self
    }

    /// Gets the reference to the dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Creates a new worker.
    pub fn new_worker(&self) -> Worker<'_> {
        Worker::new(self)
    }

    /// Tokenizes `text` into records in the IPADIC layout.
    /// An empty text results in no token.
    ///
    /// # Errors
    ///
    /// [`SumomoError`](crate::errors::SumomoError) is returned when a connection id
    /// is out of the matrix.
    pub fn tokenize(&self, text: &str) -> Result<Vec<IpadicToken>> {
        let mut worker = self.new_worker();
        worker.reset_sentence(text);
        worker.tokenize()?;
        let tokens = worker
            .token_iter()
            .map(|t| IpadicToken::from_token(&t))
            .collect();
        Ok(tokens)
    }

    /// Builds the closed lattice of `text`.
    pub fn build_lattice(&self, text: &str) -> Lattice {
        let mut sent = Sentence::new();
        sent.set_sentence(text);
        sent.compile(self.dict.char_prop());
        let mut lattice = Lattice::new();
        self.build_lattice_inner(&sent, &mut lattice);
        lattice
    }

    /// Searches the minimum-cost path of `lattice` with the connection costs
    /// of the dictionary.
    ///
    /// Returns the references to the nodes on the path, excluding BOS and EOS.
    /// The path is empty when EOS cannot be reached.
    ///
    /// # Errors
    ///
    /// [`SumomoError`](crate::errors::SumomoError) is returned when the lattice
    /// is not closed or a connection id is out of the matrix. The lattice is not
    /// modified in that case.
    pub fn search(&self, lattice: &mut Lattice) -> Result<Vec<NodeRef>> {
        viterbi::search(lattice, self.dict.connector())
    }

    pub(crate) fn build_lattice_inner(&self, sent: &Sentence, lattice: &mut Lattice) {
        lattice.reset(sent.len_char());

        for start_char in 0..sent.len_char() {
            // No path reaches the position.
            if !lattice.has_previous_node(start_char) {
                continue;
            }
            self.add_lattice_nodes(sent, lattice, start_char);
        }

        lattice.push_eos();
    }

    fn add_lattice_nodes(&self, sent: &Sentence, lattice: &mut Lattice, start_char: usize) {
        let mut has_matched = false;

        let suffix = &sent.chars()[start_char..];

        for m in self.dict.system_lexicon().common_prefix_iterator(suffix) {
            debug_assert!(start_char + m.end_char() <= sent.len_char());
            lattice.push_node(Node::from_word(
                m.word_idx(),
                start_char,
                start_char + m.end_char(),
                m.word_param(),
            ));
            has_matched = true;
        }

        self.dict.unk_handler().gen_unk_words(
            sent,
            start_char,
            has_matched,
            self.max_grouping_len,
            |w| {
                lattice.push_node(Node::from_word(
                    w.word_idx(),
                    w.start_char(),
                    w.end_char(),
                    w.word_param(),
                ));
            },
        );
    }
}
