//! Container of resultant tokens.
use std::ops::Range;

use crate::common::BOS_EOS_CONNECTION_ID;
use crate::dictionary::WordIdx;
use crate::tokenizer::lattice::Node;
use crate::tokenizer::worker::Worker;
use crate::utils;

/// Kind of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordType {
    /// Beginning of a sentence.
    Bos,
    /// End of a sentence.
    Eos,
    /// Word registered in the lexicon.
    Known,
    /// Word generated from the character categories.
    Unknown,
}

/// Resultant token.
pub struct Token<'a> {
    worker: &'a Worker<'a>,
    index: usize,
}

impl<'a> Token<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker, index: usize) -> Self {
        Self { worker, index }
    }

    #[inline(always)]
    fn node(&self) -> &'a Node {
        self.worker.lattice.get(self.worker.top_nodes[self.index])
    }

    /// Gets the position range of the token in characters.
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.node().range_char()
    }

    /// Gets the position range of the token in bytes.
    #[inline(always)]
    pub fn range_byte(&self) -> Range<usize> {
        let sent = &self.worker.sent;
        let node = self.node();
        sent.byte_position(node.start_char())..sent.byte_position(node.end_char())
    }

    /// Gets the 1-origin position of the first character of the token.
    #[inline(always)]
    pub fn word_position(&self) -> usize {
        self.node().start_char() + 1
    }

    /// Gets the surface string of the token.
    #[inline(always)]
    pub fn surface(&self) -> &'a str {
        let sent = &self.worker.sent;
        &sent.raw()[self.range_byte()]
    }

    /// Gets the kind of the token.
    #[inline(always)]
    pub fn word_type(&self) -> WordType {
        self.node().word_type()
    }

    /// Gets the word id of the token.
    /// Ids of known and unknown words are numbered separately.
    #[inline(always)]
    pub fn word_id(&self) -> u32 {
        self.node().word_id()
    }

    /// Gets the identifier of the word in the dictionary.
    #[inline(always)]
    pub fn word_idx(&self) -> WordIdx {
        self.node().word_idx().unwrap_or_default()
    }

    /// Gets the feature string of the token.
    #[inline(always)]
    pub fn feature(&self) -> &'a str {
        self.node().word_idx().map_or("", |word_idx| {
            self.worker.tokenizer.dictionary().word_feature(word_idx)
        })
    }

    /// Gets the columns of the feature string.
    pub fn features(&self) -> Vec<String> {
        utils::parse_csv_row(self.feature())
    }

    /// Gets the left id of the token's node.
    #[inline(always)]
    pub fn left_id(&self) -> u16 {
        self.node().left_id().unwrap_or(BOS_EOS_CONNECTION_ID)
    }

    /// Gets the right id of the token's node.
    #[inline(always)]
    pub fn right_id(&self) -> u16 {
        self.node().right_id().unwrap_or(BOS_EOS_CONNECTION_ID)
    }

    /// Gets the word cost of the token's node.
    #[inline(always)]
    pub fn word_cost(&self) -> i16 {
        self.node().word_cost()
    }

    /// Gets the total cost from BOS to the token's node.
    #[inline(always)]
    pub fn total_cost(&self) -> i64 {
        self.node().shortest_cost
    }
}

impl<'a> std::fmt::Debug for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("surface", &self.surface())
            .field("range_char", &self.range_char())
            .field("range_byte", &self.range_byte())
            .field("word_type", &self.word_type())
            .field("feature", &self.feature())
            .field("total_cost", &self.total_cost())
            .finish()
    }
}

/// Iterator of tokens.
pub struct TokenIter<'a> {
    worker: &'a Worker<'a>,
    i: usize,
}

impl<'a> TokenIter<'a> {
    #[inline(always)]
    pub(crate) const fn new(worker: &'a Worker, i: usize) -> Self {
        Self { worker, i }
    }
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = Token<'a>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.i < self.worker.num_tokens() {
            let t = self.worker.token(self.i);
            self.i += 1;
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dictionary::*;
    use crate::token::WordType;
    use crate::tokenizer::*;

    #[test]
    fn test_iter() {
        let lexicon_csv = "自然,0,0,1,sizen
言語,0,0,4,gengo
処理,0,0,3,shori
自然言語,0,0,6,sizengengo
言語処理,0,0,5,gengoshori";
        let matrix_def = "1 1\n0 0 0";
        let char_def = "DEFAULT 0 1 0";
        let unk_def = "DEFAULT,0,0,100,*";

        let dict = SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap();

        let tokenizer = Tokenizer::new(dict);
        let mut worker = tokenizer.new_worker();

        worker.reset_sentence("自然言語処理");
        worker.tokenize().unwrap();
        assert_eq!(worker.num_tokens(), 2);

        let mut it = worker.token_iter();
        for i in 0..worker.num_tokens() {
            let lhs = worker.token(i);
            let rhs = it.next().unwrap();
            assert_eq!(lhs.surface(), rhs.surface());
        }
        assert!(it.next().is_none());
    }

    #[test]
    fn test_token_fields() {
        let lexicon_csv = "自然,1,2,1,名詞,形容動詞語幹\n言語処理,2,1,5,\"名詞,複合\",一般";
        let matrix_def = "3 3\n0 1 0\n2 2 7\n1 0 0";
        let char_def = "DEFAULT 0 1 0";
        let unk_def = "DEFAULT,0,0,100,*";

        let dict = SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap();

        let tokenizer = Tokenizer::new(dict);
        let mut worker = tokenizer.new_worker();
        worker.reset_sentence("自然言語処理");
        worker.tokenize().unwrap();
        assert_eq!(worker.num_tokens(), 2);

        let t = worker.token(1);
        assert_eq!(t.surface(), "言語処理");
        assert_eq!(t.word_position(), 3);
        assert_eq!(t.word_type(), WordType::Known);
        assert_eq!(t.word_id(), 1);
        assert_eq!(t.word_idx(), WordIdx::new(LexType::System, 1));
        assert_eq!(t.left_id(), 2);
        assert_eq!(t.right_id(), 1);
        assert_eq!(t.word_cost(), 5);
        assert_eq!(t.total_cost(), 1 + 7 + 5);
        assert_eq!(t.feature(), "\"名詞,複合\",一般");
        assert_eq!(t.features(), vec!["名詞,複合", "一般"]);
    }
}
