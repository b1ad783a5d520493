mod builder;
mod feature;
mod map;
mod param;

use bincode::{Decode, Encode};

use crate::dictionary::connector::Connector;
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::{LexType, WordSource};
use crate::utils::FromU32;
use feature::WordFeatures;
use map::WordMap;
use param::WordParams;

pub use param::WordParam;

/// Lexicon of known words.
#[derive(Decode, Encode)]
pub struct Lexicon {
    map: WordMap,
    params: WordParams,
    features: WordFeatures,
    lex_type: LexType,
}

impl Lexicon {
    /// Finds all words that start at the head of `input`, shorter ones first.
    /// Homographs are yielded in the word id order.
    #[inline(always)]
    pub(crate) fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = LexMatch> + 'a {
        self.map
            .common_prefix_iterator(input)
            .map(move |(word_id, end_char)| {
                LexMatch::new(
                    WordIdx::new(self.lex_type, word_id),
                    self.params.get(usize::from_u32(word_id)),
                    end_char,
                )
            })
    }

    /// Finds the words registered with `surface`.
    #[inline(always)]
    pub(crate) fn exact_match<'a>(&'a self, surface: &str) -> impl Iterator<Item = WordIdx> + 'a {
        self.map
            .exact_match(surface)
            .map(move |word_id| WordIdx::new(self.lex_type, word_id))
    }

    /// Checks if all connection ids are within the connector.
    pub(crate) fn verify<C>(&self, conn: &C) -> bool
    where
        C: Connector,
    {
        self.params.iter().all(|p| {
            usize::from(p.left_id) < conn.num_left() && usize::from(p.right_id) < conn.num_right()
        })
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.params.len()
    }
}

impl WordSource for Lexicon {
    #[inline(always)]
    fn word_param(&self, word_idx: WordIdx) -> WordParam {
        debug_assert_eq!(word_idx.lex_type, self.lex_type);
        self.params.get(usize::from_u32(word_idx.word_id))
    }

    #[inline(always)]
    fn word_feature(&self, word_idx: WordIdx) -> &str {
        debug_assert_eq!(word_idx.lex_type, self.lex_type);
        self.features.get(usize::from_u32(word_idx.word_id))
    }
}

#[derive(Eq, PartialEq, Debug)]
pub struct LexMatch {
    word_idx: WordIdx,
    word_param: WordParam,
    end_char: usize,
}

impl LexMatch {
    #[inline(always)]
    pub const fn new(word_idx: WordIdx, word_param: WordParam, end_char: usize) -> Self {
        Self {
            word_idx,
            word_param,
            end_char,
        }
    }

    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        self.word_idx
    }

    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        self.word_param
    }
}

/// A row of a lexicon file before it is compiled.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RawWordEntry {
    pub surface: String,
    pub param: WordParam,
    pub feature: String,
}
