mod builder;

use bincode::{Decode, Encode};

use crate::dictionary::character::CharInfo;
use crate::dictionary::connector::Connector;
use crate::dictionary::lexicon::WordParam;
use crate::dictionary::word_idx::WordIdx;
use crate::dictionary::{LexType, WordSource};
use crate::sentence::Sentence;
use crate::utils::FromU32;

#[derive(Default, Debug, Clone, PartialEq, Eq, Decode, Encode)]
pub struct UnkEntry {
    pub cate_id: u16,
    pub left_id: u16,
    pub right_id: u16,
    pub word_cost: i16,
    pub feature: String,
}

/// Candidate of an unknown word.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UnkWord {
    start_char: usize,
    end_char: usize,
    left_id: u16,
    right_id: u16,
    word_cost: i16,
    word_id: u32,
}

impl UnkWord {
    #[inline(always)]
    pub const fn start_char(&self) -> usize {
        self.start_char
    }

    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    #[inline(always)]
    pub const fn word_param(&self) -> WordParam {
        WordParam::new(self.left_id, self.right_id, self.word_cost)
    }

    #[inline(always)]
    pub const fn word_idx(&self) -> WordIdx {
        WordIdx::new(LexType::Unknown, self.word_id)
    }
}

/// Handler of unknown words.
///
/// Entries are sorted by category id, so the word ids of a category are contiguous.
#[derive(Decode, Encode)]
pub struct UnkHandler {
    offsets: Vec<u32>, // indexed by category id
    entries: Vec<UnkEntry>,
}

impl UnkHandler {
    /// Generates unknown words starting at `start_char`.
    ///
    /// Nothing is generated when a known word has matched and the category is not
    /// invoked. If the category groups, a candidate covering the run of characters
    /// in the category of the first one is generated, bounded by `max_grouping_len`.
    /// Candidates of `1..=LENGTH` characters are generated next. At least one
    /// candidate is always generated otherwise.
    pub(crate) fn gen_unk_words<F>(
        &self,
        sent: &Sentence,
        start_char: usize,
        mut has_matched: bool,
        max_grouping_len: Option<usize>,
        mut f: F,
    ) where
        F: FnMut(UnkWord),
    {
        let cinfo = sent.char_info(start_char);
        if has_matched && !cinfo.invoke() {
            return;
        }

        let groupable = sent.groupable(start_char);

        let mut grouped_len = 0;
        if cinfo.group() {
            grouped_len = max_grouping_len.map_or(groupable, |max_len| groupable.min(max_len));
            f = self.scan_entries(start_char, start_char + grouped_len, cinfo, f);
            has_matched = true;
        }

        for i in 1..=usize::from(cinfo.length()).min(groupable) {
            if i == grouped_len {
                continue;
            }
            f = self.scan_entries(start_char, start_char + i, cinfo, f);
            has_matched = true;
        }

        // Generates at least one unknown word.
        if !has_matched {
            self.scan_entries(start_char, start_char + 1, cinfo, f);
        }
    }

    #[inline(always)]
    fn scan_entries<F>(&self, start_char: usize, end_char: usize, cinfo: CharInfo, mut f: F) -> F
    where
        F: FnMut(UnkWord),
    {
        let cate_id = usize::from_u32(cinfo.base_id());
        let start = self.offsets[cate_id];
        let end = self.offsets[cate_id + 1];
        for word_id in start..end {
            let e = &self.entries[usize::from_u32(word_id)];
            f(UnkWord {
                start_char,
                end_char,
                left_id: e.left_id,
                right_id: e.right_id,
                word_cost: e.word_cost,
                word_id,
            });
        }
        f
    }

    /// Checks if all connection ids are within the connector.
    pub(crate) fn verify<C>(&self, conn: &C) -> bool
    where
        C: Connector,
    {
        self.entries.iter().all(|e| {
            usize::from(e.left_id) < conn.num_left() && usize::from(e.right_id) < conn.num_right()
        })
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl WordSource for UnkHandler {
    #[inline(always)]
    fn word_param(&self, word_idx: WordIdx) -> WordParam {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        let e = &self.entries[usize::from_u32(word_idx.word_id)];
        WordParam::new(e.left_id, e.right_id, e.word_cost)
    }

    #[inline(always)]
    fn word_feature(&self, word_idx: WordIdx) -> &str {
        debug_assert_eq!(word_idx.lex_type, LexType::Unknown);
        &self.entries[usize::from_u32(word_idx.word_id)].feature
    }
}
