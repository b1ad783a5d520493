//! Dictionary for tokenization.
pub(crate) mod builder;
pub(crate) mod character;
pub(crate) mod connector;
pub(crate) mod lexicon;
pub(crate) mod unknown;
pub(crate) mod word_idx;

use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::common;
use crate::errors::Result;
use character::CharProperty;
use connector::MatrixConnector;
use lexicon::Lexicon;
use unknown::UnkHandler;

pub use builder::SystemDictionaryBuilder;
pub use lexicon::WordParam;
pub use word_idx::WordIdx;

/// Type of a lexicon that contains the word.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Decode, Encode)]
#[repr(u8)]
pub enum LexType {
    /// System lexicon.
    System,
    /// Unknown words.
    Unknown,
}

impl Default for LexType {
    fn default() -> Self {
        Self::System
    }
}

/// Common access to the words stored in a lexicon.
pub(crate) trait WordSource {
    /// Gets the connection ids and the cost of the word.
    fn word_param(&self, word_idx: WordIdx) -> WordParam;

    /// Gets the feature string of the word.
    fn word_feature(&self, word_idx: WordIdx) -> &str;
}

/// Inner data of [`Dictionary`].
#[derive(Decode, Encode)]
struct DictionaryInner {
    system_lexicon: Lexicon,
    connector: MatrixConnector,
    char_prop: CharProperty,
    unk_handler: UnkHandler,
}

/// Dictionary for tokenization.
///
/// The data is immutable once built, so one instance can be shared by
/// tokenizations running on multiple threads.
pub struct Dictionary(DictionaryInner);

impl Dictionary {
    /// Gets the reference to the system lexicon.
    #[inline(always)]
    pub(crate) const fn system_lexicon(&self) -> &Lexicon {
        &self.0.system_lexicon
    }

    /// Gets the reference to the connection matrix.
    #[inline(always)]
    pub(crate) const fn connector(&self) -> &MatrixConnector {
        &self.0.connector
    }

    /// Gets the reference to the character property.
    #[inline(always)]
    pub(crate) const fn char_prop(&self) -> &CharProperty {
        &self.0.char_prop
    }

    /// Gets the reference to the handler of unknown words.
    #[inline(always)]
    pub(crate) const fn unk_handler(&self) -> &UnkHandler {
        &self.0.unk_handler
    }

    #[inline(always)]
    fn word_source(&self, lex_type: LexType) -> &dyn WordSource {
        match lex_type {
            LexType::System => self.system_lexicon(),
            LexType::Unknown => self.unk_handler(),
        }
    }

    /// Gets the feature string of the word, a comma-separated list of columns.
    ///
    /// # Panics
    ///
    /// It will panic if the word id is out of range.
    #[inline(always)]
    pub fn word_feature(&self, word_idx: WordIdx) -> &str {
        self.word_source(word_idx.lex_type).word_feature(word_idx)
    }

    /// Gets the connection ids and the cost of the word.
    ///
    /// # Panics
    ///
    /// It will panic if the word id is out of range.
    #[inline(always)]
    pub fn word_param(&self, word_idx: WordIdx) -> WordParam {
        self.word_source(word_idx.lex_type).word_param(word_idx)
    }

    /// Finds the known words whose surface is exactly `surface`.
    /// An empty vector is returned if there is no such word.
    pub fn lookup(&self, surface: &str) -> Vec<WordIdx> {
        if surface.is_empty() {
            return vec![];
        }
        self.system_lexicon().exact_match(surface).collect()
    }

    /// Gets the connection cost from a word with `right_id` to the following word
    /// with `left_id`.
    ///
    /// # Errors
    ///
    /// [`SumomoError`](crate::errors::SumomoError) is returned when either id
    /// is out of the matrix.
    pub fn connection_cost(&self, right_id: u16, left_id: u16) -> Result<i32> {
        self.connector().get(right_id, left_id)
    }

    /// Gets the names of the character categories of `c`, the primary one first.
    pub fn char_categories(&self, c: char) -> Vec<&str> {
        self.char_prop().char_categories(c)
    }

    /// Gets the number of known words.
    pub fn num_words(&self) -> usize {
        self.system_lexicon().len()
    }

    /// Gets the number of unknown word entries.
    pub fn num_unk_entries(&self) -> usize {
        self.unk_handler().len()
    }

    /// Exports the dictionary data.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn write<W>(&self, mut wtr: W) -> Result<usize>
    where
        W: Write,
    {
        let num_bytes =
            bincode::encode_into_std_write(&self.0, &mut wtr, common::bincode_config())?;
        Ok(num_bytes)
    }

    /// Creates a dictionary from a reader.
    ///
    /// # Errors
    ///
    /// When bincode generates an error, it will be returned as is.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let data = bincode::decode_from_std_read(&mut rdr, common::bincode_config())?;
        Ok(Self(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dictionary() -> Dictionary {
        let lexicon_csv = "東京,1,1,3003,名詞,固有名詞\n京都,1,1,2135,名詞,固有名詞\n東京,2,2,5000,名詞,一般";
        let matrix_def = "3 3\n0 0 0\n1 1 10\n2 2 20";
        let char_def = "DEFAULT 0 1 0\nKANJI 0 0 2\nKANJINUMERIC 1 1 0\n0x4E00..0x9FA5 KANJI\n0x4E00 KANJINUMERIC KANJI";
        let unk_def = "DEFAULT,0,0,100,記号\nKANJI,1,1,200,名詞\nKANJINUMERIC,2,2,50,名詞,数";
        SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let dict = toy_dictionary();
        assert_eq!(
            dict.lookup("東京"),
            vec![
                WordIdx::new(LexType::System, 0),
                WordIdx::new(LexType::System, 2)
            ]
        );
        assert_eq!(dict.lookup("京都"), vec![WordIdx::new(LexType::System, 1)]);
        assert!(dict.lookup("大阪").is_empty());
        assert!(dict.lookup("").is_empty());
    }

    #[test]
    fn test_word_feature() {
        let dict = toy_dictionary();
        assert_eq!(
            dict.word_feature(WordIdx::new(LexType::System, 2)),
            "名詞,一般"
        );
        assert_eq!(
            dict.word_feature(WordIdx::new(LexType::Unknown, 2)),
            "名詞,数"
        );
        assert_eq!(
            dict.word_param(WordIdx::new(LexType::System, 1)),
            WordParam::new(1, 1, 2135)
        );
        assert_eq!(
            dict.word_param(WordIdx::new(LexType::Unknown, 1)),
            WordParam::new(1, 1, 200)
        );
    }

    #[test]
    fn test_connection_cost() {
        let dict = toy_dictionary();
        assert_eq!(dict.connection_cost(1, 1).unwrap(), 10);
        assert_eq!(dict.connection_cost(0, 1).unwrap(), 0);
        assert!(dict.connection_cost(3, 0).is_err());
    }

    #[test]
    fn test_char_categories() {
        let dict = toy_dictionary();
        assert_eq!(dict.char_categories('一'), vec!["KANJINUMERIC", "KANJI"]);
        assert_eq!(dict.char_categories('京'), vec!["KANJI"]);
        assert_eq!(dict.char_categories('a'), vec!["DEFAULT"]);
    }

    #[test]
    fn test_read_write() {
        let dict = toy_dictionary();
        let mut data = vec![];
        let num_bytes = dict.write(&mut data).unwrap();
        assert_eq!(num_bytes, data.len());

        let other = Dictionary::read(data.as_slice()).unwrap();
        assert_eq!(other.lookup("東京"), dict.lookup("東京"));
        assert_eq!(other.num_words(), 3);
        assert_eq!(other.num_unk_entries(), 3);
        assert_eq!(
            other.word_feature(WordIdx::new(LexType::System, 0)),
            "名詞,固有名詞"
        );
        assert_eq!(other.char_categories('一'), vec!["KANJINUMERIC", "KANJI"]);
    }

    #[test]
    fn test_read_broken() {
        let data = [1u8, 2, 3];
        assert!(Dictionary::read(&data[..]).is_err());
    }
}
