use bincode::{
    de::Decoder,
    enc::Encoder,
    error::{DecodeError, EncodeError},
    Decode, Encode,
};

use crate::errors::{Result, SumomoError};

pub struct Trie {
    da: crawdad::Trie,
}

impl Encode for Trie {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.da.serialize_to_vec(), encoder)?;
        Ok(())
    }
}

impl Decode for Trie {
    fn decode<D: Decoder>(decoder: &mut D) -> Result<Self, DecodeError> {
        let data: Vec<u8> = Decode::decode(decoder)?;
        let (da, _) = crawdad::Trie::deserialize_from_slice(&data);
        Ok(Self { da })
    }
}

bincode::impl_borrow_decode!(Trie);

impl Trie {
    /// Builds a trie from pairs of a key and its value.
    /// The records can be given in any order, but the keys must be unique.
    pub fn from_records<K>(records: &[(K, u32)]) -> Result<Self>
    where
        K: AsRef<str>,
    {
        let mut sorted: Vec<_> = records.iter().map(|(k, v)| (k.as_ref(), *v)).collect();
        sorted.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        Ok(Self {
            da: crawdad::Trie::from_records(sorted)
                .map_err(|e| SumomoError::invalid_argument("records", e.to_string()))?,
        })
    }

    /// Finds the value associated with `key`.
    #[inline(always)]
    pub fn exact_match(&self, key: &str) -> Option<u32> {
        self.da.exact_match(key.chars())
    }

    /// Finds all keys that are prefixes of `input`, shortest first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = TrieMatch> + 'a {
        self.da
            .common_prefix_search(input.iter().cloned())
            .map(move |(value, end_char)| TrieMatch::new(value, end_char))
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_char: usize,
}

impl TrieMatch {
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}
