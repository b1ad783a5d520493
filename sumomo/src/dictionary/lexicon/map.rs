pub mod posting;
pub mod trie;

use std::collections::BTreeMap;

use bincode::{Decode, Encode};

use crate::errors::Result;
use crate::utils::FromU32;
use posting::{Postings, PostingsBuilder};
use trie::Trie;

/// Mapping from surface strings to word ids.
///
/// The trie maps each distinct surface to the offset of its posting list,
/// which plays the role of the trie id.
#[derive(Decode, Encode)]
pub struct WordMap {
    trie: Trie,
    postings: Postings,
}

impl WordMap {
    pub fn new<I, W>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut b = WordMapBuilder::new();
        for (i, w) in words.into_iter().enumerate() {
            b.add_record(w.as_ref().to_owned(), u32::try_from(i)?);
        }
        b.build()
    }

    /// Gets the word ids registered with `surface`, in ascending order.
    #[inline(always)]
    pub fn exact_match<'a>(&'a self, surface: &str) -> impl Iterator<Item = u32> + 'a {
        self.trie
            .exact_match(surface)
            .into_iter()
            .flat_map(move |offset| self.postings.ids(usize::from_u32(offset)))
    }

    /// Gets pairs of a word id and its end position in characters
    /// for all words that are prefixes of `input`.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = (u32, usize)> + 'a {
        self.trie.common_prefix_iterator(input).flat_map(move |e| {
            self.postings
                .ids(usize::from_u32(e.value))
                .map(move |word_id| (word_id, e.end_char))
        })
    }
}

#[derive(Default)]
pub struct WordMapBuilder {
    map: BTreeMap<String, Vec<u32>>,
}

impl WordMapBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn add_record(&mut self, word: String, id: u32) {
        self.map.entry(word).or_default().push(id);
    }

    pub fn build(self) -> Result<WordMap> {
        let mut entries = vec![];
        let mut builder = PostingsBuilder::new();
        for (word, ids) in self.map {
            let offset = builder.push(&ids)?;
            entries.push((word, u32::try_from(offset)?));
        }
        Ok(WordMap {
            trie: Trie::from_records(&entries)?,
            postings: builder.build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homographs() {
        let map = WordMap::new(["の", "うち", "の", "のう"]).unwrap();
        assert_eq!(map.exact_match("の").collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(map.exact_match("うち").collect::<Vec<_>>(), vec![1]);
        assert_eq!(map.exact_match("のうち").count(), 0);

        let input: Vec<_> = "のうち".chars().collect();
        assert_eq!(
            map.common_prefix_iterator(&input).collect::<Vec<_>>(),
            vec![(0, 1), (2, 1), (3, 2)]
        );
    }
}
