use crate::dictionary::character::{CharInfo, CharProperty};
use crate::utils::FromU32;

/// Input text indexed by Unicode scalar values.
///
/// One position is one `char`, so a surrogate pair is never split.
#[derive(Default, Clone, Debug)]
pub struct Sentence {
    input: String,
    chars: Vec<char>,
    c2b: Vec<usize>,
    cinfos: Vec<CharInfo>,
    groupable: Vec<usize>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.input.clear();
        self.chars.clear();
        self.c2b.clear();
        self.cinfos.clear();
        self.groupable.clear();
    }

    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        self.input.push_str(input.as_ref());
    }

    /// Sets the input given as UTF-16 code units.
    /// A lone surrogate is replaced with U+FFFD.
    pub fn set_sentence_utf16(&mut self, input: &[u16]) {
        self.clear();
        self.input.extend(
            char::decode_utf16(input.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
        );
    }

    pub fn compile(&mut self, char_prop: &CharProperty) {
        self.compute_basic();
        self.compute_categories(char_prop);
        self.compute_groupable();
    }

    fn compute_basic(&mut self) {
        for (bi, ch) in self.input.char_indices() {
            self.chars.push(ch);
            self.c2b.push(bi);
        }
        self.c2b.push(self.input.len());
    }

    fn compute_categories(&mut self, char_prop: &CharProperty) {
        self.cinfos.reserve(self.chars.len());
        for &c in &self.chars {
            self.cinfos.push(char_prop.char_info(c));
        }
    }

    fn compute_groupable(&mut self) {
        debug_assert_eq!(self.chars.len(), self.cinfos.len());

        self.groupable.resize(self.chars.len(), 1);
        // runs[c] is the number of consecutive characters of category c from i.
        let mut runs = [0; u32::BITS as usize];
        for (i, cinfo) in self.cinfos.iter().enumerate().rev() {
            let cate_idset = cinfo.cate_idset();
            for (cate_id, run) in runs.iter_mut().enumerate() {
                *run = if cate_idset & (1 << cate_id) != 0 {
                    *run + 1
                } else {
                    0
                };
            }
            let base_id = usize::from_u32(cinfo.base_id());
            self.groupable[i] = runs.get(base_id).copied().unwrap_or(1).max(1);
        }
    }

    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }

    #[inline(always)]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.chars.len()
    }

    #[inline(always)]
    pub fn byte_position(&self, pos_char: usize) -> usize {
        self.c2b[pos_char]
    }

    #[inline(always)]
    pub fn char_info(&self, pos_char: usize) -> CharInfo {
        self.cinfos[pos_char]
    }

    /// Gets the number of characters from `pos_char` that share a category
    /// with their neighbors.
    #[inline(always)]
    pub fn groupable(&self, pos_char: usize) -> usize {
        self.groupable[pos_char]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_prop() -> CharProperty {
        let char_def = "DEFAULT 0 1 0\nHIRAGANA 0 1 2\nKATAKANA 1 1 2\n\
                        0x3041..0x309F HIRAGANA\n0x30A1..0x30FF KATAKANA\n0x30FC KATAKANA HIRAGANA";
        CharProperty::from_reader(char_def.as_bytes()).unwrap()
    }

    #[test]
    fn test_sentence() {
        let mut sent = Sentence::new();
        sent.set_sentence("自然");
        sent.compute_basic();
        assert_eq!(sent.chars(), &['自', '然']);
        assert_eq!(sent.byte_position(0), 0);
        assert_eq!(sent.byte_position(1), 3);
        assert_eq!(sent.byte_position(2), 6);
    }

    #[test]
    fn test_surrogate_pair() {
        let mut sent = Sentence::new();
        sent.set_sentence("a😀b");
        sent.compile(&char_prop());
        assert_eq!(sent.len_char(), 3);
        assert_eq!(sent.chars()[1], '😀');
        assert_eq!(sent.byte_position(2), 5);
    }

    #[test]
    fn test_utf16() {
        let units: Vec<u16> = "すもも😀".encode_utf16().collect();
        let mut sent = Sentence::new();
        sent.set_sentence_utf16(&units);
        sent.compile(&char_prop());
        assert_eq!(sent.raw(), "すもも😀");
        assert_eq!(sent.len_char(), 4);
    }

    #[test]
    fn test_lone_surrogate() {
        let units = [0x3059, 0xD83D, 0x3082];
        let mut sent = Sentence::new();
        sent.set_sentence_utf16(&units);
        sent.compile(&char_prop());
        assert_eq!(sent.chars(), &['す', '\u{FFFD}', 'も']);
    }

    #[test]
    fn test_groupable() {
        let mut sent = Sentence::new();
        sent.set_sentence("すもモモーa");
        sent.compile(&char_prop());
        assert_eq!(sent.groupable(0), 2);
        assert_eq!(sent.groupable(1), 1);
        assert_eq!(sent.groupable(2), 3);
        assert_eq!(sent.groupable(3), 2);
        assert_eq!(sent.groupable(4), 1);
        assert_eq!(sent.groupable(5), 1);
    }

    #[test]
    fn test_groupable_stops_at_category_change() {
        let mut sent = Sentence::new();
        // ー is KATAKANA and HIRAGANA.
        sent.set_sentence("スーパーは");
        sent.compile(&char_prop());
        let runs: Vec<_> = (0..sent.len_char()).map(|i| sent.groupable(i)).collect();
        assert_eq!(runs, vec![4, 3, 2, 1, 1]);

        sent.set_sentence("はーい");
        sent.compile(&char_prop());
        let runs: Vec<_> = (0..sent.len_char()).map(|i| sent.groupable(i)).collect();
        assert_eq!(runs, vec![3, 1, 1]);
    }

    #[test]
    fn test_empty() {
        let mut sent = Sentence::new();
        sent.set_sentence("");
        sent.compile(&char_prop());
        assert_eq!(sent.len_char(), 0);
        assert_eq!(sent.byte_position(0), 0);
    }
}
