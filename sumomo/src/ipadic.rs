//! Token records in the IPADIC feature layout.
use crate::token::{Token, WordType};

const UNDEFINED: &str = "*";

/// Owned token record whose features follow the IPADIC layout.
///
/// The feature columns of IPADIC are
/// `pos,pos_detail_1,pos_detail_2,pos_detail_3,conjugated_type,conjugated_form,basic_form,reading,pronunciation`,
/// where unknown words have no reading and pronunciation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpadicToken {
    /// Word id, numbered separately for known and unknown words.
    pub word_id: u32,

    /// Kind of the word.
    pub word_type: WordType,

    /// 1-origin position of the first character.
    pub word_position: usize,

    /// Surface string.
    pub surface_form: String,

    /// Part of speech.
    pub pos: String,

    /// First subdivision of the part of speech.
    pub pos_detail_1: String,

    /// Second subdivision of the part of speech.
    pub pos_detail_2: String,

    /// Third subdivision of the part of speech.
    pub pos_detail_3: String,

    /// Conjugated type.
    pub conjugated_type: String,

    /// Conjugated form.
    pub conjugated_form: String,

    /// Basic form.
    pub basic_form: String,

    /// Reading in katakana, available for known words.
    pub reading: Option<String>,

    /// Pronunciation in katakana, available for known words.
    pub pronunciation: Option<String>,
}

impl IpadicToken {
    /// Creates a record from a resultant token.
    pub fn from_token(token: &Token) -> Self {
        let features = token.features();
        let column = |i: usize| {
            features
                .get(i)
                .filter(|col| !col.is_empty())
                .map_or_else(|| UNDEFINED.to_string(), Clone::clone)
        };
        let is_known = token.word_type() == WordType::Known;

        Self {
            word_id: token.word_id(),
            word_type: token.word_type(),
            word_position: token.word_position(),
            surface_form: token.surface().to_string(),
            pos: column(0),
            pos_detail_1: column(1),
            pos_detail_2: column(2),
            pos_detail_3: column(3),
            conjugated_type: column(4),
            conjugated_form: column(5),
            basic_form: column(6),
            reading: is_known.then(|| column(7)),
            pronunciation: is_known.then(|| column(8)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::SystemDictionaryBuilder;
    use crate::tokenizer::Tokenizer;

    #[test]
    fn test_known_and_unknown() {
        let lexicon_csv = "東京,1,1,100,名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー\n\
                           行く,1,1,100,動詞,自立";
        let matrix_def = "2 2\n0 0 0\n0 1 0\n1 0 0\n1 1 0";
        let char_def = "DEFAULT 0 1 0\nSYMBOL 1 1 0\n0x0021..0x002F SYMBOL";
        let unk_def = "DEFAULT,1,1,500,記号,一般,*,*,*,*,*\nSYMBOL,1,1,300,記号,一般,*,*,*,*,*";
        let dict = SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap();
        let tokenizer = Tokenizer::new(dict);

        let tokens = tokenizer.tokenize("東京!行く").unwrap();
        assert_eq!(tokens.len(), 3);

        assert_eq!(
            tokens[0],
            IpadicToken {
                word_id: 0,
                word_type: WordType::Known,
                word_position: 1,
                surface_form: "東京".to_string(),
                pos: "名詞".to_string(),
                pos_detail_1: "固有名詞".to_string(),
                pos_detail_2: "地域".to_string(),
                pos_detail_3: "一般".to_string(),
                conjugated_type: "*".to_string(),
                conjugated_form: "*".to_string(),
                basic_form: "東京".to_string(),
                reading: Some("トウキョウ".to_string()),
                pronunciation: Some("トーキョー".to_string()),
            }
        );

        let t = &tokens[1];
        assert_eq!(t.word_type, WordType::Unknown);
        assert_eq!(t.word_id, 1);
        assert_eq!(t.word_position, 3);
        assert_eq!(t.surface_form, "!");
        assert_eq!(t.pos, "記号");
        assert_eq!(t.basic_form, "*");
        assert_eq!(t.reading, None);
        assert_eq!(t.pronunciation, None);

        // Missing columns are filled.
        let t = &tokens[2];
        assert_eq!(t.surface_form, "行く");
        assert_eq!(t.word_position, 4);
        assert_eq!(t.pos, "動詞");
        assert_eq!(t.pos_detail_1, "自立");
        assert_eq!(t.pos_detail_2, "*");
        assert_eq!(t.basic_form, "*");
        assert_eq!(t.reading, Some("*".to_string()));
    }
}
