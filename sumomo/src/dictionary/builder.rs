use std::io::Read;

use crate::dictionary::lexicon::RawWordEntry;
use crate::dictionary::{
    CharProperty, Dictionary, DictionaryInner, LexType, Lexicon, MatrixConnector, UnkHandler,
};
use crate::errors::{Result, SumomoError};

/// Builder of a system dictionary from source files in the MeCab format.
///
/// Lexicon rows are accumulated over any number of CSV files and
/// word ids are assigned in the order the rows are added.
#[derive(Default)]
pub struct SystemDictionaryBuilder {
    entries: Vec<RawWordEntry>,
}

impl SystemDictionaryBuilder {
    /// Creates a new builder with no lexicon rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the rows of a lexicon file `*.csv`.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when the input format is invalid.
    pub fn lexicon_from_reader<R>(mut self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut entries = Lexicon::parse_csv(rdr, "lex.csv")?;
        log::debug!("Read {} lexicon rows", entries.len());
        self.entries.append(&mut entries);
        Ok(self)
    }

    /// Gets the number of rows added so far.
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Builds the dictionary from the accumulated rows.
    ///
    /// # Arguments
    ///
    ///  - `connector_rdr`: A reader of matrix file `matrix.def`.
    ///  - `char_prop_rdr`: A reader of character definition file `char.def`.
    ///  - `unk_handler_rdr`: A reader of unknown definition file `unk.def`.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when an input format is invalid or
    /// a connection id is out of the matrix.
    pub fn build<C, P, U>(
        self,
        connector_rdr: C,
        char_prop_rdr: P,
        unk_handler_rdr: U,
    ) -> Result<Dictionary>
    where
        C: Read,
        P: Read,
        U: Read,
    {
        let system_lexicon = Lexicon::from_entries(self.entries, LexType::System)?;
        let connector = MatrixConnector::from_reader(connector_rdr)?;
        let char_prop = CharProperty::from_reader(char_prop_rdr)?;
        let unk_handler = UnkHandler::from_reader(unk_handler_rdr, &char_prop)?;

        if !system_lexicon.verify(&connector) {
            return Err(SumomoError::invalid_argument(
                "system_lexicon_rdr",
                "system_lexicon_rdr includes invalid connection ids.",
            ));
        }
        if !unk_handler.verify(&connector) {
            return Err(SumomoError::invalid_argument(
                "unk_handler_rdr",
                "unk_handler_rdr includes invalid connection ids.",
            ));
        }
        log::info!(
            "Built a dictionary of {} words and {} unknown entries",
            system_lexicon.len(),
            unk_handler.len()
        );

        Ok(Dictionary(DictionaryInner {
            system_lexicon,
            connector,
            char_prop,
            unk_handler,
        }))
    }

    /// Creates a new dictionary from readers in the MeCab format.
    ///
    /// # Arguments
    ///
    ///  - `system_lexicon_rdr`: A reader of a lexicon file `*.csv`.
    ///  - `connector_rdr`: A reader of matrix file `matrix.def`.
    ///  - `char_prop_rdr`: A reader of character definition file `char.def`.
    ///  - `unk_handler_rdr`: A reader of unknown definition file `unk.def`.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when an input format is invalid.
    pub fn from_readers<S, C, P, U>(
        system_lexicon_rdr: S,
        connector_rdr: C,
        char_prop_rdr: P,
        unk_handler_rdr: U,
    ) -> Result<Dictionary>
    where
        S: Read,
        C: Read,
        P: Read,
        U: Read,
    {
        Self::new()
            .lexicon_from_reader(system_lexicon_rdr)?
            .build(connector_rdr, char_prop_rdr, unk_handler_rdr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_oor_lex() {
        let lexicon_csv = "自然,1,1,0";
        let matrix_def = "1 1\n0 0 0";
        let char_def = "DEFAULT 0 1 0";
        let unk_def = "DEFAULT,0,0,100,*";

        SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap();
    }

    #[test]
    #[should_panic]
    fn test_oor_unk() {
        let lexicon_csv = "自然,0,0,0";
        let matrix_def = "1 1\n0 0 0";
        let char_def = "DEFAULT 0 1 0";
        let unk_def = "DEFAULT,1,1,100,*";

        SystemDictionaryBuilder::from_readers(
            lexicon_csv.as_bytes(),
            matrix_def.as_bytes(),
            char_def.as_bytes(),
            unk_def.as_bytes(),
        )
        .unwrap();
    }

    #[test]
    fn test_multiple_lexicons() {
        let nouns = "自然,0,0,1,名詞\n言語,0,0,4,名詞";
        let verbs = "行く,0,0,2,動詞\n自然,0,0,9,形容動詞語幹";
        let builder = SystemDictionaryBuilder::new()
            .lexicon_from_reader(nouns.as_bytes())
            .unwrap()
            .lexicon_from_reader(verbs.as_bytes())
            .unwrap();
        assert_eq!(builder.num_entries(), 4);

        let dict = builder
            .build(
                "1 1\n0 0 0".as_bytes(),
                "DEFAULT 0 1 0".as_bytes(),
                "DEFAULT,0,0,100,*".as_bytes(),
            )
            .unwrap();
        assert_eq!(dict.num_words(), 4);
        let ids: Vec<_> = dict.lookup("自然").iter().map(|w| w.word_id).collect();
        assert_eq!(ids, vec![0, 3]);
        assert_eq!(dict.lookup("行く")[0].word_id, 2);
    }
}
