use std::io::{prelude::*, BufReader, Read};

use crate::dictionary::lexicon::{
    Lexicon, RawWordEntry, WordFeatures, WordMap, WordParam, WordParams,
};
use crate::dictionary::LexType;
use crate::errors::{Result, SumomoError};
use crate::utils;

impl Lexicon {
    /// Builds a new instance from a lexicon file in the CSV format.
    pub fn from_reader<R>(rdr: R, lex_type: LexType) -> Result<Self>
    where
        R: Read,
    {
        let entries = Self::parse_csv(rdr, "lex.csv")?;
        Self::from_entries(entries, lex_type)
    }

    /// Builds a new instance from parsed rows. Word ids are assigned in the row order.
    pub(crate) fn from_entries(entries: Vec<RawWordEntry>, lex_type: LexType) -> Result<Self> {
        let mut kept = Vec::with_capacity(entries.len());
        for (i, e) in entries.into_iter().enumerate() {
            if e.surface.is_empty() {
                log::warn!("Skipped an empty surface (at row {i})");
            } else {
                kept.push(e);
            }
        }

        let map = WordMap::new(kept.iter().map(|e| &e.surface))?;
        let params = WordParams::new(kept.iter().map(|e| e.param));
        let features = WordFeatures::new(kept.iter().map(|e| &e.feature));

        Ok(Self {
            map,
            params,
            features,
            lex_type,
        })
    }

    /// Parses rows in the form of `surface,left_id,right_id,cost,features...`.
    pub(crate) fn parse_csv<R>(rdr: R, name: &'static str) -> Result<Vec<RawWordEntry>>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut entries = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let cols = utils::parse_csv_row(&line);
            if cols.len() < 4 {
                let msg = format!("A csv row of lexicon must have four items at least, {line}");
                return Err(SumomoError::invalid_format(name, msg));
            }
            let left_id = cols[1].parse()?;
            let right_id = cols[2].parse()?;
            let word_cost = cols[3].parse()?;
            entries.push(RawWordEntry {
                surface: cols[0].clone(),
                param: WordParam::new(left_id, right_id, word_cost),
                feature: utils::join_csv_row(&cols[4..]),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system() {
        let data = "自然,0,2,1,sizen\n言語,1,0,-4,gengo,げんご";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.params.get(0), WordParam::new(0, 2, 1));
        assert_eq!(lex.params.get(1), WordParam::new(1, 0, -4));
        assert_eq!(lex.features.get(0), "sizen");
        assert_eq!(lex.features.get(1), "gengo,げんご");
        assert_eq!(lex.lex_type, LexType::System);
    }

    #[test]
    fn test_quoted_feature() {
        let data = "\"1,2\",0,0,10,名詞,数";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.map.exact_match("1,2").collect::<Vec<_>>(), vec![0]);
        assert_eq!(lex.features.get(0), "名詞,数");
    }

    #[test]
    fn test_quoted_feature_column() {
        let data = "ジクロロエタン,0,0,10,名詞,\"1,2-ジクロロエタン\",*";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.features.get(0), "名詞,\"1,2-ジクロロエタン\",*");
    }

    #[test]
    fn test_no_feature() {
        let data = "自然,0,2,1";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.features.get(0), "");
    }

    #[test]
    fn test_empty_surface() {
        let data = ",0,0,0,空\n自然,0,2,1,sizen";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.features.get(0), "sizen");
    }

    #[test]
    fn test_blank_lines() {
        let data = "\n自然,0,2,1,sizen\n\n";
        let lex = Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
        assert_eq!(lex.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_few_cols() {
        let data = "自然,0,2";
        Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
    }

    #[test]
    #[should_panic]
    fn test_invalid_left_id() {
        let data = "自然,-2,2,1";
        Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
    }

    #[test]
    #[should_panic]
    fn test_invalid_right_id() {
        let data = "自然,2,-2,1";
        Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
    }

    #[test]
    #[should_panic]
    fn test_invalid_cost() {
        let data = "自然,2,1,コスト";
        Lexicon::from_reader(data.as_bytes(), LexType::System).unwrap();
    }
}
