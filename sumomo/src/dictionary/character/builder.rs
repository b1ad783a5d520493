use std::io::{prelude::*, BufReader, Read};

use hashbrown::HashMap;

use crate::dictionary::character::{CharInfo, CharProperty};
use crate::errors::{Result, SumomoError};

const MAX_CATEGORIES: usize = 18;

struct CharRange {
    start: usize,
    end: usize,
    categories: Vec<String>,
}

impl CharProperty {
    /// Creates a new instance from `char.def`.
    ///
    /// # Arguments
    ///
    ///  - `rdr`: A reader of the file.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when the input format is invalid
    /// or category `DEFAULT` is not defined.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut cate2info = HashMap::new();
        let mut cate_map = HashMap::new(); // Name -> Id
        let mut char_ranges = vec![];

        cate_map.insert("DEFAULT".to_string(), 0);

        let reader = BufReader::new(rdr);
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !line.starts_with("0x") {
                let (category, invoke, group, length) = Self::parse_char_category(line)?;
                let new_cate_id = u32::try_from(cate_map.len())?;
                let cate_id = *cate_map.entry(category).or_insert(new_cate_id);
                if MAX_CATEGORIES <= cate_map.len() - 1 {
                    let msg = format!("The number of categories must be less than {MAX_CATEGORIES}");
                    return Err(SumomoError::invalid_format("char.def", msg));
                }
                let cinfo = CharInfo::new(0, cate_id, invoke, group, length).ok_or_else(|| {
                    let msg = format!("LENGTH must be less than 16, {line}");
                    SumomoError::invalid_format("char.def", msg)
                })?;
                cate2info.insert(cate_id, cinfo);
            } else {
                char_ranges.push(Self::parse_char_range(line)?);
            }
        }

        let default_cinfo = Self::encode_cate_info(&["DEFAULT"], &cate2info, &cate_map)?;
        let mut chr2inf = vec![default_cinfo; 1 << 16];

        for r in &char_ranges {
            let cinfo = Self::encode_cate_info(&r.categories, &cate2info, &cate_map)?;
            for e in chr2inf.iter_mut().take(r.end).skip(r.start) {
                *e = cinfo;
            }
        }

        let mut categories = vec![String::new(); cate_map.len()];
        for (k, &v) in cate_map.iter() {
            categories[v as usize] = k.clone();
        }
        log::debug!("char.def defines {} categories", categories.len());

        Ok(Self {
            chr2inf,
            default_cinfo,
            categories,
        })
    }

    fn encode_cate_info<S>(
        targets: &[S],
        cate2info: &HashMap<u32, CharInfo>,
        cate_map: &HashMap<String, u32>,
    ) -> Result<CharInfo>
    where
        S: AsRef<str>,
    {
        let lookup = |target: &str| {
            cate_map
                .get(target)
                .and_then(|cate_id| cate2info.get(cate_id))
                .copied()
                .ok_or_else(|| {
                    let msg = format!("Undefined category: {target}");
                    SumomoError::invalid_format("char.def", msg)
                })
        };

        let base_target = targets
            .first()
            .ok_or_else(|| SumomoError::invalid_format("char.def", "No category is given."))?;
        let mut base_cinfo = lookup(base_target.as_ref())?;
        let mut cate_idset = 0;
        for target in targets {
            cate_idset |= 1 << lookup(target.as_ref())?.base_id();
        }
        base_cinfo.reset_cate_idset(cate_idset);
        Ok(base_cinfo)
    }

    fn parse_char_category(line: &str) -> Result<(String, bool, bool, u16)> {
        debug_assert!(!line.is_empty());
        debug_assert!(!line.starts_with("0x"));

        let cols: Vec<_> = line.split_whitespace().collect();
        if cols.len() < 4 {
            let msg = format!(
                "A character category must consists of four items separated by spaces, {line}",
            );
            return Err(SumomoError::invalid_format("char.def", msg));
        }

        let category = cols[0].to_string();
        let invoke = ["1", "0"]
            .contains(&cols[1])
            .then(|| cols[1] == "1")
            .ok_or_else(|| SumomoError::invalid_format("char.def", "INVOKE must be 1 or 0."))?;
        let group = ["1", "0"]
            .contains(&cols[2])
            .then(|| cols[2] == "1")
            .ok_or_else(|| SumomoError::invalid_format("char.def", "GROUP must be 1 or 0."))?;
        let length = cols[3].parse()?;

        Ok((category, invoke, group, length))
    }

    fn parse_char_range(line: &str) -> Result<CharRange> {
        debug_assert!(!line.is_empty());
        debug_assert!(line.starts_with("0x"));

        let cols: Vec<_> = line.split_whitespace().collect();
        if cols.len() < 2 {
            let msg = format!("A character range must have two items at least, {line}");
            return Err(SumomoError::invalid_format("char.def", msg));
        }

        let r: Vec<_> = cols[0].split("..").collect();
        let start = usize::from_str_radix(r[0].trim_start_matches("0x"), 16)?;
        let end = if r.len() > 1 {
            usize::from_str_radix(r[1].trim_start_matches("0x"), 16)? + 1
        } else {
            start + 1
        };
        if start >= end {
            let msg =
                format!("The start of a character range must be no more than the end, {line}");
            return Err(SumomoError::invalid_format("char.def", msg));
        }
        if start > 0xFFFF || end > 0x10000 {
            let msg = format!("A character range must be no more 0xFFFF, {line}");
            return Err(SumomoError::invalid_format("char.def", msg));
        }

        let categories: Vec<_> = cols[1..]
            .iter()
            .take_while(|col| !col.starts_with('#'))
            .map(|cate| cate.to_string())
            .collect();
        if categories.is_empty() {
            let msg = format!("A character range must have a category, {line}");
            return Err(SumomoError::invalid_format("char.def", msg));
        }

        Ok(CharRange {
            start,
            end,
            categories,
        })
    }
}
