use std::io::{prelude::*, BufReader, Read};

use bincode::{Decode, Encode};

use crate::dictionary::connector::{Connector, ConnectorCost};
use crate::errors::{Result, SumomoError};

/// Matrix of connection costs.
///
/// Costs are stored row by row, one row per right id, so that a dense
/// `matrix.def` fills the matrix in its own order.
#[derive(Decode, Encode)]
pub struct MatrixConnector {
    costs: Vec<i16>,
    num_right: usize,
    num_left: usize,
}

impl MatrixConnector {
    /// Creates a new instance from costs laid out in rows of right ids.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when the number of costs is not
    /// `num_right * num_left`.
    pub fn new(costs: Vec<i16>, num_right: usize, num_left: usize) -> Result<Self> {
        if costs.len() != num_right * num_left {
            let msg = format!(
                "{} costs are given for the {num_right}x{num_left} matrix",
                costs.len()
            );
            return Err(SumomoError::invalid_argument("costs", msg));
        }
        Ok(Self {
            costs,
            num_right,
            num_left,
        })
    }

    /// Creates a new instance from `matrix.def`.
    ///
    /// The first line gives `num_right num_left`, and each following line gives
    /// `right_id left_id cost`. Connections not listed cost 0.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when a line is malformed or an id is out of
    /// the dimensions given by the header.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut lines = BufReader::new(rdr).lines();

        let header = lines
            .next()
            .ok_or_else(|| SumomoError::invalid_format("matrix.def", "The header is missing."))??;
        let mut cols = header.split_whitespace();
        let (num_right, num_left) = match (cols.next(), cols.next(), cols.next()) {
            (Some(num_right), Some(num_left), None) => (
                usize::from(num_right.parse::<u16>()?),
                usize::from(num_left.parse::<u16>()?),
            ),
            _ => {
                let msg = format!("The header must be `num_right num_left`, {header}");
                return Err(SumomoError::invalid_format("matrix.def", msg));
            }
        };

        let mut costs = vec![0; num_right * num_left];
        for (i, line) in lines.enumerate() {
            let line = line?;
            let mut cols = line.split_whitespace();
            let (right_id, left_id, cost) =
                match (cols.next(), cols.next(), cols.next(), cols.next()) {
                    (None, _, _, _) => continue,
                    (Some(right_id), Some(left_id), Some(cost), None) => (
                        right_id.parse::<u16>()?,
                        left_id.parse::<u16>()?,
                        cost.parse::<i16>()?,
                    ),
                    _ => {
                        let msg = format!(
                            "Line {} must be `right_id left_id cost`, {line}",
                            i + 2
                        );
                        return Err(SumomoError::invalid_format("matrix.def", msg));
                    }
                };
            let index = Self::position(right_id, left_id, num_right, num_left).ok_or_else(|| {
                let msg = format!(
                    "Line {} connects ({right_id}, {left_id}) out of the {num_right}x{num_left} matrix",
                    i + 2
                );
                SumomoError::invalid_format("matrix.def", msg)
            })?;
            costs[index] = cost;
        }
        log::debug!("matrix.def has {num_right}x{num_left} connection costs");

        Self::new(costs, num_right, num_left)
    }

    /// Gets the connection cost from a word with `right_id` to the following word
    /// with `left_id`.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when either id is out of the matrix.
    pub fn get(&self, right_id: u16, left_id: u16) -> Result<i32> {
        Self::position(right_id, left_id, self.num_right, self.num_left)
            .map(|index| i32::from(self.costs[index]))
            .ok_or_else(|| {
                let msg = format!(
                    "({right_id}, {left_id}) is out of the {}x{} matrix",
                    self.num_right, self.num_left
                );
                SumomoError::invalid_argument("right_id/left_id", msg)
            })
    }

    #[inline(always)]
    fn position(right_id: u16, left_id: u16, num_right: usize, num_left: usize) -> Option<usize> {
        let (right_id, left_id) = (usize::from(right_id), usize::from(left_id));
        (right_id < num_right && left_id < num_left).then(|| right_id * num_left + left_id)
    }
}

impl Connector for MatrixConnector {
    #[inline(always)]
    fn num_left(&self) -> usize {
        self.num_left
    }

    #[inline(always)]
    fn num_right(&self) -> usize {
        self.num_right
    }
}

impl ConnectorCost for MatrixConnector {
    #[inline(always)]
    fn cost(&self, right_id: u16, left_id: u16) -> i32 {
        debug_assert!(usize::from(right_id) < self.num_right);
        debug_assert!(usize::from(left_id) < self.num_left);
        let index = usize::from(right_id) * self.num_left + usize::from(left_id);
        i32::from(self.costs[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0: BOS/EOS, 1: noun, 2: particle, 3: verb
    const MATRIX_DEF: &str = "4 3
0 1 -310
0 2 1200
1 1 95
1 2 -2500
2 0 -400
2 1 -720
3 0 -1200";

    #[test]
    fn test_from_reader() {
        let conn = MatrixConnector::from_reader(MATRIX_DEF.as_bytes()).unwrap();
        assert_eq!(conn.num_right(), 4);
        assert_eq!(conn.num_left(), 3);
        assert_eq!(conn.get(1, 2).unwrap(), -2500);
        assert_eq!(conn.get(2, 1).unwrap(), -720);
        assert_eq!(conn.cost(3, 0), -1200);
        // Not listed.
        assert_eq!(conn.get(0, 0).unwrap(), 0);
        assert_eq!(conn.get(3, 2).unwrap(), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let conn = MatrixConnector::from_reader(MATRIX_DEF.as_bytes()).unwrap();
        let err = conn.get(4, 0).unwrap_err().to_string();
        assert!(err.contains("(4, 0)"), "{err}");
        let err = conn.get(1, 3).unwrap_err().to_string();
        assert!(err.contains("(1, 3)"), "{err}");
    }

    #[test]
    fn test_new() {
        let conn = MatrixConnector::new(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(conn.get(0, 2).unwrap(), 3);
        assert_eq!(conn.get(1, 0).unwrap(), 4);
        assert!(MatrixConnector::new(vec![1, 2, 3, 4, 5], 2, 3).is_err());
    }

    #[test]
    fn test_later_row_overrides() {
        let data = "1 1\n0 0 10\n\n0 0 -10\n";
        let conn = MatrixConnector::from_reader(data.as_bytes()).unwrap();
        assert_eq!(conn.get(0, 0).unwrap(), -10);
    }

    #[test]
    fn test_malformed_row() {
        let data = "2 2\n0 0 0\n1 -2\n";
        let err = MatrixConnector::from_reader(data.as_bytes())
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("Line 3"), "{err}");
    }

    #[test]
    fn test_id_out_of_header() {
        let data = "2 2\n0 2 5\n";
        let err = MatrixConnector::from_reader(data.as_bytes())
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("(0, 2)"), "{err}");
    }

    #[test]
    fn test_invalid_header() {
        assert!(MatrixConnector::from_reader("".as_bytes()).is_err());
        assert!(MatrixConnector::from_reader("2\n0 0 0".as_bytes()).is_err());
        assert!(MatrixConnector::from_reader("2 2 2\n0 0 0".as_bytes()).is_err());
        assert!(MatrixConnector::from_reader("65536 1".as_bytes()).is_err());
    }

    #[test]
    fn test_cost_overflow() {
        assert!(MatrixConnector::from_reader("1 1\n0 0 40000".as_bytes()).is_err());
    }
}
