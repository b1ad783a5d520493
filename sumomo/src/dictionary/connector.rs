mod matrix_connector;

pub use crate::dictionary::connector::matrix_connector::MatrixConnector;

/// Dimensions of a table of connection costs.
pub trait Connector {
    /// Returns maximum number of left connection ID
    fn num_left(&self) -> usize;

    /// Returns maximum number of right connection ID
    fn num_right(&self) -> usize;
}

/// Provider of connection costs between two adjacent words.
pub trait ConnectorCost: Connector {
    /// Gets the connection cost from a word with `right_id` to the following word
    /// with `left_id`.
    ///
    /// The ids must be within [`Connector::num_right()`] and [`Connector::num_left()`].
    fn cost(&self, right_id: u16, left_id: u16) -> i32;
}
