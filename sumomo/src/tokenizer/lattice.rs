//! Lattice of candidate words.
use std::ops::Range;

use crate::common::BOS_EOS_CONNECTION_ID;
use crate::dictionary::{LexType, WordIdx, WordParam};
use crate::errors::{Result, SumomoError};
use crate::token::WordType;

pub(crate) const MAX_COST: i64 = i64::MAX;

/// Reference to a node in a [`Lattice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Index of the bucket that holds the node.
    pub end: usize,

    /// Position of the node in the bucket.
    pub index: usize,
}

impl NodeRef {
    /// Creates a new instance.
    #[inline(always)]
    pub const fn new(end: usize, index: usize) -> Self {
        Self { end, index }
    }
}

/// Candidate word occupying the characters `start_char..end_char`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    word_id: u32,
    word_type: WordType,
    start_char: usize,
    end_char: usize,
    word_cost: i16,
    left_id: Option<u16>,
    right_id: Option<u16>,
    pub(crate) shortest_cost: i64,
    pub(crate) prev: Option<NodeRef>,
}

impl Node {
    /// Creates a new unresolved node.
    ///
    /// Connection ids can be left undefined, in which case the connections
    /// to the node cost nothing.
    pub fn new(
        word_type: WordType,
        word_id: u32,
        range_char: Range<usize>,
        word_cost: i16,
        left_id: Option<u16>,
        right_id: Option<u16>,
    ) -> Self {
        Self {
            word_id,
            word_type,
            start_char: range_char.start,
            end_char: range_char.end,
            word_cost,
            left_id,
            right_id,
            shortest_cost: MAX_COST,
            prev: None,
        }
    }

    #[inline(always)]
    pub(crate) fn from_word(
        word_idx: WordIdx,
        start_char: usize,
        end_char: usize,
        word_param: WordParam,
    ) -> Self {
        let word_type = match word_idx.lex_type {
            LexType::System => WordType::Known,
            LexType::Unknown => WordType::Unknown,
        };
        Self::new(
            word_type,
            word_idx.word_id,
            start_char..end_char,
            word_param.word_cost,
            Some(word_param.left_id),
            Some(word_param.right_id),
        )
    }

    const fn bos() -> Self {
        Self {
            word_id: u32::MAX,
            word_type: WordType::Bos,
            start_char: 0,
            end_char: 0,
            word_cost: 0,
            left_id: Some(BOS_EOS_CONNECTION_ID),
            right_id: Some(BOS_EOS_CONNECTION_ID),
            shortest_cost: 0,
            prev: None,
        }
    }

    const fn eos(pos_char: usize) -> Self {
        Self {
            word_id: u32::MAX,
            word_type: WordType::Eos,
            start_char: pos_char,
            end_char: pos_char,
            word_cost: 0,
            left_id: Some(BOS_EOS_CONNECTION_ID),
            right_id: Some(BOS_EOS_CONNECTION_ID),
            shortest_cost: MAX_COST,
            prev: None,
        }
    }

    /// Gets the kind of the node.
    #[inline(always)]
    pub const fn word_type(&self) -> WordType {
        self.word_type
    }

    /// Gets the word id. It is `u32::MAX` for BOS and EOS.
    #[inline(always)]
    pub const fn word_id(&self) -> u32 {
        self.word_id
    }

    /// Gets the identifier of the word in the dictionary, or `None` for BOS and EOS.
    #[inline(always)]
    pub const fn word_idx(&self) -> Option<WordIdx> {
        match self.word_type {
            WordType::Known => Some(WordIdx::new(LexType::System, self.word_id)),
            WordType::Unknown => Some(WordIdx::new(LexType::Unknown, self.word_id)),
            WordType::Bos | WordType::Eos => None,
        }
    }

    /// Gets the position range of the node in characters.
    #[inline(always)]
    pub const fn range_char(&self) -> Range<usize> {
        self.start_char..self.end_char
    }

    /// Gets the starting position in characters.
    #[inline(always)]
    pub const fn start_char(&self) -> usize {
        self.start_char
    }

    /// Gets the ending position in characters (exclusive).
    #[inline(always)]
    pub const fn end_char(&self) -> usize {
        self.end_char
    }

    /// Gets the cost of emitting the word.
    #[inline(always)]
    pub const fn word_cost(&self) -> i16 {
        self.word_cost
    }

    /// Gets the left connection id.
    #[inline(always)]
    pub const fn left_id(&self) -> Option<u16> {
        self.left_id
    }

    /// Gets the right connection id.
    #[inline(always)]
    pub const fn right_id(&self) -> Option<u16> {
        self.right_id
    }

    /// Gets the minimum cost from BOS to this node, or `None` if the node
    /// has not been reached by the search.
    #[inline(always)]
    pub const fn shortest_cost(&self) -> Option<i64> {
        if self.shortest_cost == MAX_COST {
            None
        } else {
            Some(self.shortest_cost)
        }
    }

    /// Gets the best preceding node found by the search.
    #[inline(always)]
    pub const fn prev(&self) -> Option<NodeRef> {
        self.prev
    }
}

/// Lattice of candidate words.
///
/// Bucket `i` holds the nodes ending at character position `i`, and the
/// predecessors of a node are in the bucket indexed by its starting position.
/// Bucket 0 holds only BOS. EOS is placed one bucket past the last ending
/// position when the lattice is closed.
#[derive(Clone, Debug)]
pub struct Lattice {
    ends: Vec<Vec<Node>>,
    end_of_statement: usize,
    closed: bool,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}

impl Lattice {
    /// Creates a new lattice holding only BOS.
    pub fn new() -> Self {
        let mut lattice = Self {
            ends: vec![],
            end_of_statement: 0,
            closed: false,
        };
        lattice.reset(0);
        lattice
    }

    pub(crate) fn reset(&mut self, new_len_char: usize) {
        Self::reset_vec(&mut self.ends, new_len_char + 2);
        self.end_of_statement = 0;
        self.closed = false;
        self.ends[0].push(Node::bos());
    }

    fn reset_vec<T>(data: &mut Vec<Vec<T>>, new_len: usize) {
        for v in data.iter_mut() {
            v.clear();
        }
        let cur_len = data.len();
        if cur_len <= new_len {
            data.reserve(new_len - cur_len);
            for _ in cur_len..new_len {
                data.push(Vec::with_capacity(16))
            }
        }
    }

    /// Appends a known or unknown word.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when
    ///  - the lattice is already closed,
    ///  - the node is BOS or EOS, or
    ///  - the node covers no character.
    pub fn append(&mut self, node: Node) -> Result<()> {
        if self.closed {
            return Err(SumomoError::invalid_state(
                "A node cannot be appended to the lattice",
                "EOS is already appended.",
            ));
        }
        if matches!(node.word_type, WordType::Bos | WordType::Eos) {
            return Err(SumomoError::invalid_argument(
                "node",
                "BOS/EOS cannot be appended as a word.",
            ));
        }
        if node.start_char >= node.end_char {
            let msg = format!("The node must cover a character, {:?}", node.range_char());
            return Err(SumomoError::invalid_argument("node", msg));
        }
        self.push_node(node);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn push_node(&mut self, node: Node) {
        debug_assert!(!self.closed);
        debug_assert!(node.start_char < node.end_char);
        let end = node.end_char;
        if self.ends.len() <= end {
            self.ends.resize_with(end + 1, Vec::new);
        }
        self.end_of_statement = self.end_of_statement.max(end);
        self.ends[end].push(node);
    }

    /// Appends EOS one position past the current end, closing the lattice.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when the lattice is already closed.
    pub fn append_eos(&mut self) -> Result<()> {
        if self.closed {
            return Err(SumomoError::invalid_state(
                "EOS cannot be appended to the lattice",
                "EOS is already appended.",
            ));
        }
        self.push_eos();
        Ok(())
    }

    pub(crate) fn push_eos(&mut self) {
        debug_assert!(!self.closed);
        let pos_char = self.end_of_statement;
        let end = pos_char + 1;
        if self.ends.len() <= end {
            self.ends.resize_with(end + 1, Vec::new);
        }
        self.ends[end].push(Node::eos(pos_char));
        self.end_of_statement = end;
        self.closed = true;
    }

    /// Gets EOS.
    ///
    /// # Errors
    ///
    /// [`SumomoError`] is returned when the lattice is not closed or
    /// the last bucket does not hold exactly one EOS.
    pub fn get_last_node(&self) -> Result<&Node> {
        if !self.closed {
            return Err(SumomoError::invalid_state(
                "The last node is not available",
                "EOS has not been appended.",
            ));
        }
        match self.ends.get(self.end_of_statement).map(Vec::as_slice) {
            Some([node]) if node.word_type == WordType::Eos => Ok(node),
            _ => Err(SumomoError::invalid_state(
                "The last node is not available",
                "The last bucket is malformed.",
            )),
        }
    }

    /// Gets the index of the last bucket in use.
    /// After EOS is appended, it is the bucket holding EOS.
    #[inline(always)]
    pub const fn end_of_statement(&self) -> usize {
        self.end_of_statement
    }

    /// Checks if EOS has been appended.
    #[inline(always)]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Gets the nodes in the bucket `end`.
    #[inline(always)]
    pub fn nodes(&self, end: usize) -> &[Node] {
        self.ends.get(end).map(Vec::as_slice).unwrap_or_default()
    }

    /// Gets the node referred by `node_ref`.
    #[inline(always)]
    pub fn node(&self, node_ref: NodeRef) -> Option<&Node> {
        self.ends.get(node_ref.end)?.get(node_ref.index)
    }

    #[inline(always)]
    pub(crate) fn get(&self, node_ref: NodeRef) -> &Node {
        &self.ends[node_ref.end][node_ref.index]
    }

    /// Gets BOS.
    #[inline(always)]
    pub fn bos(&self) -> &Node {
        &self.ends[0][0]
    }

    /// Gets the total number of nodes, including BOS and EOS.
    pub fn num_nodes(&self) -> usize {
        self.ends[..=self.end_of_statement].iter().map(Vec::len).sum()
    }

    #[inline(always)]
    pub(crate) fn has_previous_node(&self, i: usize) -> bool {
        self.ends.get(i).map_or(false, |d| !d.is_empty())
    }

    /// Gets the buckets `0..=end_of_statement` for the search.
    #[inline(always)]
    pub(crate) fn buckets_mut(&mut self) -> &mut [Vec<Node>] {
        &mut self.ends[..=self.end_of_statement]
    }
}
