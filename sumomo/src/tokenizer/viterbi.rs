//! Minimum-cost path search over a lattice.
use crate::dictionary::connector::{Connector, ConnectorCost};
use crate::errors::{Result, SumomoError};
use crate::token::WordType;
use crate::tokenizer::lattice::{Lattice, NodeRef, MAX_COST};

/// Finds the minimum-cost path from BOS to EOS.
///
/// Returns the references to the nodes on the path in left-to-right order,
/// excluding BOS and EOS. An empty path is returned when EOS is unreachable.
/// Among predecessors of the same cost, the first one in the bucket wins.
///
/// The connection ids of all nodes are checked before any node is updated,
/// so the lattice is left untouched when an error is returned.
pub(crate) fn search<C>(lattice: &mut Lattice, connector: &C) -> Result<Vec<NodeRef>>
where
    C: ConnectorCost,
{
    if !lattice.is_closed() {
        return Err(SumomoError::invalid_state(
            "The lattice cannot be searched",
            "EOS has not been appended.",
        ));
    }
    validate(lattice, connector)?;
    forward(lattice, connector);
    Ok(backward(lattice))
}

fn validate<C>(lattice: &Lattice, connector: &C) -> Result<()>
where
    C: Connector,
{
    for end in 0..=lattice.end_of_statement() {
        for node in lattice.nodes(end) {
            if let Some(left_id) = node.left_id() {
                if connector.num_left() <= usize::from(left_id) {
                    let msg = format!(
                        "left_id of the node at {:?} must be less than {}, but got {left_id}",
                        node.range_char(),
                        connector.num_left()
                    );
                    return Err(SumomoError::invalid_argument("left_id", msg));
                }
            }
            if let Some(right_id) = node.right_id() {
                if connector.num_right() <= usize::from(right_id) {
                    let msg = format!(
                        "right_id of the node at {:?} must be less than {}, but got {right_id}",
                        node.range_char(),
                        connector.num_right()
                    );
                    return Err(SumomoError::invalid_argument("right_id", msg));
                }
            }
        }
    }
    Ok(())
}

fn forward<C>(lattice: &mut Lattice, connector: &C)
where
    C: ConnectorCost,
{
    let buckets = lattice.buckets_mut();
    for end in 1..buckets.len() {
        let (lhs, rhs) = buckets.split_at_mut(end);
        for node in rhs[0].iter_mut() {
            node.shortest_cost = MAX_COST;
            node.prev = None;

            let start = node.start_char();
            let preds = &lhs[start];
            if preds.is_empty() {
                log::warn!("No node ends at position {start}; skipped the node ending at {end}");
                continue;
            }

            let mut best: Option<(i64, usize)> = None;
            for (index, pred) in preds.iter().enumerate() {
                let Some(pred_cost) = pred.shortest_cost() else {
                    continue;
                };
                let conn_cost = match (pred.right_id(), node.left_id()) {
                    (Some(right_id), Some(left_id)) => i64::from(connector.cost(right_id, left_id)),
                    _ => {
                        log::warn!(
                            "Undefined connection id between positions {start} and {end}; the connection costs 0"
                        );
                        0
                    }
                };
                let total_cost = pred_cost + conn_cost + i64::from(node.word_cost());
                if best.map_or(true, |(min_cost, _)| total_cost < min_cost) {
                    best = Some((total_cost, index));
                }
            }

            if let Some((min_cost, index)) = best {
                node.shortest_cost = min_cost;
                node.prev = Some(NodeRef::new(start, index));
            }
        }
    }
}

fn backward(lattice: &Lattice) -> Vec<NodeRef> {
    let Ok(eos) = lattice.get_last_node() else {
        return vec![];
    };
    let Some(mut cur) = eos.prev() else {
        log::warn!("EOS is unreachable from BOS");
        return vec![];
    };

    let mut path = vec![];
    loop {
        let Some(node) = lattice.node(cur) else {
            log::warn!("Broken back-pointer {cur:?}");
            return vec![];
        };
        if node.word_type() == WordType::Bos {
            break;
        }
        path.push(cur);
        match node.prev() {
            Some(prev) => cur = prev,
            None => {
                log::warn!("The path from EOS is broken at {cur:?}");
                return vec![];
            }
        }
    }
    path.reverse();
    path
}
