use thiserror::Error;

use crate::MIN_ORDER;

/// Errors reported when building a [`BPlusTree`](crate::BPlusTree).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A node of this order could never shed keys by splitting.
    #[error("order {order} is below the minimum of {min}", min = MIN_ORDER)]
    OrderTooSmall { order: usize },
}
