//! Error types for the gridlink core library.
//!
//! Every component owns a small error enum with a stable machine-readable
//! code. [`GridError`] wraps them for the analysis pipeline and [`Result`] is
//! the alias used by the public orchestration API.

use thiserror::Error;

use crate::{
    heap::HeapError, mst::MstError, outage::OutageError, segment_tree::SegmentTreeError,
    shortest_path::PathError, union_find::DisjointSetError,
};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced while building or querying a [`crate::GridGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// More node records were supplied than the configured capacity allows.
    #[error("dataset too large for configured capacity of {capacity} nodes")]
    CapacityExceeded {
        /// Maximum number of node records the builder accepts.
        capacity: usize,
    },
    /// A node id outside `[0, node_count)` was queried.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The requested node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// More node records were supplied than the configured capacity allows.
        CapacityExceeded => CapacityExceeded { .. } => "GRAPH_CAPACITY_EXCEEDED",
        /// A node id outside the graph was queried.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
    }
}

/// Error type produced when configuring or running [`crate::GridAnalysis`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    /// The analysed graph contains no nodes.
    #[error("cannot analyse a graph with no nodes")]
    EmptyGraph,
    /// The meter window start lies after its end.
    #[error("meter window start {start} lies after its end {end}")]
    InvalidMeterWindow {
        /// Inclusive start of the window.
        start: usize,
        /// Inclusive end of the window.
        end: usize,
    },
    /// The graph store rejected an operation.
    #[error(transparent)]
    Graph {
        /// Underlying graph store error.
        #[from]
        source: GraphError,
    },
    /// A disjoint-set operation failed.
    #[error(transparent)]
    DisjointSet {
        /// Underlying disjoint-set error.
        #[from]
        source: DisjointSetError,
    },
    /// A priority structure rejected an operation.
    #[error(transparent)]
    Heap {
        /// Underlying heap error.
        #[from]
        source: HeapError,
    },
    /// Spanning forest construction failed.
    #[error(transparent)]
    Mst {
        /// Underlying MST error.
        #[from]
        source: MstError,
    },
    /// Shortest-path computation failed.
    #[error(transparent)]
    Path {
        /// Underlying shortest-path error.
        #[from]
        source: PathError,
    },
    /// A meter aggregate operation failed.
    #[error(transparent)]
    SegmentTree {
        /// Underlying segment tree error.
        #[from]
        source: SegmentTreeError,
    },
    /// Outage simulation failed.
    #[error(transparent)]
    Outage {
        /// Underlying outage simulation error.
        #[from]
        source: OutageError,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The analysed graph contains no nodes.
        EmptyGraph => EmptyGraph => "GRID_EMPTY_GRAPH",
        /// The meter window start lies after its end.
        InvalidMeterWindow => InvalidMeterWindow { .. } => "GRID_INVALID_METER_WINDOW",
        /// The graph store rejected an operation.
        GraphFailure => Graph { .. } => "GRID_GRAPH_FAILURE",
        /// A disjoint-set operation failed.
        DisjointSetFailure => DisjointSet { .. } => "GRID_DISJOINT_SET_FAILURE",
        /// A priority structure rejected an operation.
        HeapFailure => Heap { .. } => "GRID_HEAP_FAILURE",
        /// Spanning forest construction failed.
        MstFailure => Mst { .. } => "GRID_MST_FAILURE",
        /// Shortest-path computation failed.
        PathFailure => Path { .. } => "GRID_PATH_FAILURE",
        /// A meter aggregate operation failed.
        SegmentTreeFailure => SegmentTree { .. } => "GRID_SEGMENT_TREE_FAILURE",
        /// Outage simulation failed.
        OutageFailure => Outage { .. } => "GRID_OUTAGE_FAILURE",
    }
}

impl GridError {
    /// Retrieve the stable code of the wrapped component error, if any.
    #[must_use]
    pub const fn component_code(&self) -> Option<&'static str> {
        match self {
            Self::Graph { source } => Some(source.code().as_str()),
            Self::DisjointSet { source } => Some(source.code().as_str()),
            Self::Heap { source } => Some(source.code().as_str()),
            Self::Mst { source } => Some(source.code().as_str()),
            Self::Path { source } => Some(source.code().as_str()),
            Self::SegmentTree { source } => Some(source.code().as_str()),
            Self::Outage { source } => Some(source.code().as_str()),
            Self::EmptyGraph | Self::InvalidMeterWindow { .. } => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GridError>;
