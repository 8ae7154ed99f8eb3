//! The five-node reference network.
//!
//! ```text
//! 0 --4-- 1 --1-- 2 --2-- 3 --3-- 4
//! |_______________10______________|
//! ```
//!
//! Its minimum spanning tree costs 10, the cheapest route from 0 to 4 costs
//! 10, and removing the `(2, 3)` link from the tree cuts off `{3, 4}`.

/// Number of nodes in the scenario.
pub const FIVE_NODE_COUNT: usize = 5;

/// Undirected links as `(source, target, weight)` in declaration order.
pub const FIVE_NODE_LINKS: [(usize, usize, u32); 5] =
    [(0, 1, 4), (1, 2, 1), (2, 3, 2), (3, 4, 3), (0, 4, 10)];

/// Node rows as `(connected_to, resistance, meter)`, one per node.
///
/// Row `i` declares the `i`-th entry of [`FIVE_NODE_LINKS`]; the last row
/// declares `4 -> 0`, which is the same undirected link as `(0, 4, 10)`.
pub const FIVE_NODE_ROWS: [(i64, i64, i64); 5] =
    [(1, 4, 120), (2, 1, 80), (3, 2, 45), (4, 3, 300), (0, 10, 15)];

/// Category tag for each scenario row.
pub const FIVE_NODE_CATEGORIES: [&str; 5] =
    ["SolarPlant", "House", "WindFarm", "Substation", "HydroPlant"];

/// Sum of all scenario meter readings.
pub const FIVE_NODE_METER_TOTAL: i64 = 560;

/// Position of the `(2, 3)` link among the accepted spanning tree edges.
///
/// Kruskal accepts `(1,2)`, `(2,3)`, `(3,4)`, `(0,1)` in that order.
pub const FIVE_NODE_TREE_LINK_2_3: usize = 1;
