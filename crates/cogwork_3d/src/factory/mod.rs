//! Procedural object factories

mod gear;
mod network;

pub use crate::geometry::GearOptions;
pub use gear::{
    create_gear, create_gear_set, create_simple_gear, CompositeGear, GearModel, SolidGear,
    DEFAULT_GEAR_SPACING,
};
pub use network::{
    create_connections, create_data_flow_particles, create_network, create_node, layout_position,
    select_connections, Bounds, Connections, LayoutPattern, Network, NetworkOptions, Node,
    NodeOptions, MAX_NODE_COUNT, NODE_BLUE, NODE_CYAN,
};
