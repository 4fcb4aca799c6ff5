mod binaryedge;

pub use binaryedge::BinaryEdge;
