//! Render layers for scene ordering.
//!
//! Layers are rendered from bottom to top in the order defined by variant
//! declaration: connector lines are always drawn beneath node shapes.

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers of a [`Scene`](crate::draw::Scene).
///
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Parent-to-child connector lines
    Connector,
    /// Node shadows, shapes and labels
    Node,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connector => "connector",
            Self::Node => "node",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_order() {
        assert!(RenderLayer::Connector < RenderLayer::Node);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(RenderLayer::Connector.name(), "connector");
        assert_eq!(RenderLayer::Node.name(), "node");
    }
}
