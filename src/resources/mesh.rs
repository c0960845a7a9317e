/// Draw range of one primitive inside the model's shared index buffer.
///
/// Vertex offsets are already baked into the indices, so a draw always uses
/// `vertex_offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveRange {
    pub first_index: u32,
    pub index_count: u32,
}

/// Mesh payload carried by a node: its primitives in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<PrimitiveRange>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            primitives: Vec::new(),
        }
    }

    /// Total indices drawn across all primitives.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.primitives.iter().map(|p| p.index_count).sum()
    }
}
