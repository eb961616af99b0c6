/// Identifier of one transient arc. Never reused within a view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcId(u64);

impl ArcId {
    pub fn new(n: u64) -> Self {
        ArcId(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ArcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arc-{}", self.0)
    }
}

/// Monotonic allocator; ids are handed out in creation order.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_arc(&mut self) -> ArcId {
        let id = ArcId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn issued(&self) -> u64 {
        self.next
    }
}
