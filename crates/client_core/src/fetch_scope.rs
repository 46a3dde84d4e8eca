//! Ignore-after-unmount bookkeeping for view fetches.
//!
//! Each view mount starts a new [`Generation`]; requests carry it and their
//! results are applied only while it is still the live one. Nothing is
//! cancelled on the wire.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchScope {
    issued: u64,
    live: Option<Generation>,
}

impl FetchScope {
    /// Starts a new scope, superseding any previous one.
    pub fn begin(&mut self) -> Generation {
        self.issued += 1;
        let generation = Generation(self.issued);
        self.live = Some(generation);
        generation
    }

    pub fn end(&mut self) {
        self.live = None;
    }

    pub fn live(&self) -> Option<Generation> {
        self.live
    }

    pub fn accepts(&self, generation: Generation) -> bool {
        self.live == Some(generation)
    }
}
