use crate::coordinator::messages::OperationKind;

/// Hands out sequence numbers and decides which responses are still wanted.
///
/// Numbers come from a single counter shared by all kinds, so they are unique
/// across the coordinator. Staleness is judged per kind: a newer filter pass
/// does not invalidate an outstanding catalog rebuild.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    next: u64,
    latest: [Option<u64>; 2],
    answered: [bool; 2],
}

impl SequenceTracker {
    pub fn issue(&mut self, kind: OperationKind) -> u64 {
        self.next += 1;
        self.latest[kind.index()] = Some(self.next);
        self.answered[kind.index()] = false;
        self.next
    }

    pub fn latest(&self, kind: OperationKind) -> Option<u64> {
        self.latest[kind.index()]
    }

    pub fn is_current(&self, kind: OperationKind, seq: u64) -> bool {
        self.latest(kind) == Some(seq)
    }

    /// Record a response. Returns false when it is stale and must be dropped.
    pub fn complete(&mut self, kind: OperationKind, seq: u64) -> bool {
        if !self.is_current(kind, seq) || self.answered[kind.index()] {
            return false;
        }
        self.answered[kind.index()] = true;
        true
    }

    pub fn has_pending(&self) -> bool {
        OperationKind::ALL
            .iter()
            .any(|k| self.latest[k.index()].is_some() && !self.answered[k.index()])
    }
}
