use crate::common::Confidence;

/// Identity of the table entry behind the most recent prediction.
///
/// Stored by value rather than as a reference into the tables: consumers
/// re-resolve `tables[table][index]` at use and must re-verify the entry's
/// (tag, context) before trusting it, falling back to a full table search
/// on mismatch. This keeps the slot valid across arbitrary intervening
/// mutations without any aliasing hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Provider {
    /// Table that supplied the prediction (0 = base).
    pub table: usize,
    /// Index of the providing entry within that table.
    pub index: usize,
    /// Direction that was predicted.
    pub taken: bool,
    /// Confidence that was reported.
    pub confidence: Confidence,
}

/// One-shot cache of the last prediction's provider and the (pc, context)
/// it was computed for.
pub struct Scoreboard {
    pc: u64,
    ctx: u8,
    provider: Option<Provider>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            pc: 0,
            ctx: 0,
            provider: None,
        }
    }

    /// Replaces the slot with the provider of a fresh prediction.
    pub fn record(&mut self, pc: u64, ctx: u8, provider: Provider) {
        self.pc = pc;
        self.ctx = ctx;
        self.provider = Some(provider);
    }

    /// Returns the cached provider when it was computed for exactly this
    /// (pc, context) query.
    pub fn lookup(&self, pc: u64, ctx: u8) -> Option<Provider> {
        match self.provider {
            Some(p) if self.pc == pc && self.ctx == ctx => Some(p),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.pc = 0;
        self.ctx = 0;
        self.provider = None;
    }
}
