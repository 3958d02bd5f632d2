//! TAGE (Tagged Geometric History Length) branch predictor core.
//!
//! TAGE keeps a history-independent base table plus seven tagged tables
//! indexed with geometrically increasing history lengths. A prediction
//! probes all eight tables at once and takes the direction of the
//! longest-history match; training reinforces the provider and, on a
//! misprediction, allocates into longer-history tables so that the next
//! occurrence of the pattern can match more specifically.
//!
//! # Hardware intent
//!
//! - All eight lookups in `predict` are parallel; provider selection is a
//!   combinational priority encode (CLZ) of the 8-bit hit mask.
//! - Counter and history updates are single-cycle.
//! - The aging sweep is a background FSM; in this model it runs atomically
//!   inside `on_mispredict` at the aging interval.
//!
//! Every operation is infallible: out-of-range contexts are clamped the
//! way the hardware masks its context wires, an empty table is a normal
//! miss, and the always-valid base table guarantees a fallback.

use super::aging::age_table;
use super::entry::TageEntry;
use super::hash::{hash_index, hash_tag};
use super::history::HistoryFile;
use super::replace::select_victim;
use super::scoreboard::{Provider, Scoreboard};
use super::table::TageTable;
use crate::common::constants::{
    AGING_INTERVAL, ALLOC_WEAK_MAX, ALLOC_WEAK_MIN, HISTORY_LENGTHS, NEUTRAL_COUNTER,
    NUM_CONTEXTS, NUM_TABLES,
};
use crate::common::{Confidence, Prediction};
use crate::stats::{PredictorStats, TableStats};

/// The predictor: eight tables, per-context history, and the provider
/// scoreboard. Owns all nested state exclusively.
pub struct TagePredictor {
    tables: Vec<TageTable>,
    history: HistoryFile,
    scoreboard: Scoreboard,
    mispredicts: u64,
    aging_enabled: bool,
    trace: bool,
}

impl TagePredictor {
    /// Creates a predictor with a fully-valid neutral base table and empty
    /// history tables.
    pub fn new() -> Self {
        let mut tables = Vec::with_capacity(NUM_TABLES);
        tables.push(TageTable::new_base());
        for &len in &HISTORY_LENGTHS[1..] {
            tables.push(TageTable::new(len));
        }

        Self {
            tables,
            history: HistoryFile::new(),
            scoreboard: Scoreboard::new(),
            mispredicts: 0,
            aging_enabled: true,
            trace: cfg!(feature = "always-trace"),
        }
    }

    /// Out-of-range contexts collapse to 0, mirroring the AND-with-mask on
    /// the hardware context wires.
    fn clamp_context(ctx: u8) -> u8 {
        if (ctx as usize) < NUM_CONTEXTS { ctx } else { 0 }
    }

    /// Predicts the direction of the branch at `pc` in `context`.
    ///
    /// Probes every history table for a (tag, context) match, selects the
    /// longest-history hit as the provider, and falls back to the base
    /// table when the hit mask is empty. The provider's identity is cached
    /// in the scoreboard for the training call that follows.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction.
    /// * `context` - Hardware context id; out-of-range values clamp to 0.
    ///
    /// # Returns
    ///
    /// The predicted direction and a confidence level: `Low` for a base
    /// fallback, `Medium` for a history hit with an uncertain counter,
    /// `High` for a history hit at or near counter saturation.
    pub fn predict(&mut self, pc: u64, context: u8) -> Prediction {
        let ctx = Self::clamp_context(context);
        let tag = hash_tag(pc);
        let h = self.history.read(ctx as usize);

        let mut hit_mask: u8 = 0;
        let mut hit_idx = [0usize; NUM_TABLES];

        for t in 1..NUM_TABLES {
            let idx = hash_index(pc, h, self.tables[t].history_len(), t);
            hit_idx[t] = idx;
            if self.tables[t].presence(idx) {
                let e = self.tables[t].entry(idx);
                if e.tag == tag && e.ctx == ctx {
                    hit_mask |= 1u8 << t;
                }
            }
        }

        let (provider, index, entry) = if hit_mask != 0 {
            // Priority encode: the highest set bit is the longest
            // matching history.
            let t = 7 - hit_mask.leading_zeros() as usize;
            (t, hit_idx[t], *self.tables[t].entry(hit_idx[t]))
        } else {
            let idx = hash_index(pc, 0, 0, 0);
            (0, idx, *self.tables[0].entry(idx))
        };

        let taken = entry.predict_taken();
        let confidence = if provider == 0 {
            Confidence::Low
        } else {
            Confidence::of_history_hit(entry.ctr)
        };

        self.scoreboard.clear();
        self.scoreboard.record(
            pc,
            ctx,
            Provider {
                table: provider,
                index,
                taken,
                confidence,
            },
        );

        if self.trace {
            eprintln!(
                "BP  pc={:#x} ctx={} provider={} idx={} word={:#08x} taken={} conf={:?}",
                pc,
                ctx,
                provider,
                index,
                entry.to_bits(),
                taken,
                confidence
            );
        }

        Prediction { taken, confidence }
    }

    /// Trains the predictor after a correct prediction.
    ///
    /// The base counter is always reinforced; the providing history entry
    /// (located through the scoreboard, or by search when the scoreboard
    /// does not match) is reinforced and marked useful so the replacement
    /// search will protect it.
    ///
    /// # Behavior
    ///
    /// - Adjusts the base-table counter toward `taken`.
    /// - Reinforces the history provider and sets its useful bit.
    /// - Shifts `taken` into the context's history register.
    /// - Clears the scoreboard.
    /// - Never allocates and never advances the mispredict counter.
    pub fn update(&mut self, pc: u64, context: u8, taken: bool) {
        let ctx = Self::clamp_context(context);

        let base_idx = hash_index(pc, 0, 0, 0);
        let base = self.tables[0].entry_mut(base_idx);
        base.adjust_counter(taken);
        base.taken = taken;

        if let Some((t, idx)) = self.find_provider(pc, ctx) {
            let e = self.tables[t].entry_mut(idx);
            e.adjust_counter(taken);
            e.taken = taken;
            e.useful = true;
        }

        self.history.shift(ctx as usize, taken);
        self.scoreboard.clear();
    }

    /// Trains the predictor after a misprediction.
    ///
    /// Corrects the base and provider counters, strips the provider's
    /// eviction protection, and allocates into longer-history tables: one
    /// entry in table 1 when nothing matched at all, or a cascade above
    /// the provider when its counter was still weak. A strongly-saturated
    /// wrong counter signals aliasing rather than missing history, so the
    /// cascade is skipped.
    ///
    /// # Behavior
    ///
    /// - Adjusts the base-table counter toward `actual_taken`.
    /// - Corrects the provider, clears its useful bit, and rejuvenates
    ///   its age.
    /// - Allocates at most three cascade entries (or exactly one table-1
    ///   entry when no provider exists), admitted by PC-bit slices with
    ///   effective probability 1, 1/2, 1/3 per offset.
    /// - Shifts `actual_taken` into the context's history register.
    /// - Advances the mispredict counter and runs the aging sweep every
    ///   `AGING_INTERVAL` mispredictions while aging is enabled.
    pub fn on_mispredict(&mut self, pc: u64, context: u8, actual_taken: bool) {
        let ctx = Self::clamp_context(context);
        let tag = hash_tag(pc);

        let base_idx = hash_index(pc, 0, 0, 0);
        let base = self.tables[0].entry_mut(base_idx);
        base.adjust_counter(actual_taken);
        base.taken = actual_taken;

        let h = self.history.read(ctx as usize);

        match self.find_provider(pc, ctx) {
            Some((t, idx)) => {
                let e = self.tables[t].entry_mut(idx);
                let was_weak = (ALLOC_WEAK_MIN..=ALLOC_WEAK_MAX).contains(&e.ctr);
                e.adjust_counter(actual_taken);
                e.taken = actual_taken;
                e.useful = false;
                e.age = 0;

                if was_weak {
                    // Cascade with deterministic PC-bit admission:
                    // 256/offset out of 256, i.e. always / half / third.
                    for offset in 1..=3usize {
                        let target = t + offset;
                        if target >= NUM_TABLES {
                            break;
                        }
                        if (pc >> offset) & 0xFF < 256 / offset as u64 {
                            self.allocate(target, pc, ctx, tag, h, actual_taken);
                        }
                    }
                }
            }
            None => {
                self.allocate(1, pc, ctx, tag, h, actual_taken);
            }
        }

        self.history.shift(ctx as usize, actual_taken);

        self.mispredicts += 1;
        if self.aging_enabled && self.mispredicts % AGING_INTERVAL == 0 {
            self.age_all_entries();
        }
    }

    /// Locates the history-table entry behind the last prediction for
    /// (pc, ctx): scoreboard fast path first, then a longest-first search
    /// of tables 7 down to 1. The search recovers when the caller trains
    /// without a preceding `predict`.
    fn find_provider(&self, pc: u64, ctx: u8) -> Option<(usize, usize)> {
        let tag = hash_tag(pc);

        if let Some(p) = self.scoreboard.lookup(pc, ctx) {
            if p.table >= 1 && self.tables[p.table].presence(p.index) {
                let e = self.tables[p.table].entry(p.index);
                if e.tag == tag && e.ctx == ctx {
                    return Some((p.table, p.index));
                }
            }
        }

        let h = self.history.read(ctx as usize);
        for t in (1..NUM_TABLES).rev() {
            let idx = hash_index(pc, h, self.tables[t].history_len(), t);
            if self.tables[t].presence(idx) {
                let e = self.tables[t].entry(idx);
                if e.tag == tag && e.ctx == ctx {
                    return Some((t, idx));
                }
            }
        }
        None
    }

    /// Installs a fresh entry for (pc, ctx) in table `t`, displacing the
    /// victim chosen by the replacement search. The new entry predicts the
    /// observed outcome, but weakly.
    fn allocate(&mut self, t: usize, pc: u64, ctx: u8, tag: u16, history: u64, taken: bool) {
        let idx = hash_index(pc, history, self.tables[t].history_len(), t);
        let victim = select_victim(&self.tables[t], idx);

        let fresh = TageEntry {
            tag,
            ctr: if taken {
                NEUTRAL_COUNTER + 1
            } else {
                NEUTRAL_COUNTER - 1
            },
            ctx: ctx & 0x7,
            useful: false,
            taken,
            age: 0,
        };
        *self.tables[t].entry_mut(victim) = fresh;
        self.tables[t].mark_valid(victim);

        if self.trace {
            eprintln!(
                "BP  alloc table={} idx={} ctx={} word={:#08x}",
                t,
                victim,
                ctx,
                fresh.to_bits()
            );
        }
    }

    /// Runs one aging sweep over the history tables.
    fn age_all_entries(&mut self) {
        for table in &mut self.tables[1..] {
            age_table(table);
        }
        if self.trace {
            eprintln!("BP  aging sweep at {} mispredicts", self.mispredicts);
        }
    }

    /// Returns the predictor to its post-construction state.
    ///
    /// History registers, the mispredict counter, and the scoreboard are
    /// cleared and every history table is invalidated. The base table is
    /// left alone: invalidating it would break the always-fallback
    /// guarantee.
    pub fn reset(&mut self) {
        self.history.clear();
        for table in &mut self.tables[1..] {
            table.invalidate_all();
        }
        self.mispredicts = 0;
        self.scoreboard.clear();
    }

    /// Captures a read-only snapshot of occupancy and training state.
    pub fn stats(&self) -> PredictorStats {
        let mut tables = [TableStats::default(); NUM_TABLES];
        for (t, table) in self.tables.iter().enumerate() {
            let mut valid = 0usize;
            let mut useful = 0usize;
            let mut age_sum = 0u64;
            let mut ctr_sum = 0u64;

            for idx in table.valid_indices() {
                let e = table.entry(idx);
                valid += 1;
                useful += usize::from(e.useful);
                age_sum += u64::from(e.age);
                ctr_sum += u64::from(e.ctr);
            }

            tables[t] = TableStats {
                valid,
                useful,
                avg_age: if valid == 0 {
                    0.0
                } else {
                    age_sum as f64 / valid as f64
                },
                avg_counter: if valid == 0 {
                    0.0
                } else {
                    ctr_sum as f64 / valid as f64
                },
            };
        }

        PredictorStats {
            mispredicts: self.mispredicts,
            tables,
        }
    }

    /// Read access to one table, for stats scraping and verification.
    pub fn table(&self, id: usize) -> &TageTable {
        &self.tables[id]
    }

    /// Current history register of a context.
    pub fn history(&self, context: u8) -> u64 {
        self.history.read(Self::clamp_context(context) as usize)
    }

    /// Mispredictions observed since construction or the last reset.
    pub fn mispredict_count(&self) -> u64 {
        self.mispredicts
    }

    /// Enables or disables the periodic aging sweep.
    pub fn set_aging_enabled(&mut self, enabled: bool) {
        self.aging_enabled = enabled;
    }

    pub fn aging_enabled(&self) -> bool {
        self.aging_enabled
    }

    /// Enables per-event trace output on stderr.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }
}

impl Default for TagePredictor {
    fn default() -> Self {
        Self::new()
    }
}
