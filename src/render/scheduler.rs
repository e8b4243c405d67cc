/// Handle for one armed refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// Source of "next display refresh" callbacks.
///
/// `arm` schedules exactly one callback and returns its ticket; the host later hands that ticket
/// back through [`RenderScheduler::fire`].
pub trait FrameClock {
    /// Schedule one callback at the next refresh.
    fn arm(&mut self) -> FrameTicket;
}

/// Deterministic clock: a refresh happens only when [`SteppedClock::step`] is called.
#[derive(Clone, Debug, Default)]
pub struct SteppedClock {
    next_id: u64,
    armed: Option<FrameTicket>,
    armed_count: u64,
    refreshes: u64,
}

impl SteppedClock {
    /// Clock with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one refresh; returns the ticket that fires, if any.
    pub fn step(&mut self) -> Option<FrameTicket> {
        self.refreshes = self.refreshes.saturating_add(1);
        self.armed.take()
    }

    /// Callbacks armed so far.
    pub fn armed_count(&self) -> u64 {
        self.armed_count
    }

    /// Refreshes stepped so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl FrameClock for SteppedClock {
    fn arm(&mut self) -> FrameTicket {
        self.next_id = self.next_id.wrapping_add(1);
        let t = FrameTicket(self.next_id);
        self.armed = Some(t);
        self.armed_count = self.armed_count.saturating_add(1);
        t
    }
}

/// Resolution and pass set for one executed render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderQuality {
    /// Output geometry, all passes.
    Full,
    /// Preview scale; noise, posterize and bloom are skipped.
    Preview,
}

impl RenderQuality {
    /// Whether noise, posterize and bloom run.
    pub fn heavy(self) -> bool {
        matches!(self, RenderQuality::Full)
    }
}

/// Scheduler counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Calls to `request_render`.
    pub requests: u64,
    /// Fires that produced a render decision.
    pub renders: u64,
    /// Of those, renders at [`RenderQuality::Full`].
    pub full_renders: u64,
    /// Fires ignored because the ticket was not the armed one.
    pub stale_tickets: u64,
}

/// Coalesces render requests into at most one render per refresh.
///
/// Requests between two refreshes merge: the first arms a callback, later ones only OR their
/// `force_full` flag into the owed state. A forced full render is never dropped; while scrubbing it
/// stays owed until the scrub ends.
#[derive(Debug)]
pub struct RenderScheduler<C: FrameClock> {
    clock: C,
    armed: Option<FrameTicket>,
    pending_full: bool,
    scrubbing: bool,
    stats: SchedulerStats,
}

impl<C: FrameClock> RenderScheduler<C> {
    /// Idle scheduler driven by `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            armed: None,
            pending_full: false,
            scrubbing: false,
            stats: SchedulerStats::default(),
        }
    }

    /// Ask for a render at the next refresh.
    pub fn request_render(&mut self, force_full: bool) {
        self.stats.requests = self.stats.requests.saturating_add(1);
        self.pending_full |= force_full;
        if self.armed.is_none() {
            let t = self.clock.arm();
            tracing::debug!(ticket = t.0, force_full, "armed refresh callback");
            self.armed = Some(t);
        }
    }

    /// Pointer went down on a control.
    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
    }

    /// Pointer released; the next executed render is owed at full quality.
    pub fn end_scrub(&mut self) {
        self.scrubbing = false;
        self.pending_full = true;
    }

    /// Whether a control is being dragged.
    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    /// Whether a full render is owed.
    pub fn pending_full(&self) -> bool {
        self.pending_full
    }

    /// Whether a refresh callback is outstanding.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Drop the outstanding callback and any owed full render. A ticket already handed out fires
    /// as stale.
    pub fn cancel(&mut self) {
        if let Some(t) = self.armed.take() {
            tracing::debug!(ticket = t.0, "cancelled refresh callback");
        }
        self.pending_full = false;
    }

    /// Refresh callback fired. Returns the quality to render at, or `None` for a stale ticket.
    pub fn fire(&mut self, ticket: FrameTicket) -> Option<RenderQuality> {
        if self.armed != Some(ticket) {
            self.stats.stale_tickets = self.stats.stale_tickets.saturating_add(1);
            tracing::debug!(ticket = ticket.0, "ignoring stale refresh ticket");
            return None;
        }
        self.armed = None;

        let run_full = self.pending_full && !self.scrubbing;
        if run_full {
            self.pending_full = false;
        }
        self.stats.renders = self.stats.renders.saturating_add(1);
        let quality = if run_full {
            self.stats.full_renders = self.stats.full_renders.saturating_add(1);
            RenderQuality::Full
        } else {
            RenderQuality::Preview
        };
        tracing::debug!(
            ticket = ticket.0,
            ?quality,
            scrubbing = self.scrubbing,
            owed_full = self.pending_full,
            "refresh fired"
        );
        Some(quality)
    }

    /// Counters since construction.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// The injected clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the injected clock, e.g. to step it.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
