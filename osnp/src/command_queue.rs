//! Request/response scheduling of MAC commands.
//!
//! A node only ever has one MAC command in flight. [`CommandQueue`] holds the
//! commands waiting to be sent and the one awaiting its response. When a
//! command is dispatched with a transmission timeout, the queue arms a
//! one-shot timer through the [`Timer`] trait. The timer reports back with
//! [`CommandQueue::timeout_elapsed`], which yields a [`QueueEvent`] if the
//! command is still waiting for its response.
//!
//! Every dispatch gets a fresh [`DispatchId`], so a timer that fires for a
//! command that was already answered, or that was rescheduled and sent
//! again, is ignored.

use embedded_hal_async::delay::DelayNs;
use heapless::Deque;

use crate::config::MAX_PENDING_COMMANDS;
use crate::time::{Duration, Instant};

/// A command that can be scheduled on a [`CommandQueue`].
pub trait Command {
    /// How long to wait for the response before reporting a timeout.
    ///
    /// `None` means the command never times out.
    fn transmission_timeout(&self) -> Option<Duration>;
}

/// A one-shot timer service.
pub trait Timer {
    /// Arm a timer that reports `id` back to
    /// [`CommandQueue::timeout_elapsed`] after `after`.
    fn schedule(&mut self, after: Duration, id: DispatchId);
}

/// Identifies one dispatch of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchId(u32);

impl DispatchId {
    /// Return the raw value of the identifier.
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// What the queue reports back to its caller.
#[derive(Debug, PartialEq, Eq)]
pub enum QueueEvent<C> {
    /// The awaiting command did not get a response in time. It is released
    /// and handed back, retrying is up to the caller.
    TransmissionTimeout(C),
}

/// A queue of MAC commands with at most one command awaiting its response.
pub struct CommandQueue<C: Command, T: Timer, const N: usize> {
    pending: Deque<C, N>,
    awaiting: Option<(DispatchId, C)>,
    next_dispatch_id: u32,
    timer: T,
}

/// A [`CommandQueue`] holding up to `MAX_PENDING_COMMANDS` pending commands.
pub type DefaultCommandQueue<C, T> = CommandQueue<C, T, MAX_PENDING_COMMANDS>;

impl<C: Command, T: Timer, const N: usize> CommandQueue<C, T, N> {
    /// Create an empty queue that arms its timeouts on `timer`.
    pub fn new(timer: T) -> Self {
        Self {
            pending: Deque::new(),
            awaiting: None,
            next_dispatch_id: 0,
            timer,
        }
    }

    /// Append a command to the pending list.
    ///
    /// The command is not dispatched, see [`CommandQueue::dequeue`]. When the
    /// pending list is full, the command is handed back.
    pub fn queue(&mut self, command: C) -> Result<(), C> {
        self.pending.push_back(command).map_err(|command| {
            warn!("command queue: pending list is full");
            command
        })
    }

    /// Dispatch the next pending command.
    ///
    /// Returns `None` while a command is awaiting its response, or when
    /// nothing is pending.
    pub fn dequeue(&mut self) -> Option<&C> {
        if self.awaiting.is_some() {
            return None;
        }

        let command = self.pending.pop_front()?;

        let id = DispatchId(self.next_dispatch_id);
        self.next_dispatch_id = self.next_dispatch_id.wrapping_add(1);

        if let Some(timeout) = command.transmission_timeout() {
            debug!("command queue: dispatch {}, timeout in {} us", id.0, timeout.as_us());
            self.timer.schedule(timeout, id);
        } else {
            debug!("command queue: dispatch {}, no timeout", id.0);
        }

        self.awaiting = Some((id, command));
        self.awaiting()
    }

    /// Report that the timer armed for dispatch `id` fired.
    ///
    /// The awaiting command is released if it is the one that was dispatched
    /// with `id`. Anything else is a stale timer and is ignored.
    pub fn timeout_elapsed(&mut self, id: DispatchId) -> Option<QueueEvent<C>> {
        let current = matches!(&self.awaiting, Some((awaiting_id, _)) if *awaiting_id == id);

        if !current {
            trace!("command queue: ignoring stale timeout {}", id.0);
            return None;
        }

        info!("command queue: dispatch {} timed out", id.0);
        self.awaiting
            .take()
            .map(|(_, command)| QueueEvent::TransmissionTimeout(command))
    }

    /// Report that the device responded, releasing the awaiting command.
    pub fn device_responded(&mut self) -> Option<C> {
        self.awaiting.take().map(|(_, command)| command)
    }

    /// Move the awaiting command back to the front of the pending list.
    ///
    /// The timer of the earlier dispatch becomes stale. When the pending list
    /// is full, the command is released and handed back.
    pub fn reschedule_awaiting(&mut self) -> Result<(), C> {
        let Some((id, command)) = self.awaiting.take() else {
            return Ok(());
        };

        debug!("command queue: rescheduling dispatch {}", id.0);

        self.pending.push_front(command).map_err(|command| {
            warn!("command queue: no room to reschedule dispatch {}", id.0);
            command
        })
    }

    /// Return the command awaiting its response.
    pub fn awaiting(&self) -> Option<&C> {
        self.awaiting.as_ref().map(|(_, command)| command)
    }

    /// Returns `true` when no command is pending.
    ///
    /// The awaiting command is not taken into account.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Return the number of pending commands.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return the timer service.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Return the timer service.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

/// A timeout armed by a [`CommandQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    /// The dispatch the timeout belongs to.
    pub id: DispatchId,
    /// How long after the dispatch the timeout fires.
    pub after: Duration,
}

impl Timeout {
    /// Return the point in time the timeout fires, for a dispatch at `now`.
    pub fn deadline(&self, now: Instant) -> Instant {
        now + self.after
    }

    /// Wait until the timeout fires and return its dispatch id.
    pub async fn elapsed<D: DelayNs>(self, delay: &mut D) -> DispatchId {
        let us = self.after.as_us().clamp(0, u32::MAX as i64) as u32;
        delay.delay_us(us).await;
        self.id
    }
}

/// A [`Timer`] that stores the armed timeouts until the caller collects them.
///
/// Holds up to `N` timeouts, `N` must not be `0`. When full, the oldest one
/// is dropped: with a single command in flight, only the newest timeout can
/// still match.
#[derive(Debug)]
pub struct TimeoutList<const N: usize> {
    timeouts: Deque<Timeout, N>,
}

impl<const N: usize> TimeoutList<N> {
    const NOT_EMPTY: () = assert!(N > 0, "a TimeoutList needs room for one timeout");

    /// Create an empty list.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NOT_EMPTY;

        Self {
            timeouts: Deque::new(),
        }
    }

    /// Take the oldest armed timeout.
    pub fn pop(&mut self) -> Option<Timeout> {
        self.timeouts.pop_front()
    }

    /// Return the number of armed timeouts.
    pub fn len(&self) -> usize {
        self.timeouts.len()
    }

    /// Returns `true` when no timeout is armed.
    pub fn is_empty(&self) -> bool {
        self.timeouts.is_empty()
    }
}

impl<const N: usize> Default for TimeoutList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Timer for TimeoutList<N> {
    fn schedule(&mut self, after: Duration, id: DispatchId) {
        if self.timeouts.is_full() {
            self.timeouts.pop_front();
        }

        // Cannot fail, there is room now.
        let _ = self.timeouts.push_back(Timeout { id, after });
    }
}
