/// Coalesces poll triggers (timer tick, manual poke) around a single
/// in-flight cycle. A trigger arriving mid-cycle queues at most one
/// immediate follow-up; further triggers collapse into it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct PollExecutionState {
    poll_requested: bool,
    in_flight: bool,
    queued: bool,
}

impl PollExecutionState {
    pub(super) fn request_poll(&mut self) -> bool {
        if self.in_flight {
            self.queued = true;
            return false;
        }
        if self.poll_requested {
            return false;
        }
        self.poll_requested = true;
        true
    }

    pub(super) fn start_poll(&mut self) -> bool {
        if self.in_flight || !self.poll_requested {
            return false;
        }
        self.poll_requested = false;
        self.in_flight = true;
        true
    }

    /// Marks the in-flight cycle finished; returns true when a queued
    /// trigger should run immediately.
    pub(super) fn finish_poll(&mut self) -> bool {
        self.in_flight = false;
        if self.queued {
            self.queued = false;
            self.poll_requested = true;
            return true;
        }
        false
    }

    pub(super) fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::PollExecutionState;

    #[test]
    fn triggers_during_flight_coalesce_into_one_followup() {
        let mut state = PollExecutionState::default();

        assert!(state.request_poll());
        assert!(state.start_poll());
        assert!(state.in_flight());

        assert!(!state.request_poll());
        assert!(!state.request_poll());
        assert!(!state.start_poll());

        assert!(state.finish_poll());
        assert!(!state.in_flight());
        assert!(state.start_poll());

        assert!(!state.finish_poll());
        assert!(!state.start_poll());
    }
}
