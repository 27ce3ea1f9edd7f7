use crate::input::StickEdges;

/// Two-choice prompt. "Yes" is drawn on the left, so stick left selects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    yes: bool,
}

impl ConfirmPrompt {
    pub const fn defaulting_to(yes: bool) -> Self {
        Self { yes }
    }

    pub fn is_yes(&self) -> bool {
        self.yes
    }

    /// Returns true when the choice changed.
    pub fn steer(&mut self, stick: &StickEdges) -> bool {
        let before = self.yes;
        if stick.left {
            self.yes = true;
        } else if stick.right {
            self.yes = false;
        }
        before != self.yes
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TelemetryView {
    deadline_ms: u64,
}

impl TelemetryView {
    pub fn starting_at(now_ms: u64, duration_ms: u64) -> Self {
        Self {
            deadline_ms: now_ms.saturating_add(duration_ms),
        }
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Whole seconds left, rounded up.
    pub fn seconds_remaining(&self, now_ms: u64) -> u32 {
        let left = self.deadline_ms.saturating_sub(now_ms);
        left.div_ceil(1000) as u32
    }
}
