use crate::config::MotorConfig;

use super::MotorUnderTest;

/// Result of one revolution confirmation. Only meaningful if the operator
/// turned the wheel exactly one mechanical revolution since the last reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MicrostepDiagnostic {
    pub motor: MotorUnderTest,
    pub steps: u32,
    pub revolutions: u32,
    pub inferred_microsteps: u32,
    pub configured_microsteps: u32,
}

impl MicrostepDiagnostic {
    pub fn matches(&self) -> bool {
        self.inferred_microsteps == self.configured_microsteps
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorSession {
    pub motor: MotorUnderTest,
    pub steps_accumulated: u32,
    pub revolutions_confirmed: u32,
    pub last_diagnostic: Option<MicrostepDiagnostic>,
}

impl Default for MotorSession {
    fn default() -> Self {
        Self::new(MotorUnderTest::FrontLeft)
    }
}

impl MotorSession {
    pub const fn new(motor: MotorUnderTest) -> Self {
        Self {
            motor,
            steps_accumulated: 0,
            revolutions_confirmed: 0,
            last_diagnostic: None,
        }
    }

    pub fn reset_counters(&mut self) {
        self.steps_accumulated = 0;
        self.revolutions_confirmed = 0;
    }

    pub fn select(&mut self, motor: MotorUnderTest) {
        if motor != self.motor {
            self.motor = motor;
            self.reset_counters();
            self.last_diagnostic = None;
        }
    }

    pub fn record_steps(&mut self, steps: u32) {
        self.steps_accumulated = self.steps_accumulated.saturating_add(steps);
    }

    pub fn confirm_revolution(&mut self, config: &MotorConfig) -> MicrostepDiagnostic {
        self.revolutions_confirmed = self.revolutions_confirmed.saturating_add(1);
        let full_steps = config
            .steps_per_rev
            .saturating_mul(self.revolutions_confirmed)
            .max(1);
        let diagnostic = MicrostepDiagnostic {
            motor: self.motor,
            steps: self.steps_accumulated,
            revolutions: self.revolutions_confirmed,
            inferred_microsteps: self.steps_accumulated / full_steps,
            configured_microsteps: config.microsteps,
        };
        self.last_diagnostic = Some(diagnostic);
        self.reset_counters();
        diagnostic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_nudge_per_revolution_matches_configuration() {
        let config = MotorConfig::default();
        let mut session = MotorSession::default();
        session.record_steps(config.nudge_steps);

        let diagnostic = session.confirm_revolution(&config);
        assert_eq!(diagnostic.steps, 1600);
        assert_eq!(diagnostic.revolutions, 1);
        assert_eq!(diagnostic.inferred_microsteps, 8);
        assert!(diagnostic.matches());
        assert_eq!(session.steps_accumulated, 0);
        assert_eq!(session.revolutions_confirmed, 0);
        assert_eq!(session.last_diagnostic, Some(diagnostic));
    }

    #[test]
    fn too_many_nudges_flag_a_mismatch() {
        let config = MotorConfig::default();
        let mut session = MotorSession::default();
        session.record_steps(config.nudge_steps);
        session.record_steps(config.nudge_steps);

        let diagnostic = session.confirm_revolution(&config);
        assert_eq!(diagnostic.inferred_microsteps, 16);
        assert!(!diagnostic.matches());
    }

    #[test]
    fn switching_motor_resets_counters_and_diagnostic() {
        let config = MotorConfig::default();
        let mut session = MotorSession::default();
        session.record_steps(400);
        let _ = session.confirm_revolution(&config);
        session.record_steps(800);

        session.select(MotorUnderTest::RearLeft);
        assert_eq!(session.motor, MotorUnderTest::RearLeft);
        assert_eq!(session.steps_accumulated, 0);
        assert_eq!(session.last_diagnostic, None);
    }

    #[test]
    fn confirming_without_steps_reports_zero() {
        let mut session = MotorSession::default();
        let diagnostic = session.confirm_revolution(&MotorConfig::default());
        assert_eq!(diagnostic.inferred_microsteps, 0);
        assert!(!diagnostic.matches());
    }
}
