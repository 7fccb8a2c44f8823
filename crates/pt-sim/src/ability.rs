//! A use-item ability with an active window and a failure chance.

use pt_core::{AgentRng, SimTime};
use pt_patrol::ActionProvider;
use tracing::trace;

/// Stand-in for a character ability such as "use equipped item".
///
/// A request starts the ability unless it is still active from a previous
/// use or the per-agent roll fails.  Refusals are silent to the requester
/// and only counted here.
pub struct CooldownAbility {
    /// Seconds the ability stays active once started.
    duration:       f64,
    failure_chance: f64,
    rng:            AgentRng,
    now:            SimTime,
    active_until:   SimTime,
    pub performed:  u64,
    pub refused:    u64,
}

impl CooldownAbility {
    pub fn new(duration: f64, failure_chance: f64, rng: AgentRng) -> Self {
        Self {
            duration,
            failure_chance,
            rng,
            now: SimTime::ZERO,
            active_until: SimTime::ZERO,
            performed: 0,
            refused: 0,
        }
    }

    /// Tell the ability what time it is.  Call before each frame's requests.
    pub fn update(&mut self, now: SimTime) {
        self.now = now;
    }

    pub fn is_active(&self) -> bool {
        self.now < self.active_until
    }
}

impl ActionProvider for CooldownAbility {
    fn try_perform(&mut self) {
        if self.is_active() {
            self.refused += 1;
            trace!(now = %self.now, "ability busy; request dropped");
            return;
        }
        if self.failure_chance > 0.0 && self.rng.gen_bool(self.failure_chance) {
            self.refused += 1;
            trace!(now = %self.now, "ability failed to start");
            return;
        }
        self.performed += 1;
        self.active_until = self.now + self.duration;
    }
}
