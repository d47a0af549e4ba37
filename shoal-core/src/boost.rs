//! Tick-counted speed boost for predators.
//!
//! `Idle -> Boosting -> Cooldown -> Idle`. Only one boost can be active at a
//! time; requests outside `Idle` are dropped.

use crate::{AgentConfig, PredatorConfig};

/// The pair of limits a boost trades against each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub max_speed: f32,
    pub max_force: f32,
}

impl Envelope {
    pub fn of(config: &AgentConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            max_force: config.max_force,
        }
    }

    fn restore(&self, config: &mut AgentConfig) {
        config.max_speed = self.max_speed;
        config.max_force = self.max_force;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostPhase {
    Idle,
    Boosting,
    Cooldown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoostState {
    #[default]
    Idle,
    Boosting {
        remaining: u32,
        /// Envelope to put back when the boost ends.
        baseline: Envelope,
    },
    Cooldown {
        remaining: u32,
    },
}

impl BoostState {
    pub fn phase(&self) -> BoostPhase {
        match self {
            BoostState::Idle => BoostPhase::Idle,
            BoostState::Boosting { .. } => BoostPhase::Boosting,
            BoostState::Cooldown { .. } => BoostPhase::Cooldown,
        }
    }

    /// Ticks left in the current phase; zero when idle.
    pub fn remaining(&self) -> u32 {
        match self {
            BoostState::Idle => 0,
            BoostState::Boosting { remaining, .. } | BoostState::Cooldown { remaining } => {
                *remaining
            }
        }
    }

    pub fn is_boosting(&self) -> bool {
        matches!(self, BoostState::Boosting { .. })
    }

    /// Starts a boost if idle, rescaling `config` in place.
    ///
    /// Returns whether the boost started.
    pub fn trigger(&mut self, config: &mut AgentConfig, params: &PredatorConfig) -> bool {
        if !matches!(self, BoostState::Idle) {
            return false;
        }

        // A non-positive strength would divide by zero; treat it as no boost.
        let strength = if params.boost_strength > 0.0 {
            params.boost_strength
        } else {
            1.0
        };

        let baseline = Envelope::of(config);
        config.max_speed *= strength;
        config.max_force /= strength;
        *self = BoostState::Boosting {
            remaining: params.boost_duration_ticks,
            baseline,
        };

        log::debug!(
            "boost started: max_speed {} -> {} for {} ticks",
            baseline.max_speed,
            config.max_speed,
            params.boost_duration_ticks
        );
        true
    }

    /// Counts the current phase down by one tick and performs any transition
    /// that falls due. Returns the phase entered, if it changed.
    pub fn advance(
        &mut self,
        config: &mut AgentConfig,
        params: &PredatorConfig,
    ) -> Option<BoostPhase> {
        match *self {
            BoostState::Idle => None,
            BoostState::Boosting {
                remaining,
                baseline,
            } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    baseline.restore(config);
                    *self = BoostState::Cooldown {
                        remaining: params.boost_cooldown_ticks,
                    };
                    log::debug!(
                        "boost ended: cooling down for {} ticks",
                        params.boost_cooldown_ticks
                    );
                    Some(BoostPhase::Cooldown)
                } else {
                    *self = BoostState::Boosting {
                        remaining,
                        baseline,
                    };
                    None
                }
            }
            BoostState::Cooldown { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    *self = BoostState::Idle;
                    log::debug!("boost ready");
                    Some(BoostPhase::Idle)
                } else {
                    *self = BoostState::Cooldown { remaining };
                    None
                }
            }
        }
    }
}
