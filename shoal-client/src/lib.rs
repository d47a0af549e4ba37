//! Headless driver for the shoal simulation: builds a scenario, replays a
//! pointer script as input and streams frames as JSON lines.

pub mod output;
pub mod pointer;
pub mod scenario;

use std::io::Write;

use anyhow::{Context, Result};
use shoal_core::Simulation;
use shoal_shared::{SimulationSettings, StatusReport};

use output::JsonLinesRenderer;
use pointer::ScriptedPointer;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub ticks: u64,
    /// Write a frame after every n-th tick; 0 writes none.
    pub frame_every: u64,
    /// Log a status line after every n-th tick; 0 logs none.
    pub status_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ticks: 600,
            frame_every: 1,
            status_every: 60,
        }
    }
}

pub struct ShoalClient<W: Write> {
    simulation: Simulation,
    pointer: ScriptedPointer,
    renderer: JsonLinesRenderer<W>,
    options: RunOptions,
}

impl<W: Write> ShoalClient<W> {
    pub fn new(settings: &SimulationSettings, output: W, options: RunOptions) -> Self {
        let (simulation, scenario) = scenario::build(settings);
        log::info!(
            "Scenario ready: {} prey flocks, {} agents in total",
            scenario.prey.len(),
            simulation.agent_count()
        );

        Self {
            simulation,
            pointer: ScriptedPointer::new(settings.pointer.clone()),
            renderer: JsonLinesRenderer::new(output),
            options,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            tick: self.simulation.tick_count(),
            agent_count: self.simulation.agent_count(),
            boosting_predators: self.simulation.views().filter(|v| v.boosting).count(),
            target_active: self.pointer.last().is_some(),
        }
    }

    /// Runs the configured number of ticks and returns the output sink.
    pub fn run(mut self) -> Result<W> {
        log::info!("Running {} ticks...", self.options.ticks);

        for _ in 0..self.options.ticks {
            self.simulation.step_with(&mut self.pointer);
            let tick = self.simulation.tick_count();

            if is_due(tick, self.options.frame_every) {
                self.simulation
                    .render(&mut self.renderer)
                    .with_context(|| format!("Failed to render tick {}", tick))?;
            }

            if is_due(tick, self.options.status_every) {
                let status = self.status();
                log::info!(
                    "tick {}: {} agents, {} boosting, pointer {}",
                    status.tick,
                    status.agent_count,
                    status.boosting_predators,
                    if status.target_active { "down" } else { "up" }
                );
            }
        }

        self.renderer.flush()?;
        log::info!(
            "Done after {} ticks, {} frames written",
            self.simulation.tick_count(),
            self.renderer.frames_written()
        );
        Ok(self.renderer.into_inner())
    }
}

fn is_due(tick: u64, every: u64) -> bool {
    every != 0 && tick % every == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_due() {
        assert!(!is_due(5, 0));
        assert!(is_due(6, 3));
        assert!(!is_due(7, 3));
    }
}
