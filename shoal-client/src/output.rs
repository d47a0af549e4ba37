use std::io::Write;

use anyhow::{Context, Result};
use shoal_core::{AgentView, Renderer};
use shoal_shared::{AgentFrame, FrameUpdate, Position};

/// Writes one JSON object per rendered tick, newline separated.
pub struct JsonLinesRenderer<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush frame output")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub fn frame(tick: u64, agents: &[AgentView]) -> FrameUpdate {
    FrameUpdate {
        tick,
        agents: agents
            .iter()
            .map(|view| AgentFrame {
                flock: view.flock.0,
                position: Position::new(view.position.x, view.position.y),
                heading: view.heading,
                size: view.size,
                color: [view.color.r, view.color.g, view.color.b],
                predator: view.predator,
                boosting: view.boosting,
            })
            .collect(),
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    type Error = anyhow::Error;

    fn render(&mut self, tick: u64, agents: &[AgentView]) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &frame(tick, agents))
            .with_context(|| format!("Failed to serialize frame for tick {}", tick))?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write frame")?;
        self.frames_written += 1;
        Ok(())
    }
}
