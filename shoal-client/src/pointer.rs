use shoal_core::{InputSource, Vector2D};
use shoal_shared::{PointerSegment, Position};

/// Replays a fixed pointer script: the pointer is "pressed" at a position for
/// a range of ticks and released otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointer {
    segments: Vec<PointerSegment>,
    last: Option<Position>,
}

impl ScriptedPointer {
    pub fn new(segments: Vec<PointerSegment>) -> Self {
        Self {
            segments,
            last: None,
        }
    }

    /// Position reported for the most recent poll.
    pub fn last(&self) -> Option<Position> {
        self.last
    }

    fn position_at(&self, tick: u64) -> Option<Position> {
        self.segments
            .iter()
            .find(|segment| segment.covers(tick))
            .map(|segment| segment.position)
    }
}

impl InputSource for ScriptedPointer {
    fn poll(&mut self, tick: u64) -> Option<Vector2D> {
        let position = self.position_at(tick);
        if position != self.last {
            match position {
                Some(p) => log::debug!("tick {}: pointer at ({:.1}, {:.1})", tick, p.x, p.y),
                None => log::debug!("tick {}: pointer released", tick),
            }
            self.last = position;
        }
        position.map(|p| Vector2D::new(p.x, p.y))
    }
}
