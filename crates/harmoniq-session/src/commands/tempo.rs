use harmoniq_history::{Command, CommandError};

use crate::session::Session;

/// Changes the session tempo. Derived time values are recomputed by the
/// history notification that follows.
#[derive(Debug, Clone)]
pub struct SetTempoCommand {
    tempo: f32,
    previous: Option<f32>,
}

impl SetTempoCommand {
    pub fn new(tempo: f32) -> Self {
        Self {
            tempo,
            previous: None,
        }
    }
}

impl Command<Session> for SetTempoCommand {
    fn name(&self) -> &str {
        "Set tempo"
    }

    fn redo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(CommandError::Invalid("tempo must be positive"));
        }
        let scale = session.time_scale_mut();
        self.previous = Some(scale.tempo);
        scale.tempo = self.tempo;
        Ok(())
    }

    fn undo(&mut self, session: &mut Session) -> Result<(), CommandError> {
        let previous = self
            .previous
            .ok_or(CommandError::Invalid("tempo was never changed"))?;
        session.time_scale_mut().tempo = previous;
        Ok(())
    }
}
