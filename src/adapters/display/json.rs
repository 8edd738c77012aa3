use std::io::{self, Write};

use crate::domain::AnalysisFrame;
use crate::ports::{RenderError, Renderer};

/// Writes each frame as one JSON document per line
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl JsonRenderer<io::Stdout> {
    pub fn stdout(pretty: bool) -> Self {
        Self::new(io::stdout(), pretty)
    }
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &AnalysisFrame) -> Result<(), RenderError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, frame)?;
        } else {
            serde_json::to_writer(&mut self.out, frame)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
