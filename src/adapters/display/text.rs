//! Plain-text frame renderer
//!
//! Prints the statistics panel and, optionally, the excursion list:
//!
//! ```text
//! MA EXCURSION STATISTICS
//! (20 Recent Excursions)
//! TOTAL:
//!   Avg: 23.4 points
//!   Med: 19.0 points
//! UP:
//! ...
//! ```

use std::io::{self, Write};

use crate::domain::{AnalysisFrame, StatisticsReport, StatisticsSnapshot};
use crate::ports::{RenderError, Renderer};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct TextRenderer<W: Write> {
    out: W,
    show_excursions: bool,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout(show_excursions: bool) -> Self {
        Self::new(io::stdout(), show_excursions)
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, show_excursions: bool) -> Self {
        Self { out, show_excursions }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, title: &str, snapshot: &StatisticsSnapshot) -> io::Result<()> {
        writeln!(self.out, "{}:", title)?;
        writeln!(self.out, "  Avg: {:.1} points", snapshot.average)?;
        writeln!(self.out, "  Med: {:.1} points", snapshot.median)
    }

    fn write_statistics(&mut self, stats: &StatisticsReport) -> io::Result<()> {
        writeln!(self.out, "MA EXCURSION STATISTICS")?;
        writeln!(self.out, "{}", stats.caption())?;
        self.write_block("TOTAL", &stats.all)?;
        self.write_block("UP", &stats.up)?;
        self.write_block("DOWN", &stats.down)
    }

    fn write_excursions(&mut self, frame: &AnalysisFrame) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} bars, {} crosses, {} excursions",
            frame.bars,
            frame.crossings.len(),
            frame.records.len()
        )?;
        // One label per kept record, in record order
        for (record, label) in frame.records.iter().zip(&frame.labels) {
            writeln!(
                self.out,
                "  {}  {:<4} {:>8.1}  (extreme {})  {}",
                record.cross_time.format(TIME_FORMAT),
                record.direction.to_string(),
                record.magnitude,
                record.extreme_time.format(TIME_FORMAT),
                label.object_name(),
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &AnalysisFrame) -> Result<(), RenderError> {
        self.write_statistics(&frame.statistics)?;
        if self.show_excursions {
            self.write_excursions(frame)?;
        }
        if let Some(alert) = &frame.alert {
            writeln!(
                self.out,
                "ALERT: {} excursion {:.1} points (cross {})",
                alert.direction,
                alert.magnitude,
                alert.cross_time.format(TIME_FORMAT)
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
