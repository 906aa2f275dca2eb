//! Frame-tick scheduler for raw video streams.
//!
//! Ticks at a fixed rate. On each tick, if no render is in flight, the next
//! source frame is rendered on a blocking worker with a settings snapshot
//! taken at that moment. Ticks that arrive while a render is running are
//! skipped, never queued.

use crate::error::{MediaError, StreamError};
use crate::media::{FrameReader, FrameWriter};
use crate::models::PaletteLibrary;
use pixel_dither::{FrameRenderer, Palette, PixelSettings};
use std::io::{ErrorKind, Read, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_FPS: f64 = 30.0;

/// Counters reported when a stream finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames rendered and written
    pub rendered: u64,
    /// Ticks skipped because a render was still running
    pub skipped: u64,
    /// Frames dropped because rendering failed
    pub failed: u64,
}

/// How one worker step ended
enum Step {
    Rendered,
    Failed,
    EndOfStream,
    OutputClosed,
}

/// Everything a render needs, moved onto the blocking worker and back.
///
/// The renderer keeps its scratch buffers between frames this way.
struct Job<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
    renderer: FrameRenderer,
}

impl<R: Read, W: Write> Job<R, W> {
    fn step(&mut self, settings: &PixelSettings, palette: &Palette) -> Result<Step, StreamError> {
        let Some(frame) = self.reader.read_frame()? else {
            return Ok(Step::EndOfStream);
        };

        let rendered = match self.renderer.render_frame(&frame, settings, palette) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!(error = %e, "Frame render failed, dropping frame");
                return Ok(Step::Failed);
            }
        };

        match self.writer.write_frame(&rendered) {
            Ok(()) => Ok(Step::Rendered),
            Err(MediaError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("Output closed");
                Ok(Step::OutputClosed)
            }
            Err(e) => Err(e.into()),
        }
    }
}

type InFlight<R, W> = JoinHandle<(Job<R, W>, Result<Step, StreamError>)>;

pub struct FrameScheduler {
    period: Duration,
    palettes: Arc<PaletteLibrary>,
    settings: watch::Receiver<PixelSettings>,
}

impl FrameScheduler {
    /// # Errors
    ///
    /// [`StreamError::InvalidFps`] unless `fps` is finite, positive, and
    /// gives a representable non-zero tick period.
    pub fn new(
        fps: f64,
        palettes: Arc<PaletteLibrary>,
        settings: watch::Receiver<PixelSettings>,
    ) -> Result<Self, StreamError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(StreamError::InvalidFps(fps));
        }
        let period = Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|_| StreamError::InvalidFps(fps))?;
        if period.is_zero() {
            return Err(StreamError::InvalidFps(fps));
        }

        Ok(Self {
            period,
            palettes,
            settings,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive frames from `reader` to `writer` until the source ends or the
    /// output is closed.
    ///
    /// # Errors
    ///
    /// Read failures (including a truncated trailing frame) and write
    /// failures other than a closed pipe end the stream with an error.
    pub async fn run<R, W>(
        mut self,
        reader: FrameReader<R>,
        writer: FrameWriter<W>,
    ) -> Result<StreamStats, StreamError>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let mut stats = StreamStats::default();
        let mut idle = Some(Job {
            reader,
            writer,
            renderer: FrameRenderer::new(),
        });
        let mut in_flight: Option<InFlight<R, W>> = None;

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            if let Some(handle) = in_flight.take() {
                if !handle.is_finished() {
                    stats.skipped += 1;
                    tracing::trace!(skipped = stats.skipped, "Render in flight, skipping tick");
                    in_flight = Some(handle);
                    continue;
                }

                let (job, step) = handle
                    .await
                    .map_err(|e| StreamError::Worker(e.to_string()))?;
                match step? {
                    Step::Rendered => stats.rendered += 1,
                    Step::Failed => stats.failed += 1,
                    Step::EndOfStream | Step::OutputClosed => break,
                }
                idle = Some(job);
            }

            let Some(mut job) = idle.take() else {
                break;
            };
            let settings = self.snapshot();
            let palette = self.palettes.resolve(&settings.palette_id).clone();
            in_flight = Some(tokio::task::spawn_blocking(move || {
                let step = job.step(&settings, &palette);
                (job, step)
            }));
        }

        tracing::info!(
            rendered = stats.rendered,
            skipped = stats.skipped,
            failed = stats.failed,
            "Stream finished"
        );
        Ok(stats)
    }

    /// Copy of the current settings, taken once per frame
    fn snapshot(&mut self) -> PixelSettings {
        if self.settings.has_changed().unwrap_or(false) {
            let settings = self.settings.borrow_and_update().clone();
            tracing::debug!(
                pixel_size = settings.pixel_size,
                palette_id = %settings.palette_id,
                dither_method = %settings.dither_method,
                "Using updated settings"
            );
            settings
        } else {
            self.settings.borrow().clone()
        }
    }
}
