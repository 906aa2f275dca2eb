//! Raw RGBA8 frame streams.
//!
//! A stream is a plain concatenation of `width * height * 4` byte frames with
//! no header, the format produced by `ffmpeg -f rawvideo -pix_fmt rgba`.

use crate::error::MediaError;
use pixel_dither::Frame;
use std::io::{ErrorKind, Read, Write};

/// Reads fixed-size frames from any byte source.
pub struct FrameReader<R> {
    input: R,
    width: usize,
    height: usize,
    frames_read: u64,
}

impl<R: Read> FrameReader<R> {
    pub fn new(input: R, width: usize, height: usize) -> Result<Self, MediaError> {
        if width == 0 || height == 0 {
            return Err(MediaError::UnsupportedDimensions { width, height });
        }
        Ok(Self {
            input,
            width,
            height,
            frames_read: 0,
        })
    }

    pub fn frame_len(&self) -> usize {
        self.width * self.height * Frame::CHANNELS
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Next frame, or `None` on a clean end of stream.
    ///
    /// # Errors
    ///
    /// [`MediaError::TruncatedFrame`] if the stream ends inside a frame.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, MediaError> {
        let expected = self.frame_len();
        let mut data = vec![0u8; expected];
        let mut got = 0;

        while got < expected {
            match self.input.read(&mut data[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if got == 0 {
            tracing::debug!(frames = self.frames_read, "End of frame stream");
            return Ok(None);
        }
        if got < expected {
            return Err(MediaError::TruncatedFrame { got, expected });
        }

        self.frames_read += 1;
        Ok(Some(Frame::new(self.width, self.height, data)?))
    }
}

/// Writes rendered frames back out in the same raw layout.
pub struct FrameWriter<W> {
    output: W,
    frames_written: u64,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            frames_written: 0,
        }
    }

    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), MediaError> {
        self.output.write_all(frame.data())?;
        self.output.flush()?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}
