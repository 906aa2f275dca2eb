//! Media collaborators around the pipeline: PNG stills and raw RGBA streams.

pub mod png_io;
pub mod raw_stream;

pub use png_io::{decode_png, default_output_name, encode_png, output_name_at};
pub use raw_stream::{FrameReader, FrameWriter};
