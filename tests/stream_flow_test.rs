//! Raw frame stream flow through the tick scheduler.

mod common;

use common::fixtures;
use pixel_dither::{DitherMethod, FrameRenderer, PixelSettings};
use pixelart_studio::error::{MediaError, StreamError};
use pixelart_studio::media::{FrameReader, FrameWriter};
use pixelart_studio::models::PaletteLibrary;
use pixelart_studio::services::FrameScheduler;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

const WIDTH: usize = 24;
const HEIGHT: usize = 16;

fn stream_settings() -> PixelSettings {
    PixelSettings {
        pixel_size: 4,
        palette_id: "gameboy".to_string(),
        dither_method: DitherMethod::FloydSteinberg,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_stream_file_to_file() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::raw_stream(6, WIDTH, HEIGHT);
    let output_path = dir.path().join("out.rgba");

    let (_sender, receiver) = watch::channel(stream_settings());
    let library = Arc::new(PaletteLibrary::builtin());
    let scheduler = FrameScheduler::new(240.0, library.clone(), receiver).unwrap();

    let reader = FrameReader::new(Cursor::new(input.clone()), WIDTH, HEIGHT).unwrap();
    let writer = FrameWriter::new(std::fs::File::create(&output_path).unwrap());
    let stats = scheduler.run(reader, writer).await.unwrap();
    assert_eq!(stats.rendered, 6);

    let output = std::fs::read(&output_path).unwrap();
    assert_eq!(output.len(), input.len());

    // Each output frame matches a direct render of its source frame
    let palette = library.resolve("gameboy");
    let mut renderer = FrameRenderer::new();
    let mut sources = FrameReader::new(Cursor::new(input), WIDTH, HEIGHT).unwrap();
    let mut rendered = FrameReader::new(Cursor::new(output), WIDTH, HEIGHT).unwrap();
    while let Some(source) = sources.read_frame().unwrap() {
        let expected = renderer
            .render_frame(&source, &stream_settings(), palette)
            .unwrap();
        let actual = rendered.read_frame().unwrap().unwrap();
        assert_eq!(actual, expected);
        common::assert_palette_only(&actual, palette);
        common::assert_blocky(&actual, 4);
    }
    assert!(rendered.read_frame().unwrap().is_none());
}

#[tokio::test]
async fn test_settings_snapshot_taken_per_frame() {
    let (sender, receiver) = watch::channel(stream_settings());
    sender
        .send(PixelSettings {
            dither_method: DitherMethod::None,
            palette_id: "noir".to_string(),
            ..stream_settings()
        })
        .unwrap();

    let library = Arc::new(PaletteLibrary::builtin());
    let scheduler = FrameScheduler::new(240.0, library.clone(), receiver).unwrap();
    let reader =
        FrameReader::new(Cursor::new(fixtures::raw_stream(2, WIDTH, HEIGHT)), WIDTH, HEIGHT)
            .unwrap();
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("out.rgba");
    let writer = FrameWriter::new(std::fs::File::create(&output_path).unwrap());

    scheduler.run(reader, writer).await.unwrap();

    let output = std::fs::read(&output_path).unwrap();
    let mut frames = FrameReader::new(Cursor::new(output), WIDTH, HEIGHT).unwrap();
    while let Some(frame) = frames.read_frame().unwrap() {
        common::assert_palette_only(&frame, library.resolve("noir"));
    }
}

#[tokio::test]
async fn test_truncated_stream_reports_error() {
    let mut input = fixtures::raw_stream(2, WIDTH, HEIGHT);
    input.truncate(input.len() - 10);

    let (_sender, receiver) = watch::channel(stream_settings());
    let scheduler =
        FrameScheduler::new(240.0, Arc::new(PaletteLibrary::builtin()), receiver).unwrap();
    let reader = FrameReader::new(Cursor::new(input), WIDTH, HEIGHT).unwrap();

    let result = scheduler.run(reader, FrameWriter::new(Vec::new())).await;
    match result {
        Err(StreamError::Media(MediaError::TruncatedFrame { got, expected })) => {
            assert_eq!(expected, WIDTH * HEIGHT * 4);
            assert_eq!(got, expected - 10);
        }
        other => panic!("expected truncated frame error, got {other:?}"),
    }
}
