use super::*;
use crate::foundation::core::{CanvasSize, Rect};
use crate::logsheet::hours::HoursAudit;
use crate::trip::model::{DutyStatus, StopKind};

fn white(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![255; (w * h * 4) as usize]),
    }
}

fn scene(commands: Vec<DrawCommand>) -> LogSheetScene {
    LogSheetScene {
        canvas: CanvasSize::for_width(90).unwrap(),
        commands,
        audit: HoursAudit::default(),
    }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn template_is_stretched_over_canvas() {
    let mut r = CpuRasterizer::new(None).unwrap();
    let frame = r
        .rasterize(&scene(vec![DrawCommand::Template]), &white(9, 16))
        .unwrap();
    assert_eq!((frame.width, frame.height), (90, 160));
    assert_eq!(frame.data.len(), 90 * 160 * 4);
    assert!(close(frame.pixel(0, 0).unwrap(), [255, 255, 255, 255]));
    assert!(close(frame.pixel(89, 159).unwrap(), [255, 255, 255, 255]));
}

#[test]
fn bars_and_markers_are_filled() {
    let mut r = CpuRasterizer::new(None).unwrap();
    let marker = crate::logsheet::scene::marker_path(StopKind::Rest, Point::new(70.0, 120.0), 10.0);
    let frame = r
        .rasterize(
            &scene(vec![
                DrawCommand::Template,
                DrawCommand::Bar {
                    status: DutyStatus::Driving,
                    rect: Rect::new(10.0, 20.0, 50.0, 30.0),
                    color: Rgba8::rgb(0xef, 0x44, 0x44),
                },
                DrawCommand::Marker {
                    kind: StopKind::Rest,
                    path: marker,
                    color: Rgba8::rgb(0xdc, 0x26, 0x26),
                },
            ]),
            &white(9, 16),
        )
        .unwrap();

    assert!(close(frame.pixel(30, 25).unwrap(), [0xef, 0x44, 0x44, 255]));
    assert!(close(frame.pixel(60, 25).unwrap(), [255, 255, 255, 255]));
    assert!(close(frame.pixel(70, 120).unwrap(), [0xdc, 0x26, 0x26, 255]));
}

#[test]
fn stroked_circle_leaves_center_clear() {
    let mut r = CpuRasterizer::new(None).unwrap();
    let frame = r
        .rasterize(
            &scene(vec![
                DrawCommand::Template,
                DrawCommand::StrokeCircle {
                    center: Point::new(45.0, 80.0),
                    radius: 20.0,
                    width: 4.0,
                    color: Rgba8::rgb(0, 0, 255),
                },
            ]),
            &white(9, 16),
        )
        .unwrap();
    assert!(close(frame.pixel(45, 80).unwrap(), [255, 255, 255, 255]));
    assert!(close(frame.pixel(65, 80).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn text_without_font_is_skipped() {
    let mut r = CpuRasterizer::new(None).unwrap();
    assert!(!r.has_font());
    let frame = r
        .rasterize(
            &scene(vec![
                DrawCommand::Template,
                DrawCommand::Text {
                    field: crate::logsheet::scene::TextField::Driver,
                    text: "Sam".to_string(),
                    origin: Point::new(10.0, 40.0),
                    size_px: 20.0,
                    color: Rgba8::rgb(0, 0, 255),
                },
            ]),
            &white(9, 16),
        )
        .unwrap();
    assert!(
        frame
            .data
            .chunks_exact(4)
            .all(|px| close([px[0], px[1], px[2], px[3]], [255, 255, 255, 255]))
    );
}

#[test]
fn template_size_mismatch_is_a_render_error() {
    let mut r = CpuRasterizer::new(None).unwrap();
    let mut bad = white(9, 16);
    bad.rgba8_premul = Arc::new(vec![0; 8]);
    let err = r
        .rasterize(&scene(vec![DrawCommand::Template]), &bad)
        .unwrap_err();
    assert!(matches!(err, TriplogError::Render(_)));
}
