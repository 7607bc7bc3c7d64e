use glam::{Vec2, Vec3};
use registration_viewer::core::{
    AxisMode, Canvas, DrawOp, Figure, FrameFormat, FrameRecorder, HeadlessSurface, Marker, PointGeometry, PointScene,
    SeriesStyle, Visualizer,
};
use registration_viewer::demo;
use registration_viewer::{
    IterationObserver, ObserverOptions, PlaneObserver, PointSet, RenderSurface, SceneObserver, WindowDimensions,
};
use tempfile::TempDir;

const BLUE: SeriesStyle = SeriesStyle::new([0, 0, 255], Marker::Circle, 3);

// ============================================================================
// Figure
// ============================================================================

#[test]
fn test_figure_accepts_row_data() {
    let rows: Vec<[f32; 2]> = vec![[0.0, 0.0], [2.0, 1.0]];
    let mut figure = Figure::new(200, 100);
    figure.plot(rows.as_slice(), "rows", BLUE);

    assert_eq!(figure.series()[0].points, vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0)]);
}

#[test]
fn test_figure_legend_only_after_request() {
    let mut figure = Figure::new(200, 100);
    figure.plot(&vec![Vec2::ZERO], "a", BLUE);
    assert!(figure.legend_entries().is_empty());

    figure.legend();
    assert_eq!(figure.legend_entries(), vec![("a", BLUE)]);
}

#[test]
fn test_figure_rasterize_with_equal_axes() {
    let mut figure = Figure::new(240, 180);
    figure.set_axis_equal();
    figure.plot(&vec![Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)], "a", BLUE);
    figure.legend();

    let frame = figure.rasterize().unwrap();
    assert_eq!(figure.axis_mode(), AxisMode::Equal);
    assert_eq!(frame.dimensions(), (240, 180));
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    assert!(frame.pixels().chunks_exact(4).any(|px| px[2] > 200 && px[0] < 60 && px[1] < 60));
}

// ============================================================================
// Canvas, scene and recorder
// ============================================================================

#[test]
fn test_canvas_ops_apply_in_order() {
    let frame = Canvas::new(8, 8)
        .draw(DrawOp::Clear([0, 0, 0, 255]))
        .draw(DrawOp::Disc { cx: 4, cy: 4, radius: 2, color: [255, 0, 0, 255] })
        .draw(DrawOp::Pixel { x: 4, y: 4, color: [0, 255, 0, 255] })
        .into_frame()
        .unwrap();

    assert_eq!(frame.pixel(4, 4), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(4, 2), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn test_scene_geometry_from_row_data() {
    let rows: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
    let mut scene = PointScene::new();
    let id = scene.add_geometry(PointGeometry::new(rows.as_slice()));

    assert_eq!(scene.geometry(id).unwrap().points().points()[1], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(scene.bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0))));
}

#[test]
fn test_recorder_writes_png_and_jpg() {
    let dir = TempDir::new().unwrap();
    let frame = Canvas::new(4, 4).draw(DrawOp::Clear([10, 20, 30, 255])).into_frame().unwrap();

    let png = FrameRecorder::new(dir.path().join("nested"), FrameFormat::Png)
        .save(&frame, 7)
        .unwrap();
    let jpg = FrameRecorder::new(dir.path(), FrameFormat::Jpeg).save(&frame, 12).unwrap();

    assert!(png.ends_with("nested/image_0007.png"));
    assert!(jpg.ends_with("image_0012.jpg"));
    assert_eq!(image::open(&png).unwrap().to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);
    let decoded = image::open(&jpg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn test_visualizer_on_headless_surface() {
    let mut vis = Visualizer::create(WindowDimensions::new(32, 24), "headless", |dims, _| {
        Ok(HeadlessSurface::new(dims))
    })
    .unwrap();
    vis.add_geometry(PointGeometry::new(&vec![Vec3::ZERO, Vec3::ONE]));
    vis.update_renderer().unwrap();

    let surface = vis.surface().unwrap();
    assert_eq!(surface.presented(), 1);
    assert_eq!(surface.dimensions(), WindowDimensions::new(32, 24));
    assert!(vis.destroy_window());
}

// ============================================================================
// Headless observers driven by the scripted loop
// ============================================================================

#[test]
fn test_plane_demo_converges_headless() {
    let case = demo::plane_case(60);
    let options = ObserverOptions::default().window_size(160, 120);
    let mut observer = PlaneObserver::headless(&case.source, &case.target, &options).unwrap();

    let frames = demo::run_registration(&mut observer, demo::rigid_steps_2d(case.truth, 6)).unwrap();

    assert_eq!(frames, 6);
    assert!(demo::mean_residual_2d(observer.result(), &case.target) < 1e-4);
    assert_eq!(observer.surface().unwrap().presented(), 7);
    observer.close().unwrap();
}

#[test]
fn test_scene_demo_saves_frames_headless() {
    let dir = TempDir::new().unwrap();
    let case = demo::scene_case(80);
    let options = ObserverOptions::default()
        .save_frames(true)
        .frame_dir(dir.path())
        .window_size(96, 72)
        .point_size(2.0);
    let mut observer = SceneObserver::headless(&case.source, &case.target, &options).unwrap();

    let frames = demo::run_registration(&mut observer, demo::rigid_steps_3d(case.truth, 4)).unwrap();
    observer.close().unwrap();

    assert_eq!(frames, 4);
    assert!(demo::mean_residual_3d(observer.result(), &case.target) < 1e-3);
    for index in 0..4 {
        assert!(dir.path().join(format!("image_{:04}.jpg", index)).exists());
    }
}

#[test]
fn test_single_point_clouds_are_valid() {
    let src = PointSet::new(vec![Vec3::ONE]);
    let tgt = PointSet::new(vec![Vec3::ONE]);
    let mut observer = SceneObserver::headless(&src, &tgt, &ObserverOptions::default().window_size(16, 16)).unwrap();

    observer.on_iteration(&registration_viewer::traits::Identity).unwrap();
    assert_eq!(observer.result(), &src);
}
