use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

// --- Construction ---

#[test]
fn default_matches_html_canvas_size() {
    let canvas = Canvas::default();
    assert_eq!(canvas.dimensions(), (300, 150));
}

#[test]
fn new_canvas_is_transparent() {
    let canvas = Canvas::new(4, 3);
    assert_eq!(canvas.pixel(0, 0), Some(CLEAR));
    assert_eq!(canvas.pixel(3, 2), Some(CLEAR));
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let canvas = Canvas::new(4, 3);
    assert_eq!(canvas.pixel(4, 0), None);
    assert_eq!(canvas.pixel(0, 3), None);
}

// --- Sizing ---

#[test]
fn set_size_clears_contents() {
    let mut canvas = Canvas::new(2, 2);
    canvas.draw_image(&solid(2, 2, [255, 0, 0, 255]), 0, 0);
    canvas.set_size(2, 2);
    assert_eq!(canvas.pixel(1, 1), Some(CLEAR));
}

#[test]
fn resize_to_same_size_keeps_contents() {
    let mut canvas = Canvas::new(2, 2);
    canvas.draw_image(&solid(2, 2, [0, 255, 0, 255]), 0, 0);
    assert!(!canvas.resize_to(2, 2));
    assert_eq!(canvas.pixel(0, 0), Some([0, 255, 0, 255]));
}

#[test]
fn resize_to_new_size_reallocates() {
    let mut canvas = Canvas::default();
    assert!(canvas.resize_to(100, 80));
    assert_eq!(canvas.dimensions(), (100, 80));
    assert!(canvas.resize_to(50, 50));
    assert_eq!((canvas.width(), canvas.height()), (50, 50));
}

// --- Drawing ---

#[test]
fn draw_image_at_origin_copies_pixels() {
    let mut canvas = Canvas::new(3, 3);
    canvas.draw_image(&solid(2, 2, [10, 20, 30, 255]), 0, 0);
    assert_eq!(canvas.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(canvas.pixel(1, 1), Some([10, 20, 30, 255]));
    assert_eq!(canvas.pixel(2, 2), Some(CLEAR));
}

#[test]
fn draw_image_clips_overflow() {
    let mut canvas = Canvas::new(2, 2);
    canvas.draw_image(&solid(5, 5, [1, 2, 3, 255]), 1, 1);
    assert_eq!(canvas.pixel(0, 0), Some(CLEAR));
    assert_eq!(canvas.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(canvas.dimensions(), (2, 2));
}

#[test]
fn draw_image_negative_offset_clips_leading_edge() {
    let mut canvas = Canvas::new(2, 2);
    canvas.draw_image(&solid(2, 2, [9, 9, 9, 255]), -1, -1);
    assert_eq!(canvas.pixel(0, 0), Some([9, 9, 9, 255]));
    assert_eq!(canvas.pixel(1, 1), Some(CLEAR));
}

#[test]
fn transparent_bitmap_leaves_surface_untouched() {
    let mut canvas = Canvas::new(1, 1);
    canvas.draw_image(&solid(1, 1, [200, 100, 50, 255]), 0, 0);
    canvas.draw_image(&solid(1, 1, CLEAR), 0, 0);
    assert_eq!(canvas.pixel(0, 0), Some([200, 100, 50, 255]));
}

// --- Snapshot ---

#[test]
fn save_png_round_trips_dimensions() {
    let dir = std::env::temp_dir().join(format!("canvas-snapshot-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join("frame.png");

    let mut canvas = Canvas::new(7, 5);
    canvas.draw_image(&solid(7, 5, [0, 0, 255, 255]), 0, 0);
    canvas.save_png(&path).expect("snapshot should save");

    let loaded = image::open(&path).expect("snapshot should load").into_rgba8();
    assert_eq!(loaded.dimensions(), (7, 5));
    assert_eq!(loaded.get_pixel(3, 2).0, [0, 0, 255, 255]);

    std::fs::remove_dir_all(&dir).expect("temp dir should be removable");
}

#[test]
fn save_png_into_missing_directory_fails() {
    let canvas = Canvas::new(1, 1);
    let path = std::env::temp_dir().join("canvas-no-such-dir-4471").join("x.png");
    assert!(matches!(canvas.save_png(path), Err(SurfaceError::Snapshot(_))));
}
