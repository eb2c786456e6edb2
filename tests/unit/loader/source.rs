use std::path::PathBuf;

use super::*;

#[test]
fn path_for_pads_and_offsets() {
    let p = FramePattern {
        base: "/bg_photos2/bg_photo_".to_owned(),
        ..FramePattern::default()
    };
    assert_eq!(p.path_for(0), "/bg_photos2/bg_photo_000000.webp");
    assert_eq!(p.path_for(217), "/bg_photos2/bg_photo_000217.webp");

    let one_based = FramePattern {
        base: "/webp_photos/".to_owned(),
        index_base: 1,
        ..FramePattern::default()
    };
    assert_eq!(one_based.path_for(0), "/webp_photos/000001.webp");
    assert_eq!(one_based.path_for(217), "/webp_photos/000218.webp");
}

#[test]
fn validate_rejects_bad_extension() {
    let bad = FramePattern {
        extension: String::new(),
        ..FramePattern::default()
    };
    assert!(bad.validate().is_err());
    let bad = FramePattern {
        extension: ".png".to_owned(),
        ..FramePattern::default()
    };
    assert!(DirFrameSource::new("x", bad).is_err());
}

#[test]
fn dir_source_reads_and_decodes() {
    let dir = PathBuf::from("target").join("unit_dir_source");
    std::fs::create_dir_all(&dir).unwrap();

    let pattern = FramePattern {
        base: "f_".to_owned(),
        pad_width: 3,
        extension: "png".to_owned(),
        index_base: 0,
    };
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    img.save(dir.join(pattern.path_for(0))).unwrap();

    let src = DirFrameSource::new(&dir, pattern).unwrap();
    let frame = src.fetch(0).unwrap();
    assert_eq!((frame.width, frame.height), (3, 2));
    assert_eq!(frame.pixel(2, 1), Some([10, 20, 30, 255]));

    let missing = src.fetch(1).unwrap_err();
    assert!(missing.to_string().contains("f_001.png"));
}

#[test]
fn closures_are_sources() {
    let src = |i: usize| DecodedFrame::solid(1, 1, [i as u8, 0, 0, 255]);
    assert_eq!(src.fetch(7).unwrap().pixel(0, 0), Some([7, 0, 0, 255]));
}
