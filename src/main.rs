use isotrace::desc::parse_field_json;
use isotrace::trace::MarchingSquares;

#[cfg(feature = "im-io")]
use isotrace::draw::draw_contours;
#[cfg(feature = "im-io")]
use isotrace::im::RGBAIm;

const TEST_JSON: &str = r#"
    {
        "w": 96,
        "h": 96,
        "threshold": 0.5,
        "blobs": [
            { "kind": "disk", "cx": 32, "cy": 34, "r": 20 },
            { "kind": "rect", "l": 56, "t": 58, "r": 88, "b": 82 },
            { "kind": "disk", "cx": 62, "cy": 24, "r": 9 },
            { "kind": "disk", "cx": 74, "cy": 36, "r": 9 }
        ]
    }
"#;

fn main() {
    let desc = parse_field_json(TEST_JSON).expect("Failed to parse field JSON");
    let field_im = desc.build_field();

    let mut ms = MarchingSquares::from_im(&field_im, desc.threshold);
    println!(
        "Extracted {} contour(s), sizes {:?}",
        ms.contour_starts().len(),
        ms.contour_sizes()
    );

    // TODO: take the target from the desc once more than one demo scene exists.
    let target = 16;
    ms.simplify_contour(target);
    println!("Simplified toward {} vertices per contour:", target);
    ms.debug_print_contours();

    #[cfg(feature = "im-io")]
    {
        std::fs::create_dir_all("./test_data").expect("Failed to create ./test_data");

        field_im
            .to_lum8()
            .save_png("./test_data/field.png")
            .expect("Failed to save field.png");

        let mut overlay = RGBAIm::new(field_im.w, field_im.h);
        for px in overlay.arr.chunks_exact_mut(4) {
            px[3] = 255;
        }
        draw_contours(&ms, &mut overlay, [255, 64, 64, 255]);
        overlay
            .save_png("./test_data/contours.png")
            .expect("Failed to save contours.png");

        println!("Wrote ./test_data/field.png and ./test_data/contours.png");
    }
}
