use qirust_style::helper::{draw_grid, render, render_to_writer, role_map};
use qirust_style::{
    classify, Bounds, Canvas, ColorMode, Layout, ModuleGrid, ModuleMatrix, ModuleRole, StyleError, StyleOptions,
};
use qrcode::{Color, EcLevel, QrCode, Version};
use std::path::PathBuf;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn version1(text: &str) -> ModuleMatrix {
    let code = QrCode::with_version(text.as_bytes(), Version::Normal(1), EcLevel::L).unwrap();
    let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
    ModuleMatrix::new(code.width(), modules).unwrap()
}

// Callers remove the file before asserting on the render.
fn write_logo(name: &str, side: u32, color: [u8; 4]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("qirust-style-{}-{}.png", name, std::process::id()));
    image::RgbaImage::from_pixel(side, side, image::Rgba(color)).save(&path).unwrap();
    path
}

/// Reads `canvas` back with a QR decoder and returns the payload of every symbol found.
fn decode(canvas: &Canvas) -> Vec<String> {
    let (width, height) = canvas.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
        let [r, g, b, _] = canvas.pixel(x as u32, y as u32);
        ((r as u32 + g as u32 + b as u32) / 3) as u8
    });
    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|grid| grid.decode().ok())
        .map(|(_, content)| content)
        .collect()
}

/// Top-left offset and side of the logo swatch on a `pixel_size` canvas.
fn swatch_placement(pixel_size: u32) -> (u32, u32) {
    let side = (pixel_size as f64 * 0.3) as u32 - 1;
    ((pixel_size - side) / 2, side)
}

fn dark(pixel: [u8; 4]) -> bool {
    pixel[3] > 128 && pixel[0] < 64 && pixel[1] < 64 && pixel[2] < 64
}

fn light(pixel: [u8; 4]) -> bool {
    pixel[0] > 192 && pixel[1] > 192 && pixel[2] > 192
}

#[test]
fn version1_renders_every_module_in_place() {
    init_logging();
    let grid = version1("HELLO WORLD");
    assert_eq!(grid.width(), 21);

    let canvas = render(&grid, StyleOptions::default()).unwrap();
    assert_eq!(canvas.dimensions(), (210, 210));
    assert_eq!(canvas.mode(), ColorMode::Rgb);

    // The center pixel of every module keeps its color, so the code stays readable.
    for row in 0..21 {
        for col in 0..21 {
            let pixel = canvas.pixel(col as u32 * 10 + 5, row as u32 * 10 + 5);
            if grid.is_dark(row, col) {
                assert!(dark(pixel), "dark module {},{} came out {:?}", row, col, pixel);
            } else {
                assert!(light(pixel), "light module {},{} came out {:?}", row, col, pixel);
            }
        }
    }
}

#[test]
fn styled_symbol_decodes_with_a_qr_reader() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions { border: 4, ..Default::default() };
    let canvas = render(&grid, options).unwrap();
    assert_eq!(decode(&canvas), vec!["HELLO WORLD".to_string()]);

    // Same code with round modules on a larger scale.
    let options = StyleOptions { border: 4, box_size: 16, fill_color: "darkslateblue".into(), ..Default::default() };
    let canvas = render(&grid, options).unwrap();
    assert_eq!(decode(&canvas), vec!["HELLO WORLD".to_string()]);
}

#[test]
fn transparent_background_cannot_be_saved_as_jpeg() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions { back_color: "transparent".into(), format: Some("jpeg".into()), ..Default::default() };
    let mut out = Vec::new();
    assert!(matches!(render_to_writer(&grid, options, &mut out), Err(StyleError::Encoding(_))));
    assert!(out.is_empty());

    // An opaque background still encodes, and stays mostly light.
    let options = StyleOptions { format: Some("jpeg".into()), ..Default::default() };
    render_to_writer(&grid, options, &mut out).unwrap();
    let decoded = image::load_from_memory(&out).unwrap().to_luma8();
    let light_pixels = decoded.pixels().filter(|p| p.0[0] > 128).count();
    assert!(light_pixels > decoded.pixels().len() / 3);
}

#[test]
fn css_color_names_render() {
    let grid = version1("HELLO WORLD");
    for fill in ["lightcoral", "chartreuse", "sienna", "darkolivegreen", "rgb(255,0,0)"] {
        let options = StyleOptions { fill_color: fill.into(), back_color: "snow".into(), ..Default::default() };
        assert!(render(&grid, options).is_ok(), "fill {}", fill);
    }
    let options = StyleOptions { fill_color: "sienna".into(), ..Default::default() };
    let canvas = render(&grid, options).unwrap();
    assert_eq!(canvas.pixel(35, 35), [160, 82, 45, 255]);
}

#[test]
fn finder_patterns_are_rounded_and_centers_sharp() {
    let grid = version1("HELLO WORLD");
    let canvas = render(&grid, StyleOptions::default()).unwrap();

    // Outer corners of the three finders are cut by the arcs.
    for (x, y) in [(0, 0), (209, 0), (0, 209), (140, 0), (69, 0), (0, 140)] {
        assert!(light(canvas.pixel(x, y)), "finder corner pixel {},{}", x, y);
    }
    // Finder centers are plain squares, corners included.
    for (left, top) in [(30, 30), (170, 30), (30, 170)] {
        for (dx, dy) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            assert_eq!(canvas.pixel(left + dx, top + dy), [0, 0, 0, 255]);
        }
    }
    // Straight finder edges are solid.
    assert_eq!(canvas.pixel(35, 5), [0, 0, 0, 255]);
    assert_eq!(canvas.pixel(5, 35), [0, 0, 0, 255]);
}

#[test]
fn role_map_of_real_symbol_matches_finder_layout() {
    let grid = version1("HELLO WORLD");
    let map = role_map(&grid, &Layout::new(21, 10, 0));
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 21);
    assert!(rows[0].starts_with("F^^^^^7"));
    assert!(rows[0].ends_with("F^^^^^7"));
    assert!(rows[6].starts_with("Lvvvvv"));
    assert!(rows[14].starts_with("F^^^^^7"));
    assert_eq!(&rows[3][..7], "< <#> >");
    assert_eq!(&rows[17][..7], "< <#> >");
}

#[test]
fn classify_matches_on_all_three_finders() {
    let role = |col: i32, row: i32| classify(Bounds::new(col * 10, row * 10, col * 10 + 9, row * 10 + 9), 210, 10);
    for (fx, fy) in [(0, 0), (14, 0), (0, 14)] {
        assert_eq!(role(fx, fy), ModuleRole::CornerTopLeft);
        assert_eq!(role(fx + 6, fy + 6), ModuleRole::CornerBottomRight);
        assert_eq!(role(fx + 3, fy + 3), ModuleRole::AlignmentSquare);
    }
    assert_eq!(role(14, 14), ModuleRole::DataModule);
    assert_eq!(role(20, 20), ModuleRole::DataModule);
}

#[test]
fn rendering_is_deterministic() {
    let grid = version1("example.com");
    let mut first = Vec::new();
    let mut second = Vec::new();
    render_to_writer(&grid, StyleOptions::default(), &mut first).unwrap();
    render_to_writer(&grid, StyleOptions::default(), &mut second).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn transparent_background_is_clear_rgba() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions { back_color: "transparent".into(), fill_color: "Navy".into(), ..Default::default() };
    let canvas = render(&grid, options).unwrap();
    assert_eq!(canvas.mode(), ColorMode::Rgba);
    // Module (1, 1) sits in the light ring of the first finder.
    assert_eq!(canvas.pixel(15, 15), [0, 0, 0, 0]);
    assert_eq!(canvas.pixel(35, 35), [0, 0, 128, 255]);

    let mut png = Vec::new();
    render_to_writer(&grid, StyleOptions { back_color: "transparent".into(), ..Default::default() }, &mut png).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert!(decoded.color().has_alpha());
}

#[test]
fn logo_overwrites_the_center() {
    let grid = version1("HELLO WORLD");
    let logo = write_logo("center", 20, [255, 0, 0, 255]);
    let options = StyleOptions { logo_path: Some(logo.clone()), ..Default::default() };
    let rendered = render(&grid, options);
    let _ = std::fs::remove_file(&logo);
    let canvas = rendered.unwrap();

    let (start, side) = swatch_placement(210);
    let logo_start = start + (side - 20) / 2;
    let logo_area = logo_start..logo_start + 20;
    for y in start..start + side {
        for x in start..start + side {
            let expected = if logo_area.contains(&x) && logo_area.contains(&y) {
                [255, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            };
            assert_eq!(canvas.pixel(x, y), expected, "pixel {},{}", x, y);
        }
    }
}

#[test]
fn logo_larger_than_swatch_is_cropped() {
    let grid = version1("HELLO WORLD");
    let logo = write_logo("large", 100, [0, 255, 0, 255]);
    let options = StyleOptions { logo_path: Some(logo.clone()), ..Default::default() };
    let rendered = render(&grid, options);
    let _ = std::fs::remove_file(&logo);
    let canvas = rendered.unwrap();

    let (start, side) = swatch_placement(210);
    assert_eq!(canvas.pixel(start, start), [0, 255, 0, 255]);
    assert_eq!(canvas.pixel(start + side - 1, start + side - 1), [0, 255, 0, 255]);
    assert_ne!(canvas.pixel(start - 1, 105), [0, 255, 0, 255]);
    assert_ne!(canvas.pixel(start + side, 105), [0, 255, 0, 255]);
}

#[test]
fn missing_logo_is_a_resource_error() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions {
        logo_path: Some(std::env::temp_dir().join("qirust-style-does-not-exist.png")),
        ..Default::default()
    };
    match draw_grid(&grid, options) {
        Err(StyleError::Resource { path, .. }) => assert!(path.ends_with("qirust-style-does-not-exist.png")),
        other => panic!("expected a resource error, got {:?}", other.err()),
    }
}

#[test]
fn output_format_follows_options_and_overrides() {
    let grid = version1("HELLO WORLD");

    let mut jpeg = Vec::new();
    let options = StyleOptions { format: Some("JPEG".into()), quality: 80, ..Default::default() };
    render_to_writer(&grid, options, &mut jpeg).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let mut bmp = Vec::new();
    draw_grid(&grid, StyleOptions::default()).unwrap().save_as(&mut bmp, Some("bmp"), None).unwrap();
    assert_eq!(&bmp[..2], b"BM");

    let mut out = Vec::new();
    let options = StyleOptions { format: Some("pdf".into()), ..Default::default() };
    assert!(matches!(render_to_writer(&grid, options, &mut out), Err(StyleError::Encoding(_))));
}

#[test]
fn border_shifts_the_symbol() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions { border: 4, ..Default::default() };
    let canvas = render(&grid, options).unwrap();
    assert_eq!(canvas.dimensions(), (290, 290));
    assert_eq!(canvas.pixel(75, 75), [0, 0, 0, 255]);
    assert!(light(canvas.pixel(5, 5)));
    assert!(light(canvas.pixel(40, 40)));
}

#[test]
fn options_from_toml_drive_the_render() {
    let grid = version1("HELLO WORLD");
    let options = StyleOptions::from_toml_str("fill_color = \"#ff0000\"\nbox_size = 6\n").unwrap();
    let canvas = render(&grid, options).unwrap();
    assert_eq!(canvas.dimensions(), (126, 126));
    assert_eq!(canvas.pixel(3 * 6 + 3, 3 * 6 + 3), [255, 0, 0, 255]);
}
