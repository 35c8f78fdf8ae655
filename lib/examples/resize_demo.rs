use glyphcast::geometry;

fn main() {
    println!("glyphcast - Geometry Demo");
    println!("=========================\n");

    // Source dimensions against a few character widths
    let test_cases = vec![
        (1920, 1080, "1920x1080 (Full HD)"),
        (100, 100, "100x100 (square)"),
        (500, 2000, "500x2000 (tall)"),
        (4000, 100, "4000x100 (very wide)"),
    ];

    for (width, height, description) in test_cases {
        println!("Source: {}", description);
        for target_width in [40, 100, 200] {
            let (w, h) = geometry::target_dimensions(width, height, target_width, 0.5)
                .expect("positive width");
            println!("  width {:>3} chars -> {}x{}", target_width, w, h);
        }
        println!();
    }

    println!("Heights are corrected by 0.5 for terminal cell proportions,");
    println!("with clamps preventing over-compression of tall sources.");
}
