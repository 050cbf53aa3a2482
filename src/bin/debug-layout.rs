/// Diagnostic tool to verify report → tree → layout pipeline
use spaceview_rs::layout::{compute_layout, LayoutConfig};
use spaceview_rs::scanner::{self, DEFAULT_REPORT_DIR};
use spaceview_rs::tree::aggregate::{children_by_size, find_size_mismatch};
use spaceview_rs::tree::category::build_categories;
use spaceview_rs::ui::tooltip::format_size;
use std::path::PathBuf;

const VIEWPORT_W: f64 = 1920.0;
const VIEWPORT_H: f64 = 1080.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spaceview_rs=debug".parse()?),
        )
        .init();

    let report_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));

    println!("=== DIAGNOSTIC: Report → Tree → Layout Pipeline ===");
    println!("Report dir: {}", report_dir.display());

    let report = scanner::load_report(&report_dir)?;
    println!(
        "\n[1] Report loaded: files={} recycle={} logs={} duplicates={}",
        report.large_files.as_ref().map_or(0, Vec::len),
        report.recycle_bins.as_ref().map_or(0, Vec::len),
        report.logs.as_ref().map_or(0, Vec::len),
        report.duplicates.as_ref().map_or(0, Vec::len),
    );

    let tree = build_categories(&report);
    let root = tree.get(tree.root);
    println!("\n[2] Tree built: {} nodes, root '{}' = {}", tree.len(), root.name, format_size(root.size));

    match find_size_mismatch(&tree) {
        None => println!("    Aggregation invariant holds"),
        Some(id) => println!("    ✗ Size mismatch at '{}'", tree.get(id).name),
    }

    println!("\n[3] Categories:");
    for (i, child) in children_by_size(&tree, tree.root).into_iter().enumerate() {
        let node = tree.get(child);
        println!(
            "    [{}] '{}' - {} ({} children)",
            i,
            node.name,
            format_size(node.size),
            node.children.len()
        );
    }

    let config = LayoutConfig::default();
    let layout = compute_layout(&tree, tree.root, VIEWPORT_W, VIEWPORT_H, &config);
    println!("\n[4] Layout computed: {} rectangles", layout.rects.len());

    println!("\n[5] Top-level rectangles:");
    for rect in layout.top_level() {
        let node = tree.get(rect.node);
        println!(
            "    '{}' - {:.1}x{:.1} at ({:.1}, {:.1}) - {}",
            node.name,
            rect.rect.w,
            rect.rect.h,
            rect.rect.x,
            rect.rect.y,
            format_size(node.size)
        );
    }

    println!("\n[6] Checking for anomalies:");
    let viewport_area = VIEWPORT_W * VIEWPORT_H;
    let area_sum: f64 = layout.top_level().map(|r| r.rect.area()).sum();
    println!("    Total top-level area: {:.0}", area_sum);
    println!("    Viewport area:        {:.0}", viewport_area);
    println!("    Coverage: {:.3}%", (area_sum / viewport_area) * 100.0);

    let non_finite = layout
        .rects
        .iter()
        .filter(|r| ![r.rect.x, r.rect.y, r.rect.w, r.rect.h].iter().all(|v| v.is_finite()))
        .count();
    let hidden = layout.rects.iter().filter(|r| !r.is_visible(&config)).count();
    println!("    Non-finite rects: {}", non_finite);
    println!("    Too small to draw: {} of {}", hidden, layout.rects.len());

    Ok(())
}
