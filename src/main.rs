use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use spaceview_rs::config::ViewerConfig;
use spaceview_rs::layout::Rect;
use spaceview_rs::render::colors::ColorMode;
use spaceview_rs::scanner;
use spaceview_rs::tree::arena::{FileTree, NodeId};
use spaceview_rs::tree::category::{build_categories, Category};
use spaceview_rs::ui::input::InputAction;
use spaceview_rs::ui::legend::Legend;
use spaceview_rs::ui::tooltip::format_size;
use spaceview_rs::ui::view::TreemapView;

#[derive(Debug, Parser)]
#[command(name = "spaceview-rs", about = "Squarified treemap of a NAS space report")]
struct Cli {
    /// Directory holding the scanner's JSON module files
    #[arg(long, env = "SPACEVIEW_REPORT_DIR", global = true)]
    report_dir: Option<PathBuf>,

    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print each category's total size.
    Summary,
    /// Print the hierarchy below a node.
    Tree {
        /// Levels to print
        #[arg(long, default_value_t = 3)]
        depth: u16,
        #[command(flatten)]
        target: Target,
    },
    /// Lay out a node's children and print the rectangles.
    Layout {
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        /// type, category or size
        #[arg(long)]
        color: Option<ColorMode>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, clap::Args)]
struct Target {
    /// Start from one category: files, recycle, logs or duplicates
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
    /// Slash-separated child names to drill into, e.g. "volume1/video"
    #[arg(long)]
    view: Option<String>,
}

fn parse_category(value: &str) -> Result<Category> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str() == value.trim().to_ascii_lowercase())
        .ok_or_else(|| anyhow!("unknown category `{value}`"))
}

#[derive(Debug, Serialize)]
struct RectOut<'a> {
    name: &'a str,
    path: Option<&'a str>,
    size: u64,
    depth: u16,
    #[serde(flatten)]
    rect: Rect,
    color: String,
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::from_file(path).context("failed to load configuration")?,
        None => ViewerConfig::default(),
    };
    if let Some(dir) = cli.report_dir {
        config.report_dir = dir;
    }

    let report = scanner::load_report(&config.report_dir)
        .with_context(|| format!("failed to load report from {}", config.report_dir.display()))?;
    let tree = build_categories(&report);

    match cli.command {
        Commands::Summary => print_summary(&tree),
        Commands::Tree { depth, target } => {
            let view = open_view(tree, &config, &target)?;
            print_tree(view.tree(), view.current(), depth);
        }
        Commands::Layout {
            width,
            height,
            color,
            json,
            target,
        } => {
            config.width = width.unwrap_or(config.width);
            config.height = height.unwrap_or(config.height);
            config.color_mode = color.unwrap_or(config.color_mode);
            config.validate()?;

            let view = open_view(tree, &config, &target)?;
            print_layout(&view, json)?;
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,spaceview_rs=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Build a view positioned at the requested category and drill path.
fn open_view(tree: FileTree, config: &ViewerConfig, target: &Target) -> Result<TreemapView> {
    let mut view = TreemapView::new(tree, config.width, config.height, config.layout.clone());
    view.set_color_mode(config.color_mode);

    if target.category.is_some() && !view.select_category(target.category) {
        bail!("category `{}` has no data", target.category.map_or("", |c| c.as_str()));
    }

    for name in target.view.iter().flat_map(|v| v.split('/')).filter(|n| !n.is_empty()) {
        let child = view
            .tree()
            .child_named(view.current(), name)
            .ok_or_else(|| anyhow!("no entry named `{name}` here"))?;
        view.handle(InputAction::DrillDown { node: child })
            .with_context(|| format!("cannot open `{name}`"))?;
    }
    Ok(view)
}

fn print_summary(tree: &FileTree) {
    let root = tree.get(tree.root);
    println!("{}: {}", root.name, format_size(root.size));
    for child in tree.children(tree.root) {
        let node = tree.get(child);
        println!(
            "  {:<28} {:>10}  ({} entries)",
            node.name,
            format_size(node.size),
            node.children.len()
        );
    }
}

fn print_tree(tree: &FileTree, node: NodeId, max_depth: u16) {
    fn walk(tree: &FileTree, node: NodeId, level: u16, max_depth: u16) {
        let n = tree.get(node);
        println!("{:indent$}{} ({})", "", n.name, format_size(n.size), indent = level as usize * 2);
        if level >= max_depth {
            return;
        }
        for child in spaceview_rs::tree::aggregate::children_by_size(tree, node) {
            walk(tree, child, level + 1, max_depth);
        }
    }
    walk(tree, node, 0, max_depth);
}

fn print_layout(view: &TreemapView, json: bool) -> Result<()> {
    let tree = view.tree();
    let colors = view.colors();
    let rects: Vec<RectOut> = view
        .layout()
        .rects
        .iter()
        .zip(&colors)
        .map(|(r, color)| {
            let node = tree.get(r.node);
            RectOut {
                name: node.name.as_str(),
                path: node.path.as_deref(),
                size: node.size,
                depth: r.depth,
                rect: r.rect,
                color: color.to_hex(),
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rects)?);
        return Ok(());
    }

    println!("{}", view.navigation().breadcrumb_names(tree).join(" / "));
    for r in &rects {
        println!(
            "{:indent$}{} {:>10}  {:>8.1},{:>8.1}  {:>8.1}x{:<8.1} {}",
            "",
            r.name,
            format_size(r.size),
            r.rect.x,
            r.rect.y,
            r.rect.w,
            r.rect.h,
            r.color,
            indent = (r.depth as usize - 1) * 2
        );
    }
    match view.legend() {
        Legend::Swatches(entries) => {
            let labels: Vec<String> = entries
                .iter()
                .map(|e| format!("{} {}", e.color.to_hex(), e.label))
                .collect();
            println!("legend: {}", labels.join(", "));
        }
        Legend::Caption(text) => println!("legend: {text}"),
    }
    Ok(())
}
