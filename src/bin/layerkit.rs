use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layerkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one page of a page document.
    Render(RenderArgs),
    /// Print the layer tree of every page.
    Outline(OutlineArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input page document (JSON array of pages).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Page id to render (defaults to the first page).
    #[arg(long)]
    page: Option<String>,

    /// Render with editor affordances.
    #[arg(long)]
    editor: bool,

    /// Layer to mark as selected (editor mode).
    #[arg(long)]
    select: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Builder config JSON (themes, id seed).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OutlineArgs {
    /// Input page document (JSON array of pages).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Outline(args) => cmd_outline(args),
    }
}

fn read_pages_json(path: &Path) -> anyhow::Result<Vec<layerkit::Page>> {
    let f = File::open(path).with_context(|| format!("open page document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let pages: Vec<layerkit::Page> =
        serde_json::from_reader(r).with_context(|| "parse page document JSON")?;
    Ok(pages)
}

fn load_store(
    path: &Path,
    config: &layerkit::BuilderConfig,
) -> anyhow::Result<layerkit::LayerStore> {
    let pages = read_pages_json(path)?;
    let registry = Arc::new(layerkit::ComponentRegistry::html_primitives()?);
    Ok(layerkit::LayerStore::from_pages(
        registry,
        pages,
        config.id_generator(),
    )?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => layerkit::BuilderConfig::load(path)?,
        None => layerkit::BuilderConfig::default(),
    };
    let mut store = load_store(&args.in_path, &config)?;

    if let Some(page) = &args.page {
        store.select_page(page)?;
    }
    if let Some(layer) = &args.select {
        store.select_layer(layer)?;
    }

    let pipeline = layerkit::PagePipeline::new(store.registry(), &config.themes);
    let page = store.selected_page();
    let output = if args.editor {
        let queue = Rc::new(layerkit::IntentQueue::new());
        let editor = store.editor_config(queue);
        pipeline.render_for_editor(page, &editor)
    } else {
        pipeline.render_plain(page)
    };

    let text = match args.format {
        OutputFormat::Html => output.to_html(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&output).with_context(|| "serialize render tree")?
        }
    };

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create '{}'", parent.display()))?;
                }
            }
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_outline(args: OutlineArgs) -> anyhow::Result<()> {
    let store = load_store(&args.in_path, &layerkit::BuilderConfig::default())?;
    for page in store.pages() {
        println!("{} [{}]", page.name(), page.id());
        for child in page.children() {
            print_layer(child, 1);
        }
    }
    Ok(())
}

fn print_layer(layer: &layerkit::Layer, depth: usize) {
    let view = layer.view();
    let detail = match layer {
        layerkit::Layer::Text(t) => format!(" {:?}", t.text),
        layerkit::Layer::Component(_) => String::new(),
    };
    println!(
        "{}- {} ({}) [{}]{}",
        "  ".repeat(depth),
        layerkit::name_for_layer(view),
        view.kind(),
        view.id(),
        detail
    );
    for child in view.children() {
        print_layer(child, depth + 1);
    }
}
