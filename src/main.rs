use clap::{Parser, Subcommand};
use scrapbook::pagination::ViewMode;
use scrapbook::store::{JsonStore, PageSource};
use scrapbook::types::{Layout, Page};
use scrapbook::{config, content, generate, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "scrapbook")]
#[command(about = "Flipbook-style digital scrapbook")]
#[command(long_about = "\
Flipbook-style digital scrapbook

Pages live in a JSON file, read in ascending `order`. Wide viewports show
the cover alone and then two-page spreads; narrow ones show one page at a
time.

Book structure:

  book/
  ├── config.toml     # Viewer, frame and image settings (optional)
  └── pages.json      # Page records: order, layout, content, media, ...

Layouts: cover, photo_single (photo), quote_center (quote), checklist,
collage, index. Unknown layouts render as quotes.

Run 'scrapbook gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Pages file; config.toml is read from the same directory
    #[arg(long, default_value = "pages.json", global = true)]
    pages: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Viewport width in pixels, selects single or spread mode
    #[arg(long, default_value_t = 1280, global = true)]
    width: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate pages and config, list pages in reading order
    Check,
    /// List the navigable units for the current viewport width
    Spreads,
    /// Show how each photo of a page is framed
    Frame {
        /// `order` of the page
        order: f64,
    },
    /// Render the book as static HTML
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check => {
            let book = Book::load(&cli.pages, cli.width)?;
            println!("==> Checking {}", cli.pages.display());
            for page in book.pages.iter().filter(|p| p.layout == Layout::Index) {
                content::parse_index(&page.content)
                    .map_err(|e| format!("page {}: {e}", page.key()))?;
            }
            output::print_page_list(&book.pages);
            println!("==> Book is valid");
        }
        Command::Spreads => {
            let book = Book::load(&cli.pages, cli.width)?;
            output::print_spreads(&book.pages, book.mode);
        }
        Command::Frame { order } => {
            let book = Book::load(&cli.pages, cli.width)?;
            let page = book
                .pages
                .iter()
                .find(|p| p.order == order)
                .ok_or_else(|| format!("no page with order {order}"))?;
            output::print_frame(page);
        }
        Command::Build => {
            let book = Book::load(&cli.pages, cli.width)?;
            println!("==> Rendering {} → {}", cli.pages.display(), cli.output.display());
            let summary = generate::generate(&book.pages, &book.config, book.mode, &cli.output)?;
            output::print_generate_summary(&summary, &cli.output);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Pages and config loaded for one command.
struct Book {
    config: config::BookConfig,
    pages: Vec<Page>,
    mode: ViewMode,
}

impl Book {
    fn load(pages_path: &Path, width: u32) -> Result<Self, Box<dyn std::error::Error>> {
        let config = config::load_config(book_dir(pages_path))?;
        let pages = JsonStore::open(pages_path)?.snapshot()?;
        let mode = ViewMode::for_viewport_width(width, config.viewer.spread_breakpoint);
        Ok(Self {
            config,
            pages,
            mode,
        })
    }
}

/// Directory holding the pages file, where `config.toml` lives.
fn book_dir(pages: &Path) -> &Path {
    match pages.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
