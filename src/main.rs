use folio::{FolioError, LayoutConfig, PageLayout, PageSize};
use folio_style::parsers::parse_page_size;
use std::env;
use std::error::Error;
use std::fs;
use std::process;
use std::time::Instant;

struct Args {
    tree_path: String,
    strict: bool,
    page: PageSize,
}

fn usage(program: &str) -> ! {
    eprintln!("Lays out a JSON component tree and prints the positioned pages as JSON.");
    eprintln!();
    eprintln!("Usage: {} <path/to/tree.json> [--strict] [--page A4|A5|Letter|Legal]", program);
    process::exit(1);
}

fn parse_args() -> Result<Args, FolioError> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("folio");

    let mut tree_path = None;
    let mut strict = false;
    let mut page = PageSize::A4;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--strict" => strict = true,
            "--page" => match rest.next() {
                Some(size) => page = parse_page_size(size)?,
                None => usage(program),
            },
            "-h" | "--help" => usage(program),
            path if tree_path.is_none() && !path.starts_with("--") => {
                tree_path = Some(path.to_string())
            }
            _ => usage(program),
        }
    }

    match tree_path {
        Some(tree_path) => Ok(Args {
            tree_path,
            strict,
            page,
        }),
        None => usage(program),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args()?;

    let config = if args.strict {
        LayoutConfig::strict()
    } else {
        LayoutConfig::default()
    };

    log::info!("Loading component tree from {}", args.tree_path);
    let json = fs::read_to_string(&args.tree_path)?;

    let start = Instant::now();
    let doc = folio::layout_json(&json, config, PageLayout::new(args.page))?;
    log::info!(
        "Laid out {} page(s) in {:.2?}",
        doc.pages.len(),
        start.elapsed()
    );
    for diagnostic in &doc.diagnostics {
        eprintln!("{:?} [{}] {}", diagnostic.level, diagnostic.category, diagnostic.message);
    }

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
