use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};
use quire::config::Config;
use quire::dataset::Dataset;
use quire::listing::{Listing, Scope};
use quire::session::View;
use quire::sort::SortKey;
use quire::tag::{filter_tags, tag_counts};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let matches = App::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Searches, filters, sorts, and pages through a site's posts")
        .arg(
            Arg::with_name("dataset")
                .help("YAML file holding the site's posts, authors, and categories")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .value_name("FILE")
                .help("Project file; defaults to the nearest quire.yaml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("listing")
                .long("listing")
                .short("l")
                .value_name("SCOPE")
                .help("posts, author:<slug>, category:<slug>, or tag:<tag>")
                .default_value("posts")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("search")
                .long("search")
                .short("s")
                .value_name("TERM")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("filter")
                .long("filter")
                .short("f")
                .value_name("FACET=VALUE")
                .multiple(true)
                .number_of_values(1)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sort")
                .long("sort")
                .value_name("KEY")
                .help("date-desc, likes-desc, comments-desc, or title-asc")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("page")
                .long("page")
                .short("p")
                .value_name("N")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("tags")
                .long("tags")
                .help("Prints the tag cloud instead of a listing")
                .conflicts_with_all(&["filter", "sort", "page"]),
        )
        .arg(
            Arg::with_name("authors")
                .long("authors")
                .help("Prints every author with a post count instead of a listing")
                .conflicts_with_all(&["tags", "categories", "search", "filter", "sort", "page"]),
        )
        .arg(
            Arg::with_name("categories")
                .long("categories")
                .help("Prints every category with a post count instead of a listing")
                .conflicts_with_all(&["tags", "authors", "search", "filter", "sort", "page"]),
        )
        .get_matches();

    let dataset_path = Path::new(matches.value_of("dataset").unwrap_or(""));
    let dataset = Dataset::from_path(dataset_path)?;

    if matches.is_present("authors") {
        print_authors(&dataset);
        return Ok(());
    }
    if matches.is_present("categories") {
        print_categories(&dataset);
        return Ok(());
    }
    if matches.is_present("tags") {
        print_tags(&dataset, matches.value_of("search").unwrap_or(""));
        return Ok(());
    }

    let config = match matches.value_of("config") {
        Some(path) => Config::from_project_file(Path::new(path))?,
        None => Config::from_directory(dataset_path.parent().unwrap_or_else(|| Path::new(".")))?,
    };

    let scope: Scope = matches.value_of("listing").unwrap_or("posts").parse()?;
    let listing = Listing::open(&dataset, &scope, &config)?;
    run_listing(&listing, &matches)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Applies the command-line criteria in the order a reader would: facets,
// then search, then sort, then the page, since every change but the last
// returns to page 1.
fn run_listing(listing: &Listing, matches: &ArgMatches) -> Result<()> {
    let mut session = listing.session();

    if let Some(filters) = matches.values_of("filter") {
        for filter in filters {
            let (facet, value) = filter
                .split_once('=')
                .ok_or_else(|| anyhow!("Filter `{}` must look like FACET=VALUE", filter))?;
            session.set_filter(facet, value);
        }
    }
    if let Some(term) = matches.value_of("search") {
        session.set_search_term(term);
    }
    if let Some(key) = matches.value_of("sort") {
        session.set_sort_key(SortKey::parse_lossy(key));
    }
    if let Some(page) = matches.value_of("page") {
        let page: usize = page
            .parse()
            .with_context(|| format!("Page `{}` is not a number", page))?;
        session.set_page_number(page);
    }

    println!("{} ({})", listing.heading(), listing.scope());
    println!("Sorted by: {}", session.criteria().sort_key.label());
    print_view(session.current_view());
    Ok(())
}

fn print_view(view: &View) {
    println!("{}", view.summary());
    if view.is_empty() {
        println!("No posts found matching your criteria.");
    }
    for record in &view.items {
        println!(
            "  {}  {}  ({}; {} likes, {} comments)",
            record.date, record.title, record.author, record.likes, record.comments
        );
    }
    if view.total_pages > 1 {
        let buttons: Vec<String> = view
            .page_window
            .iter()
            .map(|&n| match n == view.page_number {
                true => format!("[{}]", n),
                false => n.to_string(),
            })
            .collect();
        println!(
            "{} {} {}    Page {} of {}",
            if view.has_prev() { "< Previous" } else { "" },
            buttons.join(" "),
            if view.has_next() { "Next >" } else { "" },
            view.page_number,
            view.total_pages
        );
    }
    if view.is_filtered {
        println!("(filtered; drop --search/--filter/--sort to clear)");
    }
}

fn print_tags(dataset: &Dataset, query: &str) {
    let counts = tag_counts(&dataset.posts, &dataset.tags);
    let shown = filter_tags(&counts, query);
    println!("Showing {} of {} tags", shown.len(), counts.len());
    if shown.is_empty() {
        println!("No tags found matching your search.");
    }
    for tag in shown {
        println!("  #{} ({})", tag.name, tag.count);
    }
}

fn print_authors(dataset: &Dataset) {
    for author in &dataset.authors {
        println!(
            "  {} ({}): {} posts",
            author.name,
            author.slug,
            author.post_count(&dataset.posts)
        );
    }
}

fn print_categories(dataset: &Dataset) {
    for category in &dataset.categories {
        println!(
            "  {} ({}): {} posts",
            category.title,
            category.slug,
            category.post_count(&dataset.posts)
        );
    }
}
