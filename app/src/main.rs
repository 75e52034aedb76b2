//! alquran - terminal front end for the alquran.cloud API

use alquran_lib::pages::home::{language_name, DEFAULT_LANGUAGE};
use alquran_lib::table::{DataTable, PageView, SortDirection, TableRow, DEFAULT_PAGE_SIZE};
use alquran_lib::{
    init_tracing, ClientArgs, ClientConfig, EditionFilter, HomePage, QuranClient, RequestError,
};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

/// Browse the alquran.cloud API from the terminal.
#[derive(Parser)]
#[command(name = "alquran", version)]
struct Cli {
    #[command(flatten)]
    client: ClientArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Languages, editions and the paged surah table
    Home(HomeArgs),

    /// Languages that have at least one edition
    Languages,

    /// All editions, or those of one language
    Editions { lang: Option<String> },

    /// One surah in one edition
    Surah { number: u32, edition: String },

    /// One ayah by number or `surah:ayah` reference
    Ayah { reference: String, edition: String },

    /// Keyword search; SURAH is a number or `all`, the last argument an edition or language
    Search { keyword: String, surah: String, edition: String },

    /// Counts of ayahs, surahs and sections
    Meta,
}

#[derive(clap::Args)]
struct HomeArgs {
    /// Language whose editions are listed
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    lang: String,

    /// Keep rows whose text contains this, case-insensitively
    #[arg(long)]
    filter: Option<String>,

    /// Column to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    page: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::try_from(cli.client)?;
    let client = QuranClient::new(&config)?;

    match cli.command {
        Command::Home(args) => home(&client, args).await,
        Command::Languages => {
            for code in client.languages().await.map_err(alert)? {
                println!("{:<4} {}", code, language_name(&code).unwrap_or(""));
            }
            Ok(())
        }
        Command::Editions { lang } => {
            let editions = match lang {
                Some(lang) => client.editions_for_language(&lang).await,
                None => client.editions(EditionFilter::default()).await,
            }
            .map_err(alert)?;
            let mut table = DataTable::new(editions.len().max(1));
            table.replace_data(editions);
            print_page(&table.page());
            Ok(())
        }
        Command::Surah { number, edition } => {
            let surah = client.surah(number, &edition).await.map_err(alert)?;
            println!("{} - {} ({})", surah.number, surah.english_name, surah.name);
            for ayah in &surah.ayahs {
                println!("{:>4}. {}", ayah.number_in_surah.unwrap_or(ayah.number), ayah.text);
            }
            Ok(())
        }
        Command::Ayah { reference, edition } => {
            let ayah = client.ayah(&reference, &edition).await.map_err(alert)?;
            println!("{}", ayah.text);
            if let Some(audio) = &ayah.audio {
                println!("{}", audio);
            }
            Ok(())
        }
        Command::Search { keyword, surah, edition } => {
            let results = client.search(&keyword, &surah, &edition).await.map_err(alert)?;
            println!("{} matches", results.count);
            for ayah in &results.matches {
                let surah = ayah.surah.as_ref().map(|s| s.number).unwrap_or_default();
                println!("{}:{} {}", surah, ayah.number_in_surah.unwrap_or_default(), ayah.text);
            }
            Ok(())
        }
        Command::Meta => {
            let meta = client.meta().await.map_err(alert)?;
            println!("Ayahs:         {}", meta.ayahs.count);
            println!("Surahs:        {}", meta.surahs.count);
            println!("Sajdas:        {}", meta.sajdas.count);
            println!("Rukus:         {}", meta.rukus.count);
            println!("Pages:         {}", meta.pages.count);
            println!("Manzils:       {}", meta.manzils.count);
            println!("Hizb quarters: {}", meta.hizb_quarters.count);
            println!("Juzs:          {}", meta.juzs.count);
            Ok(())
        }
    }
}

async fn home(client: &QuranClient, args: HomeArgs) -> Result<()> {
    let mut page = HomePage::with_language(&args.lang);
    for error in page.mount(client).await {
        report(&error);
    }

    let table = page.table_mut();
    if let Some(column) = &args.sort {
        let direction = if args.desc { SortDirection::Desc } else { SortDirection::Asc };
        table.sort_by(column, direction);
    }
    table.set_page_size(args.page_size);
    if let Some(filter) = &args.filter {
        table.set_filter(filter);
    }
    table.set_page(args.page);

    let languages: Vec<String> = page.languages().iter().cloned().collect();
    println!("Languages: {}", languages.join(", "));
    println!("Editions ({}):", page.selected_language());
    for edition in page.editions().iter() {
        println!("  {:<24} {}", edition.identifier, edition.english_name);
    }
    println!();
    print_page(&page.table().page());
    Ok(())
}

/// Surface a failed request to the user
fn report(error: &RequestError) {
    eprintln!("{}", error);
}

fn alert(error: RequestError) -> anyhow::Error {
    report(&error);
    anyhow!("request failed")
}

fn print_page<R: TableRow>(page: &PageView<R>) {
    println!("{}", R::COLUMNS.join(" | "));
    println!("{}", "-".repeat(60));
    for row in &page.rows {
        let cells: Vec<String> = R::COLUMNS
            .iter()
            .map(|column| row.cell(column).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("{}", cells.join(" | "));
    }
    println!("{}", "-".repeat(60));
    println!("{}", page.range_label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_args() {
        let cli = Cli::try_parse_from([
            "alquran", "home", "--lang", "en", "--filter", "yaseen", "--sort", "number", "--desc",
            "--page-size", "25",
        ])
        .unwrap();
        let Command::Home(args) = cli.command else {
            panic!("expected the home command");
        };
        assert_eq!(args.lang, "en");
        assert_eq!(args.filter.as_deref(), Some("yaseen"));
        assert_eq!(args.sort.as_deref(), Some("number"));
        assert!(args.desc);
        assert_eq!(args.page, 0);
        assert_eq!(args.page_size, 25);
    }

    #[test]
    fn test_home_defaults() {
        let cli = Cli::try_parse_from(["alquran", "home"]).unwrap();
        let Command::Home(args) = cli.command else {
            panic!("expected the home command");
        };
        assert_eq!(args.lang, DEFAULT_LANGUAGE);
        assert_eq!(args.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["alquran", "surah", "36", "en.asad"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Surah { number: 36, ref edition } if edition == "en.asad"
        ));

        assert!(Cli::try_parse_from(["alquran", "surah", "yaseen", "en.asad"]).is_err());
        assert!(Cli::try_parse_from(["alquran", "ayah", "2:255"]).is_err());
        assert!(Cli::try_parse_from(["alquran", "home", "--desc"]).is_err());
    }
}
