use anyhow::{anyhow, Result};
use byline::build::build_site;
use byline::config::{Config, Overrides};
use byline::logging::init_logging;
use byline::page::Page;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let project = Arg::with_name("project")
        .long("project")
        .short("p")
        .takes_value(true)
        .value_name("FILE")
        .help("The project file (default: nearest byline.yaml)");
    let source = Arg::with_name("source")
        .long("source")
        .short("s")
        .takes_value(true)
        .value_name("SRC")
        .help("The article data file or http(s) URL");

    let matches = App::new("byline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders the article feed and edition archive pages")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .default_value("info")
                .help("off, error, warn, info, debug, or trace"),
        )
        .subcommand(
            SubCommand::with_name("build")
                .about("Writes both pages to the output directory")
                .arg(project.clone())
                .arg(source.clone())
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .value_name("DIR")
                        .help("The output directory"),
                ),
        )
        .subcommand(
            SubCommand::with_name("feed")
                .about("Prints the article feed fragment")
                .arg(project.clone())
                .arg(source.clone()),
        )
        .subcommand(
            SubCommand::with_name("archive")
                .about("Prints the archive fragment")
                .arg(project)
                .arg(source),
        )
        .get_matches();

    let _logger = init_logging(matches.value_of("log-level").unwrap_or("info"))
        .map_err(|e| anyhow!(e))?;

    match matches.subcommand() {
        ("build", Some(matches)) => build_site(&config(matches)?)?,
        ("feed", Some(matches)) => print_page(Page::Feed, matches)?,
        ("archive", Some(matches)) => print_page(Page::Archive, matches)?,
        (name, _) => return Err(anyhow!("unknown subcommand `{}`", name)),
    }
    Ok(())
}

fn config(matches: &ArgMatches) -> Result<Config> {
    let overrides = Overrides {
        source: matches.value_of("source"),
        output_directory: matches.value_of("output").map(Path::new),
    };
    Config::load(
        matches.value_of("project").map(Path::new),
        &std::env::current_dir()?,
        &overrides,
    )
}

fn print_page(page: Page, matches: &ArgMatches) -> Result<()> {
    use std::io::Write;
    let config = config(matches)?;
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    page.render(&config.source, &config.options, &mut stdout)?;
    writeln!(stdout)?;
    Ok(())
}
