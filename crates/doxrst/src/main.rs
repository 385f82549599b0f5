//! Command line front end for libdoxrst.

use clap::{ArgAction, Parser};
use libdoxrst::DoxRst;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Level used when neither -v nor -q is given.
const DEFAULT_VERBOSITY: i16 = 3;

/// Generate Sphinx reStructuredText API pages from doxygen XML.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Qualified name of the namespace to document, e.g. `Mike42::Escpos`
    root_namespace: String,

    /// Directory holding doxygen's XML output
    #[arg(long, default_value = "xml", env = "DOXRST_XML_DIR")]
    xml_dir: String,

    /// Directory to write `api.rst` and the `api/` tree into
    #[arg(long, default_value = ".", env = "DOXRST_OUT_DIR")]
    out_dir: String,

    /// Sphinx domain used for directives
    #[arg(long, default_value = "php")]
    domain: String,

    /// Print the parsed root namespace as JSON instead of writing pages
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Log more; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log less; may be repeated
    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,
}

/// Map a verbosity count to a log level directive.
fn level_for(verbosity: i16) -> &'static str {
    match verbosity {
        i16::MIN..=0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over -v and -q.
fn init_logging(cli: &Cli) {
    let verbosity = DEFAULT_VERBOSITY + i16::from(cli.verbose) - i16::from(cli.quiet);
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level_for(verbosity))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Run one invocation.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dr = DoxRst::new()
        .with_xml_dir(&cli.xml_dir)
        .with_out_dir(&cli.out_dir)
        .with_domain(&cli.domain);

    if cli.raw {
        println!("{}", dr.raw_json(&cli.root_namespace)?);
    } else {
        let summary = dr.render(&cli.root_namespace)?;
        debug!("Skipped namespaces: {:?}", summary.skipped);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
