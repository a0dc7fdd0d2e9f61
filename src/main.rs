// ABOUTME: Main entry point for the lazy-slides program.
// ABOUTME: Provides the CLI and runs commands from the library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use lazy_slides::keys::SHORTCUTS;
use lazy_slides::{html, Config, LeadingContent, DEFAULT_DOCUMENT};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit and present a Markdown file in the browser, live
    Serve(ServeArgs),

    /// Print the slides a document splits into
    Outline(OutlineArgs),

    /// Print the keyboard shortcuts
    Keys,
}

#[derive(Args)]
struct ServeArgs {
    /// Markdown file to present (the built-in deck when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// WebSocket port (defaults to the HTTP port + 1)
    #[arg(long)]
    ws_port: Option<u16>,

    /// Themes to cycle through: name or name=stylesheet
    #[arg(long, value_delimiter = ',')]
    themes: Option<Vec<String>>,

    /// Extra stylesheets to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// Link local stylesheets instead of embedding them
    #[arg(long)]
    link_resources: bool,

    /// Drop text that comes before the first heading
    #[arg(long)]
    discard_leading: bool,

    /// Debounce for file change events, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,
}

#[derive(Args)]
struct OutlineArgs {
    /// Markdown file to split (the built-in deck when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Drop text that comes before the first heading
    #[arg(long)]
    discard_leading: bool,
}

fn serve_config(args: &ServeArgs) -> Config {
    let mut config = Config::from_env();
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.ws_port.is_some() {
        config.ws_port = args.ws_port;
    }
    if let Some(themes) = &args.themes {
        config.themes = themes.clone();
    }
    if let Some(css) = &args.css {
        config.css_files = css.clone();
    }
    if args.link_resources {
        config.embed_resources = false;
    }
    if args.discard_leading {
        config.leading_content = LeadingContent::Discard;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    config
}

fn outline(args: &OutlineArgs) -> lazy_slides::Result<()> {
    let mut config = Config::from_env();
    if args.discard_leading {
        config.leading_content = LeadingContent::Discard;
    }

    let document = match &args.input {
        Some(path) => html::read_document(path)?,
        None => DEFAULT_DOCUMENT.to_string(),
    };

    for slide in config.parser().parse(&document) {
        let title = if slide.title.is_empty() {
            "(untitled)"
        } else {
            slide.title.as_str()
        };
        println!("{}\t{}\t{}", slide.index, slide.line + 1, title);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match &cli.command {
        Some(Commands::Serve(args)) => {
            let config = serve_config(args);
            lazy_slides::serve(&config, args.input.as_deref())
        }
        Some(Commands::Outline(args)) => outline(args),
        Some(Commands::Keys) => {
            for (keys, command) in SHORTCUTS {
                println!("{:<14}{}", keys, command.description());
            }
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
