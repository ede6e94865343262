//! Wren CLI
//!
//! Dumps the token or event stream of an HTML document for testing and
//! debugging the parser.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use wren_html::{
    ContentModel, Event, HtmlReader, HtmlTokenizer, InputStream, NodeKind, ParseError,
    ParserOptions, TokenizerOptions,
};

/// Wren: dump the token and event streams of an HTML document
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the event stream of a file
    wren ./index.html

    # Parse inline HTML
    wren --html '<p>Hello'

    # Print the raw tokens of PLAINTEXT content
    wren --tokens --content-model plaintext --html '<b>not a tag</b>'

    # One JSON object per event
    wren --json ./index.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse an HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print tokenizer output instead of tree construction events
    #[arg(short = 't', long)]
    tokens: bool,

    /// Initial content model for --tokens (pcdata, rcdata, cdata, plaintext)
    #[arg(long, value_name = "MODEL", default_value = "pcdata", requires = "tokens")]
    content_model: ContentModel,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Stop at the first parse error
    #[arg(long)]
    fatal: bool,

    /// Parse as a user agent with scripting enabled
    #[arg(long)]
    scripting: bool,

    /// Do not list parse errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let input = load_input(&cli)?;

    if cli.tokens {
        return dump_tokens(&cli, input);
    }
    dump_events(&cli, input)
}

fn load_input(cli: &Cli) -> Result<InputStream> {
    if let Some(html) = &cli.html {
        return Ok(InputStream::from_string(html.as_str()));
    }
    let Some(path) = &cli.path else {
        bail!("no input: pass a FILE or --html '<html>...</html>'");
    };
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(InputStream::from_reader(BufReader::new(file)))
}

fn dump_tokens(cli: &Cli, input: InputStream) -> Result<()> {
    let options = TokenizerOptions::new(cli.content_model, None);
    let mut tokenizer = HtmlTokenizer::with_options(input, options);

    if !cli.json {
        println!("=== Tokens ===");
    }
    for token in tokenizer.by_ref() {
        if cli.json {
            println!("{}", serde_json::to_string(&token)?);
        } else {
            println!("{token}");
        }
    }

    if let Some(error) = tokenizer.take_io_error() {
        return Err(error).context("failed to read input");
    }
    if !cli.quiet {
        print_parse_errors(&tokenizer.take_errors());
    }
    Ok(())
}

fn dump_events(cli: &Cli, input: InputStream) -> Result<()> {
    let mut options = ParserOptions::default();
    if cli.scripting {
        options = options.with_scripting();
    }
    let mut reader = HtmlReader::from_input(input).with_options(options);
    if cli.fatal {
        reader.set_fatal_parse_errors()?;
    }

    if !cli.json {
        println!("=== Events ===");
    }
    while let Some(event) = reader.next_event()? {
        if cli.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            print_event(&event);
        }
    }

    if !cli.json {
        println!("\n=== Compatibility Mode ===");
        println!("{}", reader.compat_mode());
    }
    if !cli.quiet {
        print_parse_errors(reader.parse_errors());
    }
    Ok(())
}

/// Print an event indented by its depth.
fn print_event(event: &Event) {
    let indent = "  ".repeat(event.depth);
    match event.kind {
        NodeKind::Element => {
            let mut tag = format!("<{}", event.name);
            for attribute in &event.attributes {
                tag.push_str(&format!(" {}=\"{}\"", attribute.name, attribute.value));
            }
            tag.push_str(if event.is_empty_element { " />" } else { ">" });
            println!("{indent}{}", tag.cyan());
        }
        NodeKind::EndElement => println!("{indent}{}", format!("</{}>", event.name).cyan()),
        NodeKind::Text => println!("{indent}{:?}", event.value),
        NodeKind::Whitespace => println!("{indent}{}", format!("{:?}", event.value).dimmed()),
        NodeKind::Comment => {
            println!("{indent}{}", format!("<!--{}-->", event.value).green());
        }
        NodeKind::DocumentType => {
            let mut doctype = format!("<!DOCTYPE {}", event.name);
            for attribute in &event.attributes {
                doctype.push_str(&format!(" {} \"{}\"", attribute.name, attribute.value));
            }
            doctype.push('>');
            println!("{indent}{}", doctype.magenta());
        }
    }
}

fn print_parse_errors(errors: &[ParseError]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\n=== Parse Errors ===");
    for error in errors {
        eprintln!("  - {}", error.red());
    }
}
