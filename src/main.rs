use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use odbit::areas::repository::Repository;
use odbit::commands::plumbing::cat_file::CatFileMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "odbit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Inspect the git index and object database",
    long_about = "This is a small reader for git's on-disk formats, written in Rust. \
    It decodes the index file and reads and writes blob objects in the loose object database.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "DIR",
        help = "Run as if started in DIR instead of the current directory"
    )]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "ls-index",
        about = "Print the decoded index",
        long_about = "This command decodes .git/index and prints its header followed by every entry. \
        With a position, only the entry at that position is printed."
    )]
    LsIndex {
        #[arg(index = 1, help = "Zero-based position of a single entry to print")]
        position: Option<usize>,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type, or size of an object",
        long_about = "This command reads an object from the object database and verifies it. \
        Exactly one of -p, -t or -s must be given.",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(short = 's', help = "Print the object size")]
        size: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "stat-entry",
        about = "Print the index entry a file would be staged as",
        long_about = "This command hashes a file and combines the digest with the file's \
        current stat data, printing the resulting index entry."
    )]
    StatEntry {
        #[arg(index = 1)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pwd = std::env::current_dir()?;
    let start = match &cli.directory {
        Some(directory) => pwd.join(directory),
        None => pwd,
    };
    let repository = Repository::discover(&start, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::LsIndex { position } => repository.ls_index(*position)?,
        Commands::HashObject { write, file } => {
            repository.hash_object(&start.join(file), *write)?
        }
        Commands::CatFile {
            pretty,
            kind,
            size: _,
            sha,
        } => {
            let mode = if *pretty {
                CatFileMode::Pretty
            } else if *kind {
                CatFileMode::Type
            } else {
                CatFileMode::Size
            };

            repository.cat_file(sha, mode)?
        }
        Commands::StatEntry { file } => repository.stat_entry(&start.join(file))?,
    }

    Ok(())
}
