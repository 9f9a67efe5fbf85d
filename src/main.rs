use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::artifacts::core::Output;
use gitlet::artifacts::log::log_entry::LogEntry;
use gitlet::{Repository, RepositoryError};
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "GITLET_LOG";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny version-control system",
    long_about = "Gitlet keeps snapshots of the files in a directory, \
    lets you branch and merge them, and restores any committed version. \
    Its state lives in the .gitlet directory next to your files.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "dir",
        global = true,
        help = "Run as if gitlet was started in this directory"
    )]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage the current content of files or directories")]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot as a new commit",
        long_about = "This command records the working index as a new commit on the active branch. \
        It fails when nothing changed since the last commit."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file, or stage its removal if it is tracked")]
    Rm {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "log", about = "Show the history of the active branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged, removed, modified and untracked files"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch. \
        checkout -- <file> restores a file from HEAD. \
        checkout <commit> -- <file> restores a file from any commit (abbreviated ids work)."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch to switch to, or commit to restore from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "File to restore")]
        file: Option<PathBuf>,
    },
    #[command(name = "branch", about = "Create a branch pointing at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch (its commits are kept)")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the active branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the active branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Remember another repository under a name")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2, help = "Location of the remote, with / separators")]
        location: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "fetch", about = "Fetch a branch from a remote")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "push", about = "Push a branch to a remote")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match run(&dir, cli.command) {
        Ok(()) => Ok(()),
        Err(RepositoryError::FastForwarded) => {
            println!("{}", RepositoryError::FastForwarded);
            Ok(())
        }
        Err(error) => fail(&error.to_string()),
    }
}

/// Report a failed command on stderr and exit with status 1
fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1)
}

fn run(dir: &std::path::Path, command: Commands) -> gitlet::Result<()> {
    let mut repository = Repository::open(dir)?;

    match command {
        Commands::Init => repository.init()?,
        Commands::Add { paths } => repository.add(&paths)?,
        Commands::Commit { message } => {
            repository.commit(&message)?;
        }
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => {
            let mut output = Output::paged();
            for commit in repository.log()? {
                write!(output, "{}", LogEntry::new(commit))?;
            }
            output.finish()?;
        }
        Commands::GlobalLog => {
            let mut output = Output::paged();
            for commit in repository.global_log()? {
                write!(output, "{}", LogEntry::new(commit))?;
            }
            output.finish()?;
        }
        Commands::Find { message } => {
            let found = repository.find(&message)?;
            if found.is_empty() {
                fail("Found no commit with that message.");
            }

            let mut output = Output::stdout();
            for oid in found {
                writeln!(output, "{oid}")?;
            }
            output.finish()?;
        }
        Commands::Status => {
            let mut output = Output::stdout();
            write!(output, "{}", repository.status()?)?;
            output.finish()?;
        }
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(&branch)?,
            (None, Some(file)) => repository.restore(file)?,
            (Some(commit), Some(file)) => repository.checkout_file(&commit, file)?,
            (None, None) => fail("Incorrect operands."),
        },
        Commands::Branch { name } => repository.new_branch(&name)?,
        Commands::RmBranch { name } => repository.delete_branch(&name)?,
        Commands::Reset { commit } => {
            repository.reset(&commit)?;
        }
        Commands::Merge { branch } => {
            if repository.merge(&branch)? {
                println!("Encountered a merge conflict.");
            }
        }
        Commands::AddRemote { name, location } => repository.add_remote(&name, &location)?,
        Commands::RmRemote { name } => repository.delete_remote(&name)?,
        Commands::Fetch { remote, branch } => repository.fetch(&remote, &branch)?,
        Commands::Push { remote, branch } => repository.push(&remote, &branch)?,
    }

    Ok(())
}
