use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub mod generate;

#[derive(Parser, Debug)]
#[command(
    name = "discogen",
    version,
    about = "Lower discovery API methods into request views"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build request views for every method of a discovery document
    Generate(generate::GenerateArgs),
}

/// Entry point of the `discogen` binary.
pub fn run() -> i32 {
    init_tracing();
    run_from(std::env::args())
}

/// Parse `args` (program name first) and run the selected command.
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(&args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // DISCOGEN_LOG is either a plain level applied to the discogen crates
    // or a full filter spec like "discogen_core=debug"
    let filter = match std::env::var("DISCOGEN_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("discogen_cli={level},discogen_core={level}")
        }
        Ok(spec) => spec,
        Err(_) => "discogen_cli=info,discogen_core=info".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
