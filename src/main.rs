use clap::{Parser, Subcommand};
use linkfill::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkfill")]
#[command(about = "Merge short links into localized messaging templates, export one .xlsx per copy group")]
#[command(long_about = "Linkfill - short-link template merge

Reads a source spreadsheet of short links and a template spreadsheet of
per-locale messaging copy, fills the links into the template in order,
computes the message content column, filters rows missing a locale or
region, and exports one Excel file per copy group.

COMMANDS:
  process  - Run the transform and write the per-group files
  inspect  - Analyze only: show resolved columns and group preview
  serve    - Run the HTTP upload/download front end

EXAMPLES:
  linkfill process links.xlsx template.xlsx -o out/
  linkfill process links.xlsx template.xlsx --name-template 'spring_{id}'
  linkfill inspect links.xlsx template.xlsx
  linkfill serve --port 3000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the transform and write one .xlsx per copy group.

Column roles in both files are resolved heuristically: bilingual alias
substrings first (e.g. 短链接 / Short Link, 语言 / Language), positional
fallback second. The template must contain locale, region and copy-group
id columns; sender and title are optional and omitted from the export
when absent.

Links are filled positionally: the k-th non-empty source link lands in
the k-th template row. A link/row count mismatch is a warning, not an
error.

The --name-template value may contain {id}, replaced by the group id;
.xlsx is appended when missing.")]
    /// Run the transform and write the per-group Excel files
    Process {
        /// Source .xlsx containing the short links
        source: PathBuf,

        /// Template .xlsx containing the per-locale copy
        template: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Output file name template, {id} is replaced by the group id
        #[arg(long, default_value = "output_group_{id}.xlsx")]
        name_template: String,

        /// Show resolved columns and link counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze only: show resolved columns, link count and group preview
    Inspect {
        /// Source .xlsx containing the short links
        source: PathBuf,

        /// Template .xlsx containing the per-locale copy
        template: PathBuf,
    },

    /// Run the HTTP upload/download front end
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "LINKFILL_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "LINKFILL_PORT")]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            source,
            template,
            out_dir,
            name_template,
            verbose,
        } => cli::process(source, template, out_dir, name_template, verbose)?,

        Commands::Inspect { source, template } => cli::inspect(source, template)?,

        Commands::Serve { host, port } => cli::serve(host, port)?,
    }

    Ok(())
}
