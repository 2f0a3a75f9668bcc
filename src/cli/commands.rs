use crate::api::server::ApiConfig;
use crate::error::FillResult;
use crate::export::write_exports;
use crate::pipeline::{self, Analysis};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Execute the process command: run the transform and write one .xlsx
/// per copy group into the output directory.
pub fn process(
    source: PathBuf,
    template: PathBuf,
    out_dir: PathBuf,
    name_template: String,
    verbose: bool,
) -> FillResult<()> {
    println!("{}", "📊 Linkfill - Merging links into template".bold().green());
    println!("   Source:   {}", source.display());
    println!("   Template: {}", template.display());
    println!();

    let analysis = pipeline::analyze_files(&source, &template)?;

    print_warnings(&analysis);
    if verbose {
        print_columns(&analysis);
        println!("   Links found: {}", analysis.link_count.to_string().bold());
        println!(
            "   Longest content: {} chars\n",
            analysis.max_content_length.to_string().bold()
        );
    }

    if analysis.exports.is_empty() {
        println!(
            "{}",
            "⚠️  No copy group has a complete locale/region row; nothing to export".yellow()
        );
        return Ok(());
    }

    fs::create_dir_all(&out_dir)?;
    let paths = write_exports(&analysis.exports, &out_dir, &name_template)?;

    println!("{}", "✅ Export complete:".bold().green());
    for (export, path) in analysis.exports.iter().zip(&paths) {
        println!(
            "   {} {} ({} rows)",
            format!("group {}", export.group_id).bright_blue().bold(),
            path.display(),
            export.sheet.row_count()
        );
    }

    Ok(())
}

/// Execute the inspect command: analyze only, print what would be exported
pub fn inspect(source: PathBuf, template: PathBuf) -> FillResult<()> {
    println!("{}", "🔍 Linkfill - Inspect".bold().green());
    println!("   Source:   {}", source.display());
    println!("   Template: {}\n", template.display());

    let analysis = pipeline::analyze_files(&source, &template)?;

    print_columns(&analysis);
    println!("   Links found: {}", analysis.link_count.to_string().bold());
    println!(
        "   Longest content: {} chars\n",
        analysis.max_content_length.to_string().bold()
    );
    print_warnings(&analysis);

    println!("{}", "📦 Copy groups:".bold().cyan());
    if analysis.exports.is_empty() {
        println!("   (none survive the locale/region filter)");
    }
    for export in &analysis.exports {
        println!(
            "   {} → {} ({} rows)",
            format!("group {}", export.group_id).bright_blue().bold(),
            export.default_name,
            export.sheet.row_count()
        );
    }

    Ok(())
}

/// Execute the serve command: run the API server in-process
pub fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let config = ApiConfig { host, port };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::api::run_api_server(config))
}

fn print_columns(analysis: &Analysis) {
    println!("{}", "📋 Resolved columns:".bold().cyan());
    for (role, column) in &analysis.columns {
        match column {
            Some(name) => println!("   {:<18} {}", role, name.cyan()),
            None => println!("   {:<18} {}", role, "(absent)".dimmed()),
        }
    }
}

fn print_warnings(analysis: &Analysis) {
    for warning in &analysis.warnings {
        println!("{}", format!("⚠️  {}", warning).yellow());
    }
    if !analysis.warnings.is_empty() {
        println!();
    }
}
