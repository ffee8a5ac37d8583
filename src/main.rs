use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use modscope::analyzer::analyze_project;
use modscope::report::{write_report, ReportData, ReportFormat};

#[derive(Parser)]
#[command(name = "modscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Module dependency graph and import optimization analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze imports and dependencies in a source tree
    Analyze {
        /// Path to analyze (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Report format: markdown or json
        #[arg(short, long, default_value = "markdown")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            path,
            format,
            output,
        }) => {
            let analysis = analyze_project(&path)
                .with_context(|| format!("failed to analyze {}", path.display()))?;
            let data = ReportData::from_analysis(&analysis);

            match output {
                Some(target) => {
                    let mut file = File::create(&target)
                        .with_context(|| format!("failed to create {}", target.display()))?;
                    write_report(format, &data, &mut file)?;
                    println!("Report written to {}", target.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    write_report(format, &data, &mut handle)?;
                    handle.flush()?;
                }
            }
        }
        Some(Commands::Version) => {
            println!("modscope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("ModScope - Module Dependency & Import Analyzer");
            println!("Run 'modscope analyze' to analyze a source tree");
            println!("Run 'modscope --help' for more information");
        }
    }

    Ok(())
}
