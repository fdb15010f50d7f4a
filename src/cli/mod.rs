use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use log::{debug, info};
use shtree::ast::{check_spans, walk, File, Node, Spanned, VisitResult, Visitor};
use shtree::token::Token;
use shtree::PrintConfig;
use std::convert::Infallible;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shtree")]
#[command(version, about = "Render and inspect shell syntax trees", long_about = None)]
pub struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print a JSON syntax tree as shell source
    Render {
        /// Tree file
        #[arg(value_name = "TREE")]
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Printer configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List every node with its span
    Spans {
        #[arg(value_name = "TREE")]
        input: PathBuf,
    },

    /// Validate node spans
    Check {
        /// Trees to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show the token vocabulary
    Tokens,
}

impl Args {
    /// Log filter implied by the flags, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Render {
            input,
            output,
            config,
        } => render(&input, output.as_deref(), config.as_deref()),
        Commands::Spans { input } => show_spans(&input),
        Commands::Check { inputs } => check_trees(&inputs, args.quiet),
        Commands::Tokens => show_tokens(),
    }
}

fn load_tree(path: &Path) -> Result<File> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tree file {}", path.display()))?;
    let file: File = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tree in {}", path.display()))?;
    debug!("loaded {} with {} statements", path.display(), file.stmts.len());
    Ok(file)
}

fn load_config(path: Option<&Path>) -> Result<PrintConfig> {
    let Some(path) = path else {
        return Ok(PrintConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    PrintConfig::from_toml(&content)
        .with_context(|| format!("Invalid config in {}", path.display()))
}

fn render(input: &Path, output: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let tree = load_tree(input)?;
    let config = load_config(config)?;

    match output {
        Some(path) => {
            let text = shtree::to_string_with(&tree, &config)
                .with_context(|| format!("Failed to render {}", input.display()))?;
            fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            shtree::print_with(&tree, &mut handle, &config)
                .with_context(|| format!("Failed to render {}", input.display()))?;
        }
    }

    Ok(())
}

/// Prints one line per node, indented by nesting depth.
struct SpanLister<W: Write> {
    output: W,
    depth: usize,
    error: Option<io::Error>,
}

impl<'a, W: Write> Visitor<'a> for SpanLister<W> {
    type Error = Infallible;

    fn visit(&mut self, node: Node<'a>) -> Result<VisitResult, Infallible> {
        if self.error.is_some() {
            return Ok(VisitResult::SkipChildren);
        }
        let line = format!(
            "{}{} {}..{}",
            "  ".repeat(self.depth),
            node.kind(),
            node.pos(),
            node.end()
        );
        if let Err(e) = writeln!(self.output, "{}", line) {
            self.error = Some(e);
            return Ok(VisitResult::SkipChildren);
        }
        if !node.is_leaf() {
            self.depth += 1;
        }
        Ok(VisitResult::Continue)
    }

    fn leave(&mut self, _node: Node<'a>) -> Result<(), Infallible> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}

fn show_spans(input: &Path) -> Result<()> {
    let tree = load_tree(input)?;
    let stdout = io::stdout();
    let mut lister = SpanLister {
        output: stdout.lock(),
        depth: 0,
        error: None,
    };
    match walk(&mut lister, Node::from(&tree)) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    if let Some(e) = lister.error {
        return Err(e).context("Failed to write span listing");
    }
    Ok(())
}

fn check_trees(inputs: &[PathBuf], quiet: bool) -> Result<()> {
    let mut failed = 0;

    for input in inputs {
        let tree = match load_tree(input) {
            Ok(tree) => tree,
            Err(e) => {
                println!("{} {} - {:#}", "✗".red(), input.display(), e);
                failed += 1;
                continue;
            }
        };

        let problems = check_spans(&tree);
        if problems.is_empty() {
            if !quiet {
                println!("{} {} - spans consistent", "✓".green(), input.display());
            }
        } else {
            println!(
                "{} {} - {} span problem(s)",
                "✗".red(),
                input.display(),
                problems.len()
            );
            for problem in &problems {
                println!("  {}", problem);
            }
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} tree(s) failed the span check", failed, inputs.len());
    }
    Ok(())
}

fn show_tokens() -> Result<()> {
    println!("{}", "Token Vocabulary:".bold());
    println!("{:<16} {:<10} {}", "Token", "Spelling", "Class");
    println!("{}", "-".repeat(40));

    for &token in Token::ALL {
        let spelling = match token.as_str() {
            "" => "-".dimmed().to_string(),
            text => format!("{:?}", text),
        };
        println!(
            "{:<16} {:<10} {:?}",
            format!("{:?}", token),
            spelling,
            token.class()
        );
    }

    Ok(())
}
