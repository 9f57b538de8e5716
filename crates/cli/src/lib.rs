mod catalog;
mod infer;
mod schema;

use clap::{Parser, Subcommand};
use groovyscope_core::{GroovyLevel, GroovyscopeConfig};
use std::path::PathBuf;

pub use infer::TypeArgs;

#[derive(Parser)]
#[command(
    name = "groovyscope",
    version,
    about = "Static type inference for dynamically typed Groovy code",
    long_about = "Groovyscope answers 'what is the type of the expression here' for Groovy scripts, \
                  including closure parameters, default Groovy methods, extension modules and \
                  categories, and never fails: what it cannot resolve is reported as unknown."
)]
pub struct Cli {
    /// Configuration file (defaults to ~/.groovyscope/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Groovy language level, e.g. 1.8 or 2.5
    #[arg(long, global = true, value_name = "LEVEL")]
    pub level: Option<GroovyLevel>,

    /// Directory or jar searched for extension modules; may be repeated
    #[arg(long = "classpath", global = true, value_name = "PATH")]
    pub classpath: Vec<PathBuf>,

    /// Also print log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer the type of an expression in a Groovy file
    #[command(
        long_about = "Locates the expression at the given range (or at an occurrence of --text) \
                      and prints its inferred type, the type declaring the member used there, \
                      the strategy that resolved it and how certain the answer is."
    )]
    Type(TypeArgs),
    /// List extension methods known at the configured level and classpath
    Catalog {
        /// Only methods with this name
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// List extension modules found on the classpath
    Modules,
    /// Print the JSON schema of the `type --json` output
    Schema,
}

impl Cli {
    /// The configuration file with command line overrides applied.
    pub fn load_config(&self) -> anyhow::Result<GroovyscopeConfig> {
        let mut config = GroovyscopeConfig::load(self.config.as_deref())?;
        if let Some(level) = self.level {
            config.groovy_level = level;
        }
        config.classpath.extend(self.classpath.iter().cloned());
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    let _guard = groovyscope_core::logging::init_logging("cli", &config, cli.verbose);
    tracing::debug!(
        "Groovy level {}, {} classpath entries",
        config.groovy_level,
        config.classpath.len()
    );

    match cli.command {
        Commands::Type(args) => infer::run(&config, &args),
        Commands::Catalog { name } => catalog::list_methods(&config, name.as_deref()),
        Commands::Modules => catalog::list_modules(&config),
        Commands::Schema => schema::run(),
    }
}
