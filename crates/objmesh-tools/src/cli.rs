use std::path::PathBuf;

use clap::ValueHint;
use objmesh_core::{LoadOptions, Triangulation};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Polygon triangulation strategy
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum TriangulationArg {
    /// Triangle count of n/2 + n%2, matching existing OBJ viewers
    Compat,
    /// Full n-2 triangle fan
    Fan,
}

impl std::fmt::Display for TriangulationArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangulationArg::Compat => f.write_str("compat"),
            TriangulationArg::Fan => f.write_str("fan"),
        }
    }
}

impl From<TriangulationArg> for Triangulation {
    fn from(arg: TriangulationArg) -> Self {
        match arg {
            TriangulationArg::Compat => Triangulation::Compat,
            TriangulationArg::Fan => Triangulation::Fan,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,objmesh=info,objmesh_io=info",
        env = "OBJMESH_LOG"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    /// Load on the background worker and show progress bars
    #[arg(long = "async")]
    pub background: bool,
    /// Polygon triangulation strategy
    #[arg(short, long, default_value_t = TriangulationArg::Compat)]
    pub triangulation: TriangulationArg,
    /// Summary output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Include vertex and index buffers in the output
    #[arg(long)]
    pub dump: bool,
    /// OBJ files to load
    #[arg(num_args = 1.., required = true, value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new().with_triangulation(self.triangulation.into())
    }
}

/// Set up log output on stderr
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["objmesh", "model.obj"]).unwrap();
        assert!(!cli.background);
        assert!(!cli.dump);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.load_options().triangulation(), Triangulation::Compat);
        assert_eq!(cli.files, vec![PathBuf::from("model.obj")]);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "objmesh",
            "--async",
            "--triangulation",
            "fan",
            "--format",
            "json",
            "--dump",
            "a.obj",
            "b.obj",
        ])
        .unwrap();
        assert!(cli.background);
        assert!(cli.dump);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.load_options().triangulation(), Triangulation::Fan);
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_requires_a_file() {
        assert!(Cli::try_parse_from(["objmesh"]).is_err());
    }
}
