use anyhow::Result;
use buildgen_core::{BuildContext, GeneratorConfig, GoPathResolver};
use clap::Parser;

use crate::commands::{OutputMode, generate_command};

/// Generate a Bazel BUILD file for a Go package
#[derive(Parser, Debug)]
#[command(name = "go-buildgen")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:
    GOPATH, GOROOT       Where packages are looked up; without GOROOT,
                         `go env GOROOT` is used when go is on PATH
    GOOS, GOARCH         Platform used for build constraints
    CGO_ENABLED=0|1      Disable or enable cgo; when unset, enabled
                         only for the host GOOS/GOARCH
    RUST_LOG=debug       Enable debug logging")]
pub struct Cli {
    /// Import path of the package to generate a BUILD file for
    #[arg(long = "pkg", value_name = "IMPORT_PATH")]
    pub pkg: Option<String>,

    /// Root package (prefix of -pkg), defaults to -pkg
    #[arg(long = "rootPkg", visible_alias = "root-pkg", value_name = "PREFIX")]
    pub root_pkg: Option<String>,

    /// Extra build tags, comma separated
    #[arg(long = "tags", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Do not emit a go_test target
    #[arg(long = "no-tests")]
    pub no_tests: bool,

    /// Print the BUILD file instead of writing it
    #[arg(short = 'd', long = "dry-run", conflicts_with = "json")]
    pub dry_run: bool,

    /// Print the resolved package as JSON instead of generating
    #[arg(long = "json")]
    pub json: bool,
}

impl Cli {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        let config = GeneratorConfig::new(self.pkg.as_deref(), self.root_pkg.as_deref())?
            .with_tests(!self.no_tests);
        let ctx = BuildContext::from_env().with_tags(self.tags);
        let resolver = GoPathResolver::new(ctx)?;

        let mode = if self.json {
            OutputMode::Json
        } else if self.dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        };

        generate_command(&resolver, &config, mode, &mut std::io::stdout().lock())
    }
}
