use anyhow::{Context, Result};
use buildgen_core::{
    BuildFileGenerator, GeneratorConfig, PackageResolver, write_build_file,
};
use std::io::Write;
use tracing::{debug, info};

/// What to do with the resolved package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write `<dir>/BUILD`
    #[default]
    Write,
    /// Print the BUILD text to stdout
    DryRun,
    /// Print the resolved metadata as JSON
    Json,
}

pub fn generate_command<R: PackageResolver>(
    resolver: &R,
    config: &GeneratorConfig,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    debug!("Generating BUILD file for {} (root {})", config.package, config.root_prefix);

    let pkg = resolver
        .resolve(&config.package)
        .context("Error importing package")?;

    if mode == OutputMode::Json {
        let json = serde_json::to_string_pretty(&pkg)?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    let contents = BuildFileGenerator::from_config(config).generate(&pkg);

    if mode == OutputMode::DryRun {
        out.write_all(contents.as_bytes())?;
        return Ok(());
    }

    let path = write_build_file(&pkg.dir, &contents).context("Error creating BUILD file")?;
    info!("Wrote {}", path.display());
    Ok(())
}
