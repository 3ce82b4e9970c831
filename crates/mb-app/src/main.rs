use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use mb_core::config::RasterConfig;
use mb_core::traits::WriterSink;
use mb_raster::Rasterizer;

pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr : stdout ne porte que l'image)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let mut config = resolve_config(&cli, Path::new(cli::DEFAULT_CONFIG_PATH))?;

    // 3b. Appliquer les overrides CLI
    cli.apply_overrides(&mut config);

    // 4. Valider et construire le rasterizer
    let raster = Rasterizer::from_config(&config).context("Paramètres de rendu invalides")?;
    let grid = raster.grid();
    log::info!(
        "Rendu {}×{}, x {}..={}, y {}..={}, maxiter={}",
        raster.columns(),
        raster.rows(),
        grid.x.coord(0),
        grid.x.coord(raster.columns() - 1),
        grid.y.coord(0),
        grid.y.coord(raster.rows() - 1),
        raster.max_iter()
    );

    // 5. Rendu ligne par ligne sur stdout
    let stdout = io::stdout();
    let mut sink = WriterSink::new(BufWriter::new(stdout.lock()));
    match raster.render_to(&mut sink) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Sortie fermée avant la fin du rendu");
            Ok(())
        }
        result => result.context("Écriture sur stdout impossible"),
    }
}

/// Resolve config: an explicit --config must exist, `default_path` may not.
fn resolve_config(cli: &cli::Cli, default_path: &Path) -> Result<RasterConfig> {
    if let Some(ref path) = cli.config {
        return mb_core::config::load_config(path);
    }

    if default_path.exists() {
        mb_core::config::load_config(default_path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            default_path.display()
        );
        Ok(RasterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let path = missing.to_string_lossy().into_owned();
        let cli = cli::Cli::try_parse_from(["mandelscii", "--config", path.as_str()]).unwrap();
        assert!(resolve_config(&cli, Path::new(cli::DEFAULT_CONFIG_PATH)).is_err());
    }

    #[test]
    fn explicit_config_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nmaxiter = 10\n\n[grid]\ncolumns = 20").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = cli::Cli::try_parse_from(["mandelscii", "-c", path.as_str(), "--rows", "5"]).unwrap();
        let mut config = resolve_config(&cli, Path::new(cli::DEFAULT_CONFIG_PATH)).unwrap();
        cli.apply_overrides(&mut config);

        let raster = Rasterizer::from_config(&config).unwrap();
        let lines = raster.render_lines();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.len() == 20));
        assert_eq!(raster.max_iter(), 10);
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli::Cli::try_parse_from(["mandelscii"]).unwrap();
        let config = resolve_config(&cli, &dir.path().join("default.toml")).unwrap();
        assert_eq!(config, RasterConfig::default());
    }

    #[test]
    fn present_default_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "[render]\nmaxiter = 12\n").unwrap();
        let cli = cli::Cli::try_parse_from(["mandelscii"]).unwrap();
        let config = resolve_config(&cli, &path).unwrap();
        assert_eq!(config.max_iter, 12);
    }

    #[test]
    fn invalid_override_is_reported() {
        let mut config = RasterConfig::default();
        let cli = cli::Cli::try_parse_from(["mandelscii", "--dx", "0"]).unwrap();
        cli.apply_overrides(&mut config);
        assert!(Rasterizer::from_config(&config).is_err());
    }
}
