use std::path::PathBuf;

use clap::Parser;
use mb_core::config::RasterConfig;
use mb_core::fixed::to_fixed;

/// Configuration lue quand `--config` n'est pas fourni.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// mandelscii — Mandelbrot en ASCII, arithmétique virgule fixe.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml (optionnel).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Borne gauche. Entier = virgule fixe (1/4096), décimal = réel (ex: -2.1).
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coord)]
    pub xmin: Option<i64>,

    /// Borne droite.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coord)]
    pub xmax: Option<i64>,

    /// Borne basse, première ligne affichée.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coord)]
    pub ymin: Option<i64>,

    /// Borne haute.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_coord)]
    pub ymax: Option<i64>,

    /// Pas horizontal explicite (virgule fixe). Prioritaire sur --columns.
    #[arg(long, allow_hyphen_values = true)]
    pub dx: Option<i64>,

    /// Pas vertical explicite (virgule fixe). Prioritaire sur --rows.
    #[arg(long, allow_hyphen_values = true)]
    pub dy: Option<i64>,

    /// Nombre de colonnes, réparties de xmin à xmax.
    #[arg(long)]
    pub columns: Option<u32>,

    /// Nombre de lignes, réparties de ymin à ymax.
    #[arg(long)]
    pub rows: Option<u32>,

    /// Plafond d'itérations [0, 94].
    #[arg(long)]
    pub maxiter: Option<u32>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration.
    ///
    /// `--columns`/`--rows` discard a step coming from the file so the new
    /// resolution takes effect; an explicit `--dx`/`--dy` still wins.
    pub fn apply_overrides(&self, config: &mut RasterConfig) {
        if let Some(v) = self.xmin {
            config.viewport.xmin = v;
        }
        if let Some(v) = self.xmax {
            config.viewport.xmax = v;
        }
        if let Some(v) = self.ymin {
            config.viewport.ymin = v;
        }
        if let Some(v) = self.ymax {
            config.viewport.ymax = v;
        }
        if let Some(n) = self.columns {
            config.columns = n;
            config.dx = None;
        }
        if let Some(n) = self.rows {
            config.rows = n;
            config.dy = None;
        }
        if self.dx.is_some() {
            config.dx = self.dx;
        }
        if self.dy.is_some() {
            config.dy = self.dy;
        }
        if let Some(n) = self.maxiter {
            config.max_iter = n;
        }
    }
}

/// Parse a viewport coordinate: integers are taken as fixed-point, anything
/// with a decimal point or exponent as a real value.
fn parse_coord(raw: &str) -> Result<i64, String> {
    if let Ok(fixed) = raw.parse::<i64>() {
        return Ok(fixed);
    }
    match raw.parse::<f64>() {
        Ok(real) if real.is_finite() => Ok(to_fixed(real)),
        _ => Err(format!("coordonnée invalide : {raw}")),
    }
}
