use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fixed::MAX_PRINTABLE_ITER;
use crate::viewport::{Axis, AxisSampler, Grid, Steps, Viewport, step_for};

/// Configuration complète d'une passe de rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine : les
/// défauts reproduisent le rendu classique 80×25 de l'ensemble entier.
///
/// # Example
/// ```
/// use mb_core::config::RasterConfig;
/// let config = RasterConfig::default();
/// assert_eq!(config.max_iter, 32);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RasterConfig {
    // === Région ===
    /// Bornes du plan complexe en virgule fixe (échelle 1/4096).
    pub viewport: Viewport,

    // === Grille ===
    /// Pas horizontal explicite. `None` = dérivé de `columns`.
    pub dx: Option<i64>,
    /// Pas vertical explicite. `None` = dérivé de `rows`.
    pub dy: Option<i64>,
    /// Nombre de colonnes visé quand `dx` est dérivé.
    pub columns: u32,
    /// Nombre de lignes visé quand `dy` est dérivé.
    pub rows: u32,

    // === Itération ===
    /// Plafond d'itérations [0, 94].
    pub max_iter: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            dx: None,
            dy: None,
            columns: 80,
            rows: 25,
            max_iter: 32,
        }
    }
}

impl RasterConfig {
    /// Resolve the nominal steps: explicit values win, missing ones are
    /// derived from the target resolution (truncated). Sampling itself goes
    /// through [`RasterConfig::grid`].
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidResolution`] or [`CoreError::DegenerateStep`]
    /// if a step cannot be derived or is not positive.
    ///
    /// # Example
    /// ```
    /// use mb_core::config::RasterConfig;
    /// use mb_core::viewport::Steps;
    /// let config = RasterConfig { dy: Some(100), ..RasterConfig::default() };
    /// assert_eq!(config.steps().unwrap(), Steps { dx: 145, dy: 100 });
    /// ```
    pub fn steps(&self) -> Result<Steps, CoreError> {
        let dx = match self.dx {
            Some(dx) => dx,
            None => step_for(self.viewport.span_x(), self.columns, Axis::Real)?,
        };
        let dy = match self.dy {
            Some(dy) => dy,
            None => step_for(self.viewport.span_y(), self.rows, Axis::Imaginary)?,
        };
        let steps = Steps { dx, dy };
        steps.validate()?;
        Ok(steps)
    }

    /// Build the sampling grid.
    ///
    /// An explicit `dx`/`dy` samples `min, min + step, …` up to `max`. A
    /// derived axis spreads `columns`/`rows` samples exactly from `min` to
    /// `max`: sample `i` sits at `min + floor(i * span / (n - 1))`, so the
    /// classic 25-row grid has its middle row on the real axis.
    ///
    /// # Errors
    /// Returns the [`CoreError`] of an invalid viewport or step.
    ///
    /// # Example
    /// ```
    /// use mb_core::config::RasterConfig;
    /// let grid = RasterConfig::default().grid().unwrap();
    /// assert_eq!((grid.columns(), grid.rows()), (80, 25));
    /// assert_eq!(grid.y.coord(12), 0);
    /// assert_eq!(grid.x.coord(79), 2867);
    /// ```
    pub fn grid(&self) -> Result<Grid, CoreError> {
        self.viewport.validate()?;
        self.steps()?;
        let vp = &self.viewport;
        let x = match self.dx {
            Some(dx) => AxisSampler::stepped(vp.xmin, vp.xmax, dx),
            None => AxisSampler::spread(vp.xmin, vp.xmax, self.columns),
        };
        let y = match self.dy {
            Some(dy) => AxisSampler::stepped(vp.ymin, vp.ymax, dy),
            None => AxisSampler::spread(vp.ymin, vp.ymax, self.rows),
        };
        Ok(Grid { x, y })
    }

    /// Check the whole configuration before a pass.
    ///
    /// # Errors
    /// Returns the first [`CoreError`] found: viewport bounds, then steps,
    /// then the iteration cap.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.viewport.validate()?;
        self.steps()?;
        if self.max_iter > MAX_PRINTABLE_ITER {
            return Err(CoreError::MaxIterOutOfRange {
                max_iter: self.max_iter,
                limit: MAX_PRINTABLE_ITER,
            });
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    viewport: Option<ViewportSection>,
    grid: Option<GridSection>,
    render: Option<RenderSection>,
}

/// Viewport section, all bounds optional for partial override.
#[derive(Deserialize)]
struct ViewportSection {
    xmin: Option<i64>,
    xmax: Option<i64>,
    ymin: Option<i64>,
    ymax: Option<i64>,
}

#[derive(Deserialize)]
struct GridSection {
    dx: Option<i64>,
    dy: Option<i64>,
    columns: Option<u32>,
    rows: Option<u32>,
}

#[derive(Deserialize)]
struct RenderSection {
    maxiter: Option<u32>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// Sections `[viewport]`, `[grid]` et `[render]`, toutes optionnelles.
///
/// # Errors
/// Returns an error if the document is not valid TOML, does not match the
/// expected shape, or describes an invalid configuration.
///
/// # Example
/// ```
/// use mb_core::config::parse_config;
/// let config = parse_config("[render]\nmaxiter = 16\n").unwrap();
/// assert_eq!(config.max_iter, 16);
/// assert_eq!(config.columns, 80);
/// ```
pub fn parse_config(content: &str) -> Result<RasterConfig> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| CoreError::Config(e.message().to_owned()))?;

    let mut config = RasterConfig::default();

    if let Some(v) = file.viewport {
        if let Some(x) = v.xmin {
            config.viewport.xmin = x;
        }
        if let Some(x) = v.xmax {
            config.viewport.xmax = x;
        }
        if let Some(y) = v.ymin {
            config.viewport.ymin = y;
        }
        if let Some(y) = v.ymax {
            config.viewport.ymax = y;
        }
    }

    if let Some(g) = file.grid {
        if g.dx.is_some() {
            config.dx = g.dx;
        }
        if g.dy.is_some() {
            config.dy = g.dy;
        }
        if let Some(n) = g.columns {
            config.columns = n;
        }
        if let Some(n) = g.rows {
            config.rows = n;
        }
    }

    if let Some(r) = file.render {
        if let Some(n) = r.maxiter {
            config.max_iter = n;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the
/// resulting configuration is invalid.
///
/// # Example
/// ```no_run
/// use mb_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RasterConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::debug!("Configuration chargée depuis {} : {config:?}", path.display());
    Ok(config)
}
