use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{render_config, AppConfig};
use crate::coordinate::{
    absolute_to_normalized, bounds_to_normalized, normalized_area_to_center,
    normalized_to_absolute, validate_normalized_area, validate_normalized_coords, DeviceContext,
    ScreenSize,
};
use crate::errors::CoordinateResult;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert between normalized [0, 1000] and absolute pixel screen coordinates",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Screen width in pixels (requires --height)
    #[arg(long, global = true, requires = "height")]
    pub width: Option<i64>,
    /// Screen height in pixels (requires --width)
    #[arg(long, global = true, requires = "width")]
    pub height: Option<i64>,
    /// JSON device context with an optional `screen_bounds` entry
    #[arg(long = "device-context", value_name = "FILE", global = true, conflicts_with = "width")]
    pub device_context: Option<PathBuf>,
    #[arg(long = "json", short = 'j', global = true, help = "Print output as JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Normalized point to absolute pixels
    #[command(allow_negative_numbers = true)]
    ToAbsolute { x: i64, y: i64 },
    /// Absolute pixels to a normalized point (clamped)
    #[command(allow_negative_numbers = true)]
    ToNormalized { x: i64, y: i64 },
    /// Absolute pixel center of a normalized area
    #[command(allow_negative_numbers = true)]
    Center { x1: i64, y1: i64, x2: i64, y2: i64 },
    /// Normalize a "left,top,right,bottom" pixel rectangle
    Bounds {
        #[arg(allow_hyphen_values = true)]
        bounds: String,
    },
    /// Check a normalized point
    #[command(allow_negative_numbers = true)]
    Validate {
        x: i64,
        y: i64,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Check a normalized area
    #[command(allow_negative_numbers = true)]
    ValidateArea {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Point { x: i64, y: i64 },
    Area { x1: i64, y1: i64, x2: i64, y2: i64 },
    Valid,
    Config { toml: String },
}

impl CommandOutput {
    pub fn render_plain(&self) -> String {
        match self {
            CommandOutput::Point { x, y } => format!("{x},{y}"),
            CommandOutput::Area { x1, y1, x2, y2 } => format!("{x1},{y1},{x2},{y2}"),
            CommandOutput::Valid => "ok".to_string(),
            CommandOutput::Config { toml } => toml.trim_end().to_string(),
        }
    }
}

/// Pick the screen size: explicit `--width/--height`, then a device context
/// file (missing keys take the configured defaults), then the config defaults.
pub fn resolve_screen(cli: &Cli, config: &AppConfig) -> CoordinateResult<ScreenSize> {
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        return ScreenSize::new(width, height);
    }

    if let Some(path) = &cli.device_context {
        let content = std::fs::read_to_string(path)?;
        let ctx: DeviceContext = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), ?ctx, "device context loaded");
        return ScreenSize::from_device_context_or(
            &ctx,
            config.screen.default_width,
            config.screen.default_height,
        );
    }

    config.default_screen()
}

pub fn execute(
    command: &Command,
    screen: &ScreenSize,
    config: &AppConfig,
) -> CoordinateResult<CommandOutput> {
    let output = match command {
        Command::ToAbsolute { x, y } => {
            let (x, y) = normalized_to_absolute(*x, *y, screen)?;
            CommandOutput::Point { x, y }
        }
        Command::ToNormalized { x, y } => {
            let (x, y) = absolute_to_normalized(*x, *y, screen);
            CommandOutput::Point { x, y }
        }
        Command::Center { x1, y1, x2, y2 } => {
            let (x, y) = normalized_area_to_center(*x1, *y1, *x2, *y2, screen)?;
            CommandOutput::Point { x, y }
        }
        Command::Bounds { bounds } => {
            let (x1, y1, x2, y2) = bounds_to_normalized(bounds, screen)?;
            CommandOutput::Area { x1, y1, x2, y2 }
        }
        Command::Validate { x, y, context } => {
            validate_normalized_coords(*x, *y, context)?;
            CommandOutput::Valid
        }
        Command::ValidateArea { x1, y1, x2, y2, context } => {
            validate_normalized_area(*x1, *y1, *x2, *y2, context)?;
            CommandOutput::Valid
        }
        Command::Config => CommandOutput::Config { toml: render_config(config)? },
    };
    Ok(output)
}
