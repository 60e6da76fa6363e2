use std::io::{self, IsTerminal};

use clap::{Parser, ValueEnum};

use rexbuild::presets::Preset;

use crate::logging::LogArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

/// Build a demonstration pattern and try it against candidate lines.
#[derive(Debug, Parser)]
#[command(name = "rexbuild", version)]
pub struct Config {
    /// Which built-in expression to assemble.
    #[arg(short, long, value_enum, default_value_t = Preset::Email)]
    pub preset: Preset,

    /// Print the assembled pattern and exit.
    #[arg(long)]
    pub print: bool,

    /// Descend into directories given as paths.
    #[arg(short, long)]
    pub recursive: bool,

    /// Color the match verdicts.
    #[arg(long, value_enum, default_value_t = ColorWhen::Never)]
    pub color: ColorWhen,

    #[command(flatten)]
    pub logging: LogArgs,

    /// Files of candidate lines; stdin when empty.
    pub paths: Vec<String>,
}

pub fn resolve_use_color(color: ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}
