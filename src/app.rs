use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use log::{info, warn};
use regex::Regex;

use crate::cli::{Config, resolve_use_color};
use crate::fs_walk::collect_files;
use crate::search::process_input;

pub fn run(cfg: Config) -> anyhow::Result<i32> {
    let use_color = resolve_use_color(cfg.color);

    let expression = cfg
        .preset
        .build()
        .with_context(|| format!("building preset {:?}", cfg.preset))?;
    let pattern = expression.serialize().context("serializing expression")?;

    println!("Expression: {pattern}");
    if cfg.print {
        return Ok(0);
    }

    let rex = Regex::new(&pattern).with_context(|| format!("compiling {pattern:?}"))?;
    info!("compiled {pattern:?}");

    let mut global_matched = false;

    if cfg.paths.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        for line in process_input(&buffer, &rex, None, use_color, &mut global_matched, false) {
            println!("{line}");
        }
        return Ok(if global_matched { 0 } else { 1 });
    }

    // expand input paths to concrete files
    let mut files = Vec::new();
    for p in &cfg.paths {
        files.extend(collect_files(Path::new(p), cfg.recursive));
    }

    let show_filename = cfg.recursive || files.len() > 1;

    for path in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!("{}: {err}", path.display());
                continue;
            }
        };
        let name = path.to_string_lossy();
        for line in process_input(
            &content,
            &rex,
            Some(name.as_ref()),
            use_color,
            &mut global_matched,
            show_filename,
        ) {
            println!("{line}");
        }
    }

    Ok(if global_matched { 0 } else { 1 })
}
