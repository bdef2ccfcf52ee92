// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: detect the rooms of a floor plan image and resize them interactively
//!
//! Usage:
//!   room-editor <image_path> [options]

mod config;
mod prompt;
mod session;

use config::EditorConfig;
use prompt::Prompter;
use std::env;
use std::io;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let config = EditorConfig::from_env().with_args(&args)?;
    tracing::info!(
        image = %config.image_path.display(),
        output_dir = %config.output_dir.display(),
        polarity = ?config.polarity,
        skip_preprocess = config.skip_preprocess,
        "Starting room editor"
    );

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let registry = session::run(&config, &mut prompter)?;

    tracing::info!(rooms = registry.len(), "Session finished");
    Ok(())
}

fn print_usage() {
    println!("Room Editor - name the rooms of a floor plan and resize them");
    println!();
    println!("Usage: room-editor <image_path> [options]");
    println!();
    println!("Options:");
    println!("  --output-dir <dir>       Where previews and results are written (default: ./out)");
    println!("  --min-room-area <px>     Ignore rooms smaller than this many square pixels");
    println!("  --light-boundaries       Walls are light on a dark background");
    println!("  --skip-preprocess        Input is already binarized and line-closed");
    println!("  --json                   Also write rooms.json");
    println!();
    println!("Environment:");
    println!("  ROOM_EDITOR_OUTPUT_DIR, ROOM_EDITOR_MIN_ROOM_AREA,");
    println!("  ROOM_EDITOR_LIGHT_BOUNDARIES, RUST_LOG");
}
