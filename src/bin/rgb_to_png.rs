use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use stored_png::{chunks, output, PNG};

const USAGE: &str = "usage: rgb-to-png <input_path> <width> <height> <output_path>";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    input: PathBuf,
    width: u32,
    height: u32,
    output: PathBuf,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let args: Vec<_> = args.into_iter().collect();
    let [input, width, height, output] = args.as_slice() else {
        bail!("expected 4 arguments, got {}\n{USAGE}", args.len());
    };
    Ok(Args {
        input: input.into(),
        width: parse_dimension("width", width)?,
        height: parse_dimension("height", height)?,
        output: output.into(),
    })
}

fn parse_dimension(name: &str, value: &str) -> anyhow::Result<u32> {
    let parsed: u32 = value
        .parse()
        .with_context(|| format!("{name} must be a positive integer, got {value:?}"))?;
    if parsed == 0 {
        bail!("{name} must be a positive integer, got 0");
    }
    Ok(parsed)
}

fn log_chunks(png: &[u8]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let Ok((rest, _)) = chunks::parse_signature(png) else {
        log::warn!("output does not start with the PNG signature");
        return;
    };
    for chunk in chunks::iter_chunks(rest) {
        match chunk {
            Ok(chunk) => log::debug!(
                "{} chunk, {} bytes",
                String::from_utf8_lossy(chunk.chunk_type),
                chunk.data.len()
            ),
            Err(e) => log::warn!("{e}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
    let args = parse_args(std::env::args().skip(1))?;

    let pixels = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let png = PNG::from_rgb(args.width, args.height, &pixels)
        .and_then(|image| image.encode())
        .with_context(|| format!("Failed to encode {}", args.input.display()))?;
    log_chunks(&png);

    output::write_atomically(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "wrote {}x{} image to {} ({} bytes)",
        args.width,
        args.height,
        args.output.display(),
        png.len()
    );
    Ok(())
}
