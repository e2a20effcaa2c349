use std::process::ExitCode;

use blockpaint::utils::exporter;
use blockpaint::{GridSpec, PixelEditor, Point, Rgba32, VisibleRegion};

/// Headless driver: load (or create) a canvas, apply one operation, write
/// the result back out as PNG. Mostly useful for eyeballing the engines on
/// real images.
struct Options {
    input: Option<String>,
    output: String,
    op: Op,
    at: Point,
    color: Rgba32,
    block: f32,
    grid_index: Option<usize>,
    scale: f32,
    size: (usize, usize),
}

enum Op {
    Fill,
    Pixelate,
    Paint,
    Clear,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        input: None,
        output: "out.png".to_string(),
        op: Op::Fill,
        at: Point::new(0.0, 0.0),
        color: Rgba32::BLACK,
        block: 8.0,
        grid_index: None,
        scale: 1.0,
        size: (512, 512),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => options.input = args.next(),
            "--output" => {
                options.output = args.next().ok_or("--output needs a path")?;
            }
            "--op" => {
                options.op = match args.next().as_deref() {
                    Some("fill") => Op::Fill,
                    Some("pixelate") => Op::Pixelate,
                    Some("paint") => Op::Paint,
                    Some("clear") => Op::Clear,
                    other => return Err(format!("unknown op {other:?}")),
                };
            }
            "--at" => {
                let value = args.next().ok_or("--at needs x,y")?;
                let (x, y) = value.split_once(',').ok_or("--at needs x,y")?;
                options.at = Point::new(
                    x.parse().map_err(|_| "bad x coordinate")?,
                    y.parse().map_err(|_| "bad y coordinate")?,
                );
            }
            "--color" => {
                let value = args.next().ok_or("--color needs rrggbb hex")?;
                let bits = u32::from_str_radix(&value, 16).map_err(|_| "bad hex color")?;
                options.color = Rgba32::new(
                    (bits >> 16) as u8,
                    (bits >> 8) as u8,
                    bits as u8,
                    255,
                );
            }
            "--block" => {
                options.block = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--block needs a point size")?;
            }
            "--grid" => {
                options.grid_index = Some(
                    args.next()
                        .and_then(|v| v.parse().ok())
                        .ok_or("--grid needs a ladder index")?,
                );
            }
            "--scale" => {
                options.scale = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("--scale needs a factor")?;
            }
            "--size" => {
                let value = args.next().ok_or("--size needs WxH")?;
                let (w, h) = value.split_once('x').ok_or("--size needs WxH")?;
                options.size = (
                    w.parse().map_err(|_| "bad width")?,
                    h.parse().map_err(|_| "bad height")?,
                );
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(options)
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = match &options.input {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            PixelEditor::with_buffer(exporter::decode_png(&bytes, options.scale)?)
        }
        None => PixelEditor::new(options.size.0, options.size.1, options.scale),
    };

    // Either an explicit block size or an entry from the grid ladder the
    // selector UI would offer for this canvas width.
    let block = match options.grid_index {
        Some(index) => {
            let mut grid = GridSpec::for_width(editor.buffer().width() as f32 / options.scale);
            grid.select(index);
            grid.current_size()
        }
        None => options.block,
    };

    let region = VisibleRegion::new(0, editor.buffer().height());
    match options.op {
        Op::Fill => {
            editor.fill(options.at, options.color, region)?;
        }
        Op::Pixelate => {
            editor.pixelate(block, region);
        }
        Op::Paint => {
            editor.start_block_stroke(options.at, block, options.color, region)?;
            editor.finish_block_stroke();
        }
        Op::Clear => {
            editor.clear();
        }
    }

    let bytes = exporter::encode_png(editor.buffer())?;
    std::fs::write(&options.output, bytes)?;
    println!("wrote {}", options.output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!(
                "usage: blockpaint [--input in.png] [--output out.png] [--size WxH] \
                 [--scale F] --op fill|pixelate|paint|clear [--at x,y] [--color rrggbb] \
                 [--block points | --grid index]"
            );
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
