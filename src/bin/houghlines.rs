use argh::FromArgs;
use houghlines::drawing::{save_lines, RenderOptions};
use houghlines::edge_image::EdgeImage;
use houghlines::hough::{detect_lines, LineDetectionOptions};
use houghlines::report::write_report;
use houghlines::HoughError;
use image::Rgb;
use std::io;
use std::path::PathBuf;

/// Detects straight lines in a binary edge image and draws them on a new image
#[derive(Debug, FromArgs)]
struct Args {
    /// edge image to read; any non-black pixel is an edge
    #[argh(positional)]
    input: PathBuf,

    /// image to write the detected lines to
    #[argh(positional)]
    output: PathBuf,

    /// width of a distance bin in pixels (default: 1)
    #[argh(option, short = 'd', default = "1.0")]
    distance_step: f64,

    /// width of an angle bin in degrees (default: 1)
    #[argh(option, short = 'a', default = "1.0")]
    angle_step: f64,

    /// percentage of the strongest vote count a cluster must exceed (default: 45)
    #[argh(option, short = 't', default = "45.0")]
    threshold: f64,

    /// radius of the disk used to merge each line's votes, at least 1 (default: 4)
    #[argh(option, short = 'r', default = "4")]
    radius: u8,

    /// maximum number of lines to extract
    #[argh(option, short = 'n')]
    max_lines: Option<usize>,

    /// minimum number of votes for a line (default: 1)
    #[argh(option, short = 'm', default = "1")]
    min_votes: u32,

    /// line color, as #rrggbb or a name such as red (default: white)
    #[argh(option, short = 'c', default = "Rgb([255, 255, 255])", from_str_fn(parse_color))]
    color: Rgb<u8>,

    /// background color, as #rrggbb or a name (default: black)
    #[argh(option, short = 'b', default = "Rgb([0, 0, 0])", from_str_fn(parse_color))]
    background: Rgb<u8>,

    /// line thickness in pixels (default: 1)
    #[argh(option, short = 's', default = "1")]
    thickness: u32,

    /// also save the vote space, scaled to 8 bits, to this path
    #[argh(option)]
    accumulator: Option<PathBuf>,

    /// do not print a report line per detected line
    #[argh(switch, short = 'q')]
    quiet: bool,
}

fn parse_color(value: &str) -> Result<Rgb<u8>, String> {
    let named = match value.to_ascii_lowercase().as_str() {
        "black" => Some([0, 0, 0]),
        "white" => Some([255, 255, 255]),
        "red" => Some([255, 0, 0]),
        "green" => Some([0, 255, 0]),
        "blue" => Some([0, 0, 255]),
        "yellow" => Some([255, 255, 0]),
        "cyan" => Some([0, 255, 255]),
        "magenta" => Some([255, 0, 255]),
        "gray" | "grey" => Some([128, 128, 128]),
        _ => None,
    };
    if let Some(rgb) = named {
        return Ok(Rgb(rgb));
    }

    let hex = value
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| format!("unknown color `{}`", value))?;
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color `{}`", value))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let options = LineDetectionOptions {
        distance_step: args.distance_step,
        angle_step: args.angle_step,
        threshold_fraction: args.threshold / 100.0,
        mask_radius: args.radius,
        max_lines: args.max_lines,
        min_votes: args.min_votes,
    };
    let render = RenderOptions {
        line_color: args.color,
        background: args.background,
        thickness: args.thickness,
    };
    options.validate()?;
    render.validate()?;

    let edges = EdgeImage::load(&args.input)?;
    let found = detect_lines(&edges, &options)?;

    if let Some(path) = &args.accumulator {
        found
            .accumulator
            .to_gray_image()
            .save(path)
            .map_err(|source| HoughError::ImageSave {
                path: path.clone(),
                source,
            })?;
    }

    if !args.quiet {
        write_report(&found, io::stdout().lock())?;
    }

    let (width, height) = edges.dimensions();
    save_lines(&args.output, width, height, &found.segments(), &render)?;
    Ok(())
}
