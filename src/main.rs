// SPDX-License-Identifier: MIT
//
// tinct — accessible color ramps from a single base color.
//
// This is the CLI that wires together the crates:
//
//   tinct-color → color parsing, OKLCH/HSL math, WCAG contrast
//   tinct-ramp  → the ramp pipeline and the JSON export formats
//
// One invocation flows through:
//
//   argv → clap → parse color → RampPair::generate
//        → truecolor preview + contrast warnings
//        → export JSON (stdout, with --format)

use std::fmt::Write as _;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use tinct_color::{parse_as, Space};
use tinct_ramp::export::{self, Format};
use tinct_ramp::{Mode, Options, Ramp, RampPair, Scale};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tinct", version, about = "Generate accessible light/dark color ramps")]
struct Args {
    /// Base color: hex, `rgb(...)`, `r,g,b`, `hsl(...)`, `oklch(...)`,
    /// or a CSS color name
    color: String,

    /// Working color space for generation
    #[arg(long, value_enum, default_value_t = SpaceArg::Oklch)]
    space: SpaceArg,

    /// Which mode's ramp reproduces the base color exactly
    #[arg(long, value_enum, default_value_t = AnchorArg::Light)]
    anchor: AnchorArg,

    /// Chroma boost, 0-100
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    vibrancy: u8,

    /// Color name used in export documents
    #[arg(long, default_value = "color")]
    name: String,

    /// Collection name used in export documents
    #[arg(long, default_value = "tinct")]
    collection: String,

    /// Write export JSON to stdout in this format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Skip the terminal preview
    #[arg(long)]
    no_preview: bool,

    /// Suppress the preview and contrast warnings
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpaceArg {
    Oklch,
    Hsl,
}

impl From<SpaceArg> for Space {
    fn from(arg: SpaceArg) -> Self {
        match arg {
            SpaceArg::Oklch => Self::Oklch,
            SpaceArg::Hsl => Self::Hsl,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AnchorArg {
    Light,
    Dark,
}

impl From<AnchorArg> for Mode {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Light => Self::Light,
            AnchorArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Paired,
    Themed,
    LightRamp,
    DarkRamp,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Paired => Self::Paired,
            FormatArg::Themed => Self::Themed,
            FormatArg::LightRamp => Self::LightRamp,
            FormatArg::DarkRamp => Self::DarkRamp,
        }
    }
}

// ─── Preview ────────────────────────────────────────────────────────────────

/// One truecolor row: every swatch as a colored cell with its scale
/// label (anchor starred), rendered in its text color with the contrast
/// ratio alongside.
fn preview_row(ramp: &Ramp, anchor: Scale) -> String {
    let mut row = String::new();
    for swatch in ramp.swatches() {
        let [r, g, b] = swatch.background.rgb8();
        let [tr, tg, tb] = swatch.text.rgb8();
        let mark = if swatch.scale == anchor { '*' } else { ' ' };
        let _ = write!(
            row,
            "\x1b[48;2;{r};{g};{b}m\x1b[38;2;{tr};{tg};{tb}m {:>3}{mark}{:>5.2} \x1b[0m",
            swatch.scale.value(),
            swatch.contrast_ratio,
        );
    }
    row
}

fn print_preview(pair: &RampPair) {
    println!("Light  {}", preview_row(pair.light(), pair.anchor(Mode::Light)));
    println!("Dark   {}", preview_row(pair.dark(), pair.anchor(Mode::Dark)));
}

// ─── Entry ──────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let base = match parse_as(&args.color, args.space.into()) {
        Ok(color) => color,
        Err(err) => {
            eprintln!("tinct: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        space: args.space.into(),
        anchor: args.anchor.into(),
        vibrancy: args.vibrancy,
    };
    let pair = RampPair::generate(base, &options);
    log::debug!(
        "generated pair for {} (anchors: light {}, dark {})",
        base.hex(),
        pair.anchor(Mode::Light).value(),
        pair.anchor(Mode::Dark).value(),
    );

    if !args.no_preview && !args.quiet {
        print_preview(&pair);
    }

    if !args.quiet {
        for warning in pair.contrast_warnings() {
            eprintln!(
                "warning: {} {} reaches only {:.2}:1 against its text color",
                warning.mode.name(),
                warning.scale.value(),
                warning.ratio,
            );
        }
    }

    if let Some(format) = args.format {
        let doc = export::export(&pair, &args.name, &args.collection, format.into());
        match doc.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("tinct: export failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
