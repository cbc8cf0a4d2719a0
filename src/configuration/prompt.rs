//! Startup console: banner, body table, scale-mode prompt, controls help.
//!
//! Reads from any `BufRead` and writes to any `Write` so the prompt can be
//! driven from memory in tests.

use std::io::{self, BufRead, Write};

use crate::configuration::config::BodyConfig;
use crate::simulation::scale::ScaleMode;

const RULE_WIDTH: usize = 70;

pub fn rule(c: char) -> String {
    std::iter::repeat(c).take(RULE_WIDTH).collect()
}

/// Map one line of prompt input to a scale mode.
/// `None` means the input was not one of the offered choices.
pub fn parse_scale_choice(input: &str) -> Option<ScaleMode> {
    match input.trim() {
        "" | "2" => Some(ScaleMode::Logarithmic),
        "1" => Some(ScaleMode::Realistic),
        "3" => Some(ScaleMode::Artistic),
        _ => None,
    }
}

/// Ask for the scale mode once. Empty input, end-of-input and anything
/// unrecognised all fall back to logarithmic.
pub fn prompt_scale_mode<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<ScaleMode> {
    writeln!(out, "\n[2/4] Select visualization scale mode:")?;
    writeln!(out, "  1. Realistic - True scale (planets very small)")?;
    writeln!(out, "  2. Logarithmic - Logarithmic scale (balanced)")?;
    writeln!(out, "  3. Artistic - Artistic scale (exaggerated, most visible)")?;
    write!(out, "\nEnter choice (1-3) [default: 2]: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;

    let mode = if read == 0 {
        writeln!(out)?;
        ScaleMode::default()
    } else {
        match parse_scale_choice(&line) {
            Some(mode) => mode,
            None => {
                writeln!(out, "Unrecognised choice `{}`, using default", line.trim())?;
                ScaleMode::default()
            }
        }
    };
    writeln!(out, "✓ Using {mode} scale mode")?;
    Ok(mode)
}

pub fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "3D SOLAR SYSTEM SIMULATOR")?;
    writeln!(out, "{}", rule('='))
}

/// Table of {name, radius km, distance AU, period days}
pub fn print_body_table<W: Write>(out: &mut W, bodies: &[BodyConfig]) -> io::Result<()> {
    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "SOLAR SYSTEM BODIES")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(
        out,
        "{:<12} {:<15} {:<15} {:<15}",
        "Body", "Radius (km)", "Distance (AU)", "Period (days)"
    )?;
    writeln!(out, "{}", rule('-'))?;
    for b in bodies {
        writeln!(
            out,
            "{:<12} {:<15} {:<15.2} {:<15}",
            b.name,
            group_thousands(b.radius_km),
            b.distance_au,
            group_thousands(b.period_days)
        )?;
    }
    writeln!(out, "{}", rule('='))
}

pub fn print_controls<W: Write>(out: &mut W, bodies: &[BodyConfig]) -> io::Result<()> {
    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "CONTROLS:")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "Mouse Controls:")?;
    writeln!(out, "  • Click and drag       - Rotate view")?;
    writeln!(out, "  • Scroll wheel         - Zoom in/out")?;
    writeln!(out, "  • Right-click and drag - Pan view")?;
    writeln!(out, "\nButton Controls:")?;
    writeln!(out, "  • Pause/Resume  - Pause or resume animation")?;
    writeln!(out, "  • Toggle Orbits - Show/hide orbital paths")?;
    writeln!(out, "  • Toggle Labels - Show/hide planet names")?;
    writeln!(out, "  • Reset View    - Return to default camera angle")?;
    writeln!(out, "\nSlider:")?;
    writeln!(out, "  • Speed - Adjust simulation speed (0.1x to 10x)")?;
    writeln!(out, "\nColor Legend:")?;
    for b in bodies {
        writeln!(out, "  • {:<12} - {}", b.name, b.color)?;
    }
    writeln!(out, "{}", rule('='))
}

/// Whole number with `,` thousands separators, e.g. 696000 -> "696,000"
pub fn group_thousands(v: f64) -> String {
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}
