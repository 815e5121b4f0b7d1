//! Command-line wrapper: read a stencil file, normalize every shape, write
//! the result. Flags mirror the fields of [`NormalizeConfig`].

use glyphfit::normalize::normalize_document;
use glyphfit::{NormalizeConfig, xml};
use miette::{IntoDiagnostic, WrapErr, miette};

const USAGE: &str = "\
Usage: glyphfit [options] <input.xml> <output.xml>

Options:
  --stroke-width <n>    stroke width written onto every shape (default 2)
  --x-padding <n>       minimum horizontal margin, each side (default 5)
  --y-padding <n>       minimum vertical margin (default 2)
  --adjust-x <n>        nudge every glyph right by n after centering
  --adjust-y <n>        nudge every glyph up by n after centering
  --fill-all            rewrite stroke primitives to fillstroke
  --centered            center glyphs vertically instead of bottom-anchoring
  --strip-stroke-color  remove strokecolor primitives
";

fn main() -> miette::Result<()> {
    // Logs go to stderr; stdout carries the shape names
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (config, input, output) = parse_args(std::env::args().skip(1))?;

    let source = std::fs::read_to_string(&input)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {input}"))?;

    let mut root = xml::parse(&source)?;
    let names = normalize_document(&mut root, &config)?;
    for name in &names {
        println!("{name}");
    }
    let result = xml::serialize(&root)?;

    std::fs::write(&output, result)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;
    Ok(())
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> miette::Result<(NormalizeConfig, String, String)> {
    let mut config = NormalizeConfig::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stroke-width" => config.stroke_width = num_flag(&arg, args.next())?,
            "--x-padding" => config.x_padding = num_flag(&arg, args.next())?,
            "--y-padding" => config.y_padding = num_flag(&arg, args.next())?,
            "--adjust-x" => config.adjust_x = num_flag(&arg, args.next())?,
            "--adjust-y" => config.adjust_y = num_flag(&arg, args.next())?,
            "--fill-all" => config.fill_all = true,
            "--centered" => config.centered = true,
            "--strip-stroke-color" => config.strip_stroke_color = true,
            "--help" | "-h" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(miette!("unknown option `{other}`\n\n{USAGE}"));
            }
            _ => positional.push(arg),
        }
    }

    match <[String; 2]>::try_from(positional) {
        Ok([input, output]) => Ok((config, input, output)),
        Err(_) => Err(miette!("expected an input and an output path\n\n{USAGE}")),
    }
}

fn num_flag(flag: &str, value: Option<String>) -> miette::Result<f64> {
    let value = value.ok_or_else(|| miette!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| miette!("{flag}: `{value}` is not a number"))
}
