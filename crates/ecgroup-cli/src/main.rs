use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ecgroup_arith::int::{parse_integer, to_decimal, to_hex};
use ecgroup_arith::{mod_inverse, Curve, NamedCurve, Point};
use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;

const SECP256K1_P: &str = "0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";
const SECP256K1_GX: &str = "0x79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";
const SECP256K1_GY: &str = "0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

#[derive(Parser, Debug)]
#[command(
    name = "ecgroup",
    about = "Modular inverses and point addition on short Weierstrass curves"
)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Integer output format
    #[arg(long = "format", value_enum, default_value_t = Format::Hex, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Hex,
    Dec,
}

/// Curve selection shared by the point subcommands.
#[derive(clap::Args, Debug, Clone)]
struct CurveOpts {
    /// Named curve preset (secp256k1, toy)
    #[arg(long = "curve", default_value = "secp256k1", value_parser = parse_named_curve)]
    curve: NamedCurve,

    /// Coefficient a, overrides the preset
    #[arg(long = "a", allow_hyphen_values = true)]
    a: Option<String>,

    /// Coefficient b, overrides the preset
    #[arg(long = "b", allow_hyphen_values = true)]
    b: Option<String>,

    /// Field modulus p, overrides the preset
    #[arg(long = "p")]
    p: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Multiplicative inverse of X modulo P
    #[command(allow_negative_numbers = true)]
    Inverse { x: String, p: String },

    /// Check whether (X, Y) satisfies the curve equation
    #[command(allow_negative_numbers = true)]
    OnCurve {
        #[command(flatten)]
        curve: CurveOpts,
        x: String,
        y: String,
    },

    /// Add (X1, Y1) and (X2, Y2)
    #[command(allow_negative_numbers = true)]
    Add {
        #[command(flatten)]
        curve: CurveOpts,
        x1: String,
        y1: String,
        x2: String,
        y2: String,
        /// Treat the first operand as the identity
        #[arg(long = "identity-left", default_value_t = false)]
        identity_left: bool,
        /// Treat the second operand as the identity
        #[arg(long = "identity-right", default_value_t = false)]
        identity_right: bool,
    },

    /// Double (X, Y)
    #[command(allow_negative_numbers = true)]
    Double {
        #[command(flatten)]
        curve: CurveOpts,
        x: String,
        y: String,
    },

    /// Print the preset's generator point
    Generator {
        #[command(flatten)]
        curve: CurveOpts,
    },

    /// Run the built-in regression checks
    Selftest,
}

fn parse_named_curve(name: &str) -> Result<NamedCurve, String> {
    NamedCurve::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = NamedCurve::ALL.iter().map(|c| c.name()).collect();
        format!("unknown curve '{}' (known: {})", name, known.join(", "))
    })
}

impl CurveOpts {
    /// Preset parameters with any explicit --a/--b/--p applied on top.
    fn build(&self) -> Result<Arc<Curve>> {
        let preset = self.curve.curve();
        let param = |text: &Option<String>, fallback: &BigInt, flag: &str| -> Result<BigInt> {
            match text {
                Some(text) => parse_integer(text).with_context(|| format!("invalid {flag}")),
                None => Ok(fallback.clone()),
            }
        };

        let a = param(&self.a, preset.a(), "--a")?;
        let b = param(&self.b, preset.b(), "--b")?;
        let p = param(&self.p, preset.p(), "--p")?;

        let curve = Curve::from_params(a, b, p).context("invalid curve parameters")?;
        tracing::debug!(%curve, "curve selected");
        Ok(Arc::new(curve))
    }
}

fn render_int(value: &BigInt, format: Format) -> String {
    match format {
        Format::Hex => to_hex(value),
        Format::Dec => to_decimal(value),
    }
}

fn render_point(point: &Point, format: Format) -> String {
    match point.coordinates() {
        None => "identity".to_string(),
        Some((x, y)) => format!("({}, {})", render_int(x, format), render_int(y, format)),
    }
}

fn parse_point(x: &str, y: &str, curve: &Arc<Curve>) -> Result<Point> {
    Point::parse(x, y, curve).with_context(|| format!("invalid point ({x}, {y})"))
}

/// Fail with `what` unless `ok`; log the passing check.
fn check(ok: bool, what: &str) -> Result<()> {
    ensure!(ok, "check failed: {what}");
    tracing::info!("ok: {what}");
    Ok(())
}

/// Regression checks over secp256k1 and the textbook mod-7 curve.
fn selftest(format: Format) -> Result<Vec<String>> {
    let bitcoin_curve = Arc::new(Curve::new("0x0", "0x7", SECP256K1_P)?);
    let bitcoin_g = Point::parse(SECP256K1_GX, SECP256K1_GY, &bitcoin_curve)?;
    check(bitcoin_g.is_on_curve(), "secp256k1 generator is on the curve")?;

    let curve1 = Arc::new(Curve::new("2", "3", "7")?);
    let curve2 = Arc::new(Curve::new("2", "3", "7")?);
    let curve3 = Arc::new(Curve::new("2", "3", "101")?);
    check(curve1 == curve2, "curves with equal parameters are equal")?;
    check(curve1 != curve3, "curves with different moduli differ")?;

    let point1 = Point::parse("3", "4", &curve1)?;
    let point2 = Point::parse("3", "3", &curve2)?;
    let point1_add_point2 = point1.add(&point2)?;
    check(
        point1_add_point2.is_identity(),
        "points on a vertical line sum to the identity",
    )?;

    let point3 = point2.add(&point1_add_point2)?;
    check(
        point3.x() == point2.x() && point3.y() == point2.y(),
        "adding the identity returns the point unchanged",
    )?;

    check(
        point1.add(&Point::parse("3", "4", &curve3)?).is_err(),
        "adding across different curves is rejected",
    )?;

    let inv = mod_inverse(&BigInt::from(3), &BigInt::from(7))?;
    check(inv == BigInt::from(5), "3 * 5 = 1 (mod 7)")?;
    check(
        mod_inverse(&BigInt::from(6), &BigInt::from(9)).is_err(),
        "non-invertible input is reported",
    )?;

    let bitcoin_2g = bitcoin_g.add(&bitcoin_g)?;
    check(bitcoin_2g.is_on_curve(), "secp256k1 2G is on the curve")?;

    Ok(vec![
        format!("G.x: {}", render_int(bitcoin_g.x(), format)),
        format!("2G.x: {}", render_int(bitcoin_2g.x(), format)),
        "All checks passed".to_string(),
    ])
}

/// Execute one subcommand, returning the lines to print.
fn execute(command: &Command, format: Format) -> Result<Vec<String>> {
    match command {
        Command::Inverse { x, p } => {
            let x = parse_integer(x).context("invalid X")?;
            let p = parse_integer(p).context("invalid P")?;
            let inv = mod_inverse(&x, &p)?;
            Ok(vec![render_int(&inv, format)])
        }
        Command::OnCurve { curve, x, y } => {
            let curve = curve.build()?;
            let point = parse_point(x, y, &curve)?;
            Ok(vec![point.is_on_curve().to_string()])
        }
        Command::Add {
            curve,
            x1,
            y1,
            x2,
            y2,
            identity_left,
            identity_right,
        } => {
            let curve = curve.build()?;
            let lhs = Point::parse_with_identity(x1, y1, &curve, *identity_left)
                .with_context(|| format!("invalid point ({x1}, {y1})"))?;
            let rhs = Point::parse_with_identity(x2, y2, &curve, *identity_right)
                .with_context(|| format!("invalid point ({x2}, {y2})"))?;
            for (side, point) in [("left", &lhs), ("right", &rhs)] {
                if !point.is_on_curve() {
                    tracing::warn!(%point, "{side} operand is not on the curve");
                }
            }
            let sum = lhs.add(&rhs)?;
            Ok(vec![render_point(&sum, format)])
        }
        Command::Double { curve, x, y } => {
            let curve = curve.build()?;
            let point = parse_point(x, y, &curve)?;
            if !point.is_on_curve() {
                tracing::warn!(%point, "operand is not on the curve");
            }
            Ok(vec![render_point(&point.double()?, format)])
        }
        Command::Generator { curve } => {
            let generator = curve
                .curve
                .generator()
                .with_context(|| format!("curve '{}' has no standard generator", curve.curve))?;
            Ok(vec![render_point(&generator, format)])
        }
        Command::Selftest => selftest(format),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match execute(&args.command, args.format) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            // Bad numerals are usage errors, like clap's own.
            let usage = matches!(
                err.downcast_ref::<ecgroup_core::Error>(),
                Some(ecgroup_core::Error::MalformedInput(_))
            );
            std::process::exit(if usage { 2 } else { 1 });
        }
    }
}
