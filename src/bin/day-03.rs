extern crate env_logger;
extern crate fabric_claims as fabric;
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;

use failure::Error;
use fabric::{read_claims, survey, Claim, ClaimError, FabricSize};
use itertools::Itertools;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::str::FromStr;
use std::time::Instant;

#[allow(dead_code)]
static TEST_INPUT: &'static str = include_str!("day-03.test");

static USAGE: &'static str = "usage: day-03 [--dimension N | --fit] [--draw] [-v] [PATH]";

#[derive(Debug, Eq, PartialEq)]
struct Opts {
    /// Where to read claims from; `None` or `-` means standard input.
    path: Option<String>,
    size: FabricSize,
    /// Print the fabric after the results.
    draw: bool,
    verbose: bool,
}

impl Default for Opts {
    fn default() -> Opts {
        Opts {
            path: None,
            size: FabricSize::Fit,
            draw: false,
            verbose: false,
        }
    }
}

impl Opts {
    fn parse<I: IntoIterator<Item=OsString>>(args: I) -> Result<Opts, ClaimError> {
        let mut opts = Opts::default();
        let mut it = args.into_iter();

        while let Some(arg) = it.next() {
            let arg = arg
                .into_string()
                .map_err(|_| ClaimError::usage("non-utf8 argument"))?;

            match arg.as_str() {
                "--dimension" => {
                    let dimension = it
                        .next()
                        .and_then(|d| d.into_string().ok())
                        .ok_or_else(|| ClaimError::usage("missing argument to `--dimension`"))?;
                    let dimension = usize::from_str(&dimension).map_err(|_| {
                        ClaimError::usage(format!("bad argument to `--dimension`: {:?}", dimension))
                    })?;
                    opts.size = FabricSize::Fixed(dimension);
                }
                "--fit" => {
                    opts.size = FabricSize::Fit;
                }
                "--draw" => {
                    opts.draw = true;
                }
                "-v" | "--verbose" => {
                    opts.verbose = true;
                }
                "-h" | "--help" => {
                    return Err(ClaimError::usage(USAGE));
                }
                other if other.starts_with('-') && other != "-" => {
                    return Err(ClaimError::usage(format!("unsupported argument: {}\n{}", other, USAGE)));
                }
                other => {
                    if opts.path.is_some() {
                        return Err(ClaimError::usage(format!("more than one input given\n{}", USAGE)));
                    }
                    opts.path = Some(other.to_owned());
                }
            }
        }

        Ok(opts)
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load(path: Option<&str>) -> Result<Vec<Claim>, ClaimError> {
    match path {
        None | Some("-") => {
            let stdin = io::stdin();
            let claims = read_claims(stdin.lock(), "<stdin>")?;
            Ok(claims)
        }
        Some(path) => {
            let file = File::open(path).map_err(|e| ClaimError::config(path, e))?;
            read_claims(BufReader::new(file), path)
        }
    }
}

fn run() -> Result<(), Error> {
    let opts = Opts::parse(std::env::args_os().skip(1))?;
    init_logging(opts.verbose);
    debug!("{:?}", opts);

    let start = Instant::now();
    let claims = load(opts.path.as_ref().map(String::as_str))?;
    let survey = survey(&claims, opts.size)?;
    let elapsed = start.elapsed();

    println!("Time taken {} seconds.", elapsed.as_secs_f64());
    println!("{}", survey.overlaps);
    match survey.solo {
        Some(id) => println!("{}", id),
        None => {
            warn!("every claim overlaps some other claim");
            println!("none");
        }
    }

    if survey.flags.solos().nth(1).is_some() {
        warn!("claims {} all overlap nothing; reporting the lowest id",
              survey.flags.solos().join(", "));
    }

    if opts.draw {
        let stdout = io::stdout();
        let mut handle = BufWriter::new(stdout.lock());
        write!(handle, "{}", survey.fabric)?;
        handle.flush()?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("day-03: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
fn args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

#[test]
fn test_example() -> Result<(), Error> {
    let claims = read_claims(TEST_INPUT.as_bytes(), "day-03.test")?;
    let survey = survey(&claims, FabricSize::Fixed(1000))?;
    assert_eq!((survey.overlaps, survey.solo), (4, Some(3)));
    Ok(())
}

#[test]
fn test_opts() -> Result<(), Error> {
    assert_eq!(Opts::parse(args(&[]))?, Opts::default());
    assert_eq!(
        Opts::parse(args(&["--dimension", "1000", "--draw", "-v", "input.txt"]))?,
        Opts {
            path: Some("input.txt".to_owned()),
            size: FabricSize::Fixed(1000),
            draw: true,
            verbose: true,
        }
    );
    assert_eq!(Opts::parse(args(&["--dimension", "5", "--fit", "-"]))?.size, FabricSize::Fit);
    assert_eq!(Opts::parse(args(&["-"]))?.path, Some("-".to_owned()));

    assert!(Opts::parse(args(&["--dimension"])).is_err());
    assert!(Opts::parse(args(&["--dimension", "big"])).is_err());
    assert!(Opts::parse(args(&["--frobnicate"])).is_err());
    assert!(Opts::parse(args(&["-x"])).is_err());
    assert!(Opts::parse(args(&["a.txt", "b.txt"])).is_err());
    Ok(())
}

#[test]
fn test_load_missing_file() {
    match load(Some("/no/such/claims.txt")) {
        Err(ClaimError::Config { ref path, .. }) => assert_eq!(path, "/no/such/claims.txt"),
        other => panic!("expected config error, got {:?}", other),
    }
}
