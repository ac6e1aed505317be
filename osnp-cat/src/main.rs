use clap::Parser;
use osnp_cat::FrameParser;

/// `cat` for OSNP frames.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The OSNP frame to parse, in hexadecimal, check sequence included.
    #[clap(value_parser(clap::builder::NonEmptyStringValueParser::new()))]
    input: String,
}

fn main() {
    let args = Args::parse();

    match FrameParser::parse_hex(&args.input) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
