use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use sumomo::SystemDictionaryBuilder;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "compile",
    about = "A program to compile the system dictionary."
)]
struct Args {
    /// System lexicon files (*.csv). Specify the option repeatedly for multiple files.
    #[clap(short = 'l', long, required = true)]
    lexicon_in: Vec<PathBuf>,

    /// Matrix definition file (matrix.def).
    #[clap(short = 'm', long)]
    matrix_in: PathBuf,

    /// Unknown word definition file (unk.def).
    #[clap(short = 'u', long)]
    unk_in: PathBuf,

    /// Character definition file (char.def).
    #[clap(short = 'c', long)]
    char_in: PathBuf,

    /// File to which the binary dictionary is output.
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    eprintln!("Compiling the system dictionary...");
    let start = Instant::now();
    let mut builder = SystemDictionaryBuilder::new();
    for lexicon_in in &args.lexicon_in {
        eprintln!("Reading {lexicon_in:?}");
        builder = builder.lexicon_from_reader(File::open(lexicon_in)?)?;
    }
    let dict = builder.build(
        File::open(args.matrix_in)?,
        File::open(args.char_in)?,
        File::open(args.unk_in)?,
    )?;
    eprintln!("{} seconds", start.elapsed().as_secs_f64());
    eprintln!("{} words", dict.num_words());

    eprintln!("Writing the system dictionary...: {:?}", &args.sysdic_out);
    let mut writer = BufWriter::new(File::create(args.sysdic_out)?);
    let num_bytes = dict.write(&mut writer)?;
    eprintln!("{} MiB", num_bytes as f64 / (1024. * 1024.));

    Ok(())
}
