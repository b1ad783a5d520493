use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::str::FromStr;

use sumomo::ipadic::IpadicToken;
use sumomo::{Dictionary, Tokenizer};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
enum OutputMode {
    Mecab,
    Wakati,
    Ipadic,
}

impl FromStr for OutputMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "mecab" => Ok(Self::Mecab),
            "wakati" => Ok(Self::Wakati),
            "ipadic" => Ok(Self::Ipadic),
            _ => Err("Could not parse a mode"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Predicts morphemes")]
struct Args {
    /// System dictionary built by the compile command.
    #[clap(short = 'i', long)]
    sysdic_in: String,

    /// Output mode. Choices are mecab, wakati, and ipadic.
    #[clap(short = 'O', long, default_value = "mecab")]
    output_mode: OutputMode,

    /// Maximum length of unknown words grouped by their character category.
    /// 0 means no limit.
    #[clap(long, default_value = "0")]
    max_grouping_len: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let reader = BufReader::new(File::open(args.sysdic_in)?);
    let dict = Dictionary::read(reader)?;

    let tokenizer = Tokenizer::new(dict).max_grouping_len(args.max_grouping_len);
    let mut worker = tokenizer.new_worker();

    eprintln!("Ready to tokenize");

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        worker.reset_sentence(line);
        worker.tokenize()?;
        match args.output_mode {
            OutputMode::Mecab => {
                for i in 0..worker.num_tokens() {
                    let t = worker.token(i);
                    out.write_all(t.surface().as_bytes())?;
                    out.write_all(b"\t")?;
                    out.write_all(t.feature().as_bytes())?;
                    out.write_all(b"\n")?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Wakati => {
                for i in 0..worker.num_tokens() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(worker.token(i).surface().as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Ipadic => {
                for t in worker.token_iter() {
                    let t = IpadicToken::from_token(&t);
                    writeln!(
                        &mut out,
                        "{}\t{:?}\t{}\t{},{},{},{},{},{},{},{},{}",
                        t.surface_form,
                        t.word_type,
                        t.word_position,
                        t.pos,
                        t.pos_detail_1,
                        t.pos_detail_2,
                        t.pos_detail_3,
                        t.conjugated_type,
                        t.conjugated_form,
                        t.basic_form,
                        t.reading.as_deref().unwrap_or("*"),
                        t.pronunciation.as_deref().unwrap_or("*"),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
        }
    }
    out.flush()?;

    Ok(())
}
