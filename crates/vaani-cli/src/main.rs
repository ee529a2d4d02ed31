//! vaani CLI — recitation companion server and client.
//!
//! ```text
//! vaani serve [--port 2004] [--host 127.0.0.1] [--scripture-url URL] [--synth-url URL]
//! vaani verse 2 47 [--server http://localhost:2004]
//! vaani chapters / today [--server ...]
//! vaani say 2 47 [--out verse.wav] [--server ...]
//! vaani phonetics "ॐ नमः शिवाय"
//! ```

use std::io::Cursor;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vaani_lib::scripture::ScriptureClient;
use vaani_lib::server::{self, AppState};
use vaani_lib::synth::SynthClient;
use vaani_lib::vaani_core::phonetics::transliterate;
use vaani_lib::vaani_core::types::{
    ChapterSummary, ScriptureConfig, SynthConfig, Verse, VerseOfTheDay,
};

/// vaani — Gita verses and Sanskrit recitation audio
#[derive(Parser)]
#[command(name = "vaani", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the vaani API server
    Serve {
        /// Listen port
        #[arg(long, default_value = "2004")]
        port: u16,
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Vedic Scriptures JSON source
        #[arg(
            long,
            env = "VAANI_SCRIPTURE_URL",
            default_value = "https://vedicscriptures.github.io"
        )]
        scripture_url: String,
        /// Speech-synthesis bridge server
        #[arg(long, env = "VAANI_SYNTH_URL", default_value = "http://127.0.0.1:8000")]
        synth_url: String,
    },
    /// Fetch and print one verse
    Verse {
        chapter: u32,
        verse: u32,
        #[arg(long, default_value = "http://localhost:2004")]
        server: String,
    },
    /// List all chapters
    Chapters {
        #[arg(long, default_value = "http://localhost:2004")]
        server: String,
    },
    /// Print the verse of the day
    Today {
        #[arg(long, default_value = "http://localhost:2004")]
        server: String,
    },
    /// Synthesize a verse and play it (or save it with --out)
    Say {
        chapter: u32,
        verse: u32,
        /// Write the WAV here instead of playing it
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value = "http://localhost:2004")]
        server: String,
    },
    /// Print the phonetic form of Devanagari text (local, no server)
    Phonetics {
        text: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            scripture_url,
            synth_url,
        } => {
            let state = AppState {
                scripture: ScriptureClient::new(ScriptureConfig {
                    base_url: scripture_url,
                    ..Default::default()
                }),
                synth: SynthClient::new(SynthConfig {
                    base_url: synth_url,
                    ..Default::default()
                }),
            };

            server::serve(&host, port, state).await.expect("server error");
        }

        Command::Verse {
            chapter,
            verse,
            server,
        } => {
            let v: Verse = fetch_json(&format!("{server}/api/v1/slok/{chapter}/{verse}")).await;
            print_verse(&v);
        }

        Command::Chapters { server } => {
            let chapters: Vec<ChapterSummary> =
                fetch_json(&format!("{server}/api/v1/chapters")).await;
            for ch in chapters {
                println!(
                    "{:2}. {} — {} ({} verses)",
                    ch.chapter_number, ch.name, ch.translation, ch.verses_count
                );
            }
        }

        Command::Today { server } => {
            let v: VerseOfTheDay = fetch_json(&format!("{server}/api/v1/verse-of-the-day")).await;
            println!("Verse of the day for {}:\n", v.date);
            print_verse(&v.verse);
        }

        Command::Say {
            chapter,
            verse,
            out,
            server,
        } => {
            let v: Verse = fetch_json(&format!("{server}/api/v1/slok/{chapter}/{verse}")).await;

            let resp = reqwest::Client::new()
                .post(format!("{server}/api/v1/tts/generate"))
                .json(&serde_json::json!({ "text": v.slok }))
                .send()
                .await
                .expect("request failed");
            if !resp.status().is_success() {
                eprintln!("synthesis failed: {}", resp.text().await.unwrap_or_default());
                std::process::exit(1);
            }
            let wav = resp.bytes().await.expect("failed to read audio").to_vec();

            match out {
                Some(path) => {
                    std::fs::write(&path, &wav).expect("failed to write file");
                    println!("wrote {} bytes to {}", wav.len(), path.display());
                }
                None => play_wav(wav),
            }
        }

        Command::Phonetics { text } => {
            println!("{}", transliterate(&text));
        }
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> T {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .expect("request failed");
    if !resp.status().is_success() {
        eprintln!("error: {}", resp.text().await.unwrap_or_default());
        std::process::exit(1);
    }
    resp.json().await.expect("unexpected response shape")
}

fn print_verse(v: &Verse) {
    println!("Bhagavad Gita {}.{}\n", v.chapter, v.verse);
    println!("{}\n", v.slok);
    println!("{}", v.transliteration);
    if let Some(hindi) = &v.hindi_translation {
        println!("\n{hindi}");
    }
    if let Some(english) = &v.english_translation {
        println!("\n{english}");
    }
}

fn play_wav(bytes: Vec<u8>) {
    let (_stream, handle) =
        rodio::OutputStream::try_default().expect("failed to open audio output");
    let sink = rodio::Sink::try_new(&handle).expect("failed to create sink");
    let source = rodio::Decoder::new(Cursor::new(bytes)).expect("failed to decode audio");
    sink.append(source);
    sink.sleep_until_end();
}
