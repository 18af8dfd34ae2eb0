//! Capture and replay CLI for tracking recordings.

use std::process;

use leapstream::recording::Error;
use leapstream::source::{DEFAULT_SOCKET_URL, SocketSource, SourceError, TrackingListener};
use leapstream::{Frame, Mode, Recorder, RecorderOptions};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        usage(args.first().map(String::as_str).unwrap_or("leapstream"));
        process::exit(1);
    }

    let command = args[1].as_str();
    let path = args[2].clone();
    let rest = &args[3..];

    let result = match command {
        "record" => record(&path, rest),
        "replay" => replay(&path, rest),
        _ => {
            usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {program} record <file> [--url <ws-url>] [--no-compress]");
    eprintln!("       {program} replay <file> [--frames <n>] [--no-loop]");
    eprintln!();
    eprintln!("Capture the live tracking stream to a file, or replay a capture.");
    eprintln!();
    eprintln!("Record options:");
    eprintln!("  --url <ws-url>   Tracking service endpoint (default: {DEFAULT_SOCKET_URL})");
    eprintln!("  --no-compress    Write the stream without the gzip envelope");
    eprintln!();
    eprintln!("Replay options:");
    eprintln!("  --frames <n>     Number of frames to read (default: 100)");
    eprintln!("  --no-loop        Freeze on the final frame instead of looping");
}

/// Capture frames from the live socket until the service closes the
/// stream, writing each one through the recorder.
struct CaptureListener<'a> {
    recorder: &'a mut Recorder,
    captured: u64,
    write_errors: u64,
}

impl TrackingListener for CaptureListener<'_> {
    fn on_connect(&mut self) {
        println!("Capturing to {} ...", self.recorder.path().display());
    }

    fn on_frame(&mut self, frame: Frame) {
        match self.recorder.write(&frame) {
            Ok(()) => self.captured += 1,
            Err(err) => {
                self.write_errors += 1;
                eprintln!("write failed for frame {}: {err}", frame.id);
            }
        }
    }

    fn on_close(&mut self) {
        println!("Stream closed after {} frames.", self.captured);
    }
}

fn record(path: &str, flags: &[String]) -> Result<(), Error> {
    let mut url = DEFAULT_SOCKET_URL.to_string();
    let mut options = RecorderOptions::default();

    let mut flags = flags.iter();
    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--no-compress" => options.compress = false,
            "--url" => match flags.next() {
                Some(value) => url = value.clone(),
                None => {
                    eprintln!("--url needs a value");
                    process::exit(1);
                }
            },
            other => {
                eprintln!("unknown record flag: {other}");
                process::exit(1);
            }
        }
    }

    let mut recorder = Recorder::new(Mode::Record, path, options)?;
    recorder.enable();

    // No live stream, no capture session.
    let mut source = SocketSource::connect(&url).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(1);
    });

    let mut listener = CaptureListener {
        recorder: &mut recorder,
        captured: 0,
        write_errors: 0,
    };
    let run_result: Result<(), SourceError> = source.run(&mut listener);

    let captured = listener.captured;
    let write_errors = listener.write_errors;
    recorder.close()?;

    if let Err(err) = run_result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    println!("Wrote {captured} frames ({write_errors} write errors).");
    Ok(())
}

fn replay(path: &str, flags: &[String]) -> Result<(), Error> {
    let mut frames: u64 = 100;
    let mut options = RecorderOptions::default();

    let mut flags = flags.iter();
    while let Some(flag) = flags.next() {
        match flag.as_str() {
            "--no-loop" => options.looping = false,
            "--frames" => match flags.next().and_then(|v| v.parse().ok()) {
                Some(value) => frames = value,
                None => {
                    eprintln!("--frames needs a number");
                    process::exit(1);
                }
            },
            other => {
                eprintln!("unknown replay flag: {other}");
                process::exit(1);
            }
        }
    }

    let mut recorder = Recorder::new(Mode::Replay, path, options)?;
    recorder.enable();

    for _ in 0..frames {
        let frame = recorder.next_frame()?;
        println!("{frame}");
    }
    recorder.close()?;
    Ok(())
}
