//! Tallies object labels across a video from a recorded detection stream.
//!
//! Usage:
//!   cargo run --features opencv-source --example scan -- <video> <dets-file> [--rate <fps>]
//!
//! The dets file holds one line per sampled frame, `<offset_ms>: <json>`,
//! as written by a detection dump pass. Sample rate defaults to 1.0 frames
//! analyzed per second of video.

use vidtally::{tally_file, ReplayDetector, SampleRate};

fn usage() -> ! {
    eprintln!("usage: scan <video> <dets-file> [--rate <fps>]");
    std::process::exit(2);
}

fn main() {
    env_logger::init();

    let mut video = None;
    let mut dets = None;
    let mut rate = 1.0f64;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rate" => match args.next().and_then(|v| v.parse().ok()) {
                Some(v) => rate = v,
                None => usage(),
            },
            _ if video.is_none() => video = Some(arg),
            _ if dets.is_none() => dets = Some(arg),
            _ => usage(),
        }
    }

    let (video, dets) = match (video, dets) {
        (Some(v), Some(d)) => (v, d),
        _ => usage(),
    };

    let rate = match SampleRate::per_second(rate) {
        Ok(rate) => rate,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let mut detector = match ReplayDetector::from_path(&dets) {
        Ok(detector) => detector,
        Err(err) => {
            eprintln!("{}: {}", dets, err);
            std::process::exit(2);
        }
    };

    match tally_file(&video, &mut detector, rate) {
        Ok(tally) => {
            if tally.is_empty() {
                println!(
                    "no detections ({} frames decoded, {} analyzed)",
                    tally.frames_decoded, tally.frames_processed
                );
            } else {
                for (label, count) in tally.sorted() {
                    println!("{}: {}", label, count);
                }
            }

            if tally.frames_failed > 0 {
                eprintln!("{} frame(s) skipped on detector faults", tally.frames_failed);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
