//! Headless ROM runner: execute a ROM for a number of frames and report the
//! frame-buffer checksum and final machine state, or trace instructions.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use kinescope::nes::Nes;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone)]
struct Config {
    rom: PathBuf,
    frames: u32,
    trace: Option<u32>,
}

fn parse_args() -> Result<Config> {
    let mut rom = None;
    let mut frames = 60;
    let mut trace = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args
                    .next()
                    .context("--frames requires an integer, e.g. --frames 600")?;
                frames = value
                    .parse::<u32>()
                    .with_context(|| format!("invalid --frames value: {value}"))?;
            }
            "--trace" => {
                let value = args
                    .next()
                    .context("--trace requires an instruction count, e.g. --trace 100")?;
                trace = Some(
                    value
                        .parse::<u32>()
                        .with_context(|| format!("invalid --trace value: {value}"))?,
                );
            }
            "--help" | "-h" => {
                println!("usage: rom_runner <rom.nes> [--frames N] [--trace N]");
                std::process::exit(0);
            }
            other => {
                rom = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Config {
        rom: rom.context("usage: rom_runner <rom.nes> [--frames N] [--trace N]")?,
        frames,
        trace,
    })
}

fn frame_sha1(nes: &Nes) -> String {
    let mut hasher = Sha1::new();
    hasher.update(nes.frame_buffer());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

fn main() -> Result<()> {
    let cfg = parse_args()?;

    let mut nes = Nes::new();
    nes.load_rom_from_path(&cfg.rom)?;

    if let Some(instructions) = cfg.trace {
        for _ in 0..instructions {
            println!("{}", nes.trace_line());
            nes.step_instruction();
        }
        return Ok(());
    }

    let started = Instant::now();
    for _ in 0..cfg.frames {
        nes.run_frame();
    }
    let elapsed = started.elapsed();

    let (a, x, y, p, sp, pc) = nes.cpu_regs();
    let counters = nes.debug_counters();
    println!("rom:        {}", cfg.rom.display());
    println!("mapper:     {}", nes.mapper_name());
    println!(
        "frames:     {} in {:.2?} ({:.1} fps)",
        cfg.frames,
        elapsed,
        cfg.frames as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    println!("frame sha1: {}", frame_sha1(&nes));
    println!("cpu:        A={a:02X} X={x:02X} Y={y:02X} P={p:02X} SP={sp:02X} PC={pc:04X}");
    println!(
        "cycles:     {} (steps={} nmi={} irq={} dma={})",
        nes.total_cycles(),
        counters.cpu_steps,
        counters.nmi_serviced,
        counters.irq_serviced,
        counters.dma_transfers
    );

    Ok(())
}
