//! NES emulator entry point.
//!
//! Loads a cartridge and presents the core's framebuffer in a window.
//! Usage: `velora path/to/game.nes`
//!
//! The core never touches the screen itself: each display frame we run
//! `Nes::draw_frame` (240 scanlines of interleaved CPU/PPU work plus vblank)
//! and copy the published RGBA buffer into the window. Pacing targets the NTSC
//! frame rate of ~60 Hz (see the NESdev
//! [cycle reference chart](https://www.nesdev.org/wiki/Cycle_reference_chart)).

use std::env;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use ansi_term::Colour::Red;
use minifb::{Key, Window, WindowOptions};
use velora::{cartridge::cartridge::Cartridge, nes::Nes};

/// NES NTSC frame rate is ~60.0988 Hz; target 16.67 ms per display frame.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

const WIDTH: usize = 256;
const HEIGHT: usize = 240;

fn main() {
    let path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: velora <rom.nes>");
            process::exit(2);
        }
    };

    let cart = match Cartridge::load(&path) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("{} {}", Red.bold().paint("ERROR"), err);
            process::exit(1);
        }
    };

    let mut nes = Nes::new(cart);
    nes.reset();

    let mut window = Window::new(
        format!(
            "{} - Velora",
            Path::new(&path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("ROM")
        )
        .as_str(),
        WIDTH,
        HEIGHT,
        WindowOptions {
            resize: true,
            scale: minifb::Scale::FitScreen,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )
    .expect("Failed to create window");

    window.set_target_fps(60);

    let mut pixels = vec![0u32; WIDTH * HEIGHT];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        nes.draw_frame();

        // Core publishes RGBA bytes; minifb wants 0RGB words.
        for (pixel, rgba) in pixels.iter_mut().zip(nes.last_frame().chunks_exact(4)) {
            *pixel =
                ((rgba[0] as u32) << 16) | ((rgba[1] as u32) << 8) | rgba[2] as u32;
        }
        window
            .update_with_buffer(&pixels, WIDTH, HEIGHT)
            .expect("Failed to update window");

        // Pace to ~60 fps so we don't burn CPU (emulation is far faster than a real NES).
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }
}
