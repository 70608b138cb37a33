//! Sprite Demo: Composites a transparent sprite over a tiled backdrop.
//!
//! Each frame is rebuilt in an off-screen buffer and blitted to the terminal
//! in delta mode, so only the cells the sprite moved through are redrawn.
//!
//! Run with `RUST_LOG=cellblit=debug` to see per-blit statistics on stderr.

use cellblit::{AttrOptions, BlitOptions, BlitStats, Canvas, FrameBuffer, IterMode, Terminal};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const SPRITE: &str = r"  .--.
 / oo \
|  ><  |
 \____/";

const TILE: &str = "·  ·\n ·· ";

const FRAMES: i32 = 120;

fn main() -> cellblit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut term = Terminal::stdout()?;
    let (width, height) = (term.width(), term.height());

    let backdrop = FrameBuffer::from_text(TILE, &AttrOptions::fg("blue"), None, None);
    let sprite = FrameBuffer::from_text(
        SPRITE,
        &AttrOptions {
            bold: true,
            ..AttrOptions::fg("bright-yellow").with_bg("black")
        },
        Some(' '),
        None,
    );
    let mut frame = FrameBuffer::new(width, height);

    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut total = BlitStats::default();
    let span = i32::from(width.saturating_sub(sprite.width()).max(1));
    for step in 0..FRAMES {
        backdrop.blit_to_buffer(&mut frame, &BlitOptions::new().with_mode(IterMode::Tile));

        let x = (step * 2) % span;
        let y = i32::from(height / 2) - 2;
        sprite.blit_to_buffer(&mut frame, &BlitOptions::new().with_offset(x, y).with_blending(true));

        let stats = frame.blit_to_terminal(&mut term, &BlitOptions::new().with_delta(true))?;
        total.cells_touched += stats.cells_touched;
        total.sink_writes += stats.sink_writes;

        std::thread::sleep(Duration::from_millis(30));
    }

    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;

    let path = std::env::temp_dir().join("cellblit_sprite_demo.sb");
    frame.save(&path)?;
    let reloaded = FrameBuffer::load(&path)?;

    println!("Cellblit Sprite Demo");
    println!("====================");
    println!("Frames:        {FRAMES}");
    println!("Cells drawn:   {}", total.cells_touched);
    println!("Sink writes:   {}", total.sink_writes);
    println!(
        "Last frame:    {} ({}x{})",
        path.display(),
        reloaded.width(),
        reloaded.height()
    );

    Ok(())
}
