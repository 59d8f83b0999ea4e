use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use image::RgbaImage;
use snakebot::config::BotConfig;
use snakebot::planner::choose_move;
use snakebot::render::{reply_text, scores_text};
use snakebot::vision::{autocrop, read_board, split_cells, BoardDimensions};
use tracing::{info, Level};

/// Reads a board screenshot from disk and prints what the bot would reply
#[derive(Parser)]
#[command(name = "snakebot")]
struct Args {
    /// png screenshot of the board
    image: PathBuf,

    /// image description, must contain the board size as WxH
    #[arg(long)]
    alt: String,

    /// json settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// write every cell to this directory as cell_<x>_<y>.png
    #[arg(long)]
    dump_cells: Option<PathBuf>,

    /// print the board as json instead of the reply
    #[arg(long)]
    json: bool,

    /// more logging, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn dump_cells(image: &RgbaImage, alt: &str, dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let bounds = autocrop(image)?;
    let cells = split_cells(bounds, BoardDimensions::parse(alt)?)?;
    for (y, row) in cells.iter().enumerate() {
        for (x, rect) in row.iter().enumerate() {
            let cell = image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height);
            cell.to_image()
                .save(dir.join(format!("cell_{}_{}.png", x, y)))?;
        }
    }
    info!(dir = %dir.display(), "dumped cells");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };

    let image = image::open(&args.image)?.to_rgba8();
    info!(path = %args.image.display(), width = image.width(), height = image.height(), "loaded image");

    if let Some(dir) = &args.dump_cells {
        dump_cells(&image, &args.alt, dir)?;
    }

    let board = read_board(&image, &args.alt, &config.palette)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&board.state)?);
        return Ok(());
    }

    let choice = choose_move(&board.state);
    println!("{}", board.state);
    println!("{}", scores_text(&choice));
    println!("must turn: {}", choice.must_turn);
    println!();
    println!("{}", reply_text(&board.grid, &choice));
    Ok(())
}
