use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::{
    fs,
    path::{Path, PathBuf},
};
use ttf2gfx::{
    convert, encode, preview, ConvertOptions, FontPack, HeaderFile, OutputMode, RowLayout,
    DEFAULT_PIXEL_HEIGHT,
};

#[derive(Parser)]
#[command(
    name = "ttf2gfx",
    version,
    about = "Convert TrueType/OpenType fonts into Adafruit GFX bitmap fonts"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert a font into a GFX header file
    Convert {
        #[arg(short, long)]
        input: PathBuf,
        /// Output file or directory (defaults to <name>.h in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        size: SizeArg,
        #[arg(long, value_enum, default_value = "gfx")]
        layout: Layout,
        /// Print the header instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Print font metadata and pack statistics
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        size: SizeArg,
    },
    /// Render the trimmed glyphs as text
    Preview {
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        size: SizeArg,
        /// Glyphs per row
        #[arg(long, default_value_t = 16)]
        columns: usize,
    },
}

#[derive(clap::Args)]
struct SizeArg {
    /// Glyph cell height in pixels
    #[arg(short, long, default_value_t = DEFAULT_PIXEL_HEIGHT, value_parser = clap::value_parser!(u32).range(1..=255))]
    size: u32,
}

#[derive(Copy, Clone, ValueEnum)]
enum Layout {
    /// Rows packed back to back (Adafruit GFX)
    Gfx,
    /// Every row padded to a whole byte
    Rows,
}

impl From<Layout> for RowLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Gfx => RowLayout::Gfx,
            Layout::Rows => RowLayout::RowAligned,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Cmd::Convert {
            input,
            output,
            size,
            layout,
            stdout,
        } => {
            let options = ConvertOptions {
                layout: layout.into(),
                ..ConvertOptions::default().with_pixel_height(size.size)
            };
            let pack = load_pack(&input, &options)?;
            let encoded = encode(&pack, &options.encode_options());
            let header = HeaderFile::new(&encoded);
            if stdout {
                print!("{}", header.content);
                return Ok(());
            }
            let path = output_path(output, &header);
            fs::write(&path, &header.content)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Converted {} -> {} ({} glyphs, {} bitmap bytes)",
                input.display(),
                path.display(),
                encoded.glyphs.len(),
                encoded.bitmap.len()
            );
        }
        Cmd::Inspect { input, size } => {
            let options = ConvertOptions::default().with_pixel_height(size.size);
            let pack = load_pack(&input, &options)?;
            let encoded = encode(&pack, &options.encode_options());
            let meta = &pack.meta;
            println!("Font: {}", meta.name);
            if let Some(version) = &meta.version {
                println!("  Version: {version}");
            }
            println!(
                "  Size: {}px ({}x{} dpi)",
                meta.size.points, meta.size.resolution_x, meta.size.resolution_y
            );
            println!("  Ascent: {}  Descent: {}", meta.ascent, meta.descent);
            println!(
                "  Glyphs: {} of {} requested",
                pack.glyph_count(),
                meta.total_chars
            );
            println!("  Bounds: {}x{}", meta.bounds.width, meta.bounds.height);
            println!("  Identifier: {}", encoded.name);
            println!("  Bitmap bytes: {}", encoded.bitmap.len());
            println!("  yAdvance: {}", encoded.y_advance);
        }
        Cmd::Preview {
            input,
            size,
            columns,
        } => {
            let options = ConvertOptions::default().with_pixel_height(size.size);
            let pack = load_pack(&input, &options)?;
            print!("{}", preview::render_pack(&pack, columns));
        }
    }
    Ok(())
}

fn load_pack(input: &Path, options: &ConvertOptions) -> Result<FontPack> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    log::debug!("read {} bytes from {}", bytes.len(), input.display());
    convert(&bytes, options, OutputMode::Pack)?
        .into_pack()
        .ok_or_else(|| anyhow!("conversion did not produce a font pack"))
}

fn output_path(output: Option<PathBuf>, header: &HeaderFile) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(header.file_name()),
        Some(path) => path,
        None => PathBuf::from(header.file_name()),
    }
}
