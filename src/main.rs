use clap::Parser;
use imageset_list::channels::ChannelNames;
use imageset_list::{manifest, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imageset-list")]
#[command(about = "Generates a CellProfiler-style image set list CSV")]
#[command(long_about = "\
Generates a CellProfiler-style image set list CSV

Recursively searches the input directory for .tif/.tiff exports, parses the
acquisition metadata encoded in each file name, and writes one CSV row per
imaged site with the per-channel file names, paths and file: URLs.

File name grammar:

  250101-P013839_B02_s4_w2.tif
  ^date  ^barcode ^well ^site ^channel

Names without the leading YYMMDD- date still parse; today's date is used
instead and a warning is printed per file. Thumbnails (*_thumb*) are skipped.
A file matching neither grammar aborts the run before anything is written.

The output file is named ImageSetList_<barcode>.csv and its path is printed
on success.")]
#[command(version)]
struct Cli {
    /// Input directory to search recursively for images
    #[arg(short, long, alias = "input_dir")]
    input_dir: PathBuf,

    /// Output directory where the image set file is placed
    #[arg(short, long, alias = "output_dir")]
    output_dir: PathBuf,

    /// Barcode override, replaces the barcode parsed from every file name
    #[arg(short, long)]
    barcode: Option<String>,

    /// Comma-separated channel names, assigned in order to w1,w2,w3...
    /// Only as many channel columns are created as names given.
    /// Default: HOECHST,SYTO,MITO,CONCAVALIN,PHALLOIDINandWGA
    #[arg(short, long, alias = "ch_names")]
    ch_names: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let result = scan::scan(&cli.input_dir, cli.barcode.as_deref())?;
    for warning in &result.warnings {
        eprintln!("WARNING: {warning}");
    }

    let channels = match &cli.ch_names {
        Some(list) => ChannelNames::from_list(list),
        None => ChannelNames::default(),
    };

    let list = manifest::render(&result.index, &channels);
    let path = list.write_to(&cli.output_dir)?;
    println!("{}", path.display());

    Ok(())
}
