use geojson2osm::filter;
use geojson2osm::process;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "geojson2osm",
    about = "Convert GeoJSON documents into OSM-style map primitives"
)]
struct Opt {
    /// GeoJSON file to import
    #[structopt(parse(from_os_str))]
    file: PathBuf,
    /// Tag selector, e.g. "amenity~fountain+tourism,amenity~townhall"
    #[structopt(short, long)]
    tags: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();
    let groups = opt.tags.as_deref().map(filter::parse);
    let file = File::open(&opt.file)?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    process(file, &mut writer, groups.as_deref())?;
    Ok(())
}
