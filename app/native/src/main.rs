//! Wallgrid - command-line host for the thumbnail cache and prefetcher.

fn main() {
    if let Err(err) = wallgrid_lib::cli::run() {
        eprintln!("wallgrid: {err}");
        std::process::exit(1);
    }
}
