use std::io;
use std::process;

use xrinfo::graphics::Backend;
use xrinfo::loader::Loader;
use xrinfo::report;

fn main() {
    // The vulkan feature only widens the default backend set; both backends
    // are always available through the library
    let backends: &[Backend] = if cfg!(feature = "vulkan") {
        &[Backend::OpenGL, Backend::Vulkan]
    } else {
        &[Backend::OpenGL]
    };

    let loader = match Loader::load() {
        Ok(loader) => loader,
        Err(err) => {
            println!("{}", err);
            process::exit(1);
        }
    };

    let desc = report::ReportType {
        backends,
        ..report::ReportType::default()
    };

    if let Err(err) = report::run(&loader, &desc, &mut io::stdout()) {
        println!("{}", err);
        process::exit(1);
    }
}
