use neptune_thumb::{library_path, library_status, setting_data};
use std::env;
use std::path::Path;
//
// cargo run --example setting_data [LIB_DIR]
//

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let dir = args.get(1).map(String::as_str).unwrap_or("lib");

    let lib = library_path(Path::new(dir));
    println!("library status: {:?}", library_status(&lib));
    println!("{}", setting_data(&lib));
}
