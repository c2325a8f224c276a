use log::error;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = clasher_lib::run() {
        error!("Clasher failed: {e}");
        std::process::exit(1);
    }
}
