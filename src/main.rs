//! wfhtracker main entrypoint.

use wfhtracker::run;
use wfhtracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
