//! vetclinic main entrypoint.

use vetclinic::run;
use vetclinic::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
