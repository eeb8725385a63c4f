use xtask::scan::{run_cli, Marker};

fn main() {
    run_cli(Marker::Todo);
}
