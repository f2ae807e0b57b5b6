//! # mp-db CLI
//!
//! Interactive SQL parse-and-validate shell.

use std::io;

fn main() {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = mpdb::run(std::env::args_os(), &mut input, &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
