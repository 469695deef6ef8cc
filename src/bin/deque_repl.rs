//! Interactive harness: reads deque commands from stdin, one per line.

use std::io;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    block_deque::repl::run(stdin.lock(), stdout.lock())
}
