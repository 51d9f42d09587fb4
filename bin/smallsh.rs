#![forbid(unsafe_code)]

fn main() {
    smallsh::main()
}
