fn main() {
    mbasic::term::main();
}
