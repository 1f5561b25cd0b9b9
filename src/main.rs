fn main() {
    promptscript::cli::run();
}
