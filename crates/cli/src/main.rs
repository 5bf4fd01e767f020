fn main() {
    std::process::exit(discogen_cli::run());
}
