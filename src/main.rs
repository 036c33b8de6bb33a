fn main() {
    std::process::exit(mcinstall_lib::cli::run_cli());
}
