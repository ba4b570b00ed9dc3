fn main() {
    if let Err(e) = timeout_tree_analysis::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
