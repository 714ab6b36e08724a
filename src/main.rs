fn main() {
    std::process::exit(task_tracker::cli::run_cli());
}
