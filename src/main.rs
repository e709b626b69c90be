fn main() {
    eduspark::app::cli::run();
}
