fn main() -> std::process::ExitCode {
    normcoord::run()
}
